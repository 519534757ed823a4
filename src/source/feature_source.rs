// ==========================================
// Tangos - feature source trait
// ==========================================
// Boundary to the data-access collaborators (cadastre buildings, road
// registry). Implementations restrict results to the requested bbox or a
// superset of it; the engine applies the exact disk test afterwards.
// ==========================================

use crate::domain::feature::{CandidateFeature, FeatureGeometry};
use crate::domain::types::Crs;
use crate::domain::zone::BoundingBox;
use crate::source::error::SourceResult;
use async_trait::async_trait;

// ==========================================
// FeatureSource Trait
// ==========================================
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Building points within `bbox`
    ///
    /// # Errors
    /// Query failures are returned as errors; "nothing found" is `Ok(vec![])`.
    async fn fetch_buildings(&self, bbox: &BoundingBox, crs: Crs) -> SourceResult<Vec<CandidateFeature>>;

    /// Road segments intersecting `bbox`
    async fn fetch_roads(&self, bbox: &BoundingBox, crs: Crs) -> SourceResult<Vec<CandidateFeature>>;
}

/// Bbox prefilter shared by the bundled sources
///
/// Points must lie in the box, lines must have an overlapping envelope.
/// Malformed geometries pass through so the resolver can record them.
pub fn within_bbox(feature: &CandidateFeature, bbox: &BoundingBox) -> bool {
    if !feature.geometry.is_well_formed() {
        return true;
    }
    match &feature.geometry {
        FeatureGeometry::Point(p) => bbox.contains_xy(p.x(), p.y()),
        FeatureGeometry::Line(line) => {
            BoundingBox::of_coords(line.coords()).is_some_and(|env| bbox.overlaps(&env))
        }
    }
}

// ==========================================
// InMemoryFeatureSource
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeatureSource {
    buildings: Vec<CandidateFeature>,
    roads: Vec<CandidateFeature>,
}

impl InMemoryFeatureSource {
    pub fn new(buildings: Vec<CandidateFeature>, roads: Vec<CandidateFeature>) -> Self {
        Self { buildings, roads }
    }
}

fn select(features: &[CandidateFeature], bbox: &BoundingBox) -> Vec<CandidateFeature> {
    features
        .iter()
        .filter(|f| within_bbox(f, bbox))
        .cloned()
        .collect()
}

#[async_trait]
impl FeatureSource for InMemoryFeatureSource {
    async fn fetch_buildings(&self, bbox: &BoundingBox, _crs: Crs) -> SourceResult<Vec<CandidateFeature>> {
        Ok(select(&self.buildings, bbox))
    }

    async fn fetch_roads(&self, bbox: &BoundingBox, _crs: Crs) -> SourceResult<Vec<CandidateFeature>> {
        Ok(select(&self.roads, bbox))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature::RoadTraffic;
    use geo::Point;

    fn bbox() -> BoundingBox {
        BoundingBox::around(Point::new(0.0, 0.0), 100.0)
    }

    #[test]
    fn test_within_bbox() {
        let inside = CandidateFeature::building("a", "111", Crs::Utm33N, 50.0, 50.0);
        let outside = CandidateFeature::building("b", "111", Crs::Utm33N, 500.0, 0.0);
        let broken = CandidateFeature::building("c", "111", Crs::Utm33N, f64::NAN, 0.0);
        let crossing = CandidateFeature::road(
            "r",
            Crs::Utm33N,
            vec![(-1000.0, 10.0), (1000.0, 10.0)],
            RoadTraffic::default(),
        );

        assert!(within_bbox(&inside, &bbox()));
        assert!(!within_bbox(&outside, &bbox()));
        assert!(within_bbox(&broken, &bbox()));
        assert!(within_bbox(&crossing, &bbox()));
    }

    #[tokio::test]
    async fn test_in_memory_source_filters() {
        let source = InMemoryFeatureSource::new(
            vec![
                CandidateFeature::building("a", "111", Crs::Utm33N, 50.0, 50.0),
                CandidateFeature::building("b", "111", Crs::Utm33N, 500.0, 0.0),
            ],
            vec![],
        );

        let buildings = source.fetch_buildings(&bbox(), Crs::Utm33N).await.unwrap();
        let roads = source.fetch_roads(&bbox(), Crs::Utm33N).await.unwrap();

        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0].id, "a");
        assert!(roads.is_empty());
    }
}
