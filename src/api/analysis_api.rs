// ==========================================
// Tangos - analysis API
// ==========================================
// Flow: prepare zones -> fetch buildings (sensitive bbox) and roads (road
// bbox) concurrently -> resolve -> AnalysisResult -> exports
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AnalysisConfig;
use crate::domain::exposure::AnalysisResult;
use crate::domain::storage::StoragePoint;
use crate::engine::orchestrator::HazardAnalysisEngine;
use crate::export::amrisk::AmriskEncoder;
use crate::export::csv_table;
use crate::source::feature_source::FeatureSource;
use chrono::NaiveDateTime;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// AnalysisApi
// ==========================================
pub struct AnalysisApi {
    engine: Arc<HazardAnalysisEngine>,
    source: Arc<dyn FeatureSource>,
    encoder: AmriskEncoder,
}

impl AnalysisApi {
    pub fn new(engine: Arc<HazardAnalysisEngine>, source: Arc<dyn FeatureSource>, config: &AnalysisConfig) -> Self {
        Self {
            engine,
            source,
            encoder: AmriskEncoder::new(config.export.clone()),
        }
    }

    /// Run a full exposure analysis for one storage point
    ///
    /// # Errors
    /// - `Analysis`: invalid storage point or NEQ (nothing is fetched)
    /// - `Source`: a feature query failed (no partial result)
    pub async fn analyze(&self, storage: StoragePoint) -> ApiResult<AnalysisResult> {
        let prepared = self.engine.prepare(&storage)?;

        let building_bbox = prepared
            .building_query_bbox()
            .ok_or_else(|| ApiError::InvalidInput("sensitive zone missing".to_string()))?;
        let road_bbox = prepared
            .road_query_bbox()
            .ok_or_else(|| ApiError::InvalidInput("road zone missing".to_string()))?;

        debug!(
            building_bbox = %building_bbox.to_query_string(),
            road_bbox = %road_bbox.to_query_string(),
            "Fetching candidate features"
        );

        let (buildings, roads) = futures::try_join!(
            self.source.fetch_buildings(&building_bbox, storage.crs),
            self.source.fetch_roads(&road_bbox, storage.crs),
        )?;

        info!(
            buildings = buildings.len(),
            roads = roads.len(),
            "Candidate features fetched"
        );

        Ok(self.engine.resolve(prepared, &buildings, &roads))
    }

    /// AMRISK file content for a result
    ///
    /// # Errors
    /// `NothingToExport` when no object is selected for export
    pub fn export_amrisk(&self, result: &AnalysisResult, saved_at: NaiveDateTime) -> ApiResult<String> {
        let records = result.export_records(self.encoder.include_roads());
        if records.is_empty() {
            return Err(ApiError::NothingToExport);
        }
        Ok(self.encoder.encode(&result.storage, &records, saved_at)?)
    }

    /// Write the flat exposure table (CSV with BOM)
    pub fn export_table<W: Write>(&self, writer: W, result: &AnalysisResult) -> ApiResult<usize> {
        Ok(csv_table::write_exposure_table(writer, result, true)?)
    }
}
