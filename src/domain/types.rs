// ==========================================
// Tangos - domain type definitions
// ==========================================
// Basis: Eksplosivforskriften § 37 (quantity distances)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Zone kind
// ==========================================
// One zone per protected object class, ordered from largest to smallest radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneKind {
    Sensitive,   // hospitals, schools, vulnerable objects
    Residential, // dwellings
    Road,        // public roads
}

impl ZoneKind {
    /// All zone kinds in evaluation order
    pub const ALL: [ZoneKind; 3] = [ZoneKind::Sensitive, ZoneKind::Residential, ZoneKind::Road];
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneKind::Sensitive => write!(f, "SENSITIVE"),
            ZoneKind::Residential => write!(f, "RESIDENTIAL"),
            ZoneKind::Road => write!(f, "ROAD"),
        }
    }
}

// ==========================================
// Coordinate reference system
// ==========================================
// Only the UTM 33 grids used by the registries are supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crs {
    #[serde(rename = "EPSG:32633")]
    Utm33N, // WGS 84 / UTM zone 33N
    #[serde(rename = "EPSG:25833")]
    Etrs89Utm33, // ETRS89 / UTM zone 33N
    #[serde(rename = "EPSG:5973")]
    Euref89Utm33Nn2000, // ETRS89 / UTM 33N + NN2000 height
}

impl Crs {
    pub fn epsg(&self) -> u32 {
        match self {
            Crs::Utm33N => 32633,
            Crs::Etrs89Utm33 => 25833,
            Crs::Euref89Utm33Nn2000 => 5973,
        }
    }

    pub fn from_epsg(code: u32) -> Option<Self> {
        match code {
            32633 => Some(Crs::Utm33N),
            25833 => Some(Crs::Etrs89Utm33),
            5973 => Some(Crs::Euref89Utm33Nn2000),
            _ => None,
        }
    }

    /// Whether coordinates in `other` can be compared planar with this CRS
    ///
    /// 5973 is 25833 with a vertical datum attached, so the two share a grid.
    pub fn is_planar_compatible(&self, other: Crs) -> bool {
        if *self == other {
            return true;
        }
        matches!(
            (self, other),
            (Crs::Etrs89Utm33, Crs::Euref89Utm33Nn2000)
                | (Crs::Euref89Utm33Nn2000, Crs::Etrs89Utm33)
        )
    }
}

impl Default for Crs {
    fn default() -> Self {
        Crs::Utm33N
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

// ==========================================
// Feature kind
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureKind {
    Building,
    Road,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKind::Building => write!(f, "BUILDING"),
            FeatureKind::Road => write!(f, "ROAD"),
        }
    }
}

// ==========================================
// Building category
// ==========================================
// Partition of the building-use code taxonomy by its leading digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingCategory {
    Residential,      // 1xx boliger
    Industry,         // 2xx industri/lager
    Office,           // 3xx kontor/forretning
    Transport,        // 4xx samferdsel
    Lodging,          // 5xx hotell/restaurant
    CultureEducation, // 6xx skole/barnehage/idrett
    Health,           // 7xx helse
    Emergency,        // 8xx brann/politi
    Other,            // 9xx annet
}

impl fmt::Display for BuildingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildingCategory::Residential => write!(f, "RESIDENTIAL"),
            BuildingCategory::Industry => write!(f, "INDUSTRY"),
            BuildingCategory::Office => write!(f, "OFFICE"),
            BuildingCategory::Transport => write!(f, "TRANSPORT"),
            BuildingCategory::Lodging => write!(f, "LODGING"),
            BuildingCategory::CultureEducation => write!(f, "CULTURE_EDUCATION"),
            BuildingCategory::Health => write!(f, "HEALTH"),
            BuildingCategory::Emergency => write!(f, "EMERGENCY"),
            BuildingCategory::Other => write!(f, "OTHER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crs_epsg_roundtrip() {
        for crs in [Crs::Utm33N, Crs::Etrs89Utm33, Crs::Euref89Utm33Nn2000] {
            assert_eq!(Crs::from_epsg(crs.epsg()), Some(crs));
        }
        assert_eq!(Crs::from_epsg(4326), None);
        assert_eq!(Crs::Utm33N.to_string(), "EPSG:32633");
        let parsed: Crs = serde_json::from_str("\"EPSG:5973\"").unwrap();
        assert_eq!(parsed, Crs::Euref89Utm33Nn2000);
    }

    #[test]
    fn test_crs_planar_compatibility() {
        assert!(Crs::Etrs89Utm33.is_planar_compatible(Crs::Euref89Utm33Nn2000));
        assert!(Crs::Utm33N.is_planar_compatible(Crs::Utm33N));
        assert!(!Crs::Utm33N.is_planar_compatible(Crs::Etrs89Utm33));
    }

    #[test]
    fn test_zone_kind_serde() {
        let json = serde_json::to_string(&ZoneKind::Residential).unwrap();
        assert_eq!(json, "\"RESIDENTIAL\"");
    }
}
