// ==========================================
// Tangos - building type registry
// ==========================================
// Source: SSB classification "bygningstype" (semicolon separated CSV,
// columns Kodeverdi + Navn, extra columns ignored)
// ==========================================

use crate::source::error::{SourceError, SourceResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const CODE_COLUMN: &str = "Kodeverdi";
const NAME_COLUMN: &str = "Navn";

/// Building-use code -> readable name
#[derive(Debug, Clone, Default)]
pub struct BuildingTypeRegistry {
    names: HashMap<String, String>,
}

impl BuildingTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> SourceResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse the classification CSV
    pub fn from_reader<R: Read>(reader: R) -> SourceResult<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        // Header may carry a UTF-8 BOM
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| SourceError::Query(format!("building type CSV lacks column {name}")))
        };
        let code_idx = column(CODE_COLUMN)?;
        let name_idx = column(NAME_COLUMN)?;

        let mut registry = Self::new();
        for result in reader.records() {
            let record = result?;
            let (Some(code), Some(name)) = (record.get(code_idx), record.get(name_idx)) else {
                continue;
            };
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            registry.insert(code, name.trim());
        }

        debug!(entries = registry.len(), "Building type registry loaded");
        Ok(registry)
    }

    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.names.insert(code.into(), name.into());
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.names.get(code.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registry_csv() {
        let csv = "\u{feff}Kode;Kodeverdi;Navn\n1;111;Enebolig\n2;611;Lekepark, skole\n3;;Tom\n";
        let registry = BuildingTypeRegistry::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name_for("111"), Some("Enebolig"));
        assert_eq!(registry.name_for(" 611 "), Some("Lekepark, skole"));
        assert_eq!(registry.name_for("999"), None);
    }

    #[test]
    fn test_missing_column() {
        let csv = "Kodeverdi;Beskrivelse\n111;Enebolig\n";
        assert!(BuildingTypeRegistry::from_reader(csv.as_bytes()).is_err());
    }
}
