// ==========================================
// Tangos - exposure table (CSV)
// ==========================================
// One row per exposed object after merging zones; UTF-8 with BOM so the
// file opens correctly in spreadsheet tools
// ==========================================

use crate::domain::exposure::{AnalysisResult, ExposureRow, ObjectCategory};
use crate::engine::classification;
use crate::export::error::ExportResult;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use tracing::info;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Flat table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureTableRow {
    pub id: String,
    pub kind: String,
    pub zones: String,
    pub category_code: String,
    pub category: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Whole meters
    pub distance_m: f64,
    /// Two decimals, empty when not computable
    pub overpressure_kpa: Option<String>,
    pub aadt_total: Option<u32>,
    pub speed_limit_kmh: Option<u32>,
    /// Feature geometry as WKT
    pub geometry: String,
}

impl From<&ExposureRow> for ExposureTableRow {
    fn from(row: &ExposureRow) -> Self {
        let obj = &row.object;
        let (category, aadt_total, speed_limit_kmh) = match &obj.category {
            ObjectCategory::Building { category, .. } => (
                category
                    .map(|c| classification::entry_for(c).label.to_string())
                    .unwrap_or_default(),
                None,
                None,
            ),
            ObjectCategory::Road(traffic) => (
                "Veg".to_string(),
                traffic.aadt_total,
                traffic.speed_limit_kmh,
            ),
        };

        Self {
            id: obj.id.clone(),
            kind: obj.kind.to_string(),
            zones: row
                .zones
                .iter()
                .map(|z| z.to_string())
                .collect::<Vec<_>>()
                .join("|"),
            category_code: obj.category.code(),
            category,
            name: obj.display_name(),
            x: obj.representative_point.x(),
            y: obj.representative_point.y(),
            distance_m: obj.distance_m.round_ties_even(),
            overpressure_kpa: obj.overpressure_kpa.map(|p| format!("{p:.2}")),
            aadt_total,
            speed_limit_kmh,
            geometry: obj.geometry.to_wkt(),
        }
    }
}

/// Build the table rows for a result
pub fn table_rows(result: &AnalysisResult) -> Vec<ExposureTableRow> {
    result.merged_rows().iter().map(ExposureTableRow::from).collect()
}

/// Write the exposure table; returns the number of data rows
pub fn write_exposure_table<W: Write>(writer: W, result: &AnalysisResult, with_bom: bool) -> ExportResult<usize> {
    let rows = table_rows(result);

    let mut writer = writer;
    if with_bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut csv_writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in &rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    info!(rows = rows.len(), "Exposure table written");
    Ok(rows.len())
}
