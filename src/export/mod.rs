// ==========================================
// Tangos - export layer
// ==========================================
// Responsibility: render an AnalysisResult into the AMRISK 2.5 file and
// the flat exposure table. No geometry is computed here.
// ==========================================

pub mod amrisk;
pub mod csv_table;
pub mod error;
pub mod number_format;

// Re-exports
pub use amrisk::{charge_data, sanitize_name, AmriskEncoder};
pub use csv_table::{table_rows, write_exposure_table, ExposureTableRow};
pub use error::{ExportError, ExportResult};
pub use number_format::format_scientific;
