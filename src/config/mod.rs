// ==========================================
// Tangos - configuration layer
// ==========================================
// Responsibility: operational NEQ bounds, zone polygon resolution,
// export header fields
// ==========================================

pub mod analysis_config;

pub use analysis_config::{default_config_path, AnalysisConfig, ConfigError, ExportConfig};
