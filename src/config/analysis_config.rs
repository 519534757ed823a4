// ==========================================
// Tangos - analysis configuration
// ==========================================
// Storage: JSON file (default <config_dir>/tangos/config.json)
// Overrides: TANGOS_MIN_NEQ_KG, TANGOS_MAX_NEQ_KG, TANGOS_STORAGE_NAME
// ==========================================

use crate::engine::zones::{DEFAULT_CHORD_TOLERANCE_M, DEFAULT_MAX_SEGMENTS, DEFAULT_MIN_SEGMENTS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const ENV_MIN_NEQ_KG: &str = "TANGOS_MIN_NEQ_KG";
pub const ENV_MAX_NEQ_KG: &str = "TANGOS_MAX_NEQ_KG";
pub const ENV_STORAGE_NAME: &str = "TANGOS_STORAGE_NAME";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file read failed ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value ({key}): {message}")]
    Invalid { key: String, message: String },
}

// ==========================================
// ExportConfig - AMRISK header fields and selection
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub storage_name: String,
    pub storage_number: String,
    pub classification: String,
    pub user_name: String,
    pub user_reference: String,
    /// Export road segments as objects in addition to buildings
    pub include_roads: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            storage_name: "Tanogs Export".to_string(),
            storage_number: String::new(),
            classification: "NO".to_string(),
            user_name: String::new(),
            user_reference: String::new(),
            include_roads: false,
        }
    }
}

// ==========================================
// AnalysisConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Smallest accepted NEQ (kg)
    pub min_neq_kg: f64,
    /// Largest accepted NEQ (kg)
    pub max_neq_kg: f64,
    /// Max distance between the zone polygon and the true circle (m)
    pub chord_tolerance_m: f64,
    pub min_segments: usize,
    pub max_segments: usize,
    pub export: ExportConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_neq_kg: 1.0,
            max_neq_kg: 100_000.0,
            chord_tolerance_m: DEFAULT_CHORD_TOLERANCE_M,
            min_segments: DEFAULT_MIN_SEGMENTS,
            max_segments: DEFAULT_MAX_SEGMENTS,
            export: ExportConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load from a JSON file, apply env overrides, validate
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: AnalysisConfig = serde_json::from_str(&raw)?;
        config.apply_env_overrides()?;
        config.validate()?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load the default config file when present, otherwise use defaults
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides()?;
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Apply TANGOS_* environment variables
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = read_env_f64(ENV_MIN_NEQ_KG)? {
            self.min_neq_kg = v;
        }
        if let Some(v) = read_env_f64(ENV_MAX_NEQ_KG)? {
            self.max_neq_kg = v;
        }
        if let Ok(name) = std::env::var(ENV_STORAGE_NAME) {
            if !name.trim().is_empty() {
                self.export.storage_name = name.trim().to_string();
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::Invalid {
            key: key.to_string(),
            message,
        };

        if !self.min_neq_kg.is_finite() || self.min_neq_kg <= 0.0 {
            return Err(invalid("min_neq_kg", format!("must be > 0, got {}", self.min_neq_kg)));
        }
        if !self.max_neq_kg.is_finite() || self.max_neq_kg < self.min_neq_kg {
            return Err(invalid(
                "max_neq_kg",
                format!("must be >= min_neq_kg ({}), got {}", self.min_neq_kg, self.max_neq_kg),
            ));
        }
        if !self.chord_tolerance_m.is_finite() || self.chord_tolerance_m <= 0.0 {
            return Err(invalid(
                "chord_tolerance_m",
                format!("must be > 0, got {}", self.chord_tolerance_m),
            ));
        }
        if self.min_segments < 3 || self.max_segments < self.min_segments {
            return Err(invalid(
                "min_segments",
                format!("need 3 <= min ({}) <= max ({})", self.min_segments, self.max_segments),
            ));
        }
        Ok(())
    }
}

/// `<config_dir>/tangos/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tangos").join("config.json"))
}

fn read_env_f64(key: &str) -> Result<Option<f64>, ConfigError> {
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<f64>().map(Some).map_err(|e| {
            warn!(key, value = %v, "Unparseable environment override");
            ConfigError::Invalid {
                key: key.to_string(),
                message: e.to_string(),
            }
        }),
        Err(_) => Ok(None),
    }
}
