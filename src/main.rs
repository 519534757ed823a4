// ==========================================
// Tangos - command line entry point
// ==========================================
// Usage: tangos <request.json> [buildings.csv] [roads.json] [out_dir]
// request.json: { "x": 204012, "y": 6627962, "neq_kg": 12920, "crs": "EPSG:32633" }
// Output: <out_dir>/eksponerte_bygg.csv, <out_dir>/amrisk_export.amr25
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::Local;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use tangos::api::{AnalysisApi, ApiError};
use tangos::config::AnalysisConfig;
use tangos::domain::StoragePoint;
use tangos::engine::HazardAnalysisEngine;
use tangos::source::FileFeatureSource;
use tangos::{logging, APP_NAME, VERSION};
use tracing::{info, warn};

const TABLE_FILE_NAME: &str = "eksponerte_bygg.csv";
const AMRISK_FILE_NAME: &str = "amrisk_export.amr25";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        bail!("usage: tangos <request.json> [buildings.csv] [roads.json] [out_dir]");
    }

    info!("{} v{}", APP_NAME, VERSION);

    let request_path = PathBuf::from(&args[0]);
    let buildings_path = args.get(1).map(PathBuf::from);
    let roads_path = args.get(2).map(PathBuf::from);
    let out_dir = args.get(3).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let config = AnalysisConfig::load_or_default().context("loading configuration")?;

    let raw = std::fs::read_to_string(&request_path)
        .with_context(|| format!("reading request {}", request_path.display()))?;
    let storage: StoragePoint = serde_json::from_str(&raw).context("parsing storage request")?;

    let engine = Arc::new(HazardAnalysisEngine::new(&config));
    let source = Arc::new(FileFeatureSource::new(buildings_path, roads_path, storage.crs));
    let api = AnalysisApi::new(engine, source, &config);

    let result = api.analyze(storage).await?;
    println!(
        "QD: sensitive {} m, residential {} m, road {} m",
        result.qd.sensitive_m, result.qd.residential_m, result.qd.road_m
    );

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let table_path = out_dir.join(TABLE_FILE_NAME);
    let file = File::create(&table_path).with_context(|| format!("creating {}", table_path.display()))?;
    let rows = api.export_table(BufWriter::new(file), &result)?;
    println!("{} exposed objects -> {}", rows, table_path.display());

    match api.export_amrisk(&result, Local::now().naive_local()) {
        Ok(content) => {
            let amrisk_path = out_dir.join(AMRISK_FILE_NAME);
            std::fs::write(&amrisk_path, content)
                .with_context(|| format!("writing {}", amrisk_path.display()))?;
            println!("AMRISK export -> {}", amrisk_path.display());
        }
        Err(ApiError::NothingToExport) => warn!("No exposed objects, AMRISK export skipped"),
        Err(e) => return Err(e.into()),
    }

    for anomaly in &result.anomalies {
        warn!(
            feature_id = %anomaly.feature_id,
            kind = %anomaly.kind,
            reason = %anomaly.reason,
            "Feature skipped"
        );
    }

    Ok(())
}
