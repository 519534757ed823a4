// ==========================================
// Tangos - AMRISK 2.5 export encoder
// ==========================================
// Output: fixed-column text file consumed by AMRISK 2.5
// Layout: header block (storage area, one generic magazine, one charge,
//         four defined situations), blank line, exposed object blocks
// ==========================================
// Column positions and separators are part of the file format. The fixed
// default values below (a 20 ft container magazine, occupancy defaults)
// are literal template text and are emitted verbatim.
// ==========================================

use crate::config::ExportConfig;
use crate::domain::exposure::{AnalysisResult, ExportRecord};
use crate::domain::storage::StoragePoint;
use crate::export::error::{ExportError, ExportResult};
use crate::export::number_format::{format_field, format_scientific};
use chrono::{NaiveDateTime, Timelike};
use std::io::Write;
use tracing::info;

/// Separator between the three charge data columns
pub const CHARGE_COLUMN_SEPARATOR: &str = "     ";
/// Separator between coordinate columns
pub const COORDINATE_SEPARATOR: &str = "     ";
/// Max characters of an object name
pub const MAX_NAME_LEN: usize = 50;

/// Debris factor applied to the NEQ in tons
const DEBRIS_FACTOR: f64 = 1.1;
/// Probability P = A + B·Q (Q in kg)
const PROBABILITY_A: f64 = 1.5e-4;
const PROBABILITY_B: f64 = 1.5e-10;

const MAGAZINE_BLOCK: &[&str] = &[
    " Global coordinates   0.00000000E+00 0.00000000E+00",
    " Number of magazines  1",
    "Magazin name          1           Magazine 1",
    " Magazine type                  FS",
    " Ammunition type                   ",
    " Remarks on mag                 BNS 20 fot          ",
    " Length of mag        6.05800000E+000",
    " Width of mag         2.43800000E+000",
    " Height of mag        2.59100000E+000",
    " Cross section        6.31685800E+000",
    " Magazine debris mas  4.80000000E+000",
    " Magazine volume      3.82675258E+001",
    " Cover depth          0.00000000E+000",
    " Front thickness      0.00000000E+00",
    " Back  thickness      0.00000000E+00",
    " Roof thickness       0.00000000E+00",
    " Wall thickness       0.00000000E+00",
    " Density              0.00000000E+00",
    " Chamber lining                    ",
];

const MAGAZINE_GEOMETRY_BLOCK: &[&str] = &[
    "Altitude & velocity      0.00000000E+000     0.00000000E+000",
    "Magazin direction        0.00000000E+000     0.00000000E+000",
    "Crater coordinats       0.0000000000E+00    0.0000000000E+00    0.0000000000E+00",
    "Crater 2nd point        0.0000000000E+00    0.0000000000E+00    0.0000000000E+00",
    "Block volume, b-area    0.0000000000E+00    0.0000000000E+00",
    "close dist,by-pass,t    0.0000000000E+00    0.0000000000E+00    0.0000000000E+00",
    " Tunnel data          0",
    "Number of charges     1  1",
];

const SITUATION_BLOCK: &[&str] = &[
    "Probability calcul              U 11",
    "Remarks on charge   ",
    " Charge = chg ind r ",
    " Defined situations   4",
    "Defined situations       3.75000000E-001 Night        N O",
    "Defined situations       2.97600000E-001 Day          D O",
    "Defined situations       1.48800000E-001 Evening      E O",
    "Defined situations       1.78600000E-001 Weekend      W O",
];

const OBJECT_DEFAULTS_BLOCK: &[&str] = &[
    " Object ,person type            BNPF           NI                  ",
    " Number of persons       2.11000000E+000",
    " Max precence            9.00000000E-001",
    " Width of area           0.00000000E+000",
    " Length of train         0.00000000E+000",
    " Number trains/week      0.00000000E+000",
    " Velocity of object      0.00000000E+000",
    " Remarks on object",
    " Nr object points     1",
];

const OBJECT_PRESENCE_BLOCK: &[&str] = &[
    " Average precense               N 0.00000000E+000",
    " Average precense               D 0.00000000E+000",
    " Average precense               E 0.00000000E+000",
    " Average precense               W 0.00000000E+000",
];

/// Object name as accepted by AMRISK: spaces and commas become `_`,
/// truncated to 50 characters. Idempotent.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c == ' ' || c == ',' { '_' } else { c })
        .take(MAX_NAME_LEN)
        .collect()
}

/// The three charge columns: NEQ with debris (t), NEQ (t), probability P
pub fn charge_data(neq_kg: f64) -> ExportResult<String> {
    if !neq_kg.is_finite() || neq_kg <= 0.0 {
        return Err(ExportError::encoding("charge", format!("invalid NEQ {neq_kg}")));
    }
    let neq_tons = neq_kg / 1000.0;
    let with_debris = neq_tons * DEBRIS_FACTOR;
    let probability = PROBABILITY_A + PROBABILITY_B * neq_kg;

    Ok([
        format_scientific(with_debris)?,
        format_scientific(neq_tons)?,
        format_scientific(probability)?,
    ]
    .join(CHARGE_COLUMN_SEPARATOR))
}

/// ISO 8601 local timestamp, microseconds only when non-zero
fn save_date(saved_at: &NaiveDateTime) -> String {
    if saved_at.nanosecond() / 1000 == 0 {
        saved_at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        saved_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

// ==========================================
// AmriskEncoder
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AmriskEncoder {
    config: ExportConfig,
}

impl AmriskEncoder {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn include_roads(&self) -> bool {
        self.config.include_roads
    }

    /// Encode a complete AMRISK file
    ///
    /// # Arguments
    /// - `storage`: storage point (magazine coordinates + NEQ)
    /// - `records`: exposed objects, already deduplicated
    /// - `saved_at`: timestamp written to the header
    ///
    /// # Errors
    /// `Encoding` when a coordinate or the NEQ is missing/non-finite; no
    /// output is produced in that case.
    pub fn encode(
        &self,
        storage: &StoragePoint,
        records: &[ExportRecord],
        saved_at: NaiveDateTime,
    ) -> ExportResult<String> {
        let header = self.encode_header(storage, saved_at)?;
        let objects = encode_objects(records)?;
        Ok(format!("{header}\n{objects}"))
    }

    /// Encode an analysis result using its deduplicated export records
    pub fn encode_result(&self, result: &AnalysisResult, saved_at: NaiveDateTime) -> ExportResult<String> {
        let records = result.export_records(self.config.include_roads);
        self.encode(&result.storage, &records, saved_at)
    }

    /// Encode fully, then write; a failed encode writes nothing
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        storage: &StoragePoint,
        records: &[ExportRecord],
        saved_at: NaiveDateTime,
    ) -> ExportResult<usize> {
        let content = self.encode(storage, records, saved_at)?;
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        info!(objects = records.len(), bytes = content.len(), "AMRISK file written");
        Ok(content.len())
    }

    /// Header block, terminated by a newline
    fn encode_header(&self, storage: &StoragePoint, saved_at: NaiveDateTime) -> ExportResult<String> {
        let mag_x = format_field("magazine x", Some(storage.x))?;
        let mag_y = format_field("magazine y", Some(storage.y))?;
        let charge = charge_data(storage.neq_kg)?;
        let cfg = &self.config;

        let mut lines: Vec<String> = vec![
            " Flilename                      Exported from AMRISK 2.5".to_string(),
            format!(" Storage area name              {}", cfg.storage_name),
            format!(" Storage area number            {}", cfg.storage_number),
            format!(" Save date                      {}", save_date(&saved_at)),
            format!(" Classification                 {}", cfg.classification),
            format!(" User name                      {}", cfg.user_name),
            format!(" User reference                 {}", cfg.user_reference),
        ];
        lines.extend(MAGAZINE_BLOCK.iter().map(|s| s.to_string()));
        lines.push(format!(
            "Coordinates x, y         {mag_x}{sep}{mag_y}{sep}0.00000000E+000",
            sep = COORDINATE_SEPARATOR
        ));
        lines.extend(MAGAZINE_GEOMETRY_BLOCK.iter().map(|s| s.to_string()));
        lines.push(format!("Charge data in mag    1     {charge}"));
        lines.extend(SITUATION_BLOCK.iter().map(|s| s.to_string()));

        let mut header = lines.join("\n");
        header.push('\n');
        Ok(header)
    }
}

/// Exposed object blocks, 1-based sequence numbers
fn encode_objects(records: &[ExportRecord]) -> ExportResult<String> {
    let mut lines: Vec<String> = Vec::with_capacity(1 + records.len() * 15);
    lines.push(format!(" Exposed objects       {}", records.len()));

    for (idx, record) in records.iter().enumerate() {
        let x = format_field(&format!("object {} x", record.object_id), record.x)?;
        let y = format_field(&format!("object {} y", record.object_id), record.y)?;
        let name = sanitize_name(&record.name);

        lines.push(format!("Object name            {}  {} Exposed object ", idx + 1, name));
        lines.extend(OBJECT_DEFAULTS_BLOCK.iter().map(|s| s.to_string()));
        lines.push(format!(
            "Object points       NDNF   {x}{sep}{y}{sep}0.00000000E+000",
            sep = COORDINATE_SEPARATOR
        ));
        lines.extend(OBJECT_PRESENCE_BLOCK.iter().map(|s| s.to_string()));
    }

    Ok(lines.join("\n"))
}
