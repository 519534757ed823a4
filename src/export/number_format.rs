// ==========================================
// Tangos - AMRISK number format
// ==========================================
// Scientific notation, 8 mantissa decimals, signed exponent of at least
// two digits:  123000.0 -> "1.23000000E+05",  1.5e-10 -> "1.50000000E-10"
// Rust renders "1.23000000E5", so the exponent is rewritten afterwards.
// ==========================================

use crate::export::error::{ExportError, ExportResult};

/// Mantissa decimals of the AMRISK number format
pub const MANTISSA_DECIMALS: usize = 8;

/// Format a value in AMRISK scientific notation
///
/// # Errors
/// `Encoding` for NaN or infinite values
pub fn format_scientific(value: f64) -> ExportResult<String> {
    if !value.is_finite() {
        return Err(ExportError::encoding("number", format!("non-finite value {value}")));
    }

    let raw = format!("{:.*E}", MANTISSA_DECIMALS, value);
    let (mantissa, exponent) = raw
        .split_once('E')
        .ok_or_else(|| ExportError::encoding("number", format!("unexpected rendering {raw}")))?;
    let exponent: i32 = exponent
        .parse()
        .map_err(|_| ExportError::encoding("number", format!("unexpected exponent in {raw}")))?;

    let sign = if exponent < 0 { '-' } else { '+' };
    Ok(format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs()))
}

/// Format a named field, reporting the field name on failure
pub fn format_field(field: &str, value: Option<f64>) -> ExportResult<String> {
    let value = value.ok_or_else(|| ExportError::encoding(field, "missing value"))?;
    format_scientific(value).map_err(|_| ExportError::encoding(field, format!("non-finite value {value}")))
}
