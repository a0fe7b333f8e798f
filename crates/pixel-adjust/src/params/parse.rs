//! Parsing of individual raw parameter strings.

use crate::api::PipelineError;

/// Parse a finite decimal number.
pub(crate) fn number(name: &str, raw: &str) -> Result<f32, PipelineError> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|_| PipelineError::invalid(name, raw, "not a number"))?;
    if !value.is_finite() {
        return Err(PipelineError::invalid(name, raw, "must be finite"));
    }
    Ok(value)
}

/// Parse a decimal number and truncate it toward zero.
///
/// `"2.9"` reads as 2 and `"-2.9"` as -2.
pub(crate) fn truncated_int(name: &str, raw: &str) -> Result<i64, PipelineError> {
    let value = number(name, raw)?.trunc();
    if value.abs() > i32::MAX as f32 {
        return Err(PipelineError::invalid(name, raw, "out of range"));
    }
    Ok(value as i64)
}

/// Parse a plain integer, rejecting fractional input.
pub(crate) fn integer(name: &str, raw: &str) -> Result<i64, PipelineError> {
    raw.trim()
        .parse::<i32>()
        .map(i64::from)
        .map_err(|_| PipelineError::invalid(name, raw, "not an integer"))
}

/// Parse an on/off flag.
pub(crate) fn flag(name: &str, raw: &str) -> Result<bool, PipelineError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        _ => Err(PipelineError::invalid(name, raw, "expected \"on\" or \"off\"")),
    }
}
