//! Parsing of `w1_slave` payloads
//!
//! A typical payload from the w1_therm driver looks like:
//!
//! ```text
//! 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
//! 72 01 4b 46 7f ff 0e 10 57 t=23125
//! ```

use w1_error::{Result, W1Error};

use crate::constants::payload::{CRC_OK, DECI_DIVISOR, RAW_DIVISOR, STRIP_CHARS, VALUE_MARKER};

/// Validate a raw payload and convert it to degrees Celsius.
///
/// Errors map onto the sampler's failure table: `ChecksumFailed` evicts the
/// sensor, `MissingValueMarker` and `InvalidValue` skip it for one cycle.
pub fn parse_payload(payload: &str) -> Result<f64> {
    if !payload.contains(CRC_OK) {
        return Err(W1Error::ChecksumFailed);
    }

    let (_, raw) = payload
        .split_once(VALUE_MARKER)
        .ok_or(W1Error::MissingValueMarker)?;

    let cleaned: String = raw.chars().filter(|c| !STRIP_CHARS.contains(c)).collect();
    let value = cleaned
        .parse::<i64>()
        .map_err(|source| W1Error::InvalidValue { raw: cleaned.clone(), source })?;

    Ok(scale_raw(value))
}

/// Scale the driver integer to one decimal digit.
///
/// Integer division truncates toward zero, so `-550` becomes `-0.5` and
/// `-49` becomes `0.0`.
pub fn scale_raw(raw: i64) -> f64 {
    (raw / RAW_DIVISOR) as f64 / DECI_DIVISOR
}
