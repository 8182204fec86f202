//! Duration probing output parser.
//!
//! Parses the JSON written by
//! `ffprobe -v error -show_entries format=duration -of json`:
//!
//! ```json
//! { "format": { "duration": "125.458000" } }
//! ```

use serde_json::Value;

use super::types::{MediaError, MediaResult};

/// Extract the container duration in seconds from ffprobe JSON output.
///
/// ffprobe reports the duration as a string; a bare number is accepted
/// too. A missing, non-numeric, negative or non-finite duration is an
/// error rather than a zero-length video.
pub fn parse_duration_json(stdout: &[u8]) -> MediaResult<f64> {
    let json: Value = serde_json::from_slice(stdout)
        .map_err(|e| MediaError::probe_failed(format!("Invalid ffprobe JSON: {}", e)))?;

    let raw = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .ok_or_else(|| MediaError::probe_failed("ffprobe reported no duration"))?;

    let duration = match raw {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
    .ok_or_else(|| MediaError::probe_failed(format!("Unreadable duration value: {}", raw)))?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(MediaError::probe_failed(format!(
            "Invalid duration: {}",
            duration
        )));
    }

    Ok(duration)
}
