//! Timestamp parsing and formatting.
//!
//! The video-indexing collaborator emits timestamps both as raw seconds and
//! as `HH:MM:SS(.mmm)` strings depending on the endpoint, so utterance
//! timestamps accept either shape on deserialization.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TimestampError {
    #[error("Invalid timestamp: {0}")]
    Invalid(String),
}

/// Parse a timestamp string (`HH:MM:SS(.mmm)`, `MM:SS(.mmm)`, or `SS(.mmm)`)
/// into total seconds.
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let invalid = || TimestampError::Invalid(ts.to_string());
    let parts: Vec<&str> = ts.trim().split(':').collect();
    let seconds = match parts.len() {
        1 => parts[0].parse::<f64>().map_err(|_| invalid())?,
        2 => {
            let minutes: f64 = parts[0].parse().map_err(|_| invalid())?;
            let seconds: f64 = parts[1].parse().map_err(|_| invalid())?;
            minutes * 60.0 + seconds
        }
        3 => {
            let hours: f64 = parts[0].parse().map_err(|_| invalid())?;
            let minutes: f64 = parts[1].parse().map_err(|_| invalid())?;
            let seconds: f64 = parts[2].parse().map_err(|_| invalid())?;
            hours * 3600.0 + minutes * 60.0 + seconds
        }
        _ => return Err(invalid()),
    };

    if seconds < 0.0 || !seconds.is_finite() {
        return Err(invalid());
    }
    Ok(seconds)
}

/// Format seconds as `HH:MM:SS` (whole seconds, floor).
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Deserialize seconds from either a JSON number or a timestamp string.
pub fn deserialize_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SecondsRepr {
        Number(f64),
        Text(String),
    }

    match SecondsRepr::deserialize(deserializer)? {
        SecondsRepr::Number(n) => {
            if n.is_finite() && n >= 0.0 {
                Ok(n)
            } else {
                Err(serde::de::Error::custom(format!(
                    "timestamp out of range: {}",
                    n
                )))
            }
        }
        SecondsRepr::Text(s) => parse_timestamp(&s).map_err(serde::de::Error::custom),
    }
}
