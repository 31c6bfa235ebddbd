//! JSON config parsing: `{ laps, lapLen, penaltyLen, firingLines, start, startDelta }`.

use biathlon_model::Config;
use serde::Deserialize;

use crate::error::ParseResult;
use crate::time::{parse_delta_seconds, parse_time_of_day};

/// Mirrors the JSON shape exactly; field names carry the camelCase the wire
/// format uses, converted into [`Config`]'s snake_case fields afterward.
#[derive(Debug, Deserialize)]
struct RawConfig {
    laps: u32,
    #[serde(rename = "lapLen")]
    lap_len: f64,
    #[serde(rename = "penaltyLen")]
    penalty_len: f64,
    #[serde(rename = "firingLines")]
    firing_lines: u32,
    start: String,
    #[serde(rename = "startDelta")]
    start_delta: String,
}

pub fn parse_config(bytes: &[u8]) -> ParseResult<Config> {
    let raw: RawConfig = serde_json::from_slice(bytes)?;

    let config = Config {
        laps: raw.laps,
        lap_length: raw.lap_len,
        penalty_length: raw.penalty_len,
        firing_lines: raw.firing_lines,
        nominal_start: parse_time_of_day(&raw.start)?,
        start_delta_secs: parse_delta_seconds(&raw.start_delta)?,
    };
    config.validate()?;
    Ok(config)
}
