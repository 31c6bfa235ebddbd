//! Race configuration: lap count, lap/penalty lengths, firing-line count,
//! and the nominal start window. Immutable once loaded.

use chrono::{NaiveTime, TimeDelta};

use crate::error::ModelError;

/// Race parameters loaded from the config file. Plain data, validated once
/// by [`Config::validate`] at load time and never mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub laps: u32,
    pub lap_length: f64,
    pub penalty_length: f64,
    pub firing_lines: u32,
    pub nominal_start: NaiveTime,
    /// Width of the start window, in seconds: `[nominal_start, nominal_start + start_delta]`.
    pub start_delta_secs: f64,
}

impl Config {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.laps == 0 {
            return Err(ModelError::InvalidConfig("laps must be positive".into()));
        }
        if self.lap_length <= 0.0 {
            return Err(ModelError::InvalidConfig("lapLen must be positive".into()));
        }
        if self.penalty_length <= 0.0 {
            return Err(ModelError::InvalidConfig(
                "penaltyLen must be positive".into(),
            ));
        }
        if self.firing_lines == 0 {
            return Err(ModelError::InvalidConfig(
                "firingLines must be positive".into(),
            ));
        }
        if self.start_delta_secs < 0.0 {
            return Err(ModelError::InvalidConfig(
                "startDelta must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// The width of the start window as a `chrono` duration.
    pub fn start_delta(&self) -> TimeDelta {
        TimeDelta::milliseconds((self.start_delta_secs * 1000.0).round() as i64)
    }

    /// The latest timestamp at which a competitor may still cross the start
    /// line / fire the gun without being late, given their scheduled start.
    pub fn start_deadline(&self, scheduled_start: NaiveTime) -> NaiveTime {
        scheduled_start + self.start_delta()
    }
}
