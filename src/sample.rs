//! Sample record

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One timestamped value, produced once per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Wall-clock time of the tick, in whole seconds since the Unix epoch
    pub timestamp: i64,
    /// Scaled waveform value
    pub value: f64,
}

impl Sample {
    /// Create a sample
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Create a sample stamped with the current wall-clock time
    pub fn now(value: f64) -> Self {
        Self::new(unix_seconds(SystemTime::now()), value)
    }
}

/// Whole seconds since the Unix epoch, truncated toward zero.
///
/// Times before the epoch come out negative.
pub fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}
