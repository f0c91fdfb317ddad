use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hourly synthetic reading for one transmitter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalSample {
    pub transmitter_id: String,
    pub date: NaiveDate,
    pub hour: u8,
    /// Always within `[0, 100]`.
    pub quality_pct: f64,
    pub power_watts: f64,
}
