use crate::prelude::{FleetError, FleetResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating status of a transmitter site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Active,
    Maintenance,
    Inactive,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Active, Status::Maintenance, Status::Inactive];

    pub fn label(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Maintenance => "Maintenance",
            Status::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = FleetError;

    fn from_str(value: &str) -> FleetResult<Self> {
        Status::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| FleetError::InvalidInput(format!("unknown status `{value}`")))
    }
}

/// One broadcast site of the fleet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transmitter {
    pub id: String,
    pub name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub frequency_mhz: f64,
    pub power_watts: u32,
    pub altitude_m: u32,
    pub install_date: NaiveDate,
    pub status: Status,
    /// Synthetic reach, derived from `power_watts`.
    pub coverage_radius_km: f64,
    pub technician: String,
    pub last_maintenance_date: NaiveDate,
}

impl Transmitter {
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

/// Formats the sequential identifier for the `ordinal`-th site (1-based).
pub fn transmitter_id(ordinal: usize) -> String {
    format!("FR-{ordinal:03}")
}
