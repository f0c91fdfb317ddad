use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceKind {
    Preventive,
    Corrective,
    Upgrade,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Preventive,
        ServiceKind::Corrective,
        ServiceKind::Upgrade,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceKind::Preventive => "preventive",
            ServiceKind::Corrective => "corrective",
            ServiceKind::Upgrade => "upgrade",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Past visit listed in the transmitter details panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRecord {
    pub date: NaiveDate,
    pub kind: ServiceKind,
}

/// Technical block of the details panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransmitterDetails {
    pub transmitter_id: String,
    pub antenna_type: String,
    /// Degrees, `0..=360`.
    pub azimuth_deg: u16,
    /// `FM-NNNN`.
    pub model: String,
    /// Most recent first.
    pub service_history: Vec<ServiceRecord>,
}

/// Sidebar system figures.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemStatus {
    pub active_alerts: u32,
    pub updates_today: u32,
}
