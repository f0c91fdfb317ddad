use crate::model::{Status, Transmitter};
use serde::{Deserialize, Serialize};

/// Headline figures shown above the dashboard tabs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FleetMetrics {
    pub total: usize,
    pub active: usize,
    pub maintenance: usize,
    pub inactive: usize,
    pub total_power_watts: u64,
    pub average_coverage_km: f64,
}

impl FleetMetrics {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Active => self.active,
            Status::Maintenance => self.maintenance,
            Status::Inactive => self.inactive,
        }
    }

    pub fn total_power_kw(&self) -> f64 {
        self.total_power_watts as f64 / 1000.0
    }
}

pub fn fleet_metrics(transmitters: &[Transmitter]) -> FleetMetrics {
    let mut metrics = FleetMetrics {
        total: transmitters.len(),
        ..Default::default()
    };
    let mut coverage_sum = 0.0;
    for transmitter in transmitters {
        match transmitter.status {
            Status::Active => metrics.active += 1,
            Status::Maintenance => metrics.maintenance += 1,
            Status::Inactive => metrics.inactive += 1,
        }
        metrics.total_power_watts += u64::from(transmitter.power_watts);
        coverage_sum += transmitter.coverage_radius_km;
    }
    if !transmitters.is_empty() {
        metrics.average_coverage_km = coverage_sum / transmitters.len() as f64;
    }
    metrics
}
