use chrono::{NaiveDate, NaiveDateTime};
use fleetcore::analysis::{
    CoverageHeatmap, DailySeries, DateRange, FleetMetrics, HourlySeries, PowerBuckets,
    QualityReading,
};
use fleetcore::prelude::{MaintenanceEntry, SystemStatus, Transmitter, TransmitterDetails};
use serde::{Deserialize, Serialize};

/// Everything one dashboard render needs, as served on `/payload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationModel {
    pub generated_at: NaiveDateTime,
    pub rendered_at: NaiveDateTime,
    pub transmitters: Vec<Transmitter>,
    pub metrics: FleetMetrics,
    pub current_quality: Vec<QualityReading>,
    pub power_buckets: PowerBuckets,
    pub heatmap: CoverageHeatmap,
    pub maintenance: Vec<MaintenanceEntry>,
    pub details: Vec<TransmitterDetails>,
    pub system: SystemStatus,
    pub hourly_quality: Vec<HourlySeries>,
    pub featured_daily: Vec<DailySeries>,
    pub date_range: DateRange,
}

/// Optional sidebar window applied to the daily series.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PayloadQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl PayloadQuery {
    pub fn range(&self) -> DateRange {
        DateRange::from_bounds(self.start, self.end)
    }
}
