pub mod coverage;
pub mod filter;
pub mod metrics;
pub mod power;
pub mod quality;

pub use coverage::{coverage_heatmap, BoundingBox, CoverageHeatmap};
pub use filter::{filter_history, DateRange, PowerFilter, SortKey, StatusFilter, StatusSelection, TransmitterQuery};
pub use metrics::{fleet_metrics, FleetMetrics};
pub use power::{power_distribution_buckets, PowerBand, PowerBuckets};
pub use quality::{
    current_quality_snapshot, mean_quality_by_day, mean_quality_by_hour, sample_featured,
    DailyMean, DailySeries, HourlyMean, HourlySeries, QualityReading,
};
