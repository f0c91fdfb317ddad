//! Synthetic data model for the Freedom Radio transmitter dashboard.
//!
//! Generation lives in [`synthesis`], derived views in [`analysis`]. Every
//! generator draws from an injected [`synthesis::RandomSource`], so a seeded
//! RNG reproduces a whole dataset.

pub mod analysis;
pub mod dataset;
pub mod math;
pub mod model;
pub mod prelude;
pub mod session;
pub mod synthesis;
pub mod telemetry;

pub use dataset::FleetDataset;
pub use prelude::{FleetError, FleetResult};
