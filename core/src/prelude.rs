pub use crate::model::{
    MaintenanceEntry, Priority, ServiceKind, ServiceRecord, SignalSample, Status, SystemStatus,
    Transmitter, TransmitterDetails,
};
pub use crate::synthesis::RandomSource;

/// Common error type for parsing dashboard inputs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type FleetResult<T> = Result<T, FleetError>;
