pub mod details;
pub mod maintenance;
pub mod signal;
pub mod transmitter;

pub use details::{ServiceKind, ServiceRecord, SystemStatus, TransmitterDetails};
pub use maintenance::{MaintenanceEntry, Priority};
pub use signal::SignalSample;
pub use transmitter::{Status, Transmitter};
