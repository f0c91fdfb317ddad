pub mod details;
pub mod fleet;
pub mod history;
pub mod maintenance;
pub mod random;
pub mod sites;

pub use details::{generate_details, generate_system_status};
pub use fleet::generate_fleet;
pub use history::generate_history;
pub use maintenance::generate_maintenance_schedule;
pub use random::RandomSource;
