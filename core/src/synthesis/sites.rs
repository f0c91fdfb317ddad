//! Fixed roster inputs for the Réunion network.

use crate::model::Status;

/// Broadcast site with its surveyed base coordinate.
#[derive(Debug, Clone, Copy)]
pub struct Site {
    pub city: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn site(city: &'static str, latitude: f64, longitude: f64) -> Site {
    Site {
        city,
        latitude,
        longitude,
    }
}

pub const NETWORK_NAME: &str = "Freedom Radio";

pub const SITES: [Site; 12] = [
    site("Saint-Denis", -20.8789, 55.4481),
    site("Saint-Paul", -21.0073, 55.2854),
    site("Saint-Pierre", -21.3429, 55.4787),
    site("Le Tampon", -21.3583, 55.5250),
    site("Saint-André", -20.9667, 55.6333),
    site("Saint-Louis", -21.2833, 55.4167),
    site("Sainte-Marie", -20.9167, 55.5667),
    site("Sainte-Suzanne", -20.8833, 55.6167),
    site("Le Port", -20.9333, 55.2833),
    site("La Possession", -20.9167, 55.3333),
    site("Saint-Joseph", -21.3667, 55.6167),
    site("Cilaos", -21.1333, 55.4667),
];

/// Sites fitted with high-power main transmitters.
pub const PRIMARY_SITES: [&str; 3] = ["Saint-Denis", "Saint-Paul", "Saint-Pierre"];
pub const PRIMARY_POWER_WATTS: [u32; 3] = [1000, 2000, 5000];
pub const SECONDARY_POWER_WATTS: [u32; 3] = [100, 250, 500];

/// Drawn uniformly, which weights the statuses 3:1:1.
pub const STATUS_WEIGHTS: [Status; 5] = [
    Status::Active,
    Status::Active,
    Status::Active,
    Status::Maintenance,
    Status::Inactive,
];

pub const COORDINATE_JITTER_DEG: f64 = 0.05;
pub const TECHNICIAN_COUNT: i64 = 5;

pub const MAINTENANCE_TASKS: [&str; 4] = [
    "Antenna inspection",
    "Frequency calibration",
    "Parts replacement",
    "Software update",
];

/// Choices offered when planning a visit by hand.
pub const PLANNING_TASKS: [&str; 6] = [
    "Antenna inspection",
    "Frequency calibration",
    "Parts replacement",
    "Software update",
    "Equipment cleaning",
    "Signal test",
];

pub fn is_primary(city: &str) -> bool {
    PRIMARY_SITES.contains(&city)
}

pub fn technician_label(number: i64) -> String {
    format!("Tech-{number:02}")
}

/// Every technician identifier, in roster order.
pub fn technicians() -> Vec<String> {
    (1..=TECHNICIAN_COUNT).map(technician_label).collect()
}
