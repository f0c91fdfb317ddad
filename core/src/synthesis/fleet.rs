use crate::math::stats::StatsHelper;
use crate::model::transmitter::transmitter_id;
use crate::model::{Status, Transmitter};
use crate::synthesis::random::{pick, random_date, RandomSource};
use crate::synthesis::sites::{
    is_primary, technician_label, Site, COORDINATE_JITTER_DEG, NETWORK_NAME,
    PRIMARY_POWER_WATTS, SECONDARY_POWER_WATTS, SITES, STATUS_WEIGHTS, TECHNICIAN_COUNT,
};
use log::debug;

pub const FREQUENCY_BAND_MHZ: (f64, f64) = (88.0, 108.0);
pub const ALTITUDE_RANGE_M: (i64, i64) = (100, 1500);
pub const COVERAGE_JITTER: (f64, f64) = (0.8, 1.2);

/// Builds the full roster, one transmitter per site in [`SITES`] order.
pub fn generate_fleet<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<Transmitter> {
    let fleet: Vec<Transmitter> = SITES
        .iter()
        .enumerate()
        .map(|(index, site)| build_transmitter(index + 1, site, rng))
        .collect();
    debug!(target: "fleet.synthesis", "generated {} transmitters", fleet.len());
    fleet
}

fn build_transmitter<R: RandomSource + ?Sized>(
    ordinal: usize,
    site: &Site,
    rng: &mut R,
) -> Transmitter {
    let latitude = site.latitude + rng.uniform(-COORDINATE_JITTER_DEG, COORDINATE_JITTER_DEG);
    let longitude = site.longitude + rng.uniform(-COORDINATE_JITTER_DEG, COORDINATE_JITTER_DEG);
    let frequency = rng.uniform(FREQUENCY_BAND_MHZ.0, FREQUENCY_BAND_MHZ.1);

    let power_choices = if is_primary(site.city) {
        &PRIMARY_POWER_WATTS
    } else {
        &SECONDARY_POWER_WATTS
    };
    let power_watts = pick(rng, power_choices).copied().unwrap_or(power_choices[0]);
    let status = pick(rng, &STATUS_WEIGHTS).copied().unwrap_or(Status::Active);

    let altitude_m = rng.int_inclusive(ALTITUDE_RANGE_M.0, ALTITUDE_RANGE_M.1) as u32;
    let install_date = random_date(rng, 2005..=2022);
    let coverage = f64::from(power_watts) * rng.uniform(COVERAGE_JITTER.0, COVERAGE_JITTER.1) / 10.0;
    let technician = technician_label(rng.int_inclusive(1, TECHNICIAN_COUNT));
    let last_maintenance_date = random_date(rng, 2023..=2024);

    Transmitter {
        id: transmitter_id(ordinal),
        name: format!("{NETWORK_NAME} - {}", site.city),
        city: site.city.to_string(),
        latitude,
        longitude,
        frequency_mhz: StatsHelper::round_to(frequency, 1),
        power_watts,
        altitude_m,
        install_date,
        status,
        coverage_radius_km: StatsHelper::round_to(coverage, 1),
        technician,
        last_maintenance_date,
    }
}
