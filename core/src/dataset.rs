use crate::model::{MaintenanceEntry, SignalSample, SystemStatus, Transmitter, TransmitterDetails};
use crate::synthesis::{
    generate_details, generate_fleet, generate_history, generate_maintenance_schedule,
    generate_system_status, RandomSource,
};
use crate::telemetry::LogManager;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One complete generation: roster, signal history, maintenance plan and
/// the per-transmitter technical details.
///
/// Never mutated after construction; a refresh builds a new dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetDataset {
    pub generated_at: NaiveDateTime,
    pub transmitters: Vec<Transmitter>,
    pub history: Vec<SignalSample>,
    pub maintenance: Vec<MaintenanceEntry>,
    pub details: Vec<TransmitterDetails>,
    pub system: SystemStatus,
}

impl FleetDataset {
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R, now: NaiveDateTime) -> Self {
        let today = now.date();
        let transmitters = generate_fleet(rng);
        let history = generate_history(&transmitters, today, rng);
        let maintenance = generate_maintenance_schedule(&transmitters, today, rng);
        let details = transmitters
            .iter()
            .map(|transmitter| generate_details(transmitter, today, rng))
            .collect();
        let system = generate_system_status(rng);

        LogManager::new("fleet.dataset").record(&format!(
            "dataset generated at {}: {} transmitters, {} samples, {} maintenance rows",
            now,
            transmitters.len(),
            history.len(),
            maintenance.len()
        ));

        Self {
            generated_at: now,
            transmitters,
            history,
            maintenance,
            details,
            system,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.generated_at.date()
    }

    pub fn transmitter(&self, id: &str) -> Option<&Transmitter> {
        self.transmitters.iter().find(|transmitter| transmitter.id == id)
    }

    /// Samples of one transmitter; empty for an unknown id.
    pub fn history_for(&self, id: &str) -> Vec<&SignalSample> {
        self.history
            .iter()
            .filter(|sample| sample.transmitter_id == id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::history::SAMPLES_PER_TRANSMITTER;
    use rand::{rngs::StdRng, SeedableRng};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn history_rows_reference_known_transmitters() {
        let dataset = FleetDataset::generate(&mut StdRng::seed_from_u64(1), now());
        for sample in &dataset.history {
            assert!(dataset.transmitter(&sample.transmitter_id).is_some());
        }
        for transmitter in &dataset.transmitters {
            assert_eq!(dataset.history_for(&transmitter.id).len(), SAMPLES_PER_TRANSMITTER);
        }
        assert!(dataset.history_for("FR-404").is_empty());
        assert!(dataset.transmitter("FR-404").is_none());
    }

    #[test]
    fn every_transmitter_has_details() {
        let dataset = FleetDataset::generate(&mut StdRng::seed_from_u64(3), now());
        assert_eq!(dataset.details.len(), dataset.transmitters.len());
        for (transmitter, details) in dataset.transmitters.iter().zip(&dataset.details) {
            assert_eq!(details.transmitter_id, transmitter.id);
            assert_eq!(details.service_history.len(), 3);
            assert_eq!(details.service_history[0].date, dataset.today());
        }
        assert!(dataset.system.updates_today >= 1);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = FleetDataset::generate(&mut StdRng::seed_from_u64(9), now());
        let second = FleetDataset::generate(&mut StdRng::seed_from_u64(9), now());
        assert_eq!(first, second);
    }

    #[test]
    fn regeneration_draws_fresh_values() {
        let mut rng = StdRng::seed_from_u64(9);
        let first = FleetDataset::generate(&mut rng, now());
        let second = FleetDataset::generate(&mut rng, now());
        assert_ne!(first.history, second.history);
        assert_eq!(second.today(), now().date());
    }

    #[test]
    fn dataset_serializes_with_status_labels() {
        let dataset = FleetDataset::generate(&mut StdRng::seed_from_u64(2), now());
        let json = serde_json::to_value(&dataset).unwrap();
        let status = json["transmitters"][0]["status"].as_str().unwrap();
        assert!(["Active", "Maintenance", "Inactive"].contains(&status));
        assert_eq!(json["transmitters"][0]["id"], "FR-001");
    }
}
