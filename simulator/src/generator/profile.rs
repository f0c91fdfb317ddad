use chrono::NaiveDateTime;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How a dataset generation is seeded.
///
/// Posted by the GUI to `/ingest-config`; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed seed for a reproducible dataset; entropy when absent.
    pub seed: Option<u64>,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl GeneratorConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn build_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Wall-clock "now" used to anchor history and maintenance dates.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
