use crate::generator::profile::GeneratorConfig;
use anyhow::{ensure, Context};
use fleetcore::synthesis::sites::SITES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_HEATMAP_RESOLUTION: usize = 50;
pub const DEFAULT_FEATURED_COUNT: usize = 5;
/// Upper bound on grid points per heatmap axis; the grid is rebuilt on every render.
pub const MAX_HEATMAP_RESOLUTION: usize = 200;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkflowConfig {
    pub seed: Option<u64>,
    /// Grid points per axis of the coverage heatmap.
    pub heatmap_resolution: usize,
    /// Transmitters plotted on the 7-day quality chart.
    pub featured_count: usize,
    pub bind_address: SocketAddr,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            seed: None,
            heatmap_resolution: DEFAULT_HEATMAP_RESOLUTION,
            featured_count: DEFAULT_FEATURED_COUNT,
            bind_address: SocketAddr::from(([127, 0, 0, 1], 9000)),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .validate()
            .with_context(|| format!("validating workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        seed: Option<u64>,
        heatmap_resolution: usize,
        featured_count: usize,
    ) -> anyhow::Result<Self> {
        let config = Self {
            seed,
            heatmap_resolution,
            featured_count,
            ..Default::default()
        };
        config.validate().context("validating command-line options")?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (1..=MAX_HEATMAP_RESOLUTION).contains(&self.heatmap_resolution),
            "heatmap_resolution must be within 1..={MAX_HEATMAP_RESOLUTION}, got {}",
            self.heatmap_resolution
        );
        ensure!(
            self.featured_count <= SITES.len(),
            "featured_count must be at most {}, got {}",
            SITES.len(),
            self.featured_count
        );
        Ok(())
    }

    pub fn to_generator_config(&self) -> GeneratorConfig {
        match self.seed {
            Some(seed) => GeneratorConfig::seeded(seed),
            None => GeneratorConfig::default(),
        }
    }
}
