use crate::model::Transmitter;
use serde::{Deserialize, Serialize};

/// Power classes used by the distribution chart and the power filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PowerBand {
    Below500,
    From500To1000,
    Above1000,
}

impl PowerBand {
    pub const ALL: [PowerBand; 3] = [
        PowerBand::Below500,
        PowerBand::From500To1000,
        PowerBand::Above1000,
    ];

    pub fn of(power_watts: u32) -> Self {
        if power_watts < 500 {
            PowerBand::Below500
        } else if power_watts <= 1000 {
            PowerBand::From500To1000
        } else {
            PowerBand::Above1000
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerBand::Below500 => "< 500W",
            PowerBand::From500To1000 => "500-1000W",
            PowerBand::Above1000 => "> 1000W",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PowerBuckets {
    pub below_500: usize,
    pub from_500_to_1000: usize,
    pub above_1000: usize,
}

impl PowerBuckets {
    pub fn total(&self) -> usize {
        self.below_500 + self.from_500_to_1000 + self.above_1000
    }

    pub fn count(&self, band: PowerBand) -> usize {
        match band {
            PowerBand::Below500 => self.below_500,
            PowerBand::From500To1000 => self.from_500_to_1000,
            PowerBand::Above1000 => self.above_1000,
        }
    }
}

pub fn power_distribution_buckets<'a, I>(transmitters: I) -> PowerBuckets
where
    I: IntoIterator<Item = &'a Transmitter>,
{
    transmitters
        .into_iter()
        .fold(PowerBuckets::default(), |mut buckets, transmitter| {
            match PowerBand::of(transmitter.power_watts) {
                PowerBand::Below500 => buckets.below_500 += 1,
                PowerBand::From500To1000 => buckets.from_500_to_1000 += 1,
                PowerBand::Above1000 => buckets.above_1000 += 1,
            }
            buckets
        })
}
