use crate::model::{SignalSample, Status, Transmitter};
use crate::synthesis::random::RandomSource;
use chrono::{Duration, NaiveDate};
use log::debug;
use std::ops::RangeInclusive;

pub const HISTORY_DAYS: u32 = 7;
pub const HOURS_PER_DAY: u8 = 24;
pub const SAMPLES_PER_TRANSMITTER: usize = HISTORY_DAYS as usize * HOURS_PER_DAY as usize;

pub const BASE_QUALITY_PCT: (f64, f64) = (70.0, 95.0);
pub const HOURLY_JITTER_PCT: f64 = 10.0;
pub const MAINTENANCE_BLACKOUT_HOURS: RangeInclusive<u8> = 2..=4;
pub const NIGHT_HOURS: RangeInclusive<u8> = 0..=5;
pub const NIGHT_ATTENUATION: f64 = 0.9;
pub const POWER_DRIFT: (f64, f64) = (0.9, 1.1);

/// Seven days of hourly samples per transmitter, most recent day first.
///
/// Each day draws one base quality before its hour loop, so the hours of a
/// day scatter around a shared mean.
pub fn generate_history<R: RandomSource + ?Sized>(
    transmitters: &[Transmitter],
    today: NaiveDate,
    rng: &mut R,
) -> Vec<SignalSample> {
    let mut samples = Vec::with_capacity(transmitters.len() * SAMPLES_PER_TRANSMITTER);

    for transmitter in transmitters {
        let nominal_power = f64::from(transmitter.power_watts);
        for day in 0..HISTORY_DAYS {
            let date = today - Duration::days(i64::from(day));
            let base_quality = rng.uniform(BASE_QUALITY_PCT.0, BASE_QUALITY_PCT.1);

            for hour in 0..HOURS_PER_DAY {
                let jitter = rng.uniform(-HOURLY_JITTER_PCT, HOURLY_JITTER_PCT);
                let quality_pct = hourly_quality(base_quality + jitter, hour, transmitter.status);
                let power_watts = nominal_power * rng.uniform(POWER_DRIFT.0, POWER_DRIFT.1);
                samples.push(SignalSample {
                    transmitter_id: transmitter.id.clone(),
                    date,
                    hour,
                    quality_pct,
                    power_watts,
                });
            }
        }
    }

    debug!(target: "fleet.synthesis", "generated {} signal samples", samples.len());
    samples
}

/// Applies maintenance blackout, then night attenuation, then clamps.
pub fn hourly_quality(raw: f64, hour: u8, status: Status) -> f64 {
    let mut quality = raw;
    if status == Status::Maintenance && MAINTENANCE_BLACKOUT_HOURS.contains(&hour) {
        quality = 0.0;
    }
    if NIGHT_HOURS.contains(&hour) {
        quality *= NIGHT_ATTENUATION;
    }
    quality.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::fleet::generate_fleet;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::{BTreeSet, HashMap};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn each_transmitter_gets_168_samples_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let fleet = generate_fleet(&mut rng);
        let history = generate_history(&fleet, today(), &mut rng);
        assert_eq!(history.len(), fleet.len() * SAMPLES_PER_TRANSMITTER);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for sample in &history {
            assert!((0.0..=100.0).contains(&sample.quality_pct));
            assert!(sample.hour < HOURS_PER_DAY);
            *counts.entry(sample.transmitter_id.as_str()).or_default() += 1;
        }
        assert_eq!(counts.len(), fleet.len());
        assert!(counts.values().all(|&count| count == 168));
    }

    #[test]
    fn history_spans_the_seven_days_before_today() {
        let mut rng = StdRng::seed_from_u64(8);
        let fleet = generate_fleet(&mut rng);
        let history = generate_history(&fleet[..1], today(), &mut rng);
        let dates: BTreeSet<_> = history.iter().map(|s| s.date).collect();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates.iter().next_back(), Some(&today()));
        assert_eq!(dates.iter().next(), Some(&(today() - Duration::days(6))));
    }

    #[test]
    fn maintenance_blackout_zeroes_early_morning_hours() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut fleet = generate_fleet(&mut rng);
        for transmitter in &mut fleet {
            transmitter.status = Status::Maintenance;
        }
        let history = generate_history(&fleet, today(), &mut rng);
        for sample in history.iter().filter(|s| MAINTENANCE_BLACKOUT_HOURS.contains(&s.hour)) {
            assert_eq!(sample.quality_pct, 0.0);
        }
        assert!(history
            .iter()
            .filter(|s| s.hour == 12)
            .all(|s| s.quality_pct > 0.0));
    }

    #[test]
    fn night_hours_average_below_daytime() {
        let mut rng = StdRng::seed_from_u64(77);
        let mut fleet = generate_fleet(&mut rng);
        for transmitter in &mut fleet {
            transmitter.status = Status::Active;
        }

        let (mut night_sum, mut night_count) = (0.0, 0usize);
        let (mut day_sum, mut day_count) = (0.0, 0usize);
        for _ in 0..10 {
            for sample in generate_history(&fleet, today(), &mut rng) {
                if NIGHT_HOURS.contains(&sample.hour) {
                    night_sum += sample.quality_pct;
                    night_count += 1;
                } else {
                    day_sum += sample.quality_pct;
                    day_count += 1;
                }
            }
        }
        let night_mean = night_sum / night_count as f64;
        let day_mean = day_sum / day_count as f64;
        assert!(night_mean < day_mean, "night {night_mean} vs day {day_mean}");
    }

    #[test]
    fn attenuation_applies_after_jitter_and_clamps() {
        assert_eq!(hourly_quality(105.0, 12, Status::Active), 100.0);
        assert!((hourly_quality(100.0, 1, Status::Active) - 90.0).abs() < 1e-9);
        assert_eq!(hourly_quality(80.0, 3, Status::Maintenance), 0.0);
        assert!((hourly_quality(80.0, 5, Status::Maintenance) - 72.0).abs() < 1e-9);
        assert_eq!(hourly_quality(-3.0, 12, Status::Inactive), 0.0);
    }

    #[test]
    fn sample_power_drifts_around_nominal() {
        let mut rng = StdRng::seed_from_u64(4);
        let fleet = generate_fleet(&mut rng);
        let history = generate_history(&fleet, today(), &mut rng);
        for sample in &history {
            let nominal = fleet
                .iter()
                .find(|t| t.id == sample.transmitter_id)
                .map(|t| f64::from(t.power_watts))
                .unwrap();
            assert!(sample.power_watts >= nominal * 0.9 - 1e-9);
            assert!(sample.power_watts <= nominal * 1.1 + 1e-9);
        }
    }
}
