use crate::math::stats::StatsHelper;
use crate::model::{SignalSample, Status, Transmitter};
use crate::synthesis::RandomSource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyMean {
    pub hour: u8,
    pub quality_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub quality_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlySeries {
    pub transmitter_id: String,
    pub points: Vec<HourlyMean>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySeries {
    pub transmitter_id: String,
    pub points: Vec<DailyMean>,
}

/// "Live" quality figure shown on the current-quality chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityReading {
    pub transmitter_id: String,
    pub name: String,
    pub status: Status,
    pub quality_pct: f64,
}

/// Averages one transmitter's samples per hour of day, across all days.
pub fn mean_quality_by_hour<'a, I>(history: I, transmitter_id: &str) -> Vec<HourlyMean>
where
    I: IntoIterator<Item = &'a SignalSample>,
{
    let mut by_hour: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for sample in history
        .into_iter()
        .filter(|sample| sample.transmitter_id == transmitter_id)
    {
        by_hour.entry(sample.hour).or_default().push(sample.quality_pct);
    }
    by_hour
        .into_iter()
        .map(|(hour, values)| HourlyMean {
            hour,
            quality_pct: StatsHelper::mean(&values),
        })
        .collect()
}

/// Averages one transmitter's samples per calendar day, oldest day first.
pub fn mean_quality_by_day<'a, I>(history: I, transmitter_id: &str) -> Vec<DailyMean>
where
    I: IntoIterator<Item = &'a SignalSample>,
{
    let mut by_day: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for sample in history
        .into_iter()
        .filter(|sample| sample.transmitter_id == transmitter_id)
    {
        by_day.entry(sample.date).or_default().push(sample.quality_pct);
    }
    by_day
        .into_iter()
        .map(|(date, values)| DailyMean {
            date,
            quality_pct: StatsHelper::mean(&values),
        })
        .collect()
}

/// Fresh draw per call, independent of the stored history.
pub fn current_quality_snapshot<R: RandomSource + ?Sized>(
    transmitters: &[Transmitter],
    rng: &mut R,
) -> Vec<QualityReading> {
    transmitters
        .iter()
        .map(|transmitter| {
            let quality_pct = match transmitter.status {
                Status::Active => rng.uniform(70.0, 95.0),
                Status::Maintenance => rng.uniform(0.0, 50.0),
                Status::Inactive => 0.0,
            };
            QualityReading {
                transmitter_id: transmitter.id.clone(),
                name: transmitter.name.clone(),
                status: transmitter.status,
                quality_pct,
            }
        })
        .collect()
}

/// Up to `count` distinct transmitter ids in random order.
pub fn sample_featured<R: RandomSource + ?Sized>(
    transmitters: &[Transmitter],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut ids: Vec<&str> = transmitters.iter().map(|t| t.id.as_str()).collect();
    let take = count.min(ids.len());
    for i in 0..take {
        let j = i + rng.index(ids.len() - i);
        ids.swap(i, j);
    }
    ids.into_iter().take(take).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::{generate_fleet, generate_history};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn fixture(seed: u64) -> (Vec<Transmitter>, Vec<SignalSample>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let fleet = generate_fleet(&mut rng);
        let today = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        let history = generate_history(&fleet, today, &mut rng);
        (fleet, history)
    }

    #[test]
    fn hourly_means_have_24_points() {
        let (fleet, history) = fixture(1);
        for transmitter in &fleet {
            let points = mean_quality_by_hour(&history, &transmitter.id);
            assert_eq!(points.len(), 24);
            assert!(points.iter().enumerate().all(|(i, p)| p.hour as usize == i));
            assert!(points.iter().all(|p| (0.0..=100.0).contains(&p.quality_pct)));
        }
    }

    #[test]
    fn daily_means_have_7_ascending_points() {
        let (fleet, history) = fixture(2);
        let points = mean_quality_by_day(&history, &fleet[3].id);
        assert_eq!(points.len(), 7);
        assert!(points.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn hourly_mean_matches_manual_average() {
        let (fleet, history) = fixture(3);
        let id = &fleet[0].id;
        let manual: Vec<f64> = history
            .iter()
            .filter(|s| &s.transmitter_id == id && s.hour == 10)
            .map(|s| s.quality_pct)
            .collect();
        let points = mean_quality_by_hour(&history, id);
        assert!((points[10].quality_pct - StatsHelper::mean(&manual)).abs() < 1e-9);
    }

    #[test]
    fn unknown_transmitter_yields_empty_series() {
        let (_, history) = fixture(4);
        assert!(mean_quality_by_hour(&history, "FR-999").is_empty());
        assert!(mean_quality_by_day(&history, "FR-999").is_empty());
    }

    #[test]
    fn snapshot_ranges_follow_status() {
        let (mut fleet, _) = fixture(5);
        for transmitter in &mut fleet {
            transmitter.status = Status::Active;
        }
        let mut rng = StdRng::seed_from_u64(50);
        let readings = current_quality_snapshot(&fleet, &mut rng);
        assert_eq!(readings.len(), 12);
        assert!(readings
            .iter()
            .all(|r| (70.0..=95.0).contains(&r.quality_pct)));

        fleet[4].status = Status::Inactive;
        fleet[5].status = Status::Maintenance;
        let readings = current_quality_snapshot(&fleet, &mut rng);
        assert_eq!(readings[4].quality_pct, 0.0);
        assert!((0.0..=50.0).contains(&readings[5].quality_pct));
    }

    #[test]
    fn snapshot_is_redrawn_each_call() {
        let (mut fleet, _) = fixture(6);
        for transmitter in &mut fleet {
            transmitter.status = Status::Active;
        }
        let mut rng = StdRng::seed_from_u64(60);
        let first = current_quality_snapshot(&fleet, &mut rng);
        let second = current_quality_snapshot(&fleet, &mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn featured_ids_are_distinct_and_bounded() {
        let (fleet, _) = fixture(7);
        let mut rng = StdRng::seed_from_u64(70);
        let featured = sample_featured(&fleet, 5, &mut rng);
        assert_eq!(featured.len(), 5);
        let unique: HashSet<_> = featured.iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(featured.iter().all(|id| fleet.iter().any(|t| &t.id == id)));

        assert_eq!(sample_featured(&fleet, 40, &mut rng).len(), 12);
        assert!(sample_featured(&[], 5, &mut rng).is_empty());
        assert!(current_quality_snapshot(&[], &mut rng).is_empty());
    }
}
