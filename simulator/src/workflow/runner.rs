use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::config::WorkflowConfig;
use chrono::NaiveDateTime;
use fleetcore::analysis::{
    coverage_heatmap, current_quality_snapshot, filter_history, fleet_metrics,
    mean_quality_by_day, mean_quality_by_hour, power_distribution_buckets, sample_featured,
    BoundingBox, DailySeries, DateRange, HourlySeries,
};
use fleetcore::prelude::RandomSource;
use fleetcore::telemetry::LogManager;
use fleetcore::FleetDataset;

/// Turns a dataset into render-ready views; one call per render pass.
#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Full recompute of the dataset with fresh draws from `rng`.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R, now: NaiveDateTime) -> FleetDataset {
        FleetDataset::generate(rng, now)
    }

    /// Transmitters for the 7-day chart; kept until the next generation.
    pub fn select_featured<R: RandomSource + ?Sized>(
        &self,
        dataset: &FleetDataset,
        rng: &mut R,
    ) -> Vec<String> {
        sample_featured(&dataset.transmitters, self.config.featured_count, rng)
    }

    pub fn render<R: RandomSource + ?Sized>(
        &self,
        dataset: &FleetDataset,
        featured: &[String],
        rng: &mut R,
        range: &DateRange,
        now: NaiveDateTime,
    ) -> VisualizationModel {
        let transmitters = &dataset.transmitters;
        let current_quality = current_quality_snapshot(transmitters, rng);

        let window = filter_history(&dataset.history, range);
        let featured_daily = featured
            .iter()
            .map(|transmitter_id| DailySeries {
                transmitter_id: transmitter_id.clone(),
                points: mean_quality_by_day(window.iter().copied(), transmitter_id),
            })
            .collect();

        let hourly_quality = transmitters
            .iter()
            .map(|transmitter| HourlySeries {
                transmitter_id: transmitter.id.clone(),
                points: mean_quality_by_hour(&dataset.history, &transmitter.id),
            })
            .collect();

        let heatmap = coverage_heatmap(
            transmitters,
            BoundingBox::REUNION,
            self.config.heatmap_resolution,
        );

        if range.is_empty() {
            LogManager::new("fleet.render").warn("date range ends before it starts; no daily rows");
        }

        VisualizationModel {
            generated_at: dataset.generated_at,
            rendered_at: now,
            transmitters: transmitters.clone(),
            metrics: fleet_metrics(transmitters),
            current_quality,
            power_buckets: power_distribution_buckets(transmitters),
            heatmap,
            maintenance: dataset.maintenance.clone(),
            details: dataset.details.clone(),
            system: dataset.system,
            hourly_quality,
            featured_daily,
            date_range: *range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use rand::{rngs::StdRng, SeedableRng};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 20)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    #[test]
    fn runner_renders_every_view() {
        let runner = Runner::new(WorkflowConfig::from_args(Some(1), 20, 5).unwrap());
        let mut rng = StdRng::seed_from_u64(1);
        let dataset = runner.generate(&mut rng, now());
        let featured = runner.select_featured(&dataset, &mut rng);
        let model = runner.render(&dataset, &featured, &mut rng, &DateRange::unbounded(), now());

        assert_eq!(model.transmitters.len(), 12);
        assert_eq!(model.current_quality.len(), 12);
        assert_eq!(model.power_buckets.total(), 12);
        assert_eq!(model.heatmap.resolution(), (20, 20));
        assert_eq!(model.maintenance.len(), 12);
        assert_eq!(model.details.len(), 12);
        assert_eq!(model.system, dataset.system);
        assert_eq!(model.featured_daily.len(), 5);
        assert!(model.featured_daily.iter().all(|series| series.points.len() == 7));
        assert!(model.hourly_quality.iter().all(|series| series.points.len() == 24));
        assert!(model
            .hourly_quality
            .iter()
            .any(|series| series.transmitter_id == "FR-001"));
    }

    #[test]
    fn date_range_narrows_daily_series() {
        let runner = Runner::new(WorkflowConfig::from_args(Some(2), 5, 3).unwrap());
        let mut rng = StdRng::seed_from_u64(2);
        let dataset = runner.generate(&mut rng, now());
        let featured = runner.select_featured(&dataset, &mut rng);
        let today = now().date();

        let recent = DateRange::new(today - Duration::days(1), today);
        let model = runner.render(&dataset, &featured, &mut rng, &recent, now());
        assert!(model.featured_daily.iter().all(|series| series.points.len() == 2));

        let inverted = DateRange::new(today, today - Duration::days(1));
        let model = runner.render(&dataset, &featured, &mut rng, &inverted, now());
        assert!(model.featured_daily.iter().all(|series| series.points.is_empty()));
    }

    #[test]
    fn featured_set_is_stable_across_renders() {
        let runner = Runner::new(WorkflowConfig::from_args(Some(3), 5, 4).unwrap());
        let mut rng = StdRng::seed_from_u64(3);
        let dataset = runner.generate(&mut rng, now());
        let featured = runner.select_featured(&dataset, &mut rng);
        assert_eq!(featured.len(), 4);

        let ids = |model: &VisualizationModel| -> Vec<String> {
            model
                .featured_daily
                .iter()
                .map(|series| series.transmitter_id.clone())
                .collect()
        };
        let first = runner.render(&dataset, &featured, &mut rng, &DateRange::unbounded(), now());
        let second = runner.render(&dataset, &featured, &mut rng, &DateRange::unbounded(), now());
        assert_eq!(ids(&first), featured);
        assert_eq!(ids(&second), featured);
    }
}
