use crate::generator::profile::{local_now, GeneratorConfig};
use crate::gui_bridge::model::{PayloadQuery, VisualizationModel};
use crate::workflow::runner::Runner;
use anyhow::Context;
use fleetcore::analysis::{mean_quality_by_day, mean_quality_by_hour, DateRange};
use fleetcore::telemetry::{LogManager, MetricsRecorder};
use fleetcore::FleetDataset;
use rand::rngs::StdRng;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Dataset currently on display plus the RNG feeding per-render draws.
pub struct DashboardState {
    pub dataset: FleetDataset,
    /// Chosen once per generation so the 7-day chart keeps its set between polls.
    pub featured: Vec<String>,
    pub rng: StdRng,
}

type SharedState = Arc<Mutex<DashboardState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, DashboardState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn regenerate(state: &SharedState, runner: &Runner, reseed: Option<&GeneratorConfig>) -> usize {
    let mut guard = lock(state);
    let state = &mut *guard;
    if let Some(config) = reseed {
        state.rng = config.build_rng();
    }
    state.dataset = runner.generate(&mut state.rng, local_now());
    state.featured = runner.select_featured(&state.dataset, &mut state.rng);
    state.dataset.transmitters.len()
}

/// Bridge that hosts the dashboard HTTP endpoints over one shared dataset.
pub struct GuiBridge {
    state: SharedState,
    runner: Arc<Runner>,
    metrics: Arc<MetricsRecorder>,
    logger: Arc<LogManager>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>, dataset: FleetDataset, mut rng: StdRng) -> Self {
        let featured = runner.select_featured(&dataset, &mut rng);
        Self {
            state: Arc::new(Mutex::new(DashboardState {
                dataset,
                featured,
                rng,
            })),
            runner,
            metrics: Arc::new(MetricsRecorder::new()),
            logger: Arc::new(LogManager::new("fleet.bridge")),
        }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone + Send + Sync + 'static
    {
        let state = self.state.clone();
        let state_filter = warp::any().map(move || state.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());
        let metrics = self.metrics.clone();
        let metrics_filter = warp::any().map(move || metrics.clone());
        let logger = self.logger.clone();
        let logger_filter = warp::any().map(move || logger.clone());

        let payload_route = warp::path("payload")
            .and(warp::path::end())
            .and(warp::get())
            .and(warp::query::<PayloadQuery>())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and(metrics_filter.clone())
            .map(
                |query: PayloadQuery,
                 state: SharedState,
                 runner: Arc<Runner>,
                 metrics: Arc<MetricsRecorder>| {
                    let model = render(&state, &runner, &query.range());
                    metrics.record_render();
                    warp::reply::json(&model)
                },
            );

        let hourly_route = warp::path!("history" / String / "hourly")
            .and(warp::get())
            .and(state_filter.clone())
            .and(logger_filter.clone())
            .map(|transmitter_id: String, state: SharedState, logger: Arc<LogManager>| {
                let guard = lock(&state);
                warn_unknown(&guard.dataset, &transmitter_id, &logger);
                let points =
                    mean_quality_by_hour(guard.dataset.history_for(&transmitter_id), &transmitter_id);
                warp::reply::json(&points)
            });

        let daily_route = warp::path!("history" / String / "daily")
            .and(warp::get())
            .and(state_filter.clone())
            .and(logger_filter.clone())
            .map(|transmitter_id: String, state: SharedState, logger: Arc<LogManager>| {
                let guard = lock(&state);
                warn_unknown(&guard.dataset, &transmitter_id, &logger);
                let points =
                    mean_quality_by_day(guard.dataset.history_for(&transmitter_id), &transmitter_id);
                warp::reply::json(&points)
            });

        let refresh_route = warp::path("refresh")
            .and(warp::path::end())
            .and(warp::post())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and(metrics_filter.clone())
            .and(logger_filter.clone())
            .map(
                |state: SharedState,
                 runner: Arc<Runner>,
                 metrics: Arc<MetricsRecorder>,
                 logger: Arc<LogManager>| {
                    let transmitters = regenerate(&state, &runner, None);
                    metrics.record_regeneration();
                    logger.record("dataset refreshed on request");
                    warp::reply::with_status(
                        warp::reply::json(&json!({"status": "ok", "transmitters": transmitters})),
                        StatusCode::OK,
                    )
                },
            );

        let generator_route = warp::path("ingest-config")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::content_length_limit(MAX_BODY_BYTES))
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and(metrics_filter.clone())
            .and(logger_filter)
            .map(
                |config: GeneratorConfig,
                 state: SharedState,
                 runner: Arc<Runner>,
                 metrics: Arc<MetricsRecorder>,
                 logger: Arc<LogManager>| {
                    let transmitters = regenerate(&state, &runner, Some(&config));
                    metrics.record_regeneration();
                    if let Some(name) = config.scenario.as_ref() {
                        logger.record(&format!("scenario {name} -> {transmitters} transmitters"));
                    }
                    warp::reply::with_status(
                        warp::reply::json(&json!({
                            "status": "ok",
                            "transmitters": transmitters,
                            "seed": config.seed,
                            "description": config.description.clone().unwrap_or_default()
                        })),
                        StatusCode::OK,
                    )
                },
            );

        let metrics_route = warp::path("metrics")
            .and(warp::path::end())
            .and(warp::get())
            .and(metrics_filter)
            .map(|metrics: Arc<MetricsRecorder>| warp::reply::json(&metrics.snapshot()));

        payload_route
            .or(hourly_route)
            .or(daily_route)
            .or(refresh_route)
            .or(generator_route)
            .or(metrics_route)
    }

    /// Starts the HTTP listener on a dedicated thread and returns once the
    /// socket is bound, with the bound address.
    pub fn serve(
        &self,
        address: SocketAddr,
    ) -> anyhow::Result<(SocketAddr, thread::JoinHandle<()>)> {
        let routes = self.routes();
        let logger = self.logger.clone();
        let (bound_tx, bound_rx) = mpsc::channel::<Result<SocketAddr, String>>();
        let handle = thread::Builder::new()
            .name("gui-bridge".into())
            .spawn(move || {
                let runtime = match Builder::new_current_thread().enable_all().build() {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        let _ = bound_tx.send(Err(format!("building bridge runtime: {err}")));
                        return;
                    }
                };
                runtime.block_on(async move {
                    match warp::serve(routes).try_bind_ephemeral(address) {
                        Ok((bound, server)) => {
                            logger.record(&format!("listening on http://{bound}"));
                            let _ = bound_tx.send(Ok(bound));
                            server.await;
                        }
                        Err(err) => {
                            let _ = bound_tx.send(Err(format!("binding {address}: {err}")));
                        }
                    }
                });
            })
            .context("spawning bridge thread")?;

        let bound = bound_rx
            .recv()
            .context("bridge thread exited before binding")?
            .map_err(anyhow::Error::msg)?;
        Ok((bound, handle))
    }

    pub fn render(&self, range: &DateRange) -> VisualizationModel {
        let model = render(&self.state, &self.runner, range);
        self.metrics.record_render();
        model
    }

    pub fn publish_status(&self, message: &str) {
        self.logger.record(message);
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> FleetDataset {
        lock(&self.state).dataset.clone()
    }
}

fn render(state: &SharedState, runner: &Runner, range: &DateRange) -> VisualizationModel {
    let mut guard = lock(state);
    let state = &mut *guard;
    runner.render(
        &state.dataset,
        &state.featured,
        &mut state.rng,
        range,
        local_now(),
    )
}

fn warn_unknown(dataset: &FleetDataset, transmitter_id: &str, logger: &LogManager) {
    if dataset.transmitter(transmitter_id).is_none() {
        logger.warn(&format!("history requested for unknown transmitter {transmitter_id}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::WorkflowConfig;
    use fleetcore::analysis::HourlyMean;
    use fleetcore::telemetry::Metrics;
    use rand::SeedableRng;

    fn bridge(seed: u64) -> GuiBridge {
        let runner = Arc::new(Runner::new(WorkflowConfig::from_args(Some(seed), 10, 5).unwrap()));
        let mut rng = StdRng::seed_from_u64(seed);
        let dataset = runner.generate(&mut rng, local_now());
        GuiBridge::new(runner, dataset, rng)
    }

    #[test]
    fn render_counts_passes() {
        let gui = bridge(4);
        let model = gui.render(&DateRange::unbounded());
        assert_eq!(model.transmitters.len(), 12);
        gui.render(&DateRange::unbounded());
        assert_eq!(gui.metrics.snapshot().renders, 2);
    }

    #[tokio::test]
    async fn payload_route_serves_full_fleet() {
        let gui = bridge(5);
        let response = warp::test::request()
            .method("GET")
            .path("/payload")
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["transmitters"].as_array().unwrap().len(), 12);
        assert_eq!(body["current_quality"].as_array().unwrap().len(), 12);
        assert_eq!(body["details"].as_array().unwrap().len(), 12);
        assert!(body["system"]["active_alerts"].as_u64().unwrap() <= 3);
    }

    #[tokio::test]
    async fn payload_keeps_featured_set_until_refresh() {
        let gui = bridge(9);
        let routes = gui.routes();
        let featured = |body: &[u8]| -> Vec<String> {
            let model: VisualizationModel = serde_json::from_slice(body).unwrap();
            model
                .featured_daily
                .into_iter()
                .map(|series| series.transmitter_id)
                .collect()
        };

        let first = warp::test::request().path("/payload").reply(&routes).await;
        let second = warp::test::request().path("/payload").reply(&routes).await;
        assert_eq!(featured(first.body()), featured(second.body()));
        assert_eq!(featured(first.body()), lock(&gui.state).featured);

        warp::test::request()
            .method("POST")
            .path("/refresh")
            .reply(&routes)
            .await;
        let third = warp::test::request().path("/payload").reply(&routes).await;
        assert_eq!(featured(third.body()), lock(&gui.state).featured);
        assert_eq!(featured(third.body()).len(), 5);
    }

    #[test]
    fn serve_reports_bind_failures() {
        let gui = bridge(10);
        let any_port = SocketAddr::from(([127, 0, 0, 1], 0));
        let (bound, _server) = gui.serve(any_port).unwrap();
        assert_ne!(bound.port(), 0);

        let err = gui.serve(bound).unwrap_err();
        assert!(err.to_string().contains("binding"));
    }

    #[tokio::test]
    async fn payload_route_accepts_date_window() {
        let gui = bridge(6);
        let today = gui.snapshot().today();
        let path = format!("/payload?start={}&end={}", today, today);
        let response = warp::test::request()
            .method("GET")
            .path(&path)
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let model: VisualizationModel = serde_json::from_slice(response.body()).unwrap();
        assert!(model
            .featured_daily
            .iter()
            .all(|series| series.points.len() == 1));
    }

    #[tokio::test]
    async fn history_routes_return_series_or_empty() {
        let gui = bridge(7);
        let routes = gui.routes();
        let hourly = warp::test::request()
            .method("GET")
            .path("/history/FR-002/hourly")
            .reply(&routes)
            .await;
        let points: Vec<HourlyMean> = serde_json::from_slice(hourly.body()).unwrap();
        assert_eq!(points.len(), 24);
        let expected = mean_quality_by_hour(&gui.snapshot().history, "FR-002");
        assert_eq!(points, expected);

        let unknown = warp::test::request()
            .method("GET")
            .path("/history/FR-999/daily")
            .reply(&routes)
            .await;
        assert_eq!(unknown.status(), StatusCode::OK);
        assert_eq!(unknown.body().as_ref(), b"[]");
    }

    #[tokio::test]
    async fn refresh_and_reseed_regenerate_dataset() {
        let gui = bridge(8);
        let routes = gui.routes();
        let before = gui.snapshot();

        let refreshed = warp::test::request()
            .method("POST")
            .path("/refresh")
            .reply(&routes)
            .await;
        assert_eq!(refreshed.status(), StatusCode::OK);
        assert_ne!(gui.snapshot().history, before.history);

        let reseeded = warp::test::request()
            .method("POST")
            .path("/ingest-config")
            .json(&GeneratorConfig::seeded(1234))
            .reply(&routes)
            .await;
        assert_eq!(reseeded.status(), StatusCode::OK);
        let expected = FleetDataset::generate(
            &mut GeneratorConfig::seeded(1234).build_rng(),
            gui.snapshot().generated_at,
        );
        assert_eq!(gui.snapshot().transmitters, expected.transmitters);

        let metrics = warp::test::request()
            .method("GET")
            .path("/metrics")
            .reply(&routes)
            .await;
        let metrics: Metrics = serde_json::from_slice(metrics.body()).unwrap();
        assert_eq!(metrics.regenerations, 2);
    }
}
