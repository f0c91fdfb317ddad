use anyhow::Context;
use clap::Parser;
use fleetcore::analysis::DateRange;
use fleetcore::prelude::Status;
use generator::profile::local_now;
use gui_bridge::bridge::GuiBridge;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::{WorkflowConfig, DEFAULT_FEATURED_COUNT, DEFAULT_HEATMAP_RESOLUTION};
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Synthetic transmitter fleet driver and dashboard bridge")]
struct Args {
    /// Generate the fleet once and emit a summary report
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Seed for reproducible data; fresh entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_HEATMAP_RESOLUTION)]
    heatmap_resolution: usize,
    /// Transmitters shown on the 7-day quality chart
    #[arg(long, default_value_t = DEFAULT_FEATURED_COUNT)]
    featured: usize,
    /// Keep the GUI bridge alive for dashboard clients
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.seed, args.heatmap_resolution, args.featured)?
    };

    let runner = Runner::new(workflow_config.clone());
    let mut rng = workflow_config.to_generator_config().build_rng();
    let dataset = runner.generate(&mut rng, local_now());
    let generated_at = dataset.generated_at;
    let today = dataset.today();
    let sample_count = dataset.history.len();
    let gui_bridge = GuiBridge::new(Arc::new(runner), dataset, rng);

    if args.offline {
        let model = gui_bridge.render(&DateRange::unbounded());
        let metrics = &model.metrics;

        println!(
            "Offline run -> transmitters {}, active {}, maintenance {}, inactive {}, total power {:.1} kW, avg coverage {:.1} km",
            metrics.total,
            metrics.count(Status::Active),
            metrics.count(Status::Maintenance),
            metrics.count(Status::Inactive),
            metrics.total_power_kw(),
            metrics.average_coverage_km
        );
        gui_bridge.publish_status("Offline fleet summary ready.");

        let urgent: Vec<&str> = model
            .maintenance
            .iter()
            .filter(|entry| entry.badge() != "Planned")
            .map(|entry| entry.transmitter_id.as_str())
            .collect();
        let due_today = model
            .maintenance
            .iter()
            .filter(|entry| entry.next_maintenance_date == today)
            .count();
        let report = format!(
            "generated_at={} transmitters={} samples={} peak_coverage={:.1} power_buckets={:?} urgent={:?} due_today={}\n",
            generated_at,
            metrics.total,
            sample_count,
            model.heatmap.max_signal(),
            model.power_buckets,
            urgent,
            due_today
        );
        let report_path = PathBuf::from("tools/data/offline_fleet.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report {}", report_path.display()))?;
        file.write_all(report.as_bytes())?;
    }

    if args.serve {
        let (bound, _server) = gui_bridge
            .serve(workflow_config.bind_address)
            .context("starting HTTP bridge")?;
        gui_bridge.publish_status(&format!(
            "HTTP bridge running on {bound} (Ctrl+C to stop)..."
        ));
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    } else if !args.offline {
        log::warn!("nothing to do: pass --offline and/or --serve");
    }

    Ok(())
}
