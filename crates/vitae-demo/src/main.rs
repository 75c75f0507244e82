#![forbid(unsafe_code)]

//! vitae demo binary entry point.

use tracing_subscriber::EnvFilter;
use vitae_demo::{cli, sim};

fn main() {
    let opts = cli::Opts::parse();

    if opts.log_json {
        vitae::core::logging::init_json_logging();
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let (config, device) = sim::configure(&opts);
    let report = match sim::run(&opts, config, &device) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to start background: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        target: "vitae::demo",
        frames = report.snapshot.metrics.total_frames,
        shapes = report.shapes,
        rating = report.snapshot.rating.as_str(),
        "simulation finished"
    );

    if opts.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to encode report: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let m = report.snapshot.metrics;
    println!(
        "{} shapes, {} ticks, {} links ({} rendered, {} frozen)",
        report.shapes, report.ticks, report.links, report.outcomes.rendered, report.outcomes.frozen
    );
    println!(
        "fps {} | avg {} | min {} | dropped {}/{} ({:.1}%) | {}",
        m.instantaneous_fps,
        m.average_fps,
        m.min_fps,
        m.dropped_frames,
        m.total_frames,
        report.snapshot.dropped_percent,
        report.snapshot.rating.label()
    );
    if let Some(overlay) = report.overlay {
        println!("{overlay}");
    }
    for reading in &report.vitals {
        println!("{reading}");
    }
}
