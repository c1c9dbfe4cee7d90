//! hos-trip-planner - FMCSA Hours-of-Service trip planner CLI.
//!
//! Turns free-text current/pickup/dropoff locations and a cycle-hours
//! figure into a driver log grid and ordered stop list, by resolving a
//! route summary (§ route module) and handing it to the HOS simulation
//! core (§ hos module).

mod cli;
mod config;
mod hos;
mod route;

use std::io::Read;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// The `plan` subcommand's JSON request shape (file or stdin).
#[derive(Debug, Deserialize)]
struct PlanRequestJson {
    current_location: String,
    pickup_location: String,
    dropoff_location: String,
    current_cycle_used_hours: f64,
    #[serde(default)]
    assume_distance_mi: Option<f64>,
    #[serde(default)]
    start_dt: Option<DateTime<Utc>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = config::Config::from_env()?;
    init_logging(&config)?;

    match cli.command {
        Some(cli::Command::Plan { input }) => run_plan(input).await,
        None => run_plan(None).await,
    }
}

fn init_logging(config: &config::Config) -> Result<()> {
    std::fs::create_dir_all(&config.logs_dir).ok();

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.logs_dir, "planner.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // Leaked so the writer outlives `init_logging`; a CLI invocation is
    // short-lived and exits once `run_plan` returns.
    Box::leak(Box::new(guard));

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hos_trip_planner=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

async fn run_plan(input: Option<String>) -> Result<()> {
    let raw = match input {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("reading input file {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading plan request from stdin")?;
            buf
        }
    };

    let req: PlanRequestJson =
        serde_json::from_str(&raw).context("parsing plan request JSON")?;

    info!(
        current = %req.current_location,
        pickup = %req.pickup_location,
        dropoff = %req.dropoff_location,
        "resolving route summary"
    );

    let geocoder = route::create_geocoder();
    let router = route::create_routing_service();

    let summary_req = route::RouteSummaryRequest {
        current_location: req.current_location,
        pickup_location: req.pickup_location,
        dropoff_location: req.dropoff_location,
        assume_distance_mi: req.assume_distance_mi,
    };
    let summary = route::resolve_route_summary(&summary_req, geocoder.as_ref(), router.as_ref()).await;

    info!(
        distance_mi = summary.distance_mi,
        duration_hr = summary.duration_hr,
        pre_pickup_drive_min = summary.pre_pickup_drive_min,
        "route summary resolved, handing off to HOS planner"
    );

    let plan_req = hos::PlanRequest {
        distance_mi: summary.distance_mi,
        duration_hr: summary.duration_hr,
        current_cycle_used_hours: req.current_cycle_used_hours,
        pre_pickup_drive_min: summary.pre_pickup_drive_min,
        start_dt: req.start_dt,
    };

    let planner = hos::Planner::new(plan_req).context("invalid plan request")?;
    let output = planner.plan_with_polyline(summary.polyline);

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
