use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use rideshare_core::{Dispatcher, ManualClock};
use rideshare_records::{load_records, RecordPaths};
use rideshare_sim::{load_config, plan_requests, run, RunPlan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rideshare-sim",
    about = "Replay trip requests against the ride-share dispatch engine",
    long_about = "Loads users, drivers and trips from CSV, dispatches each requested\n\
                  trip in order on a simulated clock, and prints a JSON summary."
)]
struct Cli {
    /// Directory holding users.csv, drivers.csv and trips.csv
    #[arg(long, env = "RIDESHARE_DATA", default_value = ".")]
    data: PathBuf,
    /// Override the users file
    #[arg(long)]
    users: Option<PathBuf>,
    /// Override the drivers file
    #[arg(long)]
    drivers: Option<PathBuf>,
    /// Override the trips file
    #[arg(long)]
    trips: Option<PathBuf>,
    /// JSON dispatch config; defaults apply when omitted
    #[arg(long, env = "RIDESHARE_CONFIG")]
    config: Option<PathBuf>,
    /// Passenger ID to request a trip for (repeatable, in order)
    #[arg(long = "request")]
    requests: Vec<u32>,
    /// Additional requests from uniformly sampled passengers
    #[arg(long, default_value_t = 0)]
    random_requests: usize,
    /// RNG seed for sampled requests and completions
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Complete each trip right after it is dispatched
    #[arg(long)]
    complete_trips: bool,
    /// Simulated seconds between requests
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32))]
    interval_secs: u32,
    /// Simulated start time (RFC 3339); defaults to now
    #[arg(long)]
    start: Option<DateTime<Utc>>,
    /// Pretty-print the JSON summary
    #[arg(long)]
    pretty: bool,
}

fn init_tracing() {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let defaults = RecordPaths::in_dir(&cli.data);
    let paths = RecordPaths {
        users: cli.users.unwrap_or(defaults.users),
        drivers: cli.drivers.unwrap_or(defaults.drivers),
        trips: cli.trips.unwrap_or(defaults.trips),
    };
    let records = load_records(&paths).context("loading records")?;

    let clock = Arc::new(ManualClock::new(cli.start.unwrap_or_else(Utc::now)));
    let mut dispatcher =
        Dispatcher::with_clock(records, config, Arc::clone(&clock)).context("building dispatcher")?;

    let plan = RunPlan {
        requests: plan_requests(
            &cli.requests,
            cli.random_requests,
            dispatcher.passengers(),
            cli.seed,
        ),
        complete_trips: cli.complete_trips,
        interval: Duration::seconds(i64::from(cli.interval_secs)),
        seed: cli.seed,
    };
    let summary = run(&mut dispatcher, &clock, &plan);

    let json = if cli.pretty {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    }
    .context("serializing summary")?;
    println!("{json}");
    Ok(())
}
