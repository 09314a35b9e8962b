//! CLI entry point for the taxi demand profiler.
//!
//! Provides subcommands for aggregating raw pickup observations into
//! per-zone hourly profiles, scanning cluster counts for the elbow curve,
//! and assigning final cluster labels to every zone.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use taxi_demand_profiler::cluster::assign::assign_clusters;
use taxi_demand_profiler::cluster::kmeans::KmeansParams;
use taxi_demand_profiler::cluster::selector::{scan_k, suggest_k};
use taxi_demand_profiler::loader::load_observations;
use taxi_demand_profiler::output::{
    write_assignments, write_labeled_observations, write_profiles, write_trials,
};
use taxi_demand_profiler::profile::build_profiles;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "taxi_demand_profiler")]
#[command(about = "Derive time-of-day demand profiles from taxi pickup data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ClusterArgs {
    /// RNG seed for centroid initialization
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of independent k-means restarts
    #[arg(long, default_value_t = 25)]
    restarts: u32,

    /// Iteration bound per restart
    #[arg(long, default_value_t = 100)]
    max_iter: u32,
}

impl ClusterArgs {
    fn params(&self) -> KmeansParams {
        KmeansParams {
            seed: self.seed,
            n_restarts: self.restarts,
            max_iter: self.max_iter,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate raw observations into per-zone hourly demand profiles
    Profile {
        /// Observations CSV (zone,date,hour,pickups)
        #[arg(value_name = "OBSERVATIONS_CSV")]
        input: String,

        /// CSV file to write profiles to
        #[arg(short, long, default_value = "profiles.csv")]
        output: String,
    },
    /// Scan candidate cluster counts and write the elbow (WSS) curve
    Elbow {
        /// Observations CSV (zone,date,hour,pickups)
        #[arg(value_name = "OBSERVATIONS_CSV")]
        input: String,

        /// Smallest cluster count to try
        #[arg(long, default_value_t = 1)]
        k_min: usize,

        /// Largest cluster count to try
        #[arg(long, default_value_t = 10)]
        k_max: usize,

        /// CSV file to write the k/WSS curve to
        #[arg(short, long, default_value = "elbow.csv")]
        output: String,

        /// Also log the knee heuristic's suggested k (never applied silently)
        #[arg(long, default_value_t = false)]
        suggest: bool,

        #[command(flatten)]
        cluster: ClusterArgs,
    },
    /// Fit the final clustering at a chosen k and label every zone
    Assign {
        /// Observations CSV (zone,date,hour,pickups)
        #[arg(value_name = "OBSERVATIONS_CSV")]
        input: String,

        /// Final cluster count, picked from the elbow curve
        #[arg(short, long)]
        k: usize,

        /// CSV file to write zone/cluster assignments to
        #[arg(short, long, default_value = "clusters.csv")]
        output: String,

        /// Optional: also write the observation table joined with cluster labels
        #[arg(long)]
        labeled_output: Option<String>,

        #[command(flatten)]
        cluster: ClusterArgs,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/taxi_demand_profiler.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("taxi_demand_profiler.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Profile { input, output } => {
            let observations = load_observations(&input)?;
            let profiles = build_profiles(&observations)?;

            info!(
                observations = observations.len(),
                zones = profiles.len(),
                "Profiles built"
            );
            write_profiles(&output, &profiles)?;
            info!(output, "Profiles written");
        }
        Commands::Elbow {
            input,
            k_min,
            k_max,
            output,
            suggest,
            cluster,
        } => {
            let observations = load_observations(&input)?;
            let profiles = build_profiles(&observations)?;
            let trials = scan_k(&profiles, k_min, k_max, &cluster.params())?;

            for trial in &trials {
                info!(k = trial.k, wss = trial.wss, "Elbow trial");
            }
            write_trials(&output, &trials)?;
            info!(output, k_min, k_max, "Elbow curve written");

            if suggest {
                match suggest_k(&trials) {
                    Some(k) => info!(k, "Knee heuristic suggestion"),
                    None => info!("Knee heuristic needs at least three trials"),
                }
            }
        }
        Commands::Assign {
            input,
            k,
            output,
            labeled_output,
            cluster,
        } => {
            let observations = load_observations(&input)?;
            let profiles = build_profiles(&observations)?;
            let assignment = assign_clusters(&profiles, k, &cluster.params())?;

            info!(k, zones = assignment.zones.len(), "Clusters assigned");
            write_assignments(&output, &assignment)?;
            info!(output, "Assignments written");

            if let Some(labeled_path) = labeled_output {
                write_labeled_observations(&labeled_path, &observations, &assignment)?;
                info!(labeled_path, "Labeled observation table written");
            }
        }
    }

    Ok(())
}
