//! # sensorcast
//!
//! Command-line front end for the sensor forecasting and anomaly detection
//! stack. Reads a CSV or JSON export, runs the requested analysis per
//! channel, and prints JSON results keyed by channel name.

mod error;
mod input;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anomaly_facade::{AnomalyOutcome, DetectorConfig, ModelRegistry, RegistryConfig};
use clap::{Args, Parser, Subcommand};
use forecast_facade::{forecast_channels, ForecastConfig, WindowForecaster};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use error::{CliError, CliResult};
use input::Table;

#[derive(Parser)]
#[command(name = "sensorcast")]
#[command(about = "Forecasting and anomaly detection for sensor channels", long_about = None)]
struct Cli {
    /// Reading that marks missing data (e.g. -9999); matching rows are dropped
    #[arg(long, global = true, env = "SENSORCAST_MISSING_MARKER", allow_hyphen_values = true)]
    missing_marker: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IoArgs {
    /// Input file (CSV or JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast the next values of one or more channels
    Forecast {
        #[command(flatten)]
        io: IoArgs,

        /// Channel column to forecast; repeatable (default: every numeric column)
        #[arg(short, long)]
        column: Vec<String>,

        /// Column to leave out when picking numeric columns automatically
        #[arg(long, default_value = "Timestamp")]
        timestamp_column: String,

        /// Samples per regression window
        #[arg(short, long, env = "SENSORCAST_WINDOW_SIZE", default_value_t = forecast_facade::DEFAULT_WINDOW_SIZE)]
        window_size: usize,

        /// Number of future values to predict
        #[arg(short, long, env = "SENSORCAST_FUTURE_STEPS", default_value_t = forecast_facade::DEFAULT_FUTURE_STEPS)]
        steps: usize,
    },

    /// Fit an anomaly model per channel and flag anomalous windows
    Detect {
        #[command(flatten)]
        io: IoArgs,

        /// Channel column to analyse; repeatable
        #[arg(short, long, required = true)]
        column: Vec<String>,

        /// Column holding sample timestamps
        #[arg(short, long)]
        timestamp_column: Option<String>,

        /// Samples per window
        #[arg(short, long, env = "SENSORCAST_WINDOW_SIZE", default_value_t = anomaly_facade::DEFAULT_WINDOW_SIZE)]
        window_size: usize,

        /// Training epochs
        #[arg(short, long, env = "SENSORCAST_EPOCHS", default_value_t = anomaly_facade::DEFAULT_EPOCHS)]
        epochs: usize,

        /// Seed for weight initialisation
        #[arg(long, env = "SENSORCAST_SEED", default_value_t = anomaly_facade::DEFAULT_SEED)]
        seed: u64,
    },
}

/// Write `value` as pretty JSON to `output`, or stdout when absent.
fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
            info!(path = %path.display(), "Results written");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, value)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}

fn run_forecast(
    io: IoArgs,
    columns: Vec<String>,
    timestamp_column: String,
    config: ForecastConfig,
    missing_marker: Option<f64>,
) -> CliResult<()> {
    let table = Table::load(&io.input)?;
    info!(rows = table.len(), "Forecasting");
    let columns = if columns.is_empty() {
        table.numeric_columns(Some(&timestamp_column))
    } else {
        columns
    };
    if columns.is_empty() {
        return Err(CliError::NoNumericColumns);
    }

    let mut channels = BTreeMap::new();
    for column in &columns {
        let series = table.series(column, None, missing_marker)?;
        info!(channel = %column, points = series.len(), "Loaded channel");
        channels.insert(column.clone(), series.values().to_vec());
    }

    let forecaster = WindowForecaster::new(config);
    let outcomes = forecast_channels(&forecaster, &channels);
    write_json(&outcomes, io.output.as_deref())
}

fn run_detect(
    io: IoArgs,
    columns: Vec<String>,
    timestamp_column: Option<String>,
    config: DetectorConfig,
    missing_marker: Option<f64>,
) -> CliResult<()> {
    let table = Table::load(&io.input)?;
    info!(rows = table.len(), channels = columns.len(), "Detecting anomalies");
    let registry = ModelRegistry::new(RegistryConfig::new(config));

    let mut outcomes: BTreeMap<String, AnomalyOutcome> = BTreeMap::new();
    for column in &columns {
        let series = table.series(column, timestamp_column.as_deref(), missing_marker)?;
        info!(channel = %column, points = series.len(), "Loaded channel");

        let outcome = match registry.fit(column, series.values()) {
            Ok(_) => registry.detect_outcome(column, series.values(), series.timestamps()),
            Err(err) => {
                warn!(channel = %column, error = %err, "Anomaly model could not be fitted");
                AnomalyOutcome::for_channel(column, Err(err))
            }
        };
        if let AnomalyOutcome::Detected(result) = &outcome {
            info!(
                channel = %column,
                anomalies = result.anomaly_count(),
                threshold = result.threshold,
                "Detection complete"
            );
        }
        outcomes.insert(column.clone(), outcome);
    }

    write_json(&outcomes, io.output.as_deref())
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensorcast=info,forecast_core=info,anomaly_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Forecast {
            io,
            column,
            timestamp_column,
            window_size,
            steps,
        } => run_forecast(
            io,
            column,
            timestamp_column,
            ForecastConfig::new(window_size, steps),
            cli.missing_marker,
        ),

        Commands::Detect {
            io,
            column,
            timestamp_column,
            window_size,
            epochs,
            seed,
        } => run_detect(
            io,
            column,
            timestamp_column,
            DetectorConfig::new(window_size, epochs).with_seed(seed),
            cli.missing_marker,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
