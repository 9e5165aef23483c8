// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Loadcurve CLI
//!
//! Command-line interface for summarizing power meter exports.

mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loadcurve_core::{LoadcurveConfig, ResamplingFrequency};
use loadcurve_query::Aggregator;
use loadcurve_storage::{CsvSource, TimeSeriesStore};
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loadcurve")]
#[command(about = "Loadcurve - power series resampling and aggregation", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "LOADCURVE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,

    /// Output as JSON (machine-readable)
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show observation count, channels and time range
    Summary {
        /// Meter export (CSV)
        input: PathBuf,
    },

    /// Mean of each channel per bucket
    Resample {
        /// Meter export (CSV)
        input: PathBuf,

        /// Bucket width: hourly, daily, weekly or monthly (H/D/W/M)
        #[arg(short, long)]
        frequency: Option<ResamplingFrequency>,
    },

    /// Mean, min and max of each channel per bucket
    Spread {
        /// Meter export (CSV)
        input: PathBuf,

        /// Bucket width: hourly, daily, weekly or monthly (H/D/W/M)
        #[arg(short, long)]
        frequency: Option<ResamplingFrequency>,
    },

    /// Statistics per hour of day across all days
    Hourly {
        /// Meter export (CSV)
        input: PathBuf,
    },

    /// Statistics per month of year across all years
    Monthly {
        /// Meter export (CSV)
        input: PathBuf,
    },

    /// All four views at once
    Dashboard {
        /// Meter export (CSV)
        input: PathBuf,

        /// Bucket width of the resampled views
        #[arg(short, long)]
        frequency: Option<ResamplingFrequency>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG overrides --verbose
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let aggregator =
        Aggregator::from_config(&config.aggregation).context("Invalid aggregation settings")?;
    let default_frequency = config.aggregation.default_frequency;

    match cli.command {
        Commands::Summary { input } => {
            let store = open_store(&input, &config)?;
            output::summary(&store, cli.json)?;
        }

        Commands::Resample { input, frequency } => {
            let store = open_store(&input, &config)?;
            let frequency = frequency.unwrap_or(default_frequency);
            let rows = aggregator
                .resample(&store, frequency)
                .context("Failed to resample")?;
            output::resampled(&rows, store.channels(), cli.json)?;
        }

        Commands::Spread { input, frequency } => {
            let store = open_store(&input, &config)?;
            let frequency = frequency.unwrap_or(default_frequency);
            let rows = aggregator
                .resample_with_spread(&store, frequency)
                .context("Failed to resample")?;
            output::spread(&rows, store.channels(), cli.json)?;
        }

        Commands::Hourly { input } => {
            let store = open_store(&input, &config)?;
            let profile = aggregator
                .group_by_hour_of_day(&store)
                .context("Failed to group by hour of day")?;
            output::profile(&profile, store.channels(), cli.json)?;
        }

        Commands::Monthly { input } => {
            let store = open_store(&input, &config)?;
            let profile = aggregator
                .group_by_month_of_year(&store)
                .context("Failed to group by month of year")?;
            output::profile(&profile, store.channels(), cli.json)?;
        }

        Commands::Dashboard { input, frequency } => {
            let store = open_store(&input, &config)?;
            let frequency = frequency.unwrap_or(default_frequency);
            let dashboard = aggregator
                .dashboard(&store, frequency)
                .context("Failed to compute dashboard")?;
            output::dashboard(&dashboard, store.channels(), cli.json)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<LoadcurveConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            LoadcurveConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(LoadcurveConfig::default()),
    }
}

fn open_store(input: &Path, config: &LoadcurveConfig) -> Result<TimeSeriesStore> {
    let source = CsvSource::new(input, config.source.clone());
    TimeSeriesStore::from_source(&source, &config.source.channel_names())
        .with_context(|| format!("Failed to load {}", source.path().display()))
}
