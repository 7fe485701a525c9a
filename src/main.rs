use anyhow::Result;
use chill_time::OutputFormat;
use chill_time::commands;
use chill_time::config;
use chill_time::service::ChillTimeService;
use chill_time::units::UnitSystem;
use chill_time::xtypes::XTypeRegistry;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chilltime")]
#[command(about = "Chill time (chill hours) from weather station records")]
#[command(version)]
struct Cli {
    #[arg(
        long = "config",
        global = true,
        help = "Config file (defaults to ~/.chill-time/config.toml)"
    )]
    config_path: Option<PathBuf>,

    #[arg(long, global = true, help = "Override algorithm: simple, utah or modified")]
    algorithm: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Units {
    Us,
    Metric,
    Metricwx,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Us => UnitSystem::Us,
            Units::Metric => UnitSystem::Metric,
            Units::Metricwx => UnitSystem::MetricWx,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Chill time for a single observation
    Scalar {
        #[arg(long, allow_hyphen_values = true, help = "Outside temperature")]
        temp: f64,
        #[arg(long, default_value = "60", help = "Interval length in minutes")]
        interval: f64,
        #[arg(long, value_enum, default_value = "us", help = "Unit system of --temp")]
        units: Units,
    },
    /// Sum chill time over a time range of archive records
    Sum {
        #[arg(long, help = "JSON array of archive records")]
        records: PathBuf,
        #[arg(long, help = "Range start, exclusive (RFC 3339)")]
        start: String,
        #[arg(long, help = "Range end, inclusive (RFC 3339)")]
        end: String,
    },
    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get { key: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if let Some(algorithm) = &cli.algorithm {
        config.chill_time.algorithm = algorithm.clone();
    }

    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::List => commands::config::list(&config),
            ConfigAction::Get { key } => commands::config::get(key, &config),
        };
    }

    let mut registry = XTypeRegistry::new();
    let service = ChillTimeService::new(&mut registry, &config)?;
    let algorithm = service.chill().algorithm();

    let result = match &cli.command {
        Commands::Scalar {
            temp,
            interval,
            units,
        } => commands::chill::scalar(
            &registry,
            algorithm,
            *temp,
            *interval,
            (*units).into(),
            cli.format,
        ),
        Commands::Sum {
            records,
            start,
            end,
        } => commands::chill::sum(&registry, algorithm, records, start, end, cli.format),
        Commands::Config { .. } => Ok(()),
    };

    service.shut_down(&mut registry);
    result
}
