//! CLI entry point for the CTA Train Tracker client.
//!
//! Writes live train positions to CSV and answers reference lookups for
//! routes, stops, error codes, and query parameters.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use cta_train_tracker::fetch::{BasicClient, fetch_json};
use cta_train_tracker::output::print_json;
use cta_train_tracker::pipeline::write_positions_csv;
use cta_train_tracker::query::{ArrivalsQuery, FollowQuery};
use cta_train_tracker::reference::errors::describe_error;
use cta_train_tracker::reference::params::describe_param;
use cta_train_tracker::reference::stops::{StopKey, StopTable};
use cta_train_tracker::reference::ApiFamily;
use cta_train_tracker::{ApiConfig, Direction, Route, RouteFilter, WriteMode};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cta_train_tracker")]
#[command(about = "A client for the CTA Train Tracker APIs", long_about = None)]
struct Cli {
    /// API key (falls back to CTA_API_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch current train positions and write them to a CSV file
    Positions {
        /// Routes to query, by name or code (e.g. "brown,red"); all routes if omitted
        #[arg(short, long, value_delimiter = ',', conflicts_with = "raw")]
        routes: Vec<String>,

        /// Pre-built route suffix (e.g. "&rt=red&rt=brn")
        #[arg(long)]
        raw: Option<String>,

        /// 'w' to overwrite with a header row, 'a' to append
        #[arg(short, long, default_value = "w")]
        mode: String,

        /// CSV file to write (defaults to positions-<date>.csv)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Fetch arrival predictions for a station or stop
    Arrivals {
        #[arg(long, required_unless_present = "stpid")]
        mapid: Option<u32>,

        #[arg(long)]
        stpid: Option<u32>,

        #[arg(long)]
        max: Option<u32>,

        /// Route name (e.g. "brown")
        #[arg(long)]
        route: Option<String>,
    },
    /// Fetch upcoming stops for a single train run
    Follow {
        #[arg(long)]
        run: String,
    },
    /// Describe an API error code
    Error {
        /// arrivals, positions, or follow
        #[arg(short, long)]
        family: ApiFamily,

        #[arg(short, long)]
        code: u16,

        #[arg(short, long, default_value_t = false)]
        detail: bool,
    },
    /// Describe an API query parameter
    Param {
        #[arg(short, long)]
        family: ApiFamily,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value_t = false)]
        detail: bool,
    },
    /// Show the wire code and termini of a route
    Route {
        /// Route name (e.g. "brown")
        name: String,

        /// 1 or 5
        #[arg(short, long)]
        direction: Option<Direction>,
    },
    /// Look up a stop in a stop table CSV
    Stop {
        #[arg(short, long, default_value = "stops.csv")]
        table: String,

        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        id: Option<u32>,

        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/cta_train_tracker.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cta_train_tracker.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Positions {
            routes,
            raw,
            mode,
            output,
        } => {
            let mode: WriteMode = mode.parse()?;
            let filter = match raw {
                Some(raw) => RouteFilter::from_fragment(&raw),
                None => RouteFilter::Tokens(routes),
            };
            let output = output.unwrap_or_else(|| {
                format!("positions-{}.csv", Local::now().format("%Y-%m-%d"))
            });

            let config = api_config(cli.key)?;
            let rows = write_positions_csv(&BasicClient::new(), &config, &output, mode, &filter)?;
            info!(rows, output = %output, "Done");
        }
        Commands::Arrivals {
            mapid,
            stpid,
            max,
            route,
        } => {
            let query = ArrivalsQuery {
                mapid,
                stpid,
                max,
                route: route.as_deref().map(Route::from_name).transpose()?,
            };
            let url = query.to_url(&api_config(cli.key)?)?;
            print_json(&fetch_json(&BasicClient::new(), &url)?)?;
        }
        Commands::Follow { run } => {
            let url = FollowQuery::new(run).to_url(&api_config(cli.key)?)?;
            print_json(&fetch_json(&BasicClient::new(), &url)?)?;
        }
        Commands::Error {
            family,
            code,
            detail,
        } => {
            info!(%family, code, "{}", describe_error(family, code, detail)?);
        }
        Commands::Param {
            family,
            name,
            detail,
        } => {
            info!(%family, name = %name, "{}", describe_param(family, &name, detail)?);
        }
        Commands::Route { name, direction } => {
            let route = Route::from_name(&name)?;
            match direction {
                Some(dir) => info!(
                    route = %route,
                    code = route.code(),
                    direction = dir.code(),
                    terminus = route.terminus(dir),
                    "Route"
                ),
                None => {
                    let termini = route.termini();
                    info!(
                        route = %route,
                        code = route.code(),
                        direction_1 = termini.one,
                        direction_5 = termini.five,
                        "Route"
                    );
                }
            }
        }
        Commands::Stop { table, id, name } => {
            let stops = StopTable::load(&table)?;
            let key = match (id, name) {
                (Some(id), _) => StopKey::Id(id),
                (None, Some(name)) => StopKey::Name(name),
                (None, None) => anyhow::bail!("either --id or --name is required"),
            };
            print_json(stops.get(&key)?)?;
        }
    }

    Ok(())
}

fn api_config(key: Option<String>) -> Result<ApiConfig> {
    let key = match key {
        Some(key) => key,
        None => std::env::var("CTA_API_KEY").context("CTA_API_KEY must be set or --key given")?,
    };
    Ok(ApiConfig::new(key))
}
