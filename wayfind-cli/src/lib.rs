//! Command-line interface for the Wayfind navigation engine.
#![forbid(unsafe_code)]

use std::io::{Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use log::{LevelFilter, debug};
use serde::Serialize;
use wayfind_engine::{Navigator, PointPayload};

mod config;
mod error;

pub use error::CliError;

use config::StorageArgs;

pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_POINTS_FILE: &str = "points-file";
pub(crate) const ARG_STATISTICS_FILE: &str = "statistics-file";
pub(crate) const ARG_ROUTES_FILE: &str = "routes-file";
pub(crate) const ARG_METERS_PER_UNIT: &str = "meters-per-unit";
pub(crate) const ARG_WALKING_SPEED: &str = "walking-speed";
pub(crate) const DEFAULT_DATA_DIR: &str = "data";
const STDIN_MARKER: &str = "-";
const WAYFIND_CRATES: [&str; 4] = ["wayfind_cli", "wayfind_engine", "wayfind_core", "wayfind_stats"];

/// Run the Wayfind CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    run_with(cli, &mut stdin, &mut stdout)
}

fn run_with(cli: Cli, input: &mut dyn Read, output: &mut dyn Write) -> Result<(), CliError> {
    let config = cli.storage.into_config()?;
    debug!("using data files {:?}", config.paths);
    let navigator = Navigator::open(&config.paths, config.trip);
    execute(cli.command, &navigator, input, output)
}

fn init_logging(verbose: bool) {
    let own_level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder.filter(None, LevelFilter::Warn);
    for name in WAYFIND_CRATES {
        builder.filter(Some(name), own_level);
    }
    builder.parse_default_env();
    // A logger installed by an embedding process takes precedence.
    if builder.try_init().is_err() {
        debug!("a logger is already installed; keeping it");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfind",
    about = "Browse school navigation points, estimate trips and read usage statistics",
    version
)]
struct Cli {
    /// Log progress from the Wayfind crates at info level.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(flatten)]
    storage: StorageArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List, inspect and edit navigation points.
    #[command(subcommand)]
    Points(PointsCommand),
    /// Search point names and descriptions.
    Search {
        /// Text to look for; shorter than two characters matches nothing.
        query: String,
    },
    /// Estimate a walk between two points and count the trip.
    Trip {
        /// Identifier of the starting point.
        origin: String,
        /// Identifier of the destination point.
        destination: String,
    },
    /// Show usage statistics.
    Stats,
    /// Zero every usage counter.
    StatsReset,
}

#[derive(Debug, Subcommand)]
enum PointsCommand {
    /// List every point, optionally on one floor.
    List {
        /// Only list points on this floor.
        #[arg(long, allow_hyphen_values = true)]
        floor: Option<i32>,
    },
    /// Show one point.
    Show {
        /// Point identifier.
        id: String,
    },
    /// Add a point from a JSON payload.
    Add {
        /// JSON file holding the point, or `-` for standard input.
        #[arg(long, value_name = "path")]
        payload: Utf8PathBuf,
    },
    /// Replace a point with a JSON payload.
    Update {
        /// Identifier of the point to replace.
        id: String,
        /// JSON file holding the point, or `-` for standard input.
        #[arg(long, value_name = "path")]
        payload: Utf8PathBuf,
    },
    /// Delete a point; unknown identifiers are ignored.
    Delete {
        /// Point identifier.
        id: String,
    },
}

#[derive(Debug, Serialize)]
struct Deleted {
    id: String,
    removed: usize,
}

fn execute(
    command: Command,
    navigator: &Navigator,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Points(points) => execute_points(points, navigator, input, output),
        Command::Search { query } => write_json(output, &navigator.search_points(&query)),
        Command::Trip {
            origin,
            destination,
        } => write_json(output, &navigator.request_trip(&origin, &destination)?),
        Command::Stats => write_json(output, &navigator.stats_report()),
        Command::StatsReset => write_json(output, &navigator.reset_stats()),
    }
}

fn execute_points(
    command: PointsCommand,
    navigator: &Navigator,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        PointsCommand::List { floor: Some(floor) } => {
            write_json(output, &navigator.list_points_by_floor(floor))
        }
        PointsCommand::List { floor: None } => write_json(output, &navigator.list_points()),
        PointsCommand::Show { id } => write_json(output, &navigator.get_point(&id)?),
        PointsCommand::Add { payload } => {
            let point = read_payload(&payload, input)?;
            write_json(output, &navigator.add_point(point)?)
        }
        PointsCommand::Update { id, payload } => {
            let point = read_payload(&payload, input)?;
            write_json(output, &navigator.update_point(&id, point)?)
        }
        PointsCommand::Delete { id } => {
            let removed = navigator.delete_point(&id);
            write_json(output, &Deleted { id, removed })
        }
    }
}

/// Load a [`PointPayload`] from `path`, or from `input` when `path` is `-`.
fn read_payload(path: &Utf8Path, input: &mut dyn Read) -> Result<PointPayload, CliError> {
    let from_stdin = path.as_str() == STDIN_MARKER;
    let source_name = if from_stdin {
        "standard input".to_owned()
    } else {
        path.to_string()
    };
    let document = if from_stdin {
        let mut buffer = String::new();
        input
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::ReadPayload {
                source_name: source_name.clone(),
                source,
            })?;
        buffer
    } else {
        match wayfind_fs::file_is_file(path) {
            Ok(true) => {}
            Err(source) if source.kind() != std::io::ErrorKind::NotFound => {
                return Err(CliError::ReadPayload {
                    source_name,
                    source,
                });
            }
            Ok(false) | Err(_) => {
                return Err(CliError::MissingPayloadFile {
                    path: path.to_path_buf(),
                });
            }
        }
        wayfind_fs::read_to_string(path).map_err(|source| CliError::ReadPayload {
            source_name: source_name.clone(),
            source,
        })?
    };
    serde_json::from_str(&document).map_err(|source| CliError::ParsePayload {
        source_name,
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
