//! Error types emitted by the Wayfind CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfind_engine::{NavigatorError, TripConfigError};

/// Errors emitted by the Wayfind CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The merged trip settings were rejected.
    #[error("invalid trip settings: {0}")]
    TripConfig(#[from] TripConfigError),
    /// Reading a point payload failed.
    #[error("failed to read point payload from {source_name}: {source}")]
    ReadPayload {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    /// A point payload was not valid JSON.
    #[error("failed to parse point payload from {source_name}: {source}")]
    ParsePayload {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },
    /// The payload file does not exist or is not a file.
    #[error("payload path {path:?} does not exist or is not a file")]
    MissingPayloadFile { path: Utf8PathBuf },
    /// The navigator rejected the request.
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
