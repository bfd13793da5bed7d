//! Layered storage and trip configuration for every command.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfind_engine::{StorePaths, TripConfig};

use crate::{
    ARG_DATA_DIR, ARG_METERS_PER_UNIT, ARG_POINTS_FILE, ARG_ROUTES_FILE, ARG_STATISTICS_FILE,
    ARG_WALKING_SPEED, CliError, DEFAULT_DATA_DIR,
};

// Where the data files live and how trips are estimated. Flattened into the
// top-level command, so the struct carries no doc comment or command-level
// attributes that clap would apply to the parent.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[ortho_config(prefix = "WAYFIND")]
pub(crate) struct StorageArgs {
    /// Directory holding `points.json`, `statistics.json` and `routes.json`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir", global = true)]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the path to the navigation points file.
    #[arg(long = ARG_POINTS_FILE, value_name = "path", global = true)]
    #[serde(default)]
    pub(crate) points_file: Option<Utf8PathBuf>,
    /// Override the path to the usage statistics file.
    #[arg(long = ARG_STATISTICS_FILE, value_name = "path", global = true)]
    #[serde(default)]
    pub(crate) statistics_file: Option<Utf8PathBuf>,
    /// Override the path to the named routes file.
    #[arg(long = ARG_ROUTES_FILE, value_name = "path", global = true)]
    #[serde(default)]
    pub(crate) routes_file: Option<Utf8PathBuf>,
    /// Metres represented by one map unit.
    #[arg(long = ARG_METERS_PER_UNIT, value_name = "metres", global = true)]
    #[serde(default)]
    pub(crate) meters_per_unit: Option<f64>,
    /// Walking speed in metres per minute.
    #[arg(long = ARG_WALKING_SPEED, value_name = "metres", global = true)]
    #[serde(default)]
    pub(crate) walking_speed: Option<f64>,
}

impl StorageArgs {
    pub(crate) fn into_config(self) -> Result<StorageConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StorageConfig::try_from(merged)
    }
}

/// Resolved storage configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StorageConfig {
    pub(crate) paths: StorePaths,
    pub(crate) trip: TripConfig,
}

impl TryFrom<StorageArgs> for StorageConfig {
    type Error = CliError;

    fn try_from(args: StorageArgs) -> Result<Self, Self::Error> {
        let data_dir = args
            .data_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
        let defaults = StorePaths::in_dir(&data_dir);
        let paths = StorePaths {
            points: args.points_file.unwrap_or(defaults.points),
            statistics: args.statistics_file.unwrap_or(defaults.statistics),
            routes: args.routes_file.unwrap_or(defaults.routes),
        };

        let fallback = TripConfig::default();
        let trip = TripConfig::new(
            args.meters_per_unit.unwrap_or(fallback.meters_per_unit),
            args.walking_speed.unwrap_or(fallback.walking_speed),
        )?;

        Ok(Self { paths, trip })
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<StorageConfig, CliError> {
    let merged = StorageArgs::merge_from_layers(layers).map_err(CliError::from)?;
    StorageConfig::try_from(merged)
}
