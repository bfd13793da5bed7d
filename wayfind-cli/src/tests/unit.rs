//! Focused unit tests covering storage configuration and argument parsing.

use super::*;
use crate::config::{StorageConfig, config_from_layers_for_test};
use rstest::rstest;
use wayfind_engine::{StorePaths, TripConfig, TripConfigError};

#[rstest]
fn storage_defaults_to_the_data_directory() {
    let config = StorageConfig::try_from(StorageArgs::default()).expect("defaults should build");

    assert_eq!(
        config.paths,
        StorePaths::in_dir(Utf8Path::new(DEFAULT_DATA_DIR))
    );
    assert_eq!(config.trip, TripConfig::default());
}

#[rstest]
fn file_overrides_win_over_the_data_directory() {
    let args = StorageArgs {
        data_dir: Some(Utf8PathBuf::from("school")),
        statistics_file: Some(Utf8PathBuf::from("/var/lib/wayfind/stats.json")),
        ..StorageArgs::default()
    };

    let config = StorageConfig::try_from(args).expect("config should build");

    assert_eq!(config.paths.points, Utf8PathBuf::from("school/points.json"));
    assert_eq!(
        config.paths.statistics,
        Utf8PathBuf::from("/var/lib/wayfind/stats.json")
    );
    assert_eq!(config.paths.routes, Utf8PathBuf::from("school/routes.json"));
}

#[rstest]
#[case::zero_scale(Some(0.0), None, TripConfigError::InvalidScale)]
#[case::negative_speed(None, Some(-70.0), TripConfigError::InvalidSpeed)]
#[case::infinite_speed(None, Some(f64::INFINITY), TripConfigError::InvalidSpeed)]
fn invalid_trip_settings_are_rejected(
    #[case] meters_per_unit: Option<f64>,
    #[case] walking_speed: Option<f64>,
    #[case] expected: TripConfigError,
) {
    let args = StorageArgs {
        meters_per_unit,
        walking_speed,
        ..StorageArgs::default()
    };

    let err = StorageConfig::try_from(args).expect_err("invalid settings should error");
    match err {
        CliError::TripConfig(found) => assert_eq!(found, expected),
        other => panic!("expected TripConfig, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "walking_speed": "brisk" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "data_dir": "from-file",
            "walking_speed": 60.0,
        }),
        None,
    );
    composer.push_environment(json!({
        "data_dir": "from-env",
        "meters_per_unit": 0.25,
    }));
    composer.push_cli(json!({
        "data_dir": "from-cli",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(
        config.paths,
        StorePaths::in_dir(Utf8Path::new("from-cli"))
    );
    assert_eq!(
        config.trip,
        TripConfig {
            meters_per_unit: 0.25,
            walking_speed: 60.0,
        }
    );
}

#[rstest]
fn storage_flags_are_accepted_after_the_subcommand() {
    let cli = Cli::try_parse_from([
        "wayfind",
        "points",
        "list",
        "--floor",
        "-1",
        "--data-dir",
        "elsewhere",
        "--verbose",
    ])
    .expect("arguments should parse");

    assert!(cli.verbose);
    assert_eq!(cli.storage.data_dir, Some(Utf8PathBuf::from("elsewhere")));
    match cli.command {
        Command::Points(PointsCommand::List { floor }) => assert_eq!(floor, Some(-1)),
        other => panic!("expected points list, found {other:?}"),
    }
}

#[rstest]
fn payload_is_required_for_add() {
    let err = Cli::try_parse_from(["wayfind", "points", "add"])
        .expect_err("missing payload should fail to parse");

    assert_eq!(
        err.kind(),
        clap::error::ErrorKind::MissingRequiredArgument
    );
}

#[rstest]
fn logging_keeps_an_installed_logger() {
    init_logging(false);
    init_logging(true);

    assert!(log::max_level() >= LevelFilter::Warn);
}
