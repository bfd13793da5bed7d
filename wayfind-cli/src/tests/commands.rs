//! End-to-end command runs against a temporary data directory.

use super::helpers::{DataDir, ROBOTICS_LAB};
use super::*;
use rstest::{fixture, rstest};
use wayfind_engine::{NavigatorError, school_layout};

#[fixture]
fn data_dir() -> DataDir {
    DataDir::new()
}

fn ids(listing: &serde_json::Value) -> Vec<String> {
    listing
        .as_array()
        .expect("listing should be an array")
        .iter()
        .map(|point| point["id"].as_str().expect("point id").to_owned())
        .collect()
}

#[rstest]
fn first_listing_seeds_the_school_layout(data_dir: DataDir) {
    let listing = data_dir.run_ok(&["points", "list"]);

    let expected: Vec<_> = school_layout().into_iter().map(|point| point.id).collect();
    assert_eq!(ids(&listing), expected);
    assert!(data_dir.root().join("points.json").as_std_path().is_file());
}

#[rstest]
#[case::ground(1, 21)]
#[case::second(2, 6)]
#[case::basement(-1, 0)]
fn listing_by_floor_filters(data_dir: DataDir, #[case] floor: i32, #[case] expected: usize) {
    let floor_arg = floor.to_string();

    let listing = data_dir.run_ok(&["points", "list", "--floor", &floor_arg]);

    assert_eq!(ids(&listing).len(), expected);
}

#[rstest]
fn showing_an_unknown_point_fails(data_dir: DataDir) {
    let err = data_dir
        .run(&["points", "show", "swimming_pool"], "")
        .expect_err("unknown point should fail");

    match err {
        CliError::Navigator(NavigatorError::NotFound { id }) => assert_eq!(id, "swimming_pool"),
        other => panic!("expected NotFound, found {other:?}"),
    }
}

#[rstest]
fn points_can_be_added_from_stdin_and_deleted(data_dir: DataDir) {
    let added = data_dir
        .run(&["points", "add", "--payload", "-"], ROBOTICS_LAB)
        .expect("add from stdin");
    let id = added["id"].as_str().expect("generated id").to_owned();
    assert!(id.starts_with("point_"));

    let shown = data_dir.run_ok(&["points", "show", &id]);
    assert_eq!(shown["name"], "Robotics lab");

    let deleted = data_dir.run_ok(&["points", "delete", &id]);
    assert_eq!(deleted["removed"], 1);
    let again = data_dir.run_ok(&["points", "delete", &id]);
    assert_eq!(again["removed"], 0);
}

#[rstest]
fn points_can_be_updated_from_a_file(data_dir: DataDir) {
    let payload = data_dir.write_payload(
        "library.json",
        r#"{
            "name": "Library and reading room",
            "x": 400.0,
            "y": 250.0,
            "floor": 2,
            "description": "Quiet study space",
            "category": "library"
        }"#,
    );

    let updated = data_dir
        .run(
            &["points", "update", "library", "--payload", payload.as_str()],
            "",
        )
        .expect("update from file");

    assert_eq!(updated["id"], "library");
    let found = data_dir.run_ok(&["search", "quiet study"]);
    assert_eq!(ids(&found), ["library"]);
}

#[rstest]
fn missing_payload_file_is_reported(data_dir: DataDir) {
    let err = data_dir
        .run(&["points", "add", "--payload", "/no/such/payload.json"], "")
        .expect_err("missing payload should fail");

    assert!(matches!(err, CliError::MissingPayloadFile { .. }));
}

#[rstest]
fn malformed_payload_is_reported(data_dir: DataDir) {
    let err = data_dir
        .run(&["points", "add", "--payload", "-"], "{\"name\": ")
        .expect_err("malformed payload should fail");

    assert!(matches!(err, CliError::ParsePayload { .. }));
}

#[rstest]
fn one_letter_search_returns_nothing(data_dir: DataDir) {
    let found = data_dir.run_ok(&["search", "к"]);

    assert_eq!(found, serde_json::json!([]));
}

#[rstest]
fn trips_are_estimated_and_reported(data_dir: DataDir) {
    data_dir.write_routes(r#"{"to_library": {}, "to_gym": {}, "to_hall": {}}"#);

    let trip = data_dir.run_ok(&["trip", "toilet_1_male", "toilet_1_female"]);
    assert_eq!(trip["meters"], 10);
    assert_eq!(trip["minutes"], 1);
    assert_eq!(ids(&trip["path"]), ["toilet_1_male", "toilet_1_female"]);

    let stats = data_dir.run_ok(&["stats"]);
    assert_eq!(stats["total_navigations"], 1);
    assert_eq!(stats["total_routes"], 3);
    assert_eq!(stats["total_points"], school_layout().len());
    assert_eq!(
        stats["popular_with_names"][0]["label"],
        "Мужской туалет → Женский туалет"
    );

    let reset = data_dir.run_ok(&["stats-reset"]);
    assert_eq!(reset["total_navigations"], 0);
    assert_eq!(data_dir.run_ok(&["stats"])["total_navigations"], 0);
}

#[rstest]
fn trip_to_unknown_point_fails(data_dir: DataDir) {
    let err = data_dir
        .run(&["trip", "entrance_1", "swimming_pool"], "")
        .expect_err("unknown destination should fail");

    assert!(matches!(
        err,
        CliError::Navigator(NavigatorError::NotFound { .. })
    ));
    assert_eq!(data_dir.run_ok(&["stats"])["total_navigations"], 0);
}

#[rstest]
fn invalid_walking_speed_is_rejected(data_dir: DataDir) {
    let err = data_dir
        .run(&["--walking-speed", "0", "stats"], "")
        .expect_err("zero speed should fail");

    assert!(matches!(err, CliError::TripConfig(_)));
}
