//! Behaviour-driven step definitions driving the CLI scenarios.

use super::helpers::DataDir;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Aggregates CLI scenario state so each step only needs a single world
/// argument.
#[derive(Debug, Default)]
struct CliWorld {
    data_dir: RefCell<Option<DataDir>>,
    stats: RefCell<Option<serde_json::Value>>,
}

impl CliWorld {
    fn run(&self, args: &[&str]) -> serde_json::Value {
        let data_dir = self.data_dir.borrow();
        let Some(data_dir) = data_dir.as_ref() else {
            panic!("data directory must be initialised");
        };
        data_dir.run_ok(args)
    }

    fn stats(&self) -> serde_json::Value {
        self.stats
            .borrow()
            .clone()
            .unwrap_or_else(|| panic!("statistics must have been shown"))
    }
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::default()
}

#[given("a fresh data directory")]
fn fresh_data_directory(#[from(world)] world: &CliWorld) {
    world.data_dir.replace(Some(DataDir::new()));
}

#[when("I request a trip from the main entrance to the library")]
fn trip_to_library(#[from(world)] world: &CliWorld) {
    let trip = world.run(&["trip", "entrance_1", "library"]);
    assert!(trip["minutes"].as_u64().is_some_and(|minutes| minutes >= 1));
}

#[when("I reset the statistics")]
fn reset_statistics(#[from(world)] world: &CliWorld) {
    world.run(&["stats-reset"]);
}

#[when("I show the statistics")]
fn show_statistics(#[from(world)] world: &CliWorld) {
    let stats = world.run(&["stats"]);
    world.stats.replace(Some(stats));
}

#[then("the statistics count 2 trips on one route")]
fn two_trips_one_route(#[from(world)] world: &CliWorld) {
    let stats = world.stats();
    assert_eq!(stats["total_navigations"], 2);
    assert_eq!(
        stats["popular_with_names"],
        serde_json::json!([{
            "label": "Центральный вход → Библиотека",
            "origin": "entrance_1",
            "destination": "library",
            "count": 2,
        }])
    );
}

#[then("the statistics count no trips")]
fn no_trips(#[from(world)] world: &CliWorld) {
    let stats = world.stats();
    assert_eq!(stats["total_navigations"], 0);
    assert_eq!(stats["popular_with_names"], serde_json::json!([]));
}

#[scenario(path = "tests/features/cli_commands.feature", index = 0)]
fn trip_requests_are_counted(world: CliWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/cli_commands.feature", index = 1)]
fn statistics_reset_starts_from_zero(world: CliWorld) {
    let _ = world;
}
