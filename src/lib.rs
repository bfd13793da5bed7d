//! Facade crate for the Wayfind indoor navigation engine.
//!
//! This crate re-exports the point model, trip estimation and usage
//! statistics, and adds [`Navigator`], which ties them together behind the
//! operations a front end exposes.

#![forbid(unsafe_code)]

mod navigator;

pub use navigator::{MIN_SEARCH_QUERY_CHARS, Navigator, NavigatorError, StorePaths, Trip};
pub use wayfind_core::{
    NavigationPoint, PersistenceError, PointLookup, PointPayload, PointStore, PointStoreError,
    PointValidationError, TripConfig, TripConfigError, TripEstimate, TripEstimator, school_layout,
};
pub use wayfind_stats::{
    LedgerState, NamedRouteCount, RouteKey, StatsReport, StatsReporter, UsageLedger,
    count_named_routes,
};
