//! Usage statistics for the Wayfind engine.
//!
//! The crate provides two complementary capabilities:
//! - **Recording** trip requests in the file-backed [`UsageLedger`], which
//!   counts trips overall, per ordered route and per local calendar day.
//! - **Reporting** through [`StatsReporter`], which decorates a ledger
//!   snapshot with the number of stored points, the number of named routes
//!   and human-readable route labels.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use wayfind_core::PointStore;
//! use wayfind_stats::{StatsReporter, UsageLedger, count_named_routes};
//!
//! let points = PointStore::load("data/points.json");
//! let ledger = UsageLedger::load("data/statistics.json");
//! let total_routes = count_named_routes(Utf8Path::new("data/routes.json"));
//! let report = StatsReporter.report(&ledger.snapshot(), &points, total_routes);
//! println!("{} trips so far", report.ledger.total_navigations);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod ledger;
mod report;
mod routes;
mod types;

pub use ledger::UsageLedger;
pub use report::{NamedRouteCount, StatsReport, StatsReporter};
pub use routes::count_named_routes;
pub use types::{LEGACY_ROUTE_SEPARATOR, LedgerState, RouteKey};
