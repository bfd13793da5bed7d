//! Human-readable statistics derived from a ledger snapshot.

use std::cmp::Ordering;

use serde::Serialize;
use wayfind_core::PointLookup;

use crate::{LedgerState, RouteKey};

/// One route counter with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRouteCount {
    /// `"{origin name} → {destination name}"`, or the raw historical key when
    /// either endpoint no longer resolves.
    pub label: String,
    /// Ordered route the counter belongs to; `None` for a historical counter
    /// whose key matched no pair of known points.
    #[serde(flatten)]
    pub route: Option<RouteKey>,
    /// Trips requested along the route.
    pub count: u64,
}

/// Ledger counters decorated with collection sizes and route labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    /// Raw counters copied from the ledger.
    #[serde(flatten)]
    pub ledger: LedgerState,
    /// Number of navigation points currently stored.
    pub total_points: usize,
    /// Number of named routes in the external routes file.
    pub total_routes: usize,
    /// Route counters, most requested first and then by label.
    pub popular_with_names: Vec<NamedRouteCount>,
}

/// Builds [`StatsReport`] values.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatsReporter;

impl StatsReporter {
    /// Decorate `ledger` with the sizes and names drawn from `points`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use wayfind_core::test_support::{MemoryPoints, named_point};
    /// use wayfind_stats::{LedgerState, RouteKey, StatsReporter};
    ///
    /// let points = MemoryPoints::with_points([
    ///     named_point("hall", "Hall", 0.0, 0.0),
    ///     named_point("gym", "Gym", 10.0, 0.0),
    /// ]);
    /// let mut ledger = LedgerState::default();
    /// let day = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap_or_default();
    /// ledger.record(RouteKey::new("hall", "gym"), day);
    ///
    /// let report = StatsReporter.report(&ledger, &points, 0);
    /// assert_eq!(report.total_points, 2);
    /// assert_eq!(report.popular_with_names[0].label, "Hall → Gym");
    /// ```
    #[must_use]
    pub fn report(
        self,
        ledger: &LedgerState,
        points: &impl PointLookup,
        total_routes: usize,
    ) -> StatsReport {
        let structured = ledger
            .popular_routes
            .iter()
            .map(|(route, count)| NamedRouteCount {
                label: route_label(route, points),
                route: Some(route.clone()),
                count: *count,
            });
        let raw = ledger
            .legacy_routes
            .iter()
            .map(|(key, count)| NamedRouteCount {
                label: key.clone(),
                route: None,
                count: *count,
            });
        let mut popular_with_names: Vec<NamedRouteCount> = structured.chain(raw).collect();
        popular_with_names.sort_by(most_requested_first);
        StatsReport {
            ledger: ledger.clone(),
            total_points: points.point_count(),
            total_routes,
            popular_with_names,
        }
    }
}

fn route_label(route: &RouteKey, points: &impl PointLookup) -> String {
    match (points.point(&route.origin), points.point(&route.destination)) {
        (Some(origin), Some(destination)) => format!("{} → {}", origin.name, destination.name),
        _ => route.legacy_key(),
    }
}

fn most_requested_first(left: &NamedRouteCount, right: &NamedRouteCount) -> Ordering {
    right
        .count
        .cmp(&left.count)
        .then_with(|| left.label.cmp(&right.label))
        .then_with(|| left.route.cmp(&right.route))
}
