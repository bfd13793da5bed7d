//! Ledger state and the structured route key.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};
use wayfind_core::PointLookup;

/// Separator used by the historical string encoding of route keys.
pub const LEGACY_ROUTE_SEPARATOR: char = '_';

/// Ordered origin → destination pair identifying a requested trip.
///
/// The two directions of a trip are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    /// Identifier of the point the trip starts from.
    pub origin: String,
    /// Identifier of the point the trip ends at.
    pub destination: String,
}

impl RouteKey {
    /// Build a key for the trip `origin` → `destination`.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// Historical `"{origin}_{destination}"` rendering of the key.
    #[must_use]
    pub fn legacy_key(&self) -> String {
        format!(
            "{}{LEGACY_ROUTE_SEPARATOR}{}",
            self.origin, self.destination
        )
    }

    /// Recover the key behind a historical `"{origin}_{destination}"` string.
    ///
    /// Identifiers may themselves contain the separator, so every separator
    /// position is tried and the leftmost split whose halves are both known to
    /// `points` wins. Returns `None` when no split resolves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wayfind_core::test_support::{MemoryPoints, named_point};
    /// use wayfind_stats::RouteKey;
    ///
    /// let points = MemoryPoints::with_points([
    ///     named_point("entrance_1", "Main entrance", 0.0, 0.0),
    ///     named_point("classroom_B115", "Classroom B115", 10.0, 0.0),
    /// ]);
    /// assert_eq!(
    ///     RouteKey::resolve_legacy("entrance_1_classroom_B115", &points),
    ///     Some(RouteKey::new("entrance_1", "classroom_B115"))
    /// );
    /// ```
    #[must_use]
    pub fn resolve_legacy(key: &str, points: &impl PointLookup) -> Option<Self> {
        key.match_indices(LEGACY_ROUTE_SEPARATOR)
            .filter_map(|(at, separator)| {
                let (origin, rest) = key.split_at_checked(at)?;
                rest.strip_prefix(separator)
                    .map(|destination| (origin, destination))
            })
            .find(|(origin, destination)| {
                points.point(origin).is_some() && points.point(destination).is_some()
            })
            .map(|(origin, destination)| Self::new(origin, destination))
    }
}

/// Aggregate usage counters held by [`crate::UsageLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "stored::StoredLedger")]
pub struct LedgerState {
    /// Completed trip requests since the last reset.
    pub total_navigations: u64,
    /// Trip counts per ordered route.
    #[serde(serialize_with = "stored::serialize_routes")]
    pub popular_routes: BTreeMap<RouteKey, u64>,
    /// Historical counters still keyed by the raw `"{origin}_{destination}"`
    /// string because no split matched two known points.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub legacy_routes: BTreeMap<String, u64>,
    /// Trip counts per local calendar day.
    pub daily_stats: BTreeMap<NaiveDate, u64>,
    /// Reserved; no operation updates it.
    pub unique_users: u64,
    /// Local time the counters were last initialised.
    pub last_reset: NaiveDateTime,
}

impl LedgerState {
    /// Zeroed counters stamped with `last_reset`.
    #[must_use]
    pub const fn zeroed(last_reset: NaiveDateTime) -> Self {
        Self {
            total_navigations: 0,
            popular_routes: BTreeMap::new(),
            legacy_routes: BTreeMap::new(),
            daily_stats: BTreeMap::new(),
            unique_users: 0,
            last_reset,
        }
    }

    /// Zeroed counters stamped with the current local time.
    #[must_use]
    pub fn fresh() -> Self {
        Self::zeroed(local_now())
    }

    /// Count one trip along `route` on `day`.
    ///
    /// A historical counter stored under the route's raw key is folded into
    /// the structured counter.
    pub fn record(&mut self, route: RouteKey, day: NaiveDate) {
        let carried = self
            .legacy_routes
            .remove(&route.legacy_key())
            .unwrap_or_default();
        self.total_navigations = self.total_navigations.saturating_add(1);
        add_count(&mut self.popular_routes, route, carried.saturating_add(1));
        add_count(&mut self.daily_stats, day, 1);
    }

    /// Count for one ordered route, zero when never requested.
    ///
    /// Includes any historical counter still held under the raw key.
    #[must_use]
    pub fn route_count(&self, route: &RouteKey) -> u64 {
        let structured = self.popular_routes.get(route).copied().unwrap_or_default();
        let legacy = self
            .legacy_routes
            .get(&route.legacy_key())
            .copied()
            .unwrap_or_default();
        structured.saturating_add(legacy)
    }

    /// Move historical counters whose raw key splits into two identifiers
    /// known to `points` onto structured route keys.
    ///
    /// Unmatched counters stay in [`LedgerState::legacy_routes`]. Returns the
    /// number of counters moved.
    pub fn resolve_legacy_routes(&mut self, points: &impl PointLookup) -> usize {
        let mut moved = 0;
        for (key, count) in std::mem::take(&mut self.legacy_routes) {
            match RouteKey::resolve_legacy(&key, points) {
                Some(route) => {
                    debug!(
                        "historical route {key:?} resolved to {} → {}",
                        route.origin, route.destination
                    );
                    add_count(&mut self.popular_routes, route, count);
                    moved += 1;
                }
                None => add_count(&mut self.legacy_routes, key, count),
            }
        }
        moved
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::fresh()
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn add_count<K: Ord>(counts: &mut BTreeMap<K, u64>, key: K, count: u64) {
    let total = counts.entry(key).or_default();
    *total = total.saturating_add(count);
}

/// Ledger file layout.
///
/// Route counts are a list of `{origin, destination, count}` records. Files
/// written before the structured key existed hold a map from
/// `"{origin}_{destination}"` strings to counts; those land in
/// `legacy_routes` until a point lookup can split them.
mod stored {
    use std::collections::BTreeMap;

    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Serialize, Serializer};

    use super::{LedgerState, RouteKey, add_count, local_now};

    #[derive(Serialize, Deserialize)]
    struct RouteCount {
        origin: String,
        destination: String,
        count: u64,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredRoutes {
        Records(Vec<RouteCount>),
        Legacy(BTreeMap<String, u64>),
    }

    impl Default for StoredRoutes {
        fn default() -> Self {
            Self::Records(Vec::new())
        }
    }

    #[derive(Deserialize)]
    pub(super) struct StoredLedger {
        #[serde(default)]
        total_navigations: u64,
        #[serde(default)]
        popular_routes: StoredRoutes,
        #[serde(default)]
        legacy_routes: BTreeMap<String, u64>,
        #[serde(default)]
        daily_stats: BTreeMap<NaiveDate, u64>,
        #[serde(default)]
        unique_users: u64,
        #[serde(default = "local_now")]
        last_reset: NaiveDateTime,
    }

    impl From<StoredLedger> for LedgerState {
        fn from(stored: StoredLedger) -> Self {
            let mut popular_routes = BTreeMap::new();
            let mut legacy_routes = stored.legacy_routes;
            match stored.popular_routes {
                StoredRoutes::Records(records) => {
                    for record in records {
                        let route = RouteKey::new(record.origin, record.destination);
                        add_count(&mut popular_routes, route, record.count);
                    }
                }
                StoredRoutes::Legacy(map) => {
                    for (key, count) in map {
                        add_count(&mut legacy_routes, key, count);
                    }
                }
            }
            Self {
                total_navigations: stored.total_navigations,
                popular_routes,
                legacy_routes,
                daily_stats: stored.daily_stats,
                unique_users: stored.unique_users,
                last_reset: stored.last_reset,
            }
        }
    }

    pub(super) fn serialize_routes<S>(
        routes: &BTreeMap<RouteKey, u64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(routes.iter().map(|(key, count)| RouteCount {
            origin: key.origin.clone(),
            destination: key.destination.clone(),
            count: *count,
        }))
    }
}
