//! Boundary operations shared by every front end.
//!
//! [`Navigator`] owns the process-wide [`PointStore`] and [`UsageLedger`] and
//! exposes the operations a serving layer maps onto its own surface.

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;
use wayfind_core::{
    NavigationPoint, PointPayload, PointStore, PointStoreError, TripConfig, TripEstimator,
};
use wayfind_stats::{LedgerState, StatsReport, StatsReporter, UsageLedger, count_named_routes};

/// Queries shorter than this many characters match nothing.
pub const MIN_SEARCH_QUERY_CHARS: usize = 2;

/// Locations of the three data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Navigation point collection.
    pub points: Utf8PathBuf,
    /// Usage ledger.
    pub statistics: Utf8PathBuf,
    /// Externally maintained named routes.
    pub routes: Utf8PathBuf,
}

impl StorePaths {
    /// Default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self {
            points: dir.join("points.json"),
            statistics: dir.join("statistics.json"),
            routes: dir.join("routes.json"),
        }
    }
}

impl Default for StorePaths {
    fn default() -> Self {
        Self::in_dir(Utf8Path::new("data"))
    }
}

/// Result of a trip request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    /// Origin followed by destination.
    pub path: Vec<NavigationPoint>,
    /// Walking distance in metres.
    pub meters: u64,
    /// Walking time in whole minutes, never below one.
    pub minutes: u64,
}

/// Failures reported by [`Navigator`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigatorError {
    /// A trip endpoint was blank.
    #[error("a trip needs both an origin and a destination")]
    MissingEndpoint,
    /// No point carries the requested identifier.
    #[error("point `{id}` not found")]
    NotFound {
        /// Identifier that failed to resolve.
        id: String,
    },
    /// The point store rejected the operation.
    #[error(transparent)]
    Store(#[from] PointStoreError),
}

/// Points, trips and statistics behind one handle.
#[derive(Debug)]
pub struct Navigator {
    points: PointStore,
    ledger: UsageLedger,
    estimator: TripEstimator,
    routes: Option<Utf8PathBuf>,
}

impl Navigator {
    /// Load the point store and ledger from `paths`.
    ///
    /// Historical route counters in the ledger are matched against the loaded
    /// point identifiers.
    #[must_use]
    pub fn open(paths: &StorePaths, trip: TripConfig) -> Self {
        let points = PointStore::load(paths.points.clone());
        let ledger = UsageLedger::load_with(paths.statistics.clone(), &points);
        Self {
            points,
            ledger,
            estimator: TripEstimator::new(trip),
            routes: Some(paths.routes.clone()),
        }
    }

    /// Assemble a navigator from already constructed parts.
    ///
    /// Reports count zero named routes until [`Navigator::with_routes_file`]
    /// names the file.
    #[must_use]
    pub const fn new(points: PointStore, ledger: UsageLedger, estimator: TripEstimator) -> Self {
        Self {
            points,
            ledger,
            estimator,
            routes: None,
        }
    }

    /// Count named routes in `path` when building reports.
    #[must_use]
    pub fn with_routes_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.routes = Some(path.into());
        self
    }

    /// Underlying point store.
    #[must_use]
    pub const fn points(&self) -> &PointStore {
        &self.points
    }

    /// Underlying usage ledger.
    #[must_use]
    pub const fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    /// Every point in collection order.
    #[must_use]
    pub fn list_points(&self) -> Vec<NavigationPoint> {
        self.points.all()
    }

    /// Every point on `floor`.
    #[must_use]
    pub fn list_points_by_floor(&self, floor: i32) -> Vec<NavigationPoint> {
        self.points.by_floor(floor)
    }

    /// Fetch one point.
    ///
    /// # Errors
    /// Returns [`NavigatorError::NotFound`] when no point has `id`.
    pub fn get_point(&self, id: &str) -> Result<NavigationPoint, NavigatorError> {
        self.points.get(id).ok_or_else(|| NavigatorError::NotFound { id: id.to_owned() })
    }

    /// Create a point from `payload`.
    ///
    /// # Errors
    /// Returns [`NavigatorError::Store`] when the payload is incomplete or its
    /// id is taken.
    pub fn add_point(&self, payload: PointPayload) -> Result<NavigationPoint, NavigatorError> {
        Ok(self.points.add(payload)?)
    }

    /// Replace the point addressed by `id`.
    ///
    /// # Errors
    /// Returns [`NavigatorError::NotFound`] for an unknown id and
    /// [`NavigatorError::Store`] for an invalid payload.
    pub fn update_point(
        &self,
        id: &str,
        payload: PointPayload,
    ) -> Result<NavigationPoint, NavigatorError> {
        self.points.update(id, payload).map_err(|err| match err {
            PointStoreError::NotFound { id: missing } => NavigatorError::NotFound { id: missing },
            other @ PointStoreError::Validation(_) => NavigatorError::Store(other),
        })
    }

    /// Remove the point addressed by `id`; unknown ids are a no-op.
    ///
    /// Returns the number of removed records.
    pub fn delete_point(&self, id: &str) -> usize {
        self.points.delete(id)
    }

    /// Search names and descriptions.
    ///
    /// Queries shorter than [`MIN_SEARCH_QUERY_CHARS`] characters return no
    /// results.
    #[must_use]
    pub fn search_points(&self, query: &str) -> Vec<NavigationPoint> {
        if query.chars().count() < MIN_SEARCH_QUERY_CHARS {
            return Vec::new();
        }
        self.points.search(query)
    }

    /// Estimate the walk from `origin` to `destination` and count the trip.
    ///
    /// The path is the straight segment between the two points. A ledger
    /// write failure is logged; the trip is still returned.
    ///
    /// # Errors
    /// Returns [`NavigatorError::MissingEndpoint`] when either id is blank and
    /// [`NavigatorError::NotFound`] when either id is unknown. Nothing is
    /// counted in those cases.
    pub fn request_trip(&self, origin: &str, destination: &str) -> Result<Trip, NavigatorError> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(NavigatorError::MissingEndpoint);
        }
        let from = self.get_point(origin)?;
        let to = self.get_point(destination)?;
        if from.floor != to.floor {
            debug!(
                "trip {} → {} changes floor ({} → {})",
                from.id, to.id, from.floor, to.floor
            );
        }
        let estimate = self.estimator.estimate(&from, &to);
        if let Err(err) = self.ledger.record_trip(&from, &to) {
            warn!("trip was not persisted to the usage ledger: {err}");
        }
        Ok(Trip {
            path: vec![from, to],
            meters: estimate.meters,
            minutes: estimate.minutes,
        })
    }

    /// Current counters decorated with names and collection sizes.
    #[must_use]
    pub fn stats_report(&self) -> StatsReport {
        let total_routes = self.routes.as_deref().map_or(0, count_named_routes);
        StatsReporter.report(&self.ledger.snapshot(), &self.points, total_routes)
    }

    /// Zero the usage counters and return the fresh state.
    ///
    /// A ledger write failure is logged; the counters are zeroed in memory
    /// regardless.
    pub fn reset_stats(&self) -> LedgerState {
        if let Err(err) = self.ledger.reset() {
            warn!("statistics reset was not persisted: {err}");
        }
        self.ledger.snapshot()
    }
}
