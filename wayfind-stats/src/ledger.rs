//! File-backed usage counters.
//!
//! [`UsageLedger`] holds a [`LedgerState`] behind a mutex. Every mutation
//! happens under the lock and is written through to the ledger file before
//! the lock is released, so concurrent increments are never lost. Read
//! failures fall back to zeroed counters; write failures are returned while
//! the in-memory state keeps the change.

use std::sync::{Mutex, MutexGuard, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use wayfind_core::{NavigationPoint, PersistenceError, PointLookup};

use crate::{LedgerState, RouteKey};

/// Aggregate counters for completed trip requests.
#[derive(Debug)]
pub struct UsageLedger {
    path: Option<Utf8PathBuf>,
    state: Mutex<LedgerState>,
}

impl UsageLedger {
    /// Load the ledger stored at `location`.
    ///
    /// A missing, unreadable or malformed file yields zeroed counters stamped
    /// with the current local time; the file is left untouched until the next
    /// mutation. Historical string-keyed route counters stay under their raw
    /// keys; use [`UsageLedger::load_with`] to split them.
    pub fn load(location: impl Into<Utf8PathBuf>) -> Self {
        let path = location.into();
        let state = read_or_fresh(&path);
        Self {
            path: Some(path),
            state: Mutex::new(state),
        }
    }

    /// Load the ledger stored at `location` and match historical route keys
    /// against the identifiers known to `points`.
    ///
    /// Counters whose key matches no pair of known points are kept under the
    /// raw key; a later trip on that pair folds them in.
    pub fn load_with(location: impl Into<Utf8PathBuf>, points: &impl PointLookup) -> Self {
        let path = location.into();
        let mut state = read_or_fresh(&path);
        let moved = state.resolve_legacy_routes(points);
        if moved > 0 {
            info!("matched {moved} historical route counters to known points");
        }
        if !state.legacy_routes.is_empty() {
            warn!(
                "{} historical route counters match no known points; keeping raw keys",
                state.legacy_routes.len()
            );
        }
        Self {
            path: Some(path),
            state: Mutex::new(state),
        }
    }

    /// Build a ledger that never touches the filesystem.
    #[must_use]
    pub fn in_memory(state: LedgerState) -> Self {
        Self {
            path: None,
            state: Mutex::new(state),
        }
    }

    /// Backing file, if the ledger is persisted.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Write the current counters to the ledger file.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when serialising or writing fails.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let state = self.lock();
        self.persist_locked(&state)
    }

    /// Count a trip from `origin` to `destination` on today's local date.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when the updated counters cannot be
    /// written. The increment is kept in memory regardless.
    pub fn record_trip(
        &self,
        origin: &NavigationPoint,
        destination: &NavigationPoint,
    ) -> Result<(), PersistenceError> {
        debug!("recording trip {} → {}", origin.name, destination.name);
        self.record_trip_on(
            RouteKey::new(origin.id.as_str(), destination.id.as_str()),
            Local::now().date_naive(),
        )
    }

    /// Count a trip along `route` on `day`.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when the updated counters cannot be
    /// written. The increment is kept in memory regardless.
    pub fn record_trip_on(&self, route: RouteKey, day: NaiveDate) -> Result<(), PersistenceError> {
        let mut state = self.lock();
        state.record(route, day);
        debug!("trip #{} recorded for {day}", state.total_navigations);
        self.persist_locked(&state)
    }

    /// Zero every counter, stamp `last_reset` with the current local time and
    /// persist.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when the zeroed counters cannot be
    /// written. The in-memory counters are zeroed regardless.
    pub fn reset(&self) -> Result<(), PersistenceError> {
        let mut state = self.lock();
        *state = LedgerState::fresh();
        info!("usage ledger reset at {}", state.last_reset);
        self.persist_locked(&state)
    }

    /// Clone of the current counters.
    #[must_use]
    pub fn snapshot(&self) -> LedgerState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist_locked(&self, state: &LedgerState) -> Result<(), PersistenceError> {
        self.path
            .as_deref()
            .map_or(Ok(()), |path| persist(path, state))
    }
}

impl Default for UsageLedger {
    fn default() -> Self {
        Self::in_memory(LedgerState::fresh())
    }
}

fn read_or_fresh(path: &Utf8Path) -> LedgerState {
    match read_state(path) {
        Ok(state) => {
            info!(
                "loaded usage ledger from {path} ({} trips)",
                state.total_navigations
            );
            state
        }
        Err(err) if err.is_missing() => {
            info!("usage ledger {path} not found; starting from zero");
            LedgerState::fresh()
        }
        Err(err) => {
            warn!("could not load usage ledger: {err}; starting from zero");
            LedgerState::fresh()
        }
    }
}

fn read_state(path: &Utf8Path) -> Result<LedgerState, PersistenceError> {
    let document = wayfind_fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&document).map_err(|source| PersistenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn persist(path: &Utf8Path, state: &LedgerState) -> Result<(), PersistenceError> {
    let payload = serde_json::to_vec_pretty(state).map_err(|source| PersistenceError::Serialise {
        path: path.to_path_buf(),
        source,
    })?;
    wayfind_fs::write_atomic(path, &payload).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}
