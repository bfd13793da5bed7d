//! Authoritative, file-backed collection of navigation points.
//!
//! [`PointStore`] keeps the ordered collection in memory behind a mutex and
//! writes the whole collection through to a JSON file after every mutation.
//! Persistence failures never reach callers: reads fall back to the built-in
//! layout and failed writes are logged while the in-memory state stands.
//!
//! [`PointLookup`] is the read-only seam other components (the statistics
//! reporter, trip handling) depend on.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use log::{debug, error, info, warn};

use crate::{NavigationPoint, PersistenceError, PointPayload, PointStoreError, PointValidationError};

mod legacy;
mod seed;

pub use seed::school_layout;

use legacy::{LegacyShapeError, migrate_legacy_points};

/// Maximum number of results returned by [`PointStore::search`].
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Prefix for identifiers generated by [`PointStore::add`].
const GENERATED_ID_PREFIX: &str = "point_";

/// Read-only access to navigation points by identifier.
///
/// # Examples
///
/// ```rust
/// use wayfind_core::{NavigationPoint, PointLookup};
///
/// struct Single(NavigationPoint);
///
/// impl PointLookup for Single {
///     fn point(&self, id: &str) -> Option<NavigationPoint> {
///         (self.0.id == id).then(|| self.0.clone())
///     }
///
///     fn point_count(&self) -> usize {
///         1
///     }
/// }
///
/// let lift = NavigationPoint {
///     id: "lift".into(),
///     name: "Lift".into(),
///     x: 0.0,
///     y: 0.0,
///     floor: 1,
///     description: String::new(),
///     category: "elevator".into(),
/// };
/// let lookup = Single(lift);
/// assert!(lookup.point("lift").is_some());
/// assert!(lookup.point("stair").is_none());
/// ```
pub trait PointLookup {
    /// Resolve `id` to a point, if present.
    fn point(&self, id: &str) -> Option<NavigationPoint>;

    /// Number of points currently held.
    fn point_count(&self) -> usize;
}

/// The ordered point collection with write-through JSON persistence.
///
/// The canonical file is a bare JSON array of [`NavigationPoint`] records.
#[derive(Debug)]
pub struct PointStore {
    path: Option<Utf8PathBuf>,
    points: Mutex<Vec<NavigationPoint>>,
}

impl PointStore {
    /// Load the collection stored at `path`.
    ///
    /// A missing file is seeded with [`school_layout`]. A file in a historical
    /// layout is migrated and rewritten in canonical form. Any other read or
    /// parse failure is logged and the store starts from the seed layout.
    pub fn load(path: impl Into<Utf8PathBuf>) -> Self {
        let path = path.into();
        let points = match read_points(&path) {
            Ok(Loaded::Canonical(points)) => {
                info!("loaded {} points from {path}", points.len());
                points
            }
            Ok(Loaded::Migrated(points)) => {
                info!("migrated {} points in {path} to the list layout", points.len());
                log_failed_write(persist(&path, &points), "rewrite migrated points");
                points
            }
            Err(err) if err.is_missing() => {
                warn!("point file {path} not found; seeding default layout");
                seed_file(&path)
            }
            Err(err) => {
                error!("could not load points: {err}; seeding default layout");
                seed_file(&path)
            }
        };
        Self {
            path: Some(path),
            points: Mutex::new(dedupe_ids(points)),
        }
    }

    /// Build a store that keeps `points` in memory only.
    ///
    /// [`PointStore::save`] is a no-op for such a store.
    pub fn in_memory(points: Vec<NavigationPoint>) -> Self {
        Self {
            path: None,
            points: Mutex::new(dedupe_ids(points)),
        }
    }

    /// Backing file, if the store is persisted.
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Replace the collection with [`school_layout`] and persist it.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when the seeded collection cannot be written;
    /// the in-memory collection is replaced regardless.
    pub fn seed(&self) -> Result<(), PersistenceError> {
        let mut points = self.lock();
        *points = school_layout();
        info!("seeded {} default points", points.len());
        self.persist_locked(&points)
    }

    /// Write the full collection to the backing file.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] when serialising or writing fails.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let points = self.lock();
        self.persist_locked(&points)
    }

    /// Snapshot of the whole collection in order.
    #[must_use]
    pub fn all(&self) -> Vec<NavigationPoint> {
        self.lock().clone()
    }

    /// Number of points held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Report whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Find the point with identifier `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<NavigationPoint> {
        self.lock().iter().find(|p| p.id == id).cloned()
    }

    /// Case-insensitive substring search over names and descriptions.
    ///
    /// At most [`SEARCH_RESULT_LIMIT`] matches are returned in collection
    /// order. Callers are expected to reject queries shorter than two
    /// characters before calling.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<NavigationPoint> {
        let needle = query.to_lowercase();
        self.lock()
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .take(SEARCH_RESULT_LIMIT)
            .cloned()
            .collect()
    }

    /// Every point on `floor`, in collection order.
    #[must_use]
    pub fn by_floor(&self, floor: i32) -> Vec<NavigationPoint> {
        self.lock()
            .iter()
            .filter(|p| p.floor == floor)
            .cloned()
            .collect()
    }

    /// Validate `payload`, append it and persist the collection.
    ///
    /// When the payload carries no id one is generated from the current time
    /// as `point_<microseconds>`, bumped until it is unused.
    ///
    /// # Errors
    /// Returns [`PointStoreError::Validation`] for an incomplete payload or an
    /// id that already exists.
    pub fn add(&self, payload: PointPayload) -> Result<NavigationPoint, PointStoreError> {
        let mut points = self.lock();
        let id = match payload.id.clone() {
            Some(id) if points.iter().any(|p| p.id == id) => {
                return Err(PointValidationError::DuplicateId { id }.into());
            }
            Some(id) => id,
            None => generate_id(&points, Utc::now().timestamp_micros()),
        };
        let point = payload.into_point(id)?;
        points.push(point.clone());
        debug!("added point {}", point.id);
        log_failed_write(self.persist_locked(&points), "save points after add");
        Ok(point)
    }

    /// Replace the point addressed by `id`, keeping its position.
    ///
    /// # Errors
    /// Returns [`PointStoreError::NotFound`] when no point has `id`, and
    /// [`PointStoreError::Validation`] when the payload is incomplete or names
    /// a different id. The collection is unchanged on error.
    pub fn update(&self, id: &str, payload: PointPayload) -> Result<NavigationPoint, PointStoreError> {
        if let Some(payload_id) = payload.id.as_deref().filter(|given| *given != id) {
            return Err(PointValidationError::IdMismatch {
                addressed: id.to_owned(),
                payload: payload_id.to_owned(),
            }
            .into());
        }
        let mut points = self.lock();
        let slot = points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PointStoreError::NotFound { id: id.to_owned() })?;
        let point = payload.into_point(id.to_owned())?;
        *slot = point.clone();
        debug!("updated point {id}");
        log_failed_write(self.persist_locked(&points), "save points after update");
        Ok(point)
    }

    /// Remove every point with `id` and persist.
    ///
    /// Deleting an unknown id succeeds without changing anything. Returns the
    /// number of removed records.
    pub fn delete(&self, id: &str) -> usize {
        let mut points = self.lock();
        let before = points.len();
        points.retain(|p| p.id != id);
        let removed = before - points.len();
        debug!("deleted {removed} point(s) with id {id}");
        log_failed_write(self.persist_locked(&points), "save points after delete");
        removed
    }

    /// Euclidean distance between two points in map units.
    #[must_use]
    pub fn distance(from: &NavigationPoint, to: &NavigationPoint) -> f64 {
        from.distance_to(to)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<NavigationPoint>> {
        self.points.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist_locked(&self, points: &[NavigationPoint]) -> Result<(), PersistenceError> {
        match &self.path {
            Some(path) => persist(path, points),
            None => Ok(()),
        }
    }
}

impl PointLookup for PointStore {
    fn point(&self, id: &str) -> Option<NavigationPoint> {
        self.get(id)
    }

    fn point_count(&self) -> usize {
        self.len()
    }
}

enum Loaded {
    Canonical(Vec<NavigationPoint>),
    Migrated(Vec<NavigationPoint>),
}

fn read_points(path: &Utf8Path) -> Result<Loaded, PersistenceError> {
    let document = wayfind_fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str(&document) {
        Ok(points) => Ok(Loaded::Canonical(points)),
        Err(canonical) => match migrate_legacy_points(&document) {
            Ok(points) => Ok(Loaded::Migrated(points)),
            Err(LegacyShapeError::Unsupported(kind)) => Err(PersistenceError::UnsupportedShape {
                path: path.to_path_buf(),
                kind,
            }),
            Err(LegacyShapeError::Json(_)) => Err(PersistenceError::Parse {
                path: path.to_path_buf(),
                source: canonical,
            }),
        },
    }
}

fn persist(path: &Utf8Path, points: &[NavigationPoint]) -> Result<(), PersistenceError> {
    let payload = serde_json::to_vec_pretty(points).map_err(|source| PersistenceError::Serialise {
        path: path.to_path_buf(),
        source,
    })?;
    wayfind_fs::write_atomic(path, &payload).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("saved {} points to {path}", points.len());
    Ok(())
}

fn seed_file(path: &Utf8Path) -> Vec<NavigationPoint> {
    let points = school_layout();
    log_failed_write(persist(path, &points), "save seeded points");
    info!("seeded {} default points", points.len());
    points
}

fn log_failed_write(result: Result<(), PersistenceError>, action: &str) {
    if let Err(err) = result {
        error!("{action} failed: {err}");
    }
}

/// Drop records whose id was already seen, keeping the first occurrence.
fn dedupe_ids(points: Vec<NavigationPoint>) -> Vec<NavigationPoint> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .into_iter()
        .filter(|point| {
            let fresh = seen.insert(point.id.clone());
            if !fresh {
                warn!("dropping duplicate point id {}", point.id);
            }
            fresh
        })
        .collect()
}

fn generate_id(points: &[NavigationPoint], micros: i64) -> String {
    let mut stamp = micros;
    loop {
        let candidate = format!("{GENERATED_ID_PREFIX}{stamp}");
        if points.iter().all(|p| p.id != candidate) {
            return candidate;
        }
        stamp = stamp.wrapping_add(1);
    }
}
