use geo::{Coord, Distance, Euclidean, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A labelled location on one floor's map.
///
/// Coordinates are map pixels local to the floor's rendering; points on
/// different floors share no coordinate frame.
///
/// # Examples
/// ```
/// use wayfind_core::NavigationPoint;
///
/// let hall = NavigationPoint {
///     id: "assembly_hall".into(),
///     name: "Assembly hall".into(),
///     x: 400.0,
///     y: 250.0,
///     floor: 3,
///     description: "Main hall".into(),
///     category: "hall".into(),
/// };
///
/// assert_eq!(hall.location().x, 400.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationPoint {
    /// Stable identifier, unique across the collection.
    pub id: String,
    /// Display name; several points may share one.
    pub name: String,
    /// Horizontal map coordinate.
    pub x: f64,
    /// Vertical map coordinate.
    pub y: f64,
    /// Floor index partitioning the collection into layers.
    pub floor: i32,
    /// Free-text description, searched alongside the name.
    pub description: String,
    /// Free-form category tag such as `classroom` or `stair`.
    pub category: String,
}

impl NavigationPoint {
    /// Position of the point on its floor map.
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }

    /// Straight-line distance to `other` in map units.
    ///
    /// Floors are ignored: the result compares raw coordinates.
    pub fn distance_to(&self, other: &Self) -> f64 {
        Euclidean.distance(Point::from(self.location()), Point::from(other.location()))
    }

    /// Report whether `query` (already lowercased) occurs in the name or description.
    pub(crate) fn matches_lowercase(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.description.to_lowercase().contains(query)
    }
}

/// Errors returned when a [`PointPayload`] cannot become a [`NavigationPoint`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PointValidationError {
    /// A required field was absent.
    #[error("point is missing required field `{field}`")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },
    /// A coordinate was NaN or infinite.
    #[error("point coordinate `{axis}` must be a finite number")]
    NonFiniteCoordinate {
        /// Offending axis, `x` or `y`.
        axis: &'static str,
    },
    /// The supplied identifier was empty or whitespace.
    #[error("point id must not be blank")]
    BlankId,
    /// A new point reused an identifier already in the collection.
    #[error("a point with id `{id}` already exists")]
    DuplicateId {
        /// The identifier already in use.
        id: String,
    },
    /// An update payload named a different point than the one addressed.
    #[error("payload id `{payload}` does not match addressed point `{addressed}`")]
    IdMismatch {
        /// Identifier the update was addressed to.
        addressed: String,
        /// Identifier carried by the payload.
        payload: String,
    },
}

/// Caller-supplied point record for add and update operations.
///
/// Every field is optional on the wire so that a missing field is reported as
/// [`PointValidationError::MissingField`] instead of a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointPayload {
    /// Identifier; generated on add when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Horizontal map coordinate.
    pub x: Option<f64>,
    /// Vertical map coordinate.
    pub y: Option<f64>,
    /// Floor index.
    pub floor: Option<i32>,
    /// Free-text description.
    pub description: Option<String>,
    /// Category tag.
    pub category: Option<String>,
}

impl PointPayload {
    /// Validate the payload and build a point carrying `id`.
    ///
    /// The payload's own `id` is ignored here; callers reconcile it first.
    ///
    /// # Errors
    /// Returns [`PointValidationError`] when a field is missing, a coordinate is
    /// not finite, or `id` is blank.
    pub fn into_point(self, id: String) -> Result<NavigationPoint, PointValidationError> {
        if id.trim().is_empty() {
            return Err(PointValidationError::BlankId);
        }
        let x = finite(required(self.x, "x")?, "x")?;
        let y = finite(required(self.y, "y")?, "y")?;
        Ok(NavigationPoint {
            id,
            name: required(self.name, "name")?,
            x,
            y,
            floor: required(self.floor, "floor")?,
            description: required(self.description, "description")?,
            category: required(self.category, "category")?,
        })
    }
}

impl From<NavigationPoint> for PointPayload {
    fn from(point: NavigationPoint) -> Self {
        Self {
            id: Some(point.id),
            name: Some(point.name),
            x: Some(point.x),
            y: Some(point.y),
            floor: Some(point.floor),
            description: Some(point.description),
            category: Some(point.category),
        }
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, PointValidationError> {
    value.ok_or(PointValidationError::MissingField { field })
}

fn finite(value: f64, axis: &'static str) -> Result<f64, PointValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PointValidationError::NonFiniteCoordinate { axis })
    }
}
