//! Test-only, in-memory `PointLookup` implementation used by unit and
//! behaviour tests.

use crate::{NavigationPoint, PointLookup};

/// In-memory `PointLookup` implementation used in tests.
///
/// The lookup performs a linear scan and is intended only for small datasets.
#[derive(Default, Debug, Clone)]
pub struct MemoryPoints {
    points: Vec<NavigationPoint>,
}

impl MemoryPoints {
    /// Create a lookup from a collection of points.
    pub fn with_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = NavigationPoint>,
    {
        Self {
            points: points.into_iter().collect(),
        }
    }
}

impl PointLookup for MemoryPoints {
    fn point(&self, id: &str) -> Option<NavigationPoint> {
        self.points.iter().find(|p| p.id == id).cloned()
    }

    fn point_count(&self) -> usize {
        self.points.len()
    }
}

/// Build a point with placeholder description and category.
pub fn named_point(id: &str, name: &str, x: f64, y: f64) -> NavigationPoint {
    NavigationPoint {
        id: id.to_owned(),
        name: name.to_owned(),
        x,
        y,
        floor: 1,
        description: String::new(),
        category: "classroom".to_owned(),
    }
}
