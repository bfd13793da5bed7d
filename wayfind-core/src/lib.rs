//! Core domain types for the Wayfind engine.
//!
//! The crate owns the navigation point model, the file-backed
//! [`PointStore`] with its search and floor queries, and the
//! [`TripEstimator`] that turns straight-line distances into walking
//! estimates. Constructors and mutating operations return `Result` to surface
//! invalid input early; storage problems are logged rather than returned.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod point;
pub mod store;
pub mod trip;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use error::{PersistenceError, PointStoreError};
pub use point::{NavigationPoint, PointPayload, PointValidationError};
pub use store::{PointLookup, PointStore, SEARCH_RESULT_LIMIT, school_layout};
pub use trip::{TripConfig, TripConfigError, TripEstimate, TripEstimator};
