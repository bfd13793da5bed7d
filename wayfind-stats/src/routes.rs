//! Size of the externally maintained named-routes file.

use camino::Utf8Path;
use log::{debug, warn};
use serde_json::Value;

/// Count the routes defined in the JSON file at `path`.
///
/// Both an object keyed by route name and a list of routes are understood.
/// Anything else, including a missing or unreadable file, counts as zero.
#[must_use]
pub fn count_named_routes(path: &Utf8Path) -> usize {
    let document = match wayfind_fs::read_to_string(path) {
        Ok(document) => document,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("named routes file {path} not found");
            return 0;
        }
        Err(err) => {
            warn!("could not read named routes from {path}: {err}");
            return 0;
        }
    };
    match serde_json::from_str::<Value>(&document) {
        Ok(Value::Object(routes)) => routes.len(),
        Ok(Value::Array(routes)) => routes.len(),
        Ok(_) => {
            warn!("named routes file {path} is neither an object nor a list");
            0
        }
        Err(err) => {
            warn!("could not parse named routes from {path}: {err}");
            0
        }
    }
}
