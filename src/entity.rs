//! Core trait for the records produced from a report.

use serde::Serialize;

/// A serializable record (parsed observation or derived metrics) that can
/// be embedded in a JSON document.
pub trait Entity: Serialize + Sized {
    /// Convert entity to a JSON value
    fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
