//! Persistent entity identifiers

use serde::{Deserialize, Serialize};

/// Persistent identifier of an entity within one document.
///
/// Assigned by the native kernel, unique per document, and stable for the
/// document's lifetime. This layer never invents identifiers; it only
/// carries the values the kernel reports. The identifier is the only valid
/// cross-reference key between the native graph and the independent model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersistentId(pub i64);

impl PersistentId {
    /// Create an identifier from the raw kernel value
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw kernel value
    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PersistentId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for PersistentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
