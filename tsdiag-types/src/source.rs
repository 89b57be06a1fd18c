//! Identity of a data source, used to key memoized loads.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a data source at a given revision.
///
/// `id` names the source (e.g. a canonical file path); `revision` fingerprints
/// its current content so that a changed source produces a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceKey {
    id: String,
    revision: u64,
}

impl SourceKey {
    /// Construct a key from an identifier and a content revision.
    pub fn new(id: impl Into<String>, revision: u64) -> Self {
        Self {
            id: id.into(),
            revision,
        }
    }

    /// The source identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The content revision.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:016x}", self.id, self.revision)
    }
}
