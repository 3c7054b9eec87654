//! ID types for garden entities.

use serde::{Deserialize, Serialize};

/// Unique identifier for a pest within one garden session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PestId(u64);

impl PestId {
    /// Creates a pest ID from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for PestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pest#{}", self.0)
    }
}

/// Sequential pest ID source owned by a session.
///
/// IDs are handed out in order starting at 1, so replays of the same session
/// produce the same IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PestIdAllocator {
    next: u64,
}

impl Default for PestIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PestIdAllocator {
    /// Creates an allocator whose first ID is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next unused ID.
    pub fn allocate(&mut self) -> PestId {
        let id = PestId::from_raw(self.next);
        self.next += 1;
        id
    }
}
