//! Chat platform abstraction.
//!
//! The registrar does not talk to any concrete chat platform; it talks
//! to [`ChatPlatform`], which covers the three things it needs: creating
//! a shared discussion space, granting a user access to one, and the
//! capacity guard. [`RoomDirectory`] is the in-process implementation
//! backing the line gateway.

mod rooms;

pub use rooms::RoomDirectory;

use async_trait::async_trait;
use coursebot_proto::CourseId;
use thiserror::Error;

/// Platform-side failures.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The room quota is exhausted; no more spaces can be created.
    #[error("space limit reached")]
    SpaceLimit,
    /// No space with the given handle.
    #[error("no such space: {0}")]
    NoSuchSpace(String),
}

/// Handle to a created discussion space.
#[derive(Debug, Clone)]
pub struct SpaceHandle {
    /// Opaque space id, stored in the catalog as the section's room id.
    pub id: String,
    /// Human-readable space name.
    pub name: String,
}

/// A user asking to register for courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    /// Stable numeric identity.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl Requester {
    /// Build a requester whose id is derived deterministically from the
    /// name, so the same name maps to the same identity across
    /// connections and restarts.
    pub fn from_name(name: &str) -> Self {
        Requester {
            id: stable_id(name),
            name: name.to_string(),
        }
    }
}

/// FNV-1a over the lower-cased name; stable across runs.
fn stable_id(name: &str) -> i64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in name.to_lowercase().bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash as i64
}

/// Operations the registrar needs from the chat platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Create the shared discussion space for a course section.
    ///
    /// Re-checks capacity atomically with creation and fails with
    /// [`PlatformError::SpaceLimit`] if the quota is exhausted.
    async fn create_space(&self, course: &CourseId) -> Result<SpaceHandle, PlatformError>;

    /// Grant a requester access to an existing space.
    async fn grant_access(&self, space_id: &str, requester: &Requester)
    -> Result<(), PlatformError>;

    /// How many more sections can be created under the room quota.
    fn sections_remaining(&self) -> u32;

    /// Rooms currently in use, for limit reporting.
    fn rooms_in_use(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_id_deterministic() {
        assert_eq!(Requester::from_name("alice").id, Requester::from_name("alice").id);
        // Identity is case-insensitive, like the rest of the token grammar.
        assert_eq!(Requester::from_name("Alice").id, Requester::from_name("alice").id);
        assert_ne!(Requester::from_name("alice").id, Requester::from_name("bob").id);
    }
}
