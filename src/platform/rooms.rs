//! In-process room directory.
//!
//! Tracks the discussion spaces the daemon has created: one space per
//! section, each holding a small fixed set of rooms (general chat,
//! homework, voice). Quota arithmetic lives here, not in the engine:
//! the registrar only ever sees the abstract "sections remaining"
//! number.

use async_trait::async_trait;
use coursebot_proto::CourseId;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

use super::{ChatPlatform, PlatformError, Requester, SpaceHandle};

/// A discussion space: a group of rooms plus its member set.
#[derive(Debug)]
struct Space {
    rooms: Vec<String>,
    members: HashSet<i64>,
}

/// The set of spaces this daemon serves.
pub struct RoomDirectory {
    spaces: DashMap<String, Space>,
    /// Total room quota granted by the hosting platform.
    quota: u32,
    /// Rooms consumed per section (the space itself plus its rooms).
    rooms_per_section: u32,
    /// Serializes capacity check + insert across different course keys.
    create_guard: Mutex<()>,
}

impl RoomDirectory {
    /// Create an empty directory with the given quota.
    pub fn new(quota: u32, rooms_per_section: u32) -> Self {
        RoomDirectory {
            spaces: DashMap::new(),
            quota,
            rooms_per_section: rooms_per_section.max(1),
            create_guard: Mutex::new(()),
        }
    }

    /// Re-register a space that exists in the catalog, after a restart.
    pub fn restore_space(&self, space_id: &str, slug: &str, members: Vec<i64>) {
        self.spaces.insert(
            space_id.to_string(),
            Space {
                rooms: room_names(slug),
                members: members.into_iter().collect(),
            },
        );
    }

    /// Number of spaces currently open.
    pub fn space_count(&self) -> u32 {
        self.spaces.len() as u32
    }
}

/// Rooms created for each section, named after the course slug.
fn room_names(slug: &str) -> Vec<String> {
    vec![
        format!("general-{}", slug),
        format!("hw-{}", slug),
        format!("voice-chat-{}", slug),
    ]
}

#[async_trait]
impl ChatPlatform for RoomDirectory {
    async fn create_space(&self, course: &CourseId) -> Result<SpaceHandle, PlatformError> {
        // Hold the guard across the capacity re-check and the insert so
        // concurrent creations for different courses cannot overshoot
        // the quota. No awaits happen while it is held.
        let _guard = self.create_guard.lock();

        if self.sections_remaining() < 1 {
            return Err(PlatformError::SpaceLimit);
        }

        let id = Uuid::new_v4().to_string();
        let name = course.space_name();
        let slug = course.room_slug();

        self.spaces.insert(
            id.clone(),
            Space {
                rooms: room_names(&slug),
                members: HashSet::new(),
            },
        );

        info!(space = %name, id = %id, "Created discussion space");

        Ok(SpaceHandle { id, name })
    }

    async fn grant_access(
        &self,
        space_id: &str,
        requester: &Requester,
    ) -> Result<(), PlatformError> {
        let mut space = self
            .spaces
            .get_mut(space_id)
            .ok_or_else(|| PlatformError::NoSuchSpace(space_id.to_string()))?;

        space.members.insert(requester.id);
        Ok(())
    }

    fn sections_remaining(&self) -> u32 {
        (self.quota.saturating_sub(self.rooms_in_use())) / self.rooms_per_section
    }

    fn rooms_in_use(&self) -> u32 {
        self.spaces
            .iter()
            .map(|space| space.rooms.len() as u32 + 1)
            .sum()
    }
}
