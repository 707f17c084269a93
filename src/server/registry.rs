//! Room registry: mapping from room identifier to connected sessions.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

/// Channel used to hand outbound frames to a session's writer task.
pub type FrameSender = mpsc::UnboundedSender<String>;

/// Process-wide mapping from room id to the sessions currently in it.
///
/// Constructed once at server start and shared into every connection handler.
/// Rooms are created lazily on the first join to an absent key and removed as
/// soon as the last member leaves, so empty rooms never accumulate over the
/// lifetime of the process.
///
/// Members are keyed by session id, which gives identity-based set semantics:
/// re-adding a session that is already present does not duplicate it. A single
/// mutex covers add, remove, and read so membership changes and broadcast
/// snapshots cannot interleave inconsistently.
pub struct RoomRegistry {
    /// Map of room id to its member sessions' outbound channels
    rooms: Mutex<HashMap<String, HashMap<Uuid, FrameSender>>>,
}

impl RoomRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Insert `session_id` into the member set for `room_id`, creating the
    /// room if absent.
    pub async fn add_to_room(&self, room_id: &str, session_id: Uuid, sender: FrameSender) {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(session_id, sender);
        tracing::debug!("Session '{}' added to room '{}'", session_id, room_id);
    }

    /// Remove `session_id` from the member set for `room_id`; the room entry
    /// is deleted entirely once its member set becomes empty.
    pub async fn remove_from_room(&self, room_id: &str, session_id: Uuid) {
        let mut rooms = self.rooms.lock().await;
        if let Some(members) = rooms.get_mut(room_id) {
            members.remove(&session_id);
            if members.is_empty() {
                rooms.remove(room_id);
                tracing::debug!("Room '{}' is empty, removed from registry", room_id);
            }
        }
    }

    /// Snapshot of the outbound channels of every member of `room_id` except
    /// `session_id`. Returns an empty list if the room does not exist.
    pub async fn peers_excluding(&self, room_id: &str, session_id: Uuid) -> Vec<FrameSender> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .filter(|(id, _)| **id != session_id)
                    .map(|(_, sender)| sender.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Snapshot of the outbound channels of every member of `room_id`,
    /// caller included. Returns an empty list if the room does not exist.
    pub async fn all_peers(&self, room_id: &str) -> Vec<FrameSender> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `room_id` currently has any members.
    pub async fn contains_room(&self, room_id: &str) -> bool {
        let rooms = self.rooms.lock().await;
        rooms.contains_key(room_id)
    }

    /// List of (room id, member count) pairs, sorted by room id for
    /// consistent ordering.
    pub async fn room_summaries(&self) -> Vec<(String, usize)> {
        let rooms = self.rooms.lock().await;
        let mut summaries: Vec<(String, usize)> = rooms
            .iter()
            .map(|(id, members)| (id.clone(), members.len()))
            .collect();
        summaries.sort_by(|a, b| a.0.cmp(&b.0));
        summaries
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
