//! Per-session frame dispatch and room lifecycle management.

use uuid::Uuid;

use super::frame::{Frame, Inbound};
use super::registry::{FrameSender, RoomRegistry};

/// Server-side state for one connected client.
///
/// A session starts unjoined; only a `join` frame moves it into a room.
/// While unjoined, chat and sync frames are dropped silently because there
/// is no room context to relay them into. A second `join` re-joins: the
/// session leaves its current room and enters the new one.
pub struct Session {
    id: Uuid,
    sender: FrameSender,
    room: Option<String>,
}

impl Session {
    /// Create a new unjoined session with the given outbound channel.
    pub fn new(sender: FrameSender) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            room: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Room the session currently belongs to, if any.
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Dispatch one decoded inbound frame.
    ///
    /// Each call runs to completion before the caller reads the next frame,
    /// so registry mutations for a single connection never interleave.
    /// Nothing here surfaces an error to the client; the protocol is
    /// best-effort and the only acknowledgment is the `joined` frame.
    pub async fn handle_frame(&mut self, registry: &RoomRegistry, inbound: Inbound) {
        match inbound {
            Inbound::Frame(Frame::Join { room, system }) => {
                self.join(registry, room, &system).await;
            }
            Inbound::Frame(Frame::Chat { message }) => {
                let Some(room) = self.room.clone() else {
                    tracing::debug!("Session '{}' sent chat before joining, dropped", self.id);
                    return;
                };
                // Chat echoes back to the sender as well; relaying to the
                // whole room keeps all members' views identical.
                let encoded = Frame::Chat { message }.encode();
                self.broadcast(registry.all_peers(&room).await, encoded);
            }
            Inbound::Frame(Frame::Sync { state }) => {
                let Some(room) = self.room.clone() else {
                    tracing::debug!("Session '{}' sent sync before joining, dropped", self.id);
                    return;
                };
                // The sender must never receive its own snapshot back: at
                // best a no-op, at worst it overwrites fresher state.
                let encoded = Frame::Sync { state }.encode();
                self.broadcast(registry.peers_excluding(&room, self.id).await, encoded);
            }
            Inbound::Frame(Frame::Joined { .. }) => {
                // server→client only, ignore if a client sends it
                tracing::debug!("Session '{}' sent a 'joined' frame, ignored", self.id);
            }
            Inbound::Ignored => {}
        }
    }

    /// Remove the session from its room, if it joined one. Called when the
    /// transport closes or errors; after this the session holds no registry
    /// state.
    pub async fn disconnect(&mut self, registry: &RoomRegistry) {
        if let Some(room) = self.room.take() {
            registry.remove_from_room(&room, self.id).await;
            tracing::info!("Session '{}' left room '{}'", self.id, room);
        }
    }

    async fn join(&mut self, registry: &RoomRegistry, room: String, system: &str) {
        // Re-join: leave the old room first so the session is never in two
        // rooms at once.
        if let Some(old_room) = self.room.take() {
            registry.remove_from_room(&old_room, self.id).await;
            tracing::info!(
                "Session '{}' re-joining: left room '{}'",
                self.id,
                old_room
            );
        }

        registry
            .add_to_room(&room, self.id, self.sender.clone())
            .await;
        tracing::info!(
            "Session '{}' joined room '{}' (system: '{}')",
            self.id,
            room,
            system
        );

        let ack = Frame::Joined { room: room.clone() }.encode();
        if self.sender.send(ack).is_err() {
            tracing::warn!("Failed to send joined ack to session '{}'", self.id);
        }
        self.room = Some(room);
    }

    /// Fan one encoded frame out to a snapshot of peer channels. A closed
    /// peer channel only skips that peer; the rest of the broadcast
    /// continues and no error reaches the sender.
    fn broadcast(&self, peers: Vec<FrameSender>, encoded: String) {
        for peer in peers {
            if peer.send(encoded.clone()).is_err() {
                tracing::warn!("Failed to relay frame to a peer of session '{}'", self.id);
            }
        }
    }
}
