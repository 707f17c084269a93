//! Wire frames exchanged between clients and the relay.

use serde::{Deserialize, Serialize};

/// A protocol frame, tagged by its `type` field on the wire.
///
/// The `state` payload of a sync frame is the byte-for-byte content of an
/// opaque emulator-state snapshot; on the wire it is a JSON array of
/// integers 0-255 and the relay never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frame {
    /// Client requests joining (or creating) a room. `system` names the
    /// emulated system and is informational only.
    Join {
        room: String,
        #[serde(default)]
        system: String,
    },
    /// Server acknowledgment of a join, echoing the room identifier.
    Joined { room: String },
    /// Chat text, relayed to the whole room.
    Chat { message: String },
    /// Emulator-state snapshot, relayed to all room members except the sender.
    Sync { state: Vec<u8> },
}

impl Frame {
    /// Serialize the frame for the wire.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("Frame serialization should not fail")
    }
}

/// Result of decoding one inbound text message.
///
/// Anything that is not valid JSON, lacks a recognized `type`, or has the
/// wrong field shapes decodes to `Ignored`. The relay drops ignored frames
/// without replying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Frame(Frame),
    Ignored,
}

impl Inbound {
    /// Decode one inbound text message at the transport boundary.
    pub fn decode(text: &str) -> Self {
        match serde_json::from_str::<Frame>(text) {
            Ok(frame) => Inbound::Frame(frame),
            Err(e) => {
                tracing::debug!("Dropping undecodable frame: {}", e);
                Inbound::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_join_frame() {
        // given:
        let text = r#"{"type":"join","room":"party1","system":"gba"}"#;

        // when:
        let result = Inbound::decode(text);

        // then:
        assert_eq!(
            result,
            Inbound::Frame(Frame::Join {
                room: "party1".to_string(),
                system: "gba".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_join_frame_without_system_defaults_to_empty() {
        // given:
        let text = r#"{"type":"join","room":"party1"}"#;

        // when:
        let result = Inbound::decode(text);

        // then:
        assert_eq!(
            result,
            Inbound::Frame(Frame::Join {
                room: "party1".to_string(),
                system: String::new(),
            })
        );
    }

    #[test]
    fn test_decode_chat_frame() {
        // given:
        let text = r#"{"type":"chat","message":"hello"}"#;

        // when:
        let result = Inbound::decode(text);

        // then:
        assert_eq!(
            result,
            Inbound::Frame(Frame::Chat {
                message: "hello".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_sync_frame() {
        // given:
        let text = r#"{"type":"sync","state":[1,2,3,255,0]}"#;

        // when:
        let result = Inbound::decode(text);

        // then:
        assert_eq!(
            result,
            Inbound::Frame(Frame::Sync {
                state: vec![1, 2, 3, 255, 0],
            })
        );
    }

    #[test]
    fn test_decode_invalid_json_is_ignored() {
        assert_eq!(Inbound::decode("not json at all"), Inbound::Ignored);
        assert_eq!(Inbound::decode(r#"{"type":"join","room":"#), Inbound::Ignored);
        assert_eq!(Inbound::decode(""), Inbound::Ignored);
    }

    #[test]
    fn test_decode_unknown_type_is_ignored() {
        assert_eq!(
            Inbound::decode(r#"{"type":"teleport","room":"party1"}"#),
            Inbound::Ignored
        );
    }

    #[test]
    fn test_decode_missing_type_is_ignored() {
        assert_eq!(
            Inbound::decode(r#"{"room":"party1","system":"gba"}"#),
            Inbound::Ignored
        );
    }

    #[test]
    fn test_decode_sync_with_out_of_range_byte_is_ignored() {
        // 256 does not fit a u8, so the whole frame is dropped
        assert_eq!(
            Inbound::decode(r#"{"type":"sync","state":[1,256]}"#),
            Inbound::Ignored
        );
    }

    #[test]
    fn test_encode_joined_frame() {
        // given:
        let frame = Frame::Joined {
            room: "party1".to_string(),
        };

        // when:
        let encoded = frame.encode();

        // then:
        assert_eq!(encoded, r#"{"type":"joined","room":"party1"}"#);
    }

    #[test]
    fn test_encode_sync_frame_as_integer_array() {
        // given:
        let frame = Frame::Sync {
            state: vec![0, 127, 255],
        };

        // when:
        let encoded = frame.encode();

        // then:
        assert_eq!(encoded, r#"{"type":"sync","state":[0,127,255]}"#);
    }
}
