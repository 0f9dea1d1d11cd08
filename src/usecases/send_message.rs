//! Use case for publishing the composed message to the relay.
//!
//! Validates the message buffer, resolves the author's display name and hands
//! the message to the transport. Publishing is fire-and-forget, so there is no
//! "sending" state: the buffer is cleared as soon as the message is handed off.

use crate::{
    domain::{
        chat_message::ChatMessage, identity::ParticipantIdentity,
        text_input_state::TextInputState,
    },
    relay::{RelayTransport, SEND_MESSAGE_EVENT},
};

const SEND_MESSAGE_ENCODE_FAILED: &str = "SEND_MESSAGE_ENCODE_FAILED";

/// Result of a send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message was handed to the relay and the buffer cleared.
    Published(ChatMessage),
    /// The buffer was empty or whitespace-only; nothing changed.
    Skipped,
}

/// Publishes the buffer content as a `send_message` event.
///
/// An empty or whitespace-only buffer is a silent no-op. Otherwise the display
/// name is resolved (an empty name field is reset to the fallback label), the
/// message is published with its text exactly as typed, and the buffer is
/// cleared.
pub fn send_message(
    relay: &dyn RelayTransport,
    identity: &mut ParticipantIdentity,
    buffer: &mut TextInputState,
) -> SendOutcome {
    if buffer.is_blank() {
        return SendOutcome::Skipped;
    }

    let message = ChatMessage::new(identity.resolve(), buffer.text());
    let payload = match serde_json::to_value(&message) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::warn!(
                code = SEND_MESSAGE_ENCODE_FAILED,
                error = %error,
                "chat message could not be encoded"
            );
            return SendOutcome::Skipped;
        }
    };

    relay.publish(SEND_MESSAGE_EVENT, payload);
    buffer.clear();

    SendOutcome::Published(message)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{json, Value};

    use super::*;
    use crate::{domain::identity::FALLBACK_DISPLAY_NAME, relay::EventHandler};

    #[derive(Default)]
    struct RecordingRelay {
        published: Mutex<Vec<(String, Value)>>,
    }

    impl RecordingRelay {
        fn published(&self) -> Vec<(String, Value)> {
            self.published.lock().expect("lock").clone()
        }
    }

    impl RelayTransport for RecordingRelay {
        fn publish(&self, event: &str, payload: Value) {
            self.published
                .lock()
                .expect("lock")
                .push((event.to_owned(), payload));
        }

        fn subscribe(&self, _event: &str, _handler: EventHandler) {}
    }

    #[test]
    fn publishes_message_with_typed_name_and_clears_buffer() {
        let relay = RecordingRelay::default();
        let mut identity = ParticipantIdentity::new("Alice");
        let mut buffer = TextInputState::with_text("hello");

        let outcome = send_message(&relay, &mut identity, &mut buffer);

        assert_eq!(
            outcome,
            SendOutcome::Published(ChatMessage::new("Alice", "hello"))
        );
        assert_eq!(
            relay.published(),
            vec![(
                SEND_MESSAGE_EVENT.to_owned(),
                json!({ "name": "Alice", "message": "hello" })
            )]
        );
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor_position(), 0);
    }

    #[test]
    fn empty_name_publishes_fallback_and_resets_name_field() {
        let relay = RecordingRelay::default();
        let mut identity = ParticipantIdentity::new("");
        let mut buffer = TextInputState::with_text("hello");

        send_message(&relay, &mut identity, &mut buffer);

        assert_eq!(
            relay.published()[0].1,
            json!({ "name": FALLBACK_DISPLAY_NAME, "message": "hello" })
        );
        assert_eq!(identity.display_name(), FALLBACK_DISPLAY_NAME);
    }

    #[test]
    fn non_empty_name_is_never_rewritten() {
        let relay = RecordingRelay::default();
        let mut identity = ParticipantIdentity::new("Bob");

        for text in ["one", "two"] {
            let mut buffer = TextInputState::with_text(text);
            send_message(&relay, &mut identity, &mut buffer);
        }

        assert_eq!(identity.display_name(), "Bob");
        assert!(relay
            .published()
            .iter()
            .all(|(_, payload)| payload["name"] == "Bob"));
    }

    #[test]
    fn empty_buffer_publishes_nothing() {
        let relay = RecordingRelay::default();
        let mut identity = ParticipantIdentity::new("Alice");
        let mut buffer = TextInputState::default();

        let outcome = send_message(&relay, &mut identity, &mut buffer);

        assert_eq!(outcome, SendOutcome::Skipped);
        assert!(relay.published().is_empty());
    }

    #[test]
    fn whitespace_only_buffer_is_left_untouched() {
        let relay = RecordingRelay::default();
        let mut identity = ParticipantIdentity::new("");
        let mut buffer = TextInputState::with_text("   ");

        let outcome = send_message(&relay, &mut identity, &mut buffer);

        assert_eq!(outcome, SendOutcome::Skipped);
        assert!(relay.published().is_empty());
        assert_eq!(buffer.text(), "   ");
        assert_eq!(identity.display_name(), "");
    }

    #[test]
    fn message_text_is_sent_as_typed() {
        let relay = RecordingRelay::default();
        let mut identity = ParticipantIdentity::new("Alice");
        let mut buffer = TextInputState::with_text("  spaced out  ");

        send_message(&relay, &mut identity, &mut buffer);

        assert_eq!(relay.published()[0].1["message"], "  spaced out  ");
    }
}
