use serde_json::Value;

use super::{
    handlers::{EventHandler, HandlerRegistry},
    RelayTransport, RECEIVED_MESSAGE_EVENT, SEND_MESSAGE_EVENT,
};

/// In-process relay that broadcasts every `send_message` straight back as
/// `received_message`, sender included. Delivery is synchronous, on the
/// publishing thread.
#[derive(Debug, Default)]
pub struct LoopbackRelay {
    handlers: HandlerRegistry,
}

impl LoopbackRelay {
    /// Delivers a broadcast as if another participant had published it.
    #[cfg(test)]
    pub fn broadcast(&self, payload: &Value) -> usize {
        self.handlers.dispatch(RECEIVED_MESSAGE_EVENT, payload)
    }

    #[cfg(test)]
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.handler_count(event)
    }
}

impl RelayTransport for LoopbackRelay {
    fn publish(&self, event: &str, payload: Value) {
        if event != SEND_MESSAGE_EVENT {
            tracing::debug!(event, "loopback relay ignores event");
            return;
        }

        let delivered = self.handlers.dispatch(RECEIVED_MESSAGE_EVENT, &payload);
        tracing::debug!(handlers = delivered, "loopback relay broadcast message");
    }

    fn subscribe(&self, event: &str, handler: EventHandler) {
        self.handlers.add(event, handler);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    fn capture(relay: &LoopbackRelay) -> Arc<Mutex<Vec<Value>>> {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        relay.subscribe(
            RECEIVED_MESSAGE_EVENT,
            Arc::new(move |payload: &Value| sink.lock().expect("lock").push(payload.clone())),
        );
        captured
    }

    #[test]
    fn send_message_is_rebroadcast_as_received_message() {
        let relay = LoopbackRelay::default();
        let captured = capture(&relay);
        let payload = json!({ "name": "Bob", "message": "hi" });

        relay.publish(SEND_MESSAGE_EVENT, payload.clone());

        assert_eq!(*captured.lock().expect("lock"), vec![payload]);
    }

    #[test]
    fn other_events_are_not_rebroadcast() {
        let relay = LoopbackRelay::default();
        let captured = capture(&relay);

        relay.publish("typing", json!({}));

        assert!(captured.lock().expect("lock").is_empty());
    }

    #[test]
    fn broadcast_reaches_every_registered_handler() {
        let relay = LoopbackRelay::default();
        let first = capture(&relay);
        let second = capture(&relay);

        let delivered = relay.broadcast(&json!({ "name": "Eve", "message": "yo" }));

        assert_eq!(delivered, 2);
        assert_eq!(first.lock().expect("lock").len(), 1);
        assert_eq!(second.lock().expect("lock").len(), 1);
        assert_eq!(relay.handler_count(RECEIVED_MESSAGE_EVENT), 2);
    }
}
