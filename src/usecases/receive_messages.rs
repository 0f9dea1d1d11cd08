//! Bridges relay broadcasts into the shell's event stream.
//!
//! The relay's `subscribe` is additive, so registering the receive handler
//! again (for example once per redraw) would deliver every broadcast once per
//! registration. [`ReceiveSubscription`] registers at most once and is created
//! once per relay session, at shell composition.

use std::sync::{mpsc::Sender, Arc};

use serde_json::Value;

use crate::{
    domain::{chat_message::ChatMessage, events::AppEvent},
    relay::{RelayTransport, RECEIVED_MESSAGE_EVENT},
};

const RECEIVE_HANDLER_REGISTERED: &str = "RECEIVE_HANDLER_REGISTERED";
const RECEIVED_PAYLOAD_MALFORMED: &str = "RECEIVED_PAYLOAD_MALFORMED";

#[derive(Debug)]
pub struct ReceiveSubscription {
    sink: Sender<AppEvent>,
    registered: bool,
}

impl ReceiveSubscription {
    pub fn new(sink: Sender<AppEvent>) -> Self {
        Self {
            sink,
            registered: false,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Registers the `received_message` handler unless already done.
    /// Returns true only for the call that actually registered it.
    pub fn ensure_registered(&mut self, relay: &dyn RelayTransport) -> bool {
        if self.registered {
            return false;
        }

        let sink = self.sink.clone();
        relay.subscribe(
            RECEIVED_MESSAGE_EVENT,
            Arc::new(move |payload: &Value| forward_received(&sink, payload)),
        );
        self.registered = true;

        tracing::info!(
            code = RECEIVE_HANDLER_REGISTERED,
            event = RECEIVED_MESSAGE_EVENT,
            "receive handler registered"
        );
        true
    }
}

fn forward_received(sink: &Sender<AppEvent>, payload: &Value) {
    let message: ChatMessage = match serde_json::from_value(payload.clone()) {
        Ok(message) => message,
        Err(error) => {
            tracing::warn!(
                code = RECEIVED_PAYLOAD_MALFORMED,
                error = %error,
                "received message payload ignored"
            );
            return;
        }
    };

    if sink.send(AppEvent::MessageReceived(message)).is_err() {
        tracing::debug!("shell event channel closed; received message dropped");
    }
}
