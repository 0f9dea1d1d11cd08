//! Relay integration layer: Socket.IO transport and the chat event contract.

mod backoff;
pub mod handlers;
pub mod loopback;
pub mod protocol;
pub mod session;

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

pub use handlers::EventHandler;

/// Outbound event carrying a locally authored message.
pub const SEND_MESSAGE_EVENT: &str = "send_message";
/// Inbound event carrying a message broadcast by the relay.
pub const RECEIVED_MESSAGE_EVENT: &str = "received_message";

/// Publish/subscribe contract of a relay connection.
///
/// `publish` is fire-and-forget: nothing is acknowledged and a publish made while
/// disconnected is dropped. `subscribe` is additive: registering the same event
/// twice installs two independent handlers, both of which fire for every event.
pub trait RelayTransport: Send + Sync {
    fn publish(&self, event: &str, payload: Value);
    fn subscribe(&self, event: &str, handler: EventHandler);

    /// Stops the connection. Calling it more than once is harmless.
    fn shutdown(&self) {}
}

impl<T: RelayTransport + ?Sized> RelayTransport for Arc<T> {
    fn publish(&self, event: &str, payload: Value) {
        (**self).publish(event, payload)
    }

    fn subscribe(&self, event: &str, handler: EventHandler) {
        (**self).subscribe(event, handler)
    }

    fn shutdown(&self) {
        (**self).shutdown()
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid relay endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported relay endpoint scheme '{scheme}' in {endpoint}")]
    UnsupportedScheme { endpoint: String, scheme: String },
}

/// Returns the relay module name for smoke checks.
pub fn module_name() -> &'static str {
    "relay"
}
