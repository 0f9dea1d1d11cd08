//! Text frames of the Socket.IO v4 protocol carried over the Engine.IO v4
//! WebSocket transport.
//!
//! Every WebSocket text message is one Engine.IO packet: a single digit type
//! followed by its data. Engine.IO `message` packets (`4`) wrap a Socket.IO packet,
//! again a single digit type followed by an optional namespace, an optional ack id
//! and a JSON body. Only the default namespace and text events are used here.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const DEFAULT_PING_INTERVAL_MS: u64 = 25_000;
const DEFAULT_PING_TIMEOUT_MS: u64 = 20_000;

/// Socket.IO CONNECT for the default namespace.
pub const CONNECT_FRAME: &str = "40";
/// Engine.IO pong, the reply to every server ping.
pub const PONG_FRAME: &str = "3";

/// Engine.IO `open` packet data sent by the server after the WebSocket upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenHandshake {
    pub sid: String,
    #[serde(default = "default_ping_interval")]
    pub ping_interval: u64,
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout: u64,
}

impl OpenHandshake {
    /// Longest silence from the server before the connection counts as dead.
    pub fn liveness_window(&self) -> Duration {
        Duration::from_millis(self.ping_interval.saturating_add(self.ping_timeout))
    }
}

fn default_ping_interval() -> u64 {
    DEFAULT_PING_INTERVAL_MS
}

fn default_ping_timeout() -> u64 {
    DEFAULT_PING_TIMEOUT_MS
}

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Open(OpenHandshake),
    Close,
    Ping,
    Pong,
    Noop,
    /// Namespace connect acknowledged.
    Connected,
    /// Namespace disconnected by the server.
    Disconnected,
    ConnectError(String),
    Event { name: String, payload: Value },
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("empty frame")]
    Empty,
    #[error("unknown engine packet type '{0}'")]
    UnknownEnginePacket(char),
    #[error("unknown socket packet type '{0}'")]
    UnknownSocketPacket(char),
    #[error("unsupported socket packet type '{0}'")]
    Unsupported(char),
    #[error("event frame has no event name")]
    MissingEventName,
    #[error("malformed {context} body: {source}")]
    InvalidJson {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub fn decode(text: &str) -> Result<Frame, ProtocolError> {
    let (kind, rest) = split_type(text)?;
    match kind {
        '0' => serde_json::from_str(rest)
            .map(Frame::Open)
            .map_err(|source| ProtocolError::InvalidJson {
                context: "open",
                source,
            }),
        '1' => Ok(Frame::Close),
        '2' => Ok(Frame::Ping),
        '3' => Ok(Frame::Pong),
        '4' => decode_socket_packet(rest),
        '6' => Ok(Frame::Noop),
        other => Err(ProtocolError::UnknownEnginePacket(other)),
    }
}

/// Encodes a Socket.IO EVENT `42["name",payload]`.
pub fn encode_event(name: &str, payload: &Value) -> Result<String, ProtocolError> {
    let body = serde_json::to_string(&(name, payload)).map_err(|source| {
        ProtocolError::InvalidJson {
            context: "event",
            source,
        }
    })?;
    Ok(format!("42{body}"))
}

fn decode_socket_packet(rest: &str) -> Result<Frame, ProtocolError> {
    let (kind, body) = split_type(rest)?;
    let body = strip_namespace(body);
    match kind {
        '0' => Ok(Frame::Connected),
        '1' => Ok(Frame::Disconnected),
        '2' => decode_event(body),
        '4' => Ok(Frame::ConnectError(connect_error_message(body))),
        '3' | '5' | '6' => Err(ProtocolError::Unsupported(kind)),
        other => Err(ProtocolError::UnknownSocketPacket(other)),
    }
}

fn decode_event(body: &str) -> Result<Frame, ProtocolError> {
    let body = body.trim_start_matches(|ch: char| ch.is_ascii_digit());
    let items: Vec<Value> =
        serde_json::from_str(body).map_err(|source| ProtocolError::InvalidJson {
            context: "event",
            source,
        })?;

    let mut items = items.into_iter();
    let name = match items.next() {
        Some(Value::String(name)) => name,
        _ => return Err(ProtocolError::MissingEventName),
    };

    Ok(Frame::Event {
        name,
        payload: items.next().unwrap_or(Value::Null),
    })
}

fn connect_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| body.to_owned())
}

fn strip_namespace(body: &str) -> &str {
    if !body.starts_with('/') {
        return body;
    }
    body.split_once(',').map_or("", |(_, rest)| rest)
}

fn split_type(text: &str) -> Result<(char, &str), ProtocolError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(ProtocolError::Empty)?;
    Ok((kind, chars.as_str()))
}
