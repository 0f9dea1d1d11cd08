use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::{
    net::TcpStream,
    runtime::Handle,
    sync::{mpsc, watch},
    time::{self, Instant},
};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::{domain::events::ConnectivityStatus, infra::config::RelayConfig};

use super::{
    backoff::ReconnectBackoff,
    handlers::{EventHandler, HandlerRegistry},
    protocol::{self, Frame},
    RelayError, RelayTransport,
};

const RELAY_SESSION_STARTED: &str = "RELAY_SESSION_STARTED";
const RELAY_SESSION_STOPPED: &str = "RELAY_SESSION_STOPPED";
const RELAY_SHUTDOWN_REQUESTED: &str = "RELAY_SHUTDOWN_REQUESTED";
const RELAY_CONNECTED: &str = "RELAY_CONNECTED";
const RELAY_CONNECT_FAILED: &str = "RELAY_CONNECT_FAILED";
const RELAY_CONNECT_REJECTED: &str = "RELAY_CONNECT_REJECTED";
const RELAY_CONNECTION_LOST: &str = "RELAY_CONNECTION_LOST";
const RELAY_HEARTBEAT_TIMEOUT: &str = "RELAY_HEARTBEAT_TIMEOUT";
const RELAY_RECONNECT_SCHEDULED: &str = "RELAY_RECONNECT_SCHEDULED";
const RELAY_FRAME_DECODE_FAILED: &str = "RELAY_FRAME_DECODE_FAILED";
const RELAY_PUBLISH_DROPPED: &str = "RELAY_PUBLISH_DROPPED";

type RelaySocket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type OutboundSlot = Arc<Mutex<Option<mpsc::UnboundedSender<String>>>>;
type StatusCallback = Box<dyn Fn(ConnectivityStatus) + Send>;

/// Converts a relay endpoint (`http(s)://host[/path]`) into the Engine.IO
/// WebSocket URL. An empty path becomes the default `/socket.io/`.
pub fn websocket_url(endpoint: &str) -> Result<Url, RelayError> {
    let mut url = Url::parse(endpoint).map_err(|source| RelayError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        source,
    })?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(RelayError::UnsupportedScheme {
                endpoint: endpoint.to_owned(),
                scheme: other.to_owned(),
            })
        }
    };
    url.set_scheme(scheme)
        .map_err(|()| RelayError::UnsupportedScheme {
            endpoint: endpoint.to_owned(),
            scheme: scheme.to_owned(),
        })?;

    if url.path().is_empty() || url.path() == "/" {
        url.set_path("/socket.io/");
    }
    url.query_pairs_mut()
        .append_pair("EIO", "4")
        .append_pair("transport", "websocket");

    Ok(url)
}

/// Persistent Socket.IO connection to the relay.
///
/// The connection runs on a background task that reconnects with exponential
/// backoff until [`RelayTransport::shutdown`] is called or the session is dropped.
/// Handlers are invoked on that task, one event at a time, in receipt order.
#[derive(Debug)]
pub struct SocketIoSession {
    endpoint: Url,
    handlers: HandlerRegistry,
    outbound: OutboundSlot,
    stop_tx: watch::Sender<bool>,
}

impl SocketIoSession {
    pub fn connect<F>(
        runtime: &Handle,
        config: &RelayConfig,
        on_status: F,
    ) -> Result<Self, RelayError>
    where
        F: Fn(ConnectivityStatus) + Send + 'static,
    {
        let endpoint = websocket_url(&config.endpoint_url)?;
        install_crypto_provider();
        let handlers = HandlerRegistry::default();
        let outbound = OutboundSlot::default();
        let (stop_tx, stop_rx) = watch::channel(false);

        let worker = ConnectionWorker {
            endpoint: endpoint.clone(),
            handlers: handlers.clone(),
            outbound: Arc::clone(&outbound),
            on_status: Box::new(on_status),
            backoff: ReconnectBackoff::new(
                Duration::from_millis(config.reconnect_delay_ms),
                Duration::from_millis(config.reconnect_delay_max_ms),
            ),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            stop_rx,
        };
        runtime.spawn(worker.run());

        tracing::info!(
            code = RELAY_SESSION_STARTED,
            endpoint = %endpoint,
            "relay session started"
        );

        Ok(Self {
            endpoint,
            handlers,
            outbound,
            stop_tx,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// True while a namespace connection is established.
    pub fn is_connected(&self) -> bool {
        lock_slot(&self.outbound).is_some()
    }
}

/// `wss` endpoints need a process-wide rustls provider. A provider installed
/// earlier by someone else is kept.
fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

impl RelayTransport for SocketIoSession {
    fn publish(&self, event: &str, payload: Value) {
        let frame = match protocol::encode_event(event, &payload) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::warn!(
                    code = RELAY_PUBLISH_DROPPED,
                    event,
                    error = %error,
                    "relay event could not be encoded; dropped"
                );
                return;
            }
        };

        match lock_slot(&self.outbound).as_ref() {
            Some(sender) if sender.send(frame).is_ok() => {
                tracing::debug!(event, "relay event published");
            }
            _ => {
                tracing::debug!(
                    code = RELAY_PUBLISH_DROPPED,
                    event,
                    "relay not connected; publish dropped"
                );
            }
        }
    }

    fn subscribe(&self, event: &str, handler: EventHandler) {
        self.handlers.add(event, handler);
        tracing::debug!(
            event,
            handlers = self.handlers.handler_count(event),
            "relay handler registered"
        );
    }

    fn shutdown(&self) {
        if self.stop_tx.send_replace(true) {
            return;
        }
        tracing::info!(code = RELAY_SHUTDOWN_REQUESTED, "relay session shutdown requested");
    }
}

impl Drop for SocketIoSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionOutcome {
    Stopped,
    Lost,
}

struct ConnectionWorker {
    endpoint: Url,
    handlers: HandlerRegistry,
    outbound: OutboundSlot,
    on_status: StatusCallback,
    backoff: ReconnectBackoff,
    connect_timeout: Duration,
    stop_rx: watch::Receiver<bool>,
}

impl ConnectionWorker {
    async fn run(mut self) {
        loop {
            (self.on_status)(ConnectivityStatus::Connecting);

            let attempt = tokio::select! {
                () = stopped(&mut self.stop_rx) => break,
                attempt = time::timeout(self.connect_timeout, connect_async(self.endpoint.as_str())) => attempt,
            };

            let outcome = match attempt {
                Ok(Ok((socket, _response))) => self.drive(socket).await,
                Ok(Err(error)) => {
                    tracing::warn!(
                        code = RELAY_CONNECT_FAILED,
                        error = %error,
                        "relay connection attempt failed"
                    );
                    ConnectionOutcome::Lost
                }
                Err(_) => {
                    tracing::warn!(
                        code = RELAY_CONNECT_FAILED,
                        timeout_ms = self.connect_timeout.as_millis() as u64,
                        "relay connection attempt timed out"
                    );
                    ConnectionOutcome::Lost
                }
            };

            *lock_slot(&self.outbound) = None;
            if outcome == ConnectionOutcome::Stopped {
                break;
            }
            (self.on_status)(ConnectivityStatus::Disconnected);

            let delay = self.backoff.next_delay();
            tracing::info!(
                code = RELAY_RECONNECT_SCHEDULED,
                attempt = self.backoff.attempts(),
                delay_ms = delay.as_millis() as u64,
                "relay reconnect scheduled"
            );

            tokio::select! {
                () = stopped(&mut self.stop_rx) => break,
                () = time::sleep(delay) => {}
            }
        }

        *lock_slot(&self.outbound) = None;
        (self.on_status)(ConnectivityStatus::Disconnected);
        tracing::info!(code = RELAY_SESSION_STOPPED, "relay session stopped");
    }

    async fn drive(&mut self, socket: RelaySocket) -> ConnectionOutcome {
        let (mut sink, mut source) = socket.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        // Installed once the namespace connect is acknowledged; publishes made
        // before that are dropped.
        let mut pending_outbound = Some(outbound_tx);
        let mut liveness = self.connect_timeout;
        // Only inbound frames move the deadline; outbound traffic says nothing
        // about whether the relay is still alive.
        let mut deadline = Instant::now() + liveness;

        loop {
            tokio::select! {
                () = stopped(&mut self.stop_rx) => {
                    let _ = sink.send(Message::Close(None)).await;
                    return ConnectionOutcome::Stopped;
                }
                Some(frame) = outbound_rx.recv() => {
                    if let Err(error) = sink.send(Message::Text(frame.into())).await {
                        tracing::warn!(
                            code = RELAY_CONNECTION_LOST,
                            error = %error,
                            "relay write failed"
                        );
                        return ConnectionOutcome::Lost;
                    }
                }
                next = time::timeout_at(deadline, source.next()) => {
                    let message = match next {
                        Err(_) => {
                            tracing::warn!(
                                code = RELAY_HEARTBEAT_TIMEOUT,
                                window_ms = liveness.as_millis() as u64,
                                "relay went silent; dropping connection"
                            );
                            return ConnectionOutcome::Lost;
                        }
                        Ok(None) => {
                            tracing::info!(code = RELAY_CONNECTION_LOST, "relay closed the stream");
                            return ConnectionOutcome::Lost;
                        }
                        Ok(Some(Err(error))) => {
                            tracing::warn!(
                                code = RELAY_CONNECTION_LOST,
                                error = %error,
                                "relay read failed"
                            );
                            return ConnectionOutcome::Lost;
                        }
                        Ok(Some(Ok(message))) => message,
                    };
                    deadline = Instant::now() + liveness;

                    let text = match message {
                        Message::Text(text) => text,
                        Message::Close(_) => {
                            tracing::info!(code = RELAY_CONNECTION_LOST, "relay sent close");
                            return ConnectionOutcome::Lost;
                        }
                        // WebSocket pings are answered by tungstenite itself.
                        _ => continue,
                    };

                    let reply = match protocol::decode(text.as_str()) {
                        Ok(Frame::Open(handshake)) => {
                            liveness = handshake.liveness_window();
                            deadline = Instant::now() + liveness;
                            tracing::debug!(sid = %handshake.sid, "relay handshake received");
                            Some(protocol::CONNECT_FRAME)
                        }
                        Ok(Frame::Connected) => {
                            if let Some(sender) = pending_outbound.take() {
                                *lock_slot(&self.outbound) = Some(sender);
                            }
                            self.backoff.reset();
                            tracing::info!(code = RELAY_CONNECTED, endpoint = %self.endpoint, "relay connected");
                            (self.on_status)(ConnectivityStatus::Connected);
                            None
                        }
                        Ok(Frame::Ping) => Some(protocol::PONG_FRAME),
                        Ok(Frame::Event { name, payload }) => {
                            let invoked = self.handlers.dispatch(&name, &payload);
                            tracing::debug!(event = %name, handlers = invoked, "relay event received");
                            None
                        }
                        Ok(Frame::ConnectError(reason)) => {
                            tracing::warn!(
                                code = RELAY_CONNECT_REJECTED,
                                reason = %reason,
                                "relay rejected namespace connect"
                            );
                            return ConnectionOutcome::Lost;
                        }
                        Ok(Frame::Disconnected | Frame::Close) => {
                            tracing::info!(code = RELAY_CONNECTION_LOST, "relay closed the session");
                            return ConnectionOutcome::Lost;
                        }
                        Ok(Frame::Pong | Frame::Noop) => None,
                        Err(error) => {
                            tracing::warn!(
                                code = RELAY_FRAME_DECODE_FAILED,
                                error = %error,
                                "relay frame ignored"
                            );
                            None
                        }
                    };

                    if let Some(reply) = reply {
                        if let Err(error) = sink.send(Message::Text(reply.to_owned().into())).await {
                            tracing::warn!(
                                code = RELAY_CONNECTION_LOST,
                                error = %error,
                                "relay write failed"
                            );
                            return ConnectionOutcome::Lost;
                        }
                    }
                }
            }
        }
    }
}

/// Resolves once shutdown is requested or the session handle is gone.
async fn stopped(stop_rx: &mut watch::Receiver<bool>) {
    loop {
        if *stop_rx.borrow_and_update() {
            return;
        }
        if stop_rx.changed().await.is_err() {
            return;
        }
    }
}

fn lock_slot(
    slot: &OutboundSlot,
) -> MutexGuard<'_, Option<mpsc::UnboundedSender<String>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
