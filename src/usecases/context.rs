use std::{
    sync::{
        mpsc::{Receiver, Sender},
        Arc,
    },
    time::Duration,
};

use tokio::runtime::Runtime;
use tracing_appender::non_blocking::WorkerGuard;

use crate::{domain::events::AppEvent, infra::config::AppConfig, relay::RelayTransport};

const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(500);

/// Everything one chat session owns: configuration, the relay transport and
/// the channel through which relay callbacks reach the shell.
pub struct AppContext {
    pub config: AppConfig,
    pub relay: Arc<dyn RelayTransport>,
    pub inbound_tx: Sender<AppEvent>,
    inbound_rx: Option<Receiver<AppEvent>>,
    runtime: Option<Runtime>,
    _log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        relay: Arc<dyn RelayTransport>,
        inbound: (Sender<AppEvent>, Receiver<AppEvent>),
    ) -> Self {
        let (inbound_tx, inbound_rx) = inbound;
        Self {
            config,
            relay,
            inbound_tx,
            inbound_rx: Some(inbound_rx),
            runtime: None,
            _log_guard: None,
        }
    }

    pub fn with_runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn with_log_guard(mut self, guard: WorkerGuard) -> Self {
        self._log_guard = Some(guard);
        self
    }

    /// Hands the inbound receiver to the shell. Only the first call gets it.
    pub fn take_inbound(&mut self) -> Option<Receiver<AppEvent>> {
        self.inbound_rx.take()
    }

    /// Stops the relay session and the runtime driving it. Idempotent.
    pub fn shutdown(&mut self) {
        self.relay.shutdown();

        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
            tracing::debug!("relay runtime stopped");
        }
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
