use std::{
    path::PathBuf,
    sync::{mpsc, Arc},
};

use crate::{
    domain::{
        events::{AppEvent, ConnectivityStatus},
        identity::ParticipantIdentity,
    },
    infra::{
        self,
        config::{AppConfig, FileConfigAdapter},
        contracts::ConfigAdapter,
        error::AppError,
        storage_layout::StorageLayout,
    },
    relay::{loopback::LoopbackRelay, session::SocketIoSession, RelayTransport},
    ui::TerminalEventSource,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        shell::DefaultShellOrchestrator,
    },
};

const RELAY_RUNTIME_THREAD: &str = "rtchat-relay";

/// Command-line inputs that shape a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapOptions {
    pub config_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub display_name: Option<String>,
    /// Use the in-process relay instead of connecting to the endpoint.
    pub loopback: bool,
}

pub struct ShellComposition {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

pub fn bootstrap(options: &BootstrapOptions) -> Result<AppContext, AppError> {
    let config_adapter = FileConfigAdapter::new(options.config_path.as_deref());
    let config = build_config(&config_adapter, options)?;

    let default_log_dir = match &config.logging.dir {
        Some(dir) => dir.clone(),
        None => StorageLayout::resolve()?.log_dir,
    };
    let log_guard = infra::logging::init(&config.logging, &default_log_dir)?;

    tracing::info!(
        endpoint = %config.relay.endpoint_url,
        loopback = options.loopback,
        "bootstrapping chat session"
    );

    let context = connect_relay(config, options.loopback)?;
    Ok(context.with_log_guard(log_guard))
}

/// Loads configuration and applies command-line overrides on top.
pub fn build_config(
    adapter: &dyn ConfigAdapter,
    options: &BootstrapOptions,
) -> Result<AppConfig, AppError> {
    let mut config = adapter.load()?;
    config.apply_overrides(options.endpoint.as_deref(), options.display_name.as_deref());
    Ok(config)
}

fn connect_relay(config: AppConfig, loopback: bool) -> Result<AppContext, AppError> {
    let (inbound_tx, inbound_rx) = mpsc::channel();

    if loopback {
        // No network round trip, so the relay is reachable from the start.
        let _ = inbound_tx.send(AppEvent::ConnectivityChanged(ConnectivityStatus::Connected));
        let relay: Arc<dyn RelayTransport> = Arc::new(LoopbackRelay::default());
        return Ok(AppContext::new(config, relay, (inbound_tx, inbound_rx)));
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name(RELAY_RUNTIME_THREAD)
        .enable_all()
        .build()
        .map_err(AppError::RuntimeBuild)?;

    let status_tx = inbound_tx.clone();
    let session = SocketIoSession::connect(runtime.handle(), &config.relay, move |status| {
        let _ = status_tx.send(AppEvent::ConnectivityChanged(status));
    })?;
    let relay: Arc<dyn RelayTransport> = Arc::new(session);

    Ok(AppContext::new(config, relay, (inbound_tx, inbound_rx)).with_runtime(runtime))
}

/// Wires the shell to the context's relay. The receive handler is registered
/// here, once per session; a second composition is refused.
pub fn compose_shell(context: &mut AppContext) -> Result<ShellComposition, AppError> {
    let inbound = context
        .take_inbound()
        .ok_or(AppError::ShellAlreadyComposed)?;

    let identity = ParticipantIdentity::new(&context.config.identity.display_name);
    let orchestrator = DefaultShellOrchestrator::new(
        Arc::clone(&context.relay),
        identity,
        context.inbound_tx.clone(),
    );

    Ok(ShellComposition {
        event_source: Box::new(TerminalEventSource::new(inbound)),
        orchestrator: Box::new(orchestrator),
    })
}
