use anyhow::Result;

use crate::{
    domain::shell_state::ShellState,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
    },
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        endpoint = %context.config.relay.endpoint_url,
        receiving = orchestrator.is_receiving(),
        "starting chat shell"
    );

    let mut terminal = TerminalSession::new()?;
    run_loop(event_source, orchestrator, |state| {
        terminal.draw(|frame| view::render(frame, state))
    })?;

    tracing::info!(
        messages = orchestrator.state().feed().len(),
        "chat shell stopped"
    );
    Ok(())
}

/// Draw, wait for one event, apply it; until the shell stops.
fn run_loop<D>(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
    mut draw: D,
) -> Result<()>
where
    D: FnMut(&ShellState) -> Result<()>,
{
    while orchestrator.state().is_running() {
        draw(orchestrator.state())?;

        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event)?;
        }
    }

    Ok(())
}
