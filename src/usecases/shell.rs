use std::sync::mpsc::Sender;

use anyhow::Result;

use crate::{
    domain::{
        events::{AppEvent, KeyInput},
        identity::ParticipantIdentity,
        shell_state::{ComposeField, ShellState},
    },
    relay::RelayTransport,
};

use super::{
    contracts::ShellOrchestrator,
    receive_messages::ReceiveSubscription,
    send_message::{send_message, SendOutcome},
};

pub struct DefaultShellOrchestrator<T>
where
    T: RelayTransport,
{
    state: ShellState,
    relay: T,
    subscription: ReceiveSubscription,
}

impl<T> DefaultShellOrchestrator<T>
where
    T: RelayTransport,
{
    /// Builds the orchestrator and registers the receive handler with the
    /// relay. Broadcasts reach the shell as `AppEvent::MessageReceived`
    /// through `inbound`.
    pub fn new(relay: T, identity: ParticipantIdentity, inbound: Sender<AppEvent>) -> Self {
        let mut orchestrator = Self {
            state: ShellState::new(identity),
            relay,
            subscription: ReceiveSubscription::new(inbound),
        };
        orchestrator.ensure_subscribed();
        orchestrator
    }

    /// Idempotent; only the first call registers with the relay.
    pub fn ensure_subscribed(&mut self) -> bool {
        self.subscription.ensure_registered(&self.relay)
    }

    fn submit(&mut self) {
        let (identity, buffer) = self.state.compose_parts_mut();
        if let SendOutcome::Published(message) = send_message(&self.relay, identity, buffer) {
            tracing::debug!(name = %message.name, "message published");
        }
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "tab" => self.state.focus_next(),
            "backtab" => self.state.focus_previous(),
            "enter" => {
                // Enter in the name field must not publish.
                if self.state.focus() != ComposeField::Name {
                    self.submit();
                }
            }
            " " if self.state.focus() == ComposeField::SendButton => self.submit(),
            other => self.edit_focused(other),
        }
    }

    fn edit_focused(&mut self, key: &str) {
        let Some(input) = self.state.focused_input_mut() else {
            return;
        };

        match key {
            "backspace" => input.delete_char_before(),
            "delete" => input.delete_char_at(),
            "left" => input.move_cursor_left(),
            "right" => input.move_cursor_right(),
            "home" => input.move_cursor_home(),
            "end" => input.move_cursor_end(),
            _ => {
                let mut chars = key.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    input.insert_char(ch);
                }
            }
        }
    }
}

impl<T> ShellOrchestrator for DefaultShellOrchestrator<T>
where
    T: RelayTransport,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::MessageReceived(message) => self.state.feed_mut().on_receive(message),
            AppEvent::ConnectivityChanged(status) => {
                self.state.set_connectivity_status(status);
            }
        }

        Ok(())
    }

    fn is_receiving(&self) -> bool {
        self.subscription.is_registered()
    }
}
