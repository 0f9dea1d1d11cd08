use std::{
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Merges relay-originated events with terminal input.
///
/// Pending inbound events are drained before the terminal is polled, so a
/// broadcast never waits behind the poll timeout.
pub struct TerminalEventSource {
    inbound: Receiver<AppEvent>,
    inbound_closed: bool,
}

impl TerminalEventSource {
    pub fn new(inbound: Receiver<AppEvent>) -> Self {
        Self {
            inbound,
            inbound_closed: false,
        }
    }

    fn next_inbound(&mut self) -> Option<AppEvent> {
        if self.inbound_closed {
            return None;
        }

        match self.inbound.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::debug!("inbound event channel closed");
                self.inbound_closed = true;
                None
            }
        }
    }
}

impl AppEventSource for TerminalEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if let Some(event) = self.next_inbound() {
            return Ok(Some(event));
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            Event::Resize(_, _) => Ok(Some(AppEvent::Tick)),
            _ => Ok(None),
        }
    }
}

/// Translates a terminal key press into a shell event.
fn map_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
        return Some(AppEvent::QuitRequested);
    }

    let name = match key.code {
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => "enter".to_owned(),
        KeyCode::Tab => "tab".to_owned(),
        KeyCode::BackTab => "backtab".to_owned(),
        KeyCode::Backspace => "backspace".to_owned(),
        KeyCode::Delete => "delete".to_owned(),
        KeyCode::Left => "left".to_owned(),
        KeyCode::Right => "right".to_owned(),
        KeyCode::Home => "home".to_owned(),
        KeyCode::End => "end".to_owned(),
        _ => return None,
    };

    Some(AppEvent::InputKey(KeyInput::new(name, ctrl)))
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::KeyEventState;

    use super::*;
    use crate::domain::{chat_message::ChatMessage, events::ConnectivityStatus};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn key(name: &str) -> Option<AppEvent> {
        Some(AppEvent::InputKey(KeyInput::new(name, false)))
    }

    #[test]
    fn esc_and_ctrl_c_request_quit() {
        assert_eq!(
            map_key(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(AppEvent::QuitRequested)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppEvent::QuitRequested)
        );
    }

    #[test]
    fn plain_q_is_typed_not_quit() {
        assert_eq!(map_key(press(KeyCode::Char('q'), KeyModifiers::NONE)), key("q"));
    }

    #[test]
    fn named_keys_map_to_lowercase_names() {
        assert_eq!(map_key(press(KeyCode::Enter, KeyModifiers::NONE)), key("enter"));
        assert_eq!(map_key(press(KeyCode::Tab, KeyModifiers::NONE)), key("tab"));
        assert_eq!(
            map_key(press(KeyCode::BackTab, KeyModifiers::SHIFT)),
            key("backtab")
        );
        assert_eq!(
            map_key(press(KeyCode::Backspace, KeyModifiers::NONE)),
            key("backspace")
        );
    }

    #[test]
    fn wide_characters_pass_through() {
        assert_eq!(map_key(press(KeyCode::Char('あ'), KeyModifiers::NONE)), key("あ"));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut event = press(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;

        assert_eq!(map_key(event), None);
    }

    #[test]
    fn inbound_events_are_drained_before_terminal_poll() {
        let (tx, rx) = mpsc::channel();
        let mut source = TerminalEventSource::new(rx);
        let received = AppEvent::MessageReceived(ChatMessage::new("Bob", "hi"));
        let status = AppEvent::ConnectivityChanged(ConnectivityStatus::Connected);
        tx.send(received.clone()).expect("send");
        tx.send(status.clone()).expect("send");

        assert_eq!(source.next_inbound(), Some(received));
        assert_eq!(source.next_inbound(), Some(status));
        assert_eq!(source.next_inbound(), None);
    }

    #[test]
    fn closed_inbound_channel_is_remembered() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        let mut source = TerminalEventSource::new(rx);
        drop(tx);

        assert_eq!(source.next_inbound(), None);
        assert!(source.inbound_closed);
    }

    #[test]
    fn mock_source_produces_quit_event() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let event = source.next_event().expect("must read mock event");

        assert_eq!(event, Some(AppEvent::QuitRequested));
    }
}
