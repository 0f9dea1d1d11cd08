use super::{
    events::ConnectivityStatus, feed::MessageFeed, identity::ParticipantIdentity,
    text_input_state::TextInputState,
};

/// Which compose control currently receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    Name,
    #[default]
    Message,
    SendButton,
}

impl ComposeField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Message => Self::SendButton,
            Self::SendButton => Self::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Name => Self::SendButton,
            Self::Message => Self::Name,
            Self::SendButton => Self::Message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    connectivity_status: ConnectivityStatus,
    focus: ComposeField,
    identity: ParticipantIdentity,
    message_input: TextInputState,
    feed: MessageFeed,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(ParticipantIdentity::default())
    }
}

impl ShellState {
    pub fn new(identity: ParticipantIdentity) -> Self {
        Self {
            running: true,
            connectivity_status: ConnectivityStatus::Connecting,
            focus: ComposeField::default(),
            identity,
            message_input: TextInputState::default(),
            feed: MessageFeed::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn connectivity_status(&self) -> ConnectivityStatus {
        self.connectivity_status
    }

    pub fn set_connectivity_status(&mut self, status: ConnectivityStatus) {
        self.connectivity_status = status;
    }

    pub fn focus(&self) -> ComposeField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn identity(&self) -> &ParticipantIdentity {
        &self.identity
    }

    pub fn message_input(&self) -> &TextInputState {
        &self.message_input
    }

    pub fn feed(&self) -> &MessageFeed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut MessageFeed {
        &mut self.feed
    }

    /// Text field under focus, if the focused control is editable.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInputState> {
        match self.focus {
            ComposeField::Name => Some(self.identity.input_mut()),
            ComposeField::Message => Some(&mut self.message_input),
            ComposeField::SendButton => None,
        }
    }

    /// Splits out the pieces the compose controller needs at once.
    pub fn compose_parts_mut(&mut self) -> (&mut ParticipantIdentity, &mut TextInputState) {
        (&mut self.identity, &mut self.message_input)
    }
}
