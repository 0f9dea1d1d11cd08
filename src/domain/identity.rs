//! Display-name resolution for outgoing messages.

use super::text_input_state::TextInputState;

/// Name attached to messages when the participant left the name field empty.
pub const FALLBACK_DISPLAY_NAME: &str = "ななしさん";

/// Outcome of resolving a candidate display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub fell_back: bool,
}

/// Returns the candidate when it is non-empty, the fallback label otherwise.
///
/// Only the empty string falls back; a whitespace-only name is kept as typed.
pub fn resolve(candidate: &str) -> ResolvedName {
    if candidate.is_empty() {
        ResolvedName {
            name: FALLBACK_DISPLAY_NAME.to_owned(),
            fell_back: true,
        }
    } else {
        ResolvedName {
            name: candidate.to_owned(),
            fell_back: false,
        }
    }
}

/// The participant's editable display name for one client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantIdentity {
    name: TextInputState,
}

impl Default for ParticipantIdentity {
    fn default() -> Self {
        Self::new(FALLBACK_DISPLAY_NAME)
    }
}

impl ParticipantIdentity {
    pub fn new(initial_name: &str) -> Self {
        Self {
            name: TextInputState::with_text(initial_name),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.text()
    }

    pub fn input(&self) -> &TextInputState {
        &self.name
    }

    pub fn input_mut(&mut self) -> &mut TextInputState {
        &mut self.name
    }

    /// Resolves the name for an outgoing message.
    ///
    /// When the field is empty it is reset to the fallback label, so later
    /// messages keep using it until the participant types a new name.
    pub fn resolve(&mut self) -> String {
        let resolved = resolve(self.name.text());
        if resolved.fell_back {
            tracing::debug!(
                fallback = FALLBACK_DISPLAY_NAME,
                "empty display name replaced with fallback"
            );
            self.name.set_text(&resolved.name);
        }
        resolved.name
    }
}
