use super::chat_message::ChatMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    MessageReceived(ChatMessage),
    ConnectivityChanged(ConnectivityStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectivityStatus {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_labels_are_lowercase_words() {
        assert_eq!(ConnectivityStatus::Connecting.as_label(), "connecting");
        assert_eq!(ConnectivityStatus::Connected.as_label(), "connected");
        assert_eq!(ConnectivityStatus::Disconnected.as_label(), "disconnected");
    }
}
