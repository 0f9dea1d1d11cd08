//! Newest-first feed of received chat messages.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use super::chat_message::ChatMessage;

/// A received message and the local time it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub message: ChatMessage,
    pub received_at: DateTime<Local>,
}

/// Received messages in local receive order, newest first.
///
/// The feed grows without bound for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageFeed {
    entries: VecDeque<FeedEntry>,
}

impl MessageFeed {
    /// Prepends a message received just now.
    pub fn on_receive(&mut self, message: ChatMessage) {
        self.on_receive_at(message, Local::now());
    }

    pub fn on_receive_at(&mut self, message: ChatMessage, received_at: DateTime<Local>) {
        self.entries.push_front(FeedEntry {
            message,
            received_at,
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&FeedEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(feed: &MessageFeed) -> Vec<&str> {
        feed.entries()
            .map(|entry| entry.message.message.as_str())
            .collect()
    }

    #[test]
    fn new_feed_is_empty() {
        let feed = MessageFeed::default();

        assert!(feed.is_empty());
        assert!(feed.newest().is_none());
    }

    #[test]
    fn received_messages_are_prepended() {
        let mut feed = MessageFeed::default();
        for text in ["m1", "m2", "m3", "m4"] {
            feed.on_receive(ChatMessage::new("Bob", text));
        }

        assert_eq!(texts(&feed), vec!["m4", "m3", "m2", "m1"]);
        assert_eq!(feed.len(), 4);
    }

    #[test]
    fn identical_messages_are_kept_as_separate_entries() {
        let mut feed = MessageFeed::default();
        feed.on_receive(ChatMessage::new("Bob", "same"));
        feed.on_receive(ChatMessage::new("Bob", "same"));

        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn newest_returns_head_entry() {
        let mut feed = MessageFeed::default();
        feed.on_receive(ChatMessage::new("Alice", "first"));
        feed.on_receive(ChatMessage::new("Bob", "second"));

        let newest = feed.newest().expect("feed has entries");
        assert_eq!(newest.message, ChatMessage::new("Bob", "second"));
    }
}
