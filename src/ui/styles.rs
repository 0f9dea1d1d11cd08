//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::events::ConnectivityStatus;

// =============================================================================
// Panel styles
// =============================================================================

/// Border of the control that currently has focus.
pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the notice line under the title.
pub fn attention_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

// =============================================================================
// Compose styles
// =============================================================================

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Placeholder shown in an empty field (dimmed).
pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn send_button_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

// =============================================================================
// Feed styles
// =============================================================================

/// Style for message sender name (white, bold).
pub fn message_sender_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the local receive time.
pub fn message_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

// =============================================================================
// Status bar
// =============================================================================

pub fn connectivity_style(status: ConnectivityStatus) -> Style {
    match status {
        ConnectivityStatus::Connected => Style::default().fg(Color::Green),
        ConnectivityStatus::Connecting => Style::default().fg(Color::Yellow),
        ConnectivityStatus::Disconnected => Style::default().fg(Color::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_sender_style_is_bold_white() {
        let style = message_sender_style();
        assert_eq!(style.fg, Some(Color::White));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn focused_send_button_is_highlighted() {
        assert_eq!(send_button_style(true).bg, Some(Color::Cyan));
        assert_eq!(send_button_style(false).bg, None);
    }

    #[test]
    fn connectivity_colors_follow_status() {
        assert_eq!(
            connectivity_style(ConnectivityStatus::Connected).fg,
            Some(Color::Green)
        );
        assert_eq!(
            connectivity_style(ConnectivityStatus::Disconnected).fg,
            Some(Color::Red)
        );
    }
}
