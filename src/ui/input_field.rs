//! Compose row widgets: the two text fields and the send button.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::domain::text_input_state::TextInputState;

use super::styles;

pub const SEND_BUTTON_LABEL: &str = "送信";

/// Renders a bordered single-line text field. The terminal cursor is placed
/// in the field when it has focus.
pub fn render_text_field(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    placeholder: &str,
    input_state: &TextInputState,
    is_focused: bool,
) {
    let border_style = if is_focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let inner_width = usize::from(area.width.saturating_sub(2));
    let (visible, cursor_column) = visible_window(
        input_state.text(),
        input_state.cursor_display_offset(),
        inner_width,
    );

    let line = if input_state.is_empty() && !is_focused {
        Line::from(Span::styled(
            placeholder.to_owned(),
            styles::input_placeholder_style(),
        ))
    } else {
        Line::from(Span::styled(visible, styles::input_text_style()))
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);

    if is_focused {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(cursor_column.min(usize::from(u16::MAX)) as u16);
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

pub fn render_send_button(frame: &mut Frame<'_>, area: Rect, is_focused: bool) {
    let border_style = if is_focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let button = Paragraph::new(Line::from(Span::styled(
        SEND_BUTTON_LABEL,
        styles::send_button_style(is_focused),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(button, area);
}

/// Picks the slice of `text` that fits in `width` columns while keeping the
/// cursor visible. Returns the slice and the cursor column inside it.
fn visible_window(text: &str, cursor_offset: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }

    // Keep one spare column so the cursor can sit after the last character.
    let scroll = (cursor_offset + 1).saturating_sub(width);

    let mut column = 0;
    let mut origin = None;
    let mut visible = String::new();
    for ch in text.chars() {
        let start = column;
        column += ch.width().unwrap_or(0);

        // A wide character straddling the scroll edge is skipped whole.
        if start < scroll {
            continue;
        }
        let left = *origin.get_or_insert(start);
        if column > left + width {
            break;
        }
        visible.push(ch);
    }

    let left = origin.unwrap_or(cursor_offset).min(cursor_offset);
    (visible, cursor_offset - left)
}
