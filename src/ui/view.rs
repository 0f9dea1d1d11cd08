use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::domain::{
    feed::FeedEntry,
    shell_state::{ComposeField, ShellState},
};

use super::{
    input_field::{render_send_button, render_text_field},
    styles,
};

const APP_TITLE: &str = "チャットアプリ";
const ATTENTION_TEXT: &str = "※個人情報や秘密情報を絶対に投稿しないでください。";
const AUTHOR_LABEL: &str = "投稿者：";
const NAME_PLACEHOLDER: &str = "名前を入力してね";
const MESSAGE_PLACEHOLDER: &str = "チャットを入力してね";
const NAME_FIELD_WIDTH: u16 = 20;
const SEND_BUTTON_WIDTH: u16 = 10;

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    let [header_area, compose_area, feed_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    frame.render_widget(Paragraph::new(header_lines()), header_area);
    render_compose_row(frame, compose_area, state);
    render_feed(frame, feed_area, state);
    frame.render_widget(Paragraph::new(status_line(state)), status_area);
}

fn header_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(APP_TITLE, styles::title_style())),
        Line::from(Span::styled(ATTENTION_TEXT, styles::attention_style())),
    ]
}

fn render_compose_row(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let [name_area, message_area, button_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(NAME_FIELD_WIDTH),
            Constraint::Min(1),
            Constraint::Length(SEND_BUTTON_WIDTH),
        ])
        .areas(area);

    let focus = state.focus();
    render_text_field(
        frame,
        name_area,
        "Name",
        NAME_PLACEHOLDER,
        state.identity().input(),
        focus == ComposeField::Name,
    );
    render_text_field(
        frame,
        message_area,
        "Message",
        MESSAGE_PLACEHOLDER,
        state.message_input(),
        focus == ComposeField::Message,
    );
    render_send_button(frame, button_area, focus == ComposeField::SendButton);
}

fn render_feed(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let feed = state.feed();
    let items: Vec<ListItem<'static>> = feed.entries().map(feed_item).collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!("Messages ({})", feed.len()))
            .borders(Borders::ALL)
            .border_style(styles::inactive_panel_border_style()),
    );
    frame.render_widget(list, area);
}

fn feed_item(entry: &FeedEntry) -> ListItem<'static> {
    ListItem::new(feed_item_lines(entry))
}

fn feed_item_lines(entry: &FeedEntry) -> Vec<Line<'static>> {
    let time = entry.received_at.format("%H:%M:%S").to_string();
    let indent = " ".repeat(time.len() + 1);

    // Relay text may span several lines; continuation lines align under the first.
    let mut text_lines = entry.message.message.lines();
    let first = text_lines.next().unwrap_or_default().to_owned();
    let mut lines = vec![Line::from(vec![
        Span::styled(time, styles::message_time_style()),
        Span::raw(" "),
        Span::styled(first, styles::message_text_style()),
    ])];
    lines.extend(text_lines.map(|text| {
        Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(text.to_owned(), styles::message_text_style()),
        ])
    }));
    lines.push(Line::from(vec![
        Span::raw(indent),
        Span::styled(
            format!("{AUTHOR_LABEL}{}", entry.message.name),
            styles::message_sender_style(),
        ),
    ]));
    lines
}

fn status_line(state: &ShellState) -> Line<'static> {
    let status = state.connectivity_status();
    let hint = match state.focus() {
        ComposeField::Name => "Tab: next | type your name",
        ComposeField::Message => "Enter: send | Tab: next",
        ComposeField::SendButton => "Enter/Space: send | Tab: next",
    };

    Line::from(vec![
        Span::raw("connectivity: "),
        Span::styled(status.as_label(), styles::connectivity_style(status)),
        Span::raw(format!(" | {hint} | Esc: quit")),
    ])
}
