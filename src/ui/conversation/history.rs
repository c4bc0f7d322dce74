//! Conversation history display component

use crate::events::{ChatMessage, MessageRole};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};
use std::collections::VecDeque;

/// Columns user messages are pushed right by
const USER_INDENT: usize = 8;

/// Message list of the chat panel, pinned to the bottom unless scrolled back
pub struct ConversationHistory<'a> {
    messages: &'a VecDeque<ChatMessage>,
    assistant_name: &'a str,
    show_timestamps: bool,
    /// Lines scrolled back from the newest message
    scroll_back: usize,
}

impl<'a> ConversationHistory<'a> {
    pub fn new(messages: &'a VecDeque<ChatMessage>, assistant_name: &'a str) -> Self {
        Self {
            messages,
            assistant_name,
            show_timestamps: true,
            scroll_back: 0,
        }
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    pub fn scroll_back(mut self, lines: usize) -> Self {
        self.scroll_back = lines;
        self
    }

    /// All lines of the history at the given content width
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut all_lines = Vec::new();
        for message in self.messages {
            all_lines.extend(self.render_message(message, width));
            all_lines.push(Line::default());
        }
        all_lines
    }

    /// Render a single message into lines
    fn render_message(&self, message: &ChatMessage, width: u16) -> Vec<Line<'static>> {
        let indent = match message.role {
            MessageRole::User => USER_INDENT.min(width as usize / 4),
            _ => 0,
        };
        let pad = " ".repeat(indent);

        let author = match message.role {
            MessageRole::User => "You".to_string(),
            MessageRole::Assistant => self.assistant_name.to_string(),
            MessageRole::System => "Notice".to_string(),
        };

        let mut header = vec![
            Span::raw(pad.clone()),
            Span::styled(
                format!(" {} ", message.role.avatar()),
                avatar_style(message.role),
            ),
            Span::styled(format!(" {}", author), Style::default().add_modifier(Modifier::BOLD)),
        ];
        if self.show_timestamps {
            header.push(Span::styled(
                format!("  {}", message.timestamp.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let mut lines = vec![Line::from(header)];

        let content_width = (width as usize).saturating_sub(indent + 2);
        for content_line in wrap_text(&message.content, content_width) {
            lines.push(Line::from(vec![
                Span::raw(format!("{}  ", pad)),
                Span::styled(content_line, content_style(message.role)),
            ]));
        }

        if message.role == MessageRole::Assistant {
            lines.push(Line::from(Span::styled(
                "  👍 👎 ⧉ ↻",
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines
    }
}

impl Widget for ConversationHistory<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::TOP);
        let inner_area = block.inner(area);
        block.render(area, buf);

        if inner_area.width < 2 || inner_area.height == 0 {
            return;
        }

        let content_width = inner_area.width - 1;
        let all_lines = self.lines(content_width);

        // Determine the range of lines to display from the bottom
        let height = inner_area.height as usize;
        let total = all_lines.len();
        let max_back = total.saturating_sub(height);
        let back = self.scroll_back.min(max_back);
        let end = total - back;
        let start = end.saturating_sub(height);

        for (i, line) in all_lines[start..end].iter().enumerate() {
            buf.set_line(inner_area.x, inner_area.y + i as u16, line, content_width);
        }

        if total > height {
            let mut state = ScrollbarState::new(max_back).position(max_back - back);
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .render(inner_area, buf, &mut state);
        }
    }
}

fn avatar_style(role: MessageRole) -> Style {
    match role {
        MessageRole::User => Style::default().fg(Color::White).bg(Color::Blue),
        MessageRole::Assistant => Style::default().fg(Color::White).bg(Color::Green),
        MessageRole::System => Style::default().fg(Color::Black).bg(Color::Yellow),
    }
}

/// Get content style based on role
fn content_style(role: MessageRole) -> Style {
    match role {
        MessageRole::User => Style::default().fg(Color::Cyan),
        MessageRole::Assistant => Style::default(),
        MessageRole::System => Style::default().fg(Color::Yellow),
    }
}

/// Wrap text to fit within the given width, keeping explicit line breaks
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + word_len + 1 > width {
                lines.push(std::mem::take(&mut current_line));
                current_len = 0;
            }
            if current_len > 0 {
                current_line.push(' ');
                current_len += 1;
            }
            current_line.push_str(word);
            current_len += word_len;
        }

        lines.push(current_line);
    }

    lines
}
