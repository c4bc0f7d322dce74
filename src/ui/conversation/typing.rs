use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// "<name> is typing..." line shown while a reply is pending
pub struct TypingIndicator<'a> {
    name: &'a str,
    frame: u128,
}

impl<'a> TypingIndicator<'a> {
    pub fn new(name: &'a str) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self::with_frame(name, millis / 300)
    }

    /// Fixed animation frame
    pub fn with_frame(name: &'a str, frame: u128) -> Self {
        Self { name, frame }
    }

    fn dots(&self) -> &'static str {
        match self.frame % 4 {
            0 => ".  ",
            1 => ".. ",
            2 => "...",
            _ => "   ",
        }
    }
}

impl Widget for TypingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let indicator = Line::from(vec![
            Span::styled(" AI ", Style::default().fg(Color::White).bg(Color::Green)),
            Span::styled(format!(" {} is typing", self.name), Style::default().fg(Color::Green)),
            Span::styled(self.dots(), Style::default().fg(Color::Yellow)),
        ]);
        buf.set_line(area.x, area.y, &indicator, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_name_and_dots() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        TypingIndicator::with_frame("Research Chatbot", 2).render(area, &mut buf);

        let text: String = (0..area.width).map(|x| buf.get(x, 0).symbol().to_string()).collect();
        assert!(text.starts_with(" AI  Research Chatbot is typing..."));
    }
}
