use crate::input::TextInput;
use crate::session::ChatSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Modal asking for a document path. Confirming only logs the request.
pub struct UploadDialog<'a> {
    input: &'a TextInput,
}

impl<'a> UploadDialog<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self { input }
    }
}

/// Rect of `width` x `height` centered in `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl Widget for UploadDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(60, 10, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Upload Documents ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Hint
                Constraint::Length(3), // Path field
                Constraint::Min(1),    // Buttons
            ])
            .split(inner);

        Paragraph::new("Path to a PDF document. Nothing is uploaded anywhere.")
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        let field_width = chunks[1].width.saturating_sub(2) as usize;
        Paragraph::new(self.input.visible_lines(field_width, 1, true).concat())
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Green)))
            .render(chunks[1], buf);

        let upload_style = if ChatSession::can_send(self.input.as_str()) {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Paragraph::new(Line::from(vec![
            Span::styled(" Enter: Upload ", upload_style),
            Span::raw("  "),
            Span::styled(" Esc: Cancel ", Style::default().fg(Color::Gray)),
        ]))
        .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_small_areas() {
        let area = Rect::new(0, 0, 40, 8);
        assert_eq!(centered_rect(60, 10, area), Rect::new(0, 0, 40, 8));
        assert_eq!(centered_rect(20, 4, Rect::new(0, 0, 40, 8)), Rect::new(10, 2, 20, 4));
    }

    #[test]
    fn renders_title_and_typed_path() {
        let mut input = TextInput::new();
        input.set("reports/Q3.pdf");

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        UploadDialog::new(&input).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf.get(x, y).symbol().to_string())
            .collect();
        assert!(text.contains("Upload Documents"));
        assert!(text.contains("reports/Q3.pdf"));
    }

    #[test]
    fn long_path_keeps_file_name_in_view() {
        let mut input = TextInput::new();
        input.set("/home/analyst/research/2024/quarterly/filings/annual/Annual_Report_2024.pdf");

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        UploadDialog::new(&input).render(area, &mut buf);

        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf.get(x, y).symbol().to_string()).collect())
            .collect();
        assert!(rows.iter().any(|r| r.contains("Annual_Report_2024.pdf▌")));
    }
}
