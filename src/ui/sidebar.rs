use crate::mock_data::{CompanyStatus, COMPANIES, PDF_FILES};
use crate::session::ChatSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

pub const SEARCH_PLACEHOLDER: &str = "Search conversations...";
pub const NO_RESULTS: &str = "No conversations found";

/// Width of the "🔍 " prefix in the search box
const SEARCH_PREFIX_WIDTH: u16 = 3;

/// Scroll position of the sidebar sections
///
/// The offset is clamped against the content and viewport seen on the last
/// render, so it stays valid when the conversation list shrinks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SidebarState {
    offset: usize,
    viewport: usize,
}

impl SidebarState {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize, content_len: usize) {
        self.offset = (self.offset + lines).min(max_offset(content_len, self.viewport));
    }

    /// Lines moved by PageUp/PageDown
    pub fn page(&self) -> usize {
        self.viewport.saturating_sub(1).max(1)
    }

    fn clamp(&mut self, content_len: usize, viewport: usize) {
        self.viewport = viewport;
        self.offset = self.offset.min(max_offset(content_len, viewport));
    }
}

fn max_offset(content_len: usize, viewport: usize) -> usize {
    content_len.saturating_sub(viewport)
}

/// Left panel: new-chat hint, conversation search, documents and companies
pub struct Sidebar<'a> {
    session: &'a ChatSession,
    search_focused: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(session: &'a ChatSession, search_focused: bool) -> Self {
        Self {
            session,
            search_focused,
        }
    }

    /// Lines of the scrollable middle section
    pub fn content_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![section_label("Recent Conversations")];

        let conversations = self.session.filtered_conversations();
        if conversations.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", NO_RESULTS),
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            for title in conversations {
                lines.push(Line::from(vec![
                    Span::styled(" 💬 ", Style::default().fg(Color::Gray)),
                    Span::raw(title),
                ]));
            }
        }

        lines.push(Line::default());
        lines.push(section_label("PDF Documents"));
        for file in PDF_FILES.iter() {
            lines.push(Line::from(vec![
                Span::styled(" 📄 ", Style::default().fg(Color::Red)),
                Span::raw(file.name),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", file.detail()),
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::default());
        lines.push(section_label("Companies"));
        for company in COMPANIES.iter() {
            lines.push(Line::from(vec![
                Span::styled(" 🏢 ", Style::default().fg(Color::Blue)),
                Span::raw(company.name),
            ]));
            lines.push(Line::from(vec![
                Span::styled(format!("    {} • ", company.industry), Style::default().fg(Color::DarkGray)),
                Span::styled(company.status.to_string(), status_style(company.status)),
            ]));
        }

        lines
    }
}

fn status_style(status: CompanyStatus) -> Style {
    match status {
        CompanyStatus::Active => Style::default().fg(Color::Green),
        CompanyStatus::Inactive => Style::default().fg(Color::DarkGray),
    }
}

fn section_label(label: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", label.to_uppercase()),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    ))
}

impl StatefulWidget for Sidebar<'_> {
    type State = SidebarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut SidebarState) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // New chat
                Constraint::Length(3), // Search box
                Constraint::Min(1),    // Sections
                Constraint::Length(2), // Settings footer
            ])
            .split(inner);

        Paragraph::new(Line::from(vec![
            Span::styled(" ＋ New Chat ", Style::default().fg(Color::Black).bg(Color::White)),
            Span::styled("  Ctrl+N", Style::default().fg(Color::DarkGray)),
        ]))
        .render(chunks[0], buf);

        let query = self.session.query_input();
        let search_line = if query.is_empty() {
            let cursor = if self.search_focused { crate::input::CURSOR.to_string() } else { String::new() };
            Line::from(vec![
                Span::raw("🔍 "),
                Span::raw(cursor),
                Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ])
        } else {
            let width = chunks[1].width.saturating_sub(2 + SEARCH_PREFIX_WIDTH) as usize;
            let shown = query.visible_lines(width, 1, self.search_focused).concat();
            Line::from(vec![Span::raw("🔍 "), Span::raw(shown)])
        };
        Paragraph::new(search_line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if self.search_focused {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(Color::Gray)
                    }),
            )
            .render(chunks[1], buf);

        let lines = self.content_lines();
        let content_len = lines.len();
        let viewport = chunks[2].height as usize;
        state.clamp(content_len, viewport);

        Paragraph::new(lines)
            .scroll((state.offset as u16, 0))
            .render(chunks[2], buf);

        let max = max_offset(content_len, viewport);
        if max > 0 {
            let mut scrollbar = ScrollbarState::new(max).position(state.offset);
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .render(chunks[2], buf, &mut scrollbar);
        }

        Paragraph::new(Line::from(Span::raw(" ⚙ Settings  /settings")))
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)))
            .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tokio::sync::mpsc;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn render_rows(session: &ChatSession, state: &mut SidebarState, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, 38, height);
        let mut buf = Buffer::empty(area);
        Sidebar::new(session, true).render(area, &mut buf, state);
        (0..height)
            .map(|y| (0..area.width).map(|x| buf.get(x, y).symbol().to_string()).collect())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn lists_every_section_for_an_empty_query() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = ChatSession::new(&Config::default(), tx);
        let text: Vec<String> = Sidebar::new(&session, false).content_lines().iter().map(line_text).collect();

        assert!(text.iter().any(|l| l.contains("RECENT CONVERSATIONS")));
        assert!(text.iter().any(|l| l.contains("Telemedicine implementation best practices")));
        assert!(text.iter().any(|l| l.contains("2.3 MB • 2 days ago")));
        assert!(text.iter().any(|l| l.contains("Spotify AB")));
        assert!(text.iter().any(|l| l.contains("Music Streaming")));
    }

    #[tokio::test(start_paused = true)]
    async fn shows_empty_state_when_nothing_matches() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut session = ChatSession::new(&Config::default(), tx);
        session.set_query("xyzxyz");
        let text: Vec<String> = Sidebar::new(&session, true).content_lines().iter().map(line_text).collect();

        assert!(text.iter().any(|l| l.contains(NO_RESULTS)));
        assert!(!text.iter().any(|l| l.contains("Clinical trial")));
        // documents and companies are never filtered
        assert!(text.iter().any(|l| l.contains("Annual_Report_2024.pdf")));
    }

    #[tokio::test(start_paused = true)]
    async fn renders_search_placeholder() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = ChatSession::new(&Config::default(), tx);
        let rows = render_rows(&session, &mut SidebarState::default(), 30);
        assert!(rows[2].contains("Search"));
    }

    #[tokio::test(start_paused = true)]
    async fn scrolling_reaches_the_last_company() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = ChatSession::new(&Config::default(), tx);
        let content_len = Sidebar::new(&session, true).content_lines().len();
        let mut state = SidebarState::default();

        let rows = render_rows(&session, &mut state, 24);
        assert!(!rows.iter().any(|r| r.contains("Spotify AB")));

        state.scroll_down(state.page(), content_len);
        state.scroll_down(state.page(), content_len);
        state.scroll_down(state.page(), content_len);
        let rows = render_rows(&session, &mut state, 24);
        assert!(rows.iter().any(|r| r.contains("COMPANIES")));
        assert!(rows.iter().any(|r| r.contains("Spotify AB")));
        assert!(rows.iter().any(|r| r.contains("Music Streaming • active")));

        // 24 rows leave 18 for the sections
        assert_eq!(state.offset(), content_len - 18);
        state.scroll_up(100);
        assert_eq!(state.offset(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn offset_is_clamped_when_the_list_shrinks() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut session = ChatSession::new(&Config::default(), tx);
        let full_len = Sidebar::new(&session, true).content_lines().len();
        let mut state = SidebarState::default();
        render_rows(&session, &mut state, 24);
        state.scroll_down(full_len, full_len);
        assert_eq!(state.offset(), full_len - 18);

        session.set_query("xyzxyz");
        let short_len = Sidebar::new(&session, true).content_lines().len();
        let rows = render_rows(&session, &mut state, 24);
        assert_eq!(state.offset(), short_len - 18);
        assert!(rows.iter().any(|r| r.contains("Spotify AB")));
    }

    #[tokio::test(start_paused = true)]
    async fn long_query_keeps_its_tail_and_cursor_visible() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut session = ChatSession::new(&Config::default(), tx);
        session.set_query("pharmaceutical regulatory compliance review");

        let rows = render_rows(&session, &mut SidebarState::default(), 30);
        assert!(rows[2].contains("compliance review▌"), "row {:?}", rows[2]);
    }
}
