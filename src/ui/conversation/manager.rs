use crate::config::Config;
use crate::session::ChatSession;
use crate::ui::conversation::composer::ConversationResult;
use crate::ui::conversation::{get_help_text, ConversationComposer, ConversationHistory, SlashCommand, TypingIndicator};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Lines moved per PageUp/PageDown
const SCROLL_STEP: usize = 5;

pub const DISCLAIMER: &str = "Research Chatbot can make mistakes. Check important info.";

/// Actions that can be requested by the conversation manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationAction {
    None,
    NewChat,
    OpenUpload { path: Option<String> },
    Exit,
}

/// Owns the chat panel UI state and routes composer input into the session
pub struct ConversationManager {
    composer: ConversationComposer,
    scroll_back: usize,
}

impl ConversationManager {
    pub fn new(config: &Config) -> Self {
        Self {
            composer: ConversationComposer::new(format!("Message {}...", config.assistant_name)),
            scroll_back: 0,
        }
    }

    /// Set focus state
    pub fn set_focus(&mut self, has_focus: bool) {
        self.composer.set_focus(has_focus);
    }

    /// Whether Tab and Esc belong to the composer right now
    pub fn captures_navigation(&self) -> bool {
        self.composer.is_palette_open()
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent, session: &mut ChatSession, config: &Config) -> ConversationAction {
        if key.kind != KeyEventKind::Press {
            return ConversationAction::None;
        }

        match key.code {
            KeyCode::PageUp => {
                self.scroll_back = self.scroll_back.saturating_add(SCROLL_STEP);
                return ConversationAction::None;
            }
            KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(SCROLL_STEP);
                return ConversationAction::None;
            }
            _ => {}
        }

        match self.composer.handle_key(key) {
            ConversationResult::Submitted(input) => {
                if session.send_message(&input).is_some() {
                    self.scroll_back = 0;
                }
                ConversationAction::None
            }
            ConversationResult::Command(command) => {
                tracing::debug!(command = command.command.command(), "slash command");
                match command.command {
                    SlashCommand::New => ConversationAction::NewChat,
                    SlashCommand::Upload => ConversationAction::OpenUpload { path: command.argument },
                    SlashCommand::Settings => {
                        session.system_notice(config.describe());
                        self.scroll_back = 0;
                        ConversationAction::None
                    }
                    SlashCommand::Help => {
                        session.system_notice(get_help_text());
                        self.scroll_back = 0;
                        ConversationAction::None
                    }
                    SlashCommand::Bye => ConversationAction::Exit,
                }
            }
            ConversationResult::None => ConversationAction::None,
        }
    }

    /// Forget scroll position and draft, used when a new chat starts
    pub fn reset(&mut self) {
        self.composer.clear();
        self.scroll_back = 0;
    }

    /// Render the chat panel: header, history, typing line, composer, disclaimer
    pub fn render(&self, area: Rect, buf: &mut Buffer, session: &ChatSession, config: &Config) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(3),    // History
                Constraint::Length(1), // Typing indicator
                Constraint::Length(3), // Composer
                Constraint::Length(1), // Disclaimer
            ])
            .split(area);

        let header = vec![
            Line::from(vec![
                Span::styled(config.assistant_name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled("  ⋯", Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(Span::styled("AI Assistant", Style::default().fg(Color::DarkGray))),
        ];
        Paragraph::new(header).render(chunks[0], buf);

        ConversationHistory::new(session.messages(), &config.assistant_name)
            .show_timestamps(config.ui.show_timestamps)
            .scroll_back(self.scroll_back)
            .render(chunks[1], buf);

        if session.is_awaiting_reply() {
            TypingIndicator::new(&config.assistant_name).render(chunks[2], buf);
        }

        self.composer.render(chunks[3], buf);

        Paragraph::new(Span::styled(DISCLAIMER, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}
