use crate::input::TextInput;
use crate::session::ChatSession;
use crate::ui::conversation::commands::{command_entries, parse_slash_command, CommandEntry, ParsedCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Clear, Widget},
};

/// Result returned when the user interacts with the conversation composer
#[derive(Debug, PartialEq)]
pub enum ConversationResult {
    Submitted(String),
    Command(ParsedCommand),
    None,
}

/// Message composer with a slash-command palette
pub struct ConversationComposer {
    input: TextInput,
    placeholder: String,
    has_focus: bool,
    command_entries: Vec<CommandEntry>,
    filtered_commands: Vec<CommandEntry>,
    show_command_palette: bool,
    selected_command: Option<usize>,
}

impl ConversationComposer {
    pub fn new(placeholder: String) -> Self {
        Self {
            input: TextInput::new(),
            placeholder,
            has_focus: false,
            command_entries: command_entries(),
            filtered_commands: Vec::new(),
            show_command_palette: false,
            selected_command: None,
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> ConversationResult {
        if key.kind != KeyEventKind::Press {
            return ConversationResult::None;
        }

        match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.input.insert_char('\n');
            }
            KeyCode::Enter => {
                if self.show_command_palette && self.apply_selected_command() {
                    return ConversationResult::None;
                }
                // send is disabled for blank input
                if !ChatSession::can_send(self.input.as_str()) {
                    return ConversationResult::None;
                }
                let content = self.input.take();
                self.close_command_palette();
                return match parse_slash_command(&content) {
                    Some(command) => ConversationResult::Command(command),
                    None => ConversationResult::Submitted(content),
                };
            }
            KeyCode::Up if self.show_command_palette => self.move_command_selection(-1),
            KeyCode::Down if self.show_command_palette => self.move_command_selection(1),
            KeyCode::Tab if self.show_command_palette => {
                self.apply_selected_command();
            }
            KeyCode::Esc if self.show_command_palette => self.close_command_palette(),
            _ => {
                if self.input.handle_key(key) {
                    self.sync_command_palette();
                }
            }
        }

        ConversationResult::None
    }

    /// Palette is shown while the input is a bare "/keyword" prefix
    fn sync_command_palette(&mut self) {
        let content = self.input.as_str();
        let is_prefix = content.starts_with('/') && !content.contains(char::is_whitespace);
        if is_prefix {
            if !self.show_command_palette {
                self.show_command_palette = true;
                self.selected_command = Some(0);
            }
            self.refresh_command_palette();
        } else {
            self.close_command_palette();
        }
    }

    fn close_command_palette(&mut self) {
        self.show_command_palette = false;
        self.filtered_commands.clear();
        self.selected_command = None;
    }

    fn refresh_command_palette(&mut self) {
        let query = self.input.as_str().trim_start_matches('/').to_lowercase();
        self.filtered_commands = self
            .command_entries
            .iter()
            .filter(|entry| query.is_empty() || entry.keyword.starts_with(&query))
            .copied()
            .collect();

        self.selected_command = if self.filtered_commands.is_empty() {
            None
        } else {
            let index = self.selected_command.unwrap_or(0);
            Some(index.min(self.filtered_commands.len() - 1))
        };
    }

    fn move_command_selection(&mut self, delta: isize) {
        if self.filtered_commands.is_empty() {
            self.selected_command = None;
            return;
        }

        let len = self.filtered_commands.len() as isize;
        let current = self.selected_command.unwrap_or(0) as isize;
        self.selected_command = Some((current + delta).rem_euclid(len) as usize);
    }

    fn apply_selected_command(&mut self) -> bool {
        let Some(entry) = self
            .selected_command
            .and_then(|index| self.filtered_commands.get(index))
            .copied()
        else {
            return false;
        };

        self.input.set(format!("/{}", entry.keyword));
        self.close_command_palette();
        true
    }

    /// Set focus state
    pub fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
        if !has_focus {
            self.close_command_palette();
        }
    }

    #[cfg(test)]
    pub fn content(&self) -> &str {
        self.input.as_str()
    }

    pub fn is_palette_open(&self) -> bool {
        self.show_command_palette
    }

    #[cfg(test)]
    pub fn palette_entries(&self) -> &[CommandEntry] {
        &self.filtered_commands
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.close_command_palette();
    }
}

impl Widget for &ConversationComposer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let send_style = if ChatSession::can_send(self.input.as_str()) {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Message ")
            .title(
                Title::from(Line::from(Span::styled(" ⏎ Send ", send_style)))
                    .alignment(Alignment::Right),
            )
            .border_style(if self.has_focus {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            });

        let inner_area = block.inner(area);
        block.render(area, buf);

        if self.input.is_empty() {
            let cursor = if self.has_focus { crate::input::CURSOR.to_string() } else { String::new() };
            let placeholder_line = Line::from(vec![
                Span::raw(cursor),
                Span::styled(self.placeholder.as_str(), Style::default().fg(Color::DarkGray)),
            ]);
            buf.set_line(inner_area.x, inner_area.y, &placeholder_line, inner_area.width);
        } else {
            let lines = self.input.visible_lines(
                inner_area.width as usize,
                inner_area.height as usize,
                self.has_focus,
            );
            for (i, line_text) in lines.iter().enumerate() {
                let line = Line::from(Span::raw(line_text.as_str()));
                buf.set_line(inner_area.x, inner_area.y + i as u16, &line, inner_area.width);
            }
        }

        if self.show_command_palette && !self.filtered_commands.is_empty() {
            let palette_height = (self.filtered_commands.len().min(5) + 2) as u16;
            let palette_area = Rect {
                x: area.x,
                y: area.y.saturating_sub(palette_height),
                width: area.width,
                height: palette_height.min(area.y),
            };
            if palette_area.height < 3 {
                return;
            }

            Clear.render(palette_area, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .title("Commands")
                .border_style(Style::default().fg(Color::Blue));
            let inner = block.inner(palette_area);
            block.render(palette_area, buf);

            for (index, entry) in self.filtered_commands.iter().enumerate() {
                if index >= inner.height as usize {
                    break;
                }

                let style = if self.selected_command == Some(index) {
                    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                let line = Line::from(vec![
                    Span::styled(format!("/{}", entry.keyword), style),
                    Span::styled("  ", Style::default()),
                    Span::styled(entry.description, Style::default().fg(Color::Gray)),
                ]);
                buf.set_line(inner.x, inner.y + index as u16, &line, inner.width);
            }
        }
    }
}
