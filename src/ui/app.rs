use crate::config::Config;
use crate::events::{AppEvent, Focus};
use crate::session::ChatSession;
use crate::ui::conversation::{ConversationAction, ConversationManager};
use crate::ui::sidebar::{Sidebar, SidebarState};
use crate::ui::upload::UploadDialog;
use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{StatefulWidget, Widget};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

/// How long to wait for terminal input before redrawing
const TICK: Duration = Duration::from_millis(100);

/// Top-level UI state: configuration, the current chat session and focus
pub struct App {
    config: Config,
    session: ChatSession,
    conversation: ConversationManager,
    focus: Focus,
    sidebar: SidebarState,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = ChatSession::new(&config, tx.clone());
        let mut conversation = ConversationManager::new(&config);
        conversation.set_focus(true);

        Self {
            config,
            session,
            conversation,
            focus: Focus::Composer,
            sidebar: SidebarState::default(),
            tx,
            rx,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.conversation.set_focus(focus == Focus::Composer);
    }

    /// Replace the session; the old one cancels its pending reply on drop
    pub fn new_chat(&mut self) {
        tracing::info!(previous = %self.session.id(), "starting new chat");
        self.session = ChatSession::new(&self.config, self.tx.clone());
        self.conversation.reset();
        self.set_focus(Focus::Composer);
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AssistantReply { session_id, content } => {
                self.session.receive_reply(session_id, content);
            }
        }
    }

    /// Apply every event that is already queued
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('n') => {
                    self.new_chat();
                    return;
                }
                KeyCode::Char('o') => {
                    self.session.open_upload();
                    return;
                }
                _ => {}
            }
        }

        if self.session.is_upload_open() {
            self.handle_upload_key(key);
            return;
        }

        if key.code == KeyCode::Tab
            && !(self.focus == Focus::Composer && self.conversation.captures_navigation())
        {
            self.set_focus(self.focus.next());
            return;
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Composer => {
                let action = self.conversation.handle_key(key, &mut self.session, &self.config);
                self.apply_action(action);
            }
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let changed = match key.code {
            KeyCode::Esc => {
                let had_query = !self.session.query().is_empty();
                self.session.query_input_mut().clear();
                had_query
            }
            KeyCode::Enter => {
                self.set_focus(Focus::Composer);
                false
            }
            KeyCode::Up | KeyCode::PageUp | KeyCode::Down | KeyCode::PageDown => {
                self.scroll_sidebar(key.code);
                false
            }
            _ => self.session.query_input_mut().handle_key(key),
        };

        if changed {
            tracing::trace!(
                query = self.session.query(),
                matches = self.session.filtered_conversations().len(),
                "conversation filter updated"
            );
        }
    }

    fn scroll_sidebar(&mut self, code: KeyCode) {
        let content_len = Sidebar::new(&self.session, true).content_lines().len();
        let page = self.sidebar.page();
        match code {
            KeyCode::Up => self.sidebar.scroll_up(1),
            KeyCode::PageUp => self.sidebar.scroll_up(page),
            KeyCode::Down => self.sidebar.scroll_down(1, content_len),
            KeyCode::PageDown => self.sidebar.scroll_down(page, content_len),
            _ => {}
        }
    }

    fn handle_upload_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.session.close_upload(),
            KeyCode::Enter => {
                // disabled while the path is blank
                self.session.confirm_upload();
            }
            _ => {
                if let Some(input) = self.session.upload_input_mut() {
                    input.handle_key(key);
                }
            }
        }
    }

    fn apply_action(&mut self, action: ConversationAction) {
        match action {
            ConversationAction::None => {}
            ConversationAction::NewChat => self.new_chat(),
            ConversationAction::OpenUpload { path } => {
                self.session.open_upload();
                if let (Some(path), Some(input)) = (path, self.session.upload_input_mut()) {
                    input.set(path);
                }
            }
            ConversationAction::Exit => self.should_quit = true,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(self.config.ui.sidebar_width),
                Constraint::Min(20),
            ])
            .split(area);

        Sidebar::new(&self.session, self.focus == Focus::Search).render(chunks[0], buf, &mut self.sidebar);

        let chat_area = Rect {
            x: chunks[1].x + 1,
            width: chunks[1].width.saturating_sub(2),
            ..chunks[1]
        };
        self.conversation.render(chat_area, buf, &self.session, &self.config);

        if let Some(input) = self.session.upload_input() {
            UploadDialog::new(input).render(area, buf);
        }
    }

    /// Run the event loop until the user quits
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        while !self.should_quit {
            self.drain_events();
            tui.draw(self)?;

            if !event::poll(TICK).context("failed to poll terminal events")? {
                continue;
            }

            match event::read().context("failed to read terminal event")? {
                Event::Key(key) => self.handle_key(key),
                Event::Paste(text) => self.handle_paste(&text),
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\r') {
            self.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }
}

/// Terminal in raw mode on the alternate screen
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("failed to create terminal")?;
        Ok(Self { terminal })
    }

    pub fn draw(&mut self, app: &mut App) -> Result<()> {
        self.terminal
            .draw(|frame| {
                let area = frame.size();
                app.render(area, frame.buffer_mut());
            })
            .context("failed to draw frame")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode().context("failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)
            .context("failed to leave alternate screen")?;
        self.terminal.show_cursor().context("failed to show cursor")?;
        Ok(())
    }
}

/// Launch the UI and always restore the terminal afterwards
pub fn run(config: Config) -> Result<()> {
    let mut app = App::new(config);
    let mut tui = Tui::new()?;

    let run_result = app.run(&mut tui);
    let restore_result = tui.restore();

    run_result?;
    restore_result?;
    Ok(())
}
