use crate::config::Config;
use crate::events::{AppEvent, ChatMessage, MessageRole};
use crate::filter::{filter_conversations, trim_blank};
use crate::input::TextInput;
use crate::mock_data::{CONVERSATIONS, GREETING};
use crate::reply::ReplyScheduler;
use std::collections::VecDeque;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Per-session chat state: search query, messages, upload dialog and the
/// pending assistant reply.
///
/// Starting a new chat replaces the whole session; dropping it cancels any
/// reply still in flight.
pub struct ChatSession {
    id: Uuid,
    messages: VecDeque<ChatMessage>,
    max_messages: usize,
    next_id: u64,
    query: TextInput,
    upload: Option<TextInput>,
    replies: ReplyScheduler,
}

impl ChatSession {
    pub fn new(config: &Config, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            messages: VecDeque::new(),
            max_messages: config.max_messages.max(1),
            next_id: 1,
            query: TextInput::new(),
            upload: None,
            replies: ReplyScheduler::new(config.reply_delay(), tx),
        };
        session.push(MessageRole::Assistant, GREETING.to_string());
        tracing::info!(session_id = %session.id, "started chat session");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &VecDeque<ChatMessage> {
        &self.messages
    }

    fn push(&mut self, role: MessageRole, content: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push_back(ChatMessage::new(id, role, content));
        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }
        id
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn query_input(&self) -> &TextInput {
        &self.query
    }

    pub fn query_input_mut(&mut self) -> &mut TextInput {
        &mut self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query.set(query);
    }

    /// Conversation titles matching the current query, recomputed on every call
    pub fn filtered_conversations(&self) -> Vec<&'static str> {
        filter_conversations(self.query.as_str(), &CONVERSATIONS)
    }

    /// Whether `text` would be sent; mirrors the disabled send button
    pub fn can_send(text: &str) -> bool {
        !trim_blank(text).is_empty()
    }

    /// Append a user message and schedule the canned reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn send_message(&mut self, text: &str) -> Option<u64> {
        if !Self::can_send(text) {
            return None;
        }

        let id = self.push(MessageRole::User, text.to_string());
        self.replies.schedule(self.id);
        tracing::info!(session_id = %self.id, message_id = id, "user message sent");
        Some(id)
    }

    /// Append a delivered reply. Replies addressed to another session are dropped.
    pub fn receive_reply(&mut self, session_id: Uuid, content: String) -> bool {
        if session_id != self.id {
            tracing::debug!(%session_id, current = %self.id, "ignoring stale reply");
            return false;
        }
        let id = self.push(MessageRole::Assistant, content);
        tracing::debug!(session_id = %self.id, message_id = id, "assistant reply delivered");
        true
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.replies.is_pending()
    }

    /// Append a local notice such as help or settings output
    pub fn system_notice(&mut self, text: impl Into<String>) -> u64 {
        self.push(MessageRole::System, text.into())
    }

    pub fn open_upload(&mut self) {
        if self.upload.is_none() {
            self.upload = Some(TextInput::new());
            tracing::debug!(session_id = %self.id, "upload dialog opened");
        }
    }

    pub fn close_upload(&mut self) {
        if self.upload.take().is_some() {
            tracing::debug!(session_id = %self.id, "upload dialog closed");
        }
    }

    pub fn is_upload_open(&self) -> bool {
        self.upload.is_some()
    }

    pub fn upload_input(&self) -> Option<&TextInput> {
        self.upload.as_ref()
    }

    pub fn upload_input_mut(&mut self) -> Option<&mut TextInput> {
        self.upload.as_mut()
    }

    /// Accept the path typed into the upload dialog.
    ///
    /// Nothing is read or sent: the request is only logged. Returns the
    /// accepted path, or `None` when the dialog is closed or the path is blank.
    pub fn confirm_upload(&mut self) -> Option<String> {
        let path = self.upload.as_ref()?.as_str().trim().to_string();
        if path.is_empty() {
            return None;
        }
        tracing::info!(session_id = %self.id, path = %path, "upload requested; no data is transferred");
        self.upload = None;
        Some(path)
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        tracing::debug!(session_id = %self.id, "chat session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data::CANNED_REPLY;
    use std::time::Duration;

    fn session() -> (ChatSession, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChatSession::new(&Config::default(), tx), rx)
    }

    fn deliver(session: &mut ChatSession, event: AppEvent) -> bool {
        let AppEvent::AssistantReply { session_id, content } = event;
        session.receive_reply(session_id, content)
    }

    #[tokio::test(start_paused = true)]
    async fn starts_with_greeting_and_full_sidebar() {
        let (session, _rx) = session();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, MessageRole::Assistant);
        assert_eq!(session.messages()[0].content, GREETING);
        assert_eq!(session.filtered_conversations(), CONVERSATIONS.to_vec());
        assert!(!session.is_upload_open());
    }

    #[tokio::test(start_paused = true)]
    async fn query_changes_recompute_the_filter() {
        let (mut session, _rx) = session();
        session.set_query("pat");
        assert_eq!(
            session.filtered_conversations(),
            vec!["Drug interaction analysis for elderly patients", "Patient data privacy regulations"]
        );

        session.query_input_mut().insert_char('i');
        session.query_input_mut().insert_char('e');
        session.query_input_mut().insert_char('n');
        session.query_input_mut().insert_char('t');
        session.query_input_mut().insert_char(' ');
        session.query_input_mut().insert_char('d');
        assert_eq!(session.filtered_conversations(), vec!["Patient data privacy regulations"]);

        session.set_query("   ");
        assert_eq!(session.filtered_conversations().len(), CONVERSATIONS.len());
    }

    #[tokio::test(start_paused = true)]
    async fn blank_messages_are_not_sent() {
        let (mut session, _rx) = session();
        assert_eq!(session.send_message(""), None);
        assert_eq!(session.send_message("  \n "), None);
        assert_eq!(session.send_message("\u{feff}"), None);
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_awaiting_reply());
    }

    #[tokio::test(start_paused = true)]
    async fn reply_follows_user_message_after_delay() {
        let (mut session, mut rx) = session();
        let id = session.send_message("  Summarize the annual report ").unwrap();
        assert_eq!(id, 2);
        assert_eq!(session.messages()[1].content, "  Summarize the annual report ");
        assert!(session.is_awaiting_reply());

        let event = rx.recv().await.unwrap();
        assert!(deliver(&mut session, event));

        let last = session.messages().back().unwrap();
        assert_eq!(last.role, MessageRole::Assistant);
        assert_eq!(last.content, CANNED_REPLY);
        assert_eq!(last.id, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_messages_get_a_single_reply() {
        let (mut session, mut rx) = session();
        session.send_message("first").unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        session.send_message("second").unwrap();

        let event = rx.recv().await.unwrap();
        assert!(deliver(&mut session, event));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());

        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        let roles: Vec<MessageRole> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::Assistant, MessageRole::User, MessageRole::User, MessageRole::Assistant]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn replies_for_other_sessions_are_ignored() {
        let (mut session, _rx) = session();
        assert!(!session.receive_reply(Uuid::new_v4(), CANNED_REPLY.to_string()));
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_session_cancels_pending_reply() {
        let (mut session, mut rx) = session();
        session.send_message("hello").unwrap();
        drop(session);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn message_history_is_bounded() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = Config { max_messages: 3, ..Config::default() };
        let mut session = ChatSession::new(&config, tx);
        for text in ["a", "b", "c", "d"] {
            session.send_message(text);
        }
        let contents: Vec<&str> = session.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["b", "c", "d"]);
    }

    #[tokio::test(start_paused = true)]
    async fn upload_requires_a_path_and_closes_on_confirm() {
        let (mut session, _rx) = session();
        assert_eq!(session.confirm_upload(), None);

        session.open_upload();
        assert!(session.is_upload_open());
        assert_eq!(session.confirm_upload(), None);
        assert!(session.is_upload_open());

        session.upload_input_mut().unwrap().set("  reports/Q3.pdf ");
        assert_eq!(session.confirm_upload().as_deref(), Some("reports/Q3.pdf"));
        assert!(!session.is_upload_open());
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_upload_discards_input() {
        let (mut session, _rx) = session();
        session.open_upload();
        session.upload_input_mut().unwrap().set("draft.pdf");
        session.close_upload();
        session.open_upload();
        assert!(session.upload_input().unwrap().is_empty());
    }
}
