use std::time::Duration;

use tracing::{debug, warn};

use super::loading::LoadingRotation;
use crate::client::{ChatBackend, ChatReply, ChatRequest};
use crate::config::ChatConfig;
use crate::error::VenuexResult;
use crate::mock::EXAMPLE_QUERIES;
use crate::models::Message;

pub const GREETING: &str = "Hello! I'm your sports booking assistant. I can help you find cricket, football, and badminton venues in Mumbai, Delhi, Bangalore, and Kakkanad. Just tell me what you need or try one of the examples below.";

/// Shown when the backend answers without any free text.
pub const FALLBACK_REPLY: &str = "Request processed successfully.";

pub const APOLOGY: &str = "Sorry, I encountered an error while processing your request. Please make sure the backend is running on localhost:8000 and try again.";

/// Text that replaces the backend reply when venues were found.
pub fn venues_found_text(count: usize) -> String {
    let noun = if count == 1 { "venue" } else { "venues" };
    format!(
        "Found **{}** {} for you. Check out the options below with booking details.",
        count, noun
    )
}

/// Turns a backend reply into the assistant message shown to the user.
pub fn reply_message(reply: ChatReply) -> Message {
    if reply.slots_found.is_empty() {
        let text = reply
            .response
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());
        Message::assistant(text)
    } else {
        let text = venues_found_text(reply.slots_found.len());
        Message::assistant_with_venues(text, reply.slots_found)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Busy,
}

/// One chat conversation with the venue assistant.
///
/// The transcript only grows. At most one request is in flight: `begin_submit`
/// moves Idle to Busy and `complete` always moves back to Idle.
#[derive(Debug)]
pub struct ChatSession {
    user_id: String,
    transcript: Vec<Message>,
    input: String,
    state: SessionState,
    input_focused: bool,
    loading: LoadingRotation,
}

impl ChatSession {
    pub fn new(user_id: impl Into<String>, loading_interval: Duration) -> Self {
        Self {
            user_id: user_id.into(),
            transcript: vec![Message::assistant(GREETING)],
            input: String::new(),
            state: SessionState::Idle,
            input_focused: true,
            loading: LoadingRotation::new(loading_interval),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.resolve_user_id(), config.loading_interval())
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == SessionState::Busy
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Input is read-only while a request is outstanding.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if !self.is_busy() {
            self.input = text.into();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_busy() {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.is_busy() {
            self.input.pop();
        }
    }

    pub fn clear_input(&mut self) {
        if !self.is_busy() {
            self.input.clear();
        }
    }

    /// Example queries are offered until the first exchange.
    pub fn show_examples(&self) -> bool {
        self.transcript.len() == 1
    }

    pub fn apply_example(&mut self, index: usize) -> bool {
        match EXAMPLE_QUERIES.get(index) {
            Some(example) if !self.is_busy() => {
                self.input = example.text.to_string();
                self.input_focused = true;
                true
            }
            _ => false,
        }
    }

    pub fn loading_index(&self) -> usize {
        self.loading.index()
    }

    /// Rotating status label, only while busy.
    pub fn loading_label(&self) -> Option<&'static str> {
        self.is_busy().then(|| self.loading.label())
    }

    /// Idle to Busy half of a submission.
    ///
    /// Returns `None` without touching any state when the input is blank or a
    /// request is already in flight.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if self.is_busy() || self.input.trim().is_empty() {
            return None;
        }

        let query = std::mem::take(&mut self.input);
        self.transcript.push(Message::user(query.clone()));
        self.state = SessionState::Busy;
        self.input_focused = false;
        self.loading.start();

        debug!(user_id = %self.user_id, "Chat request started");
        Some(ChatRequest {
            message: query,
            user_id: self.user_id.clone(),
        })
    }

    /// Busy to Idle half of a submission. Failures become the fixed apology.
    pub fn complete(&mut self, result: VenuexResult<ChatReply>) {
        if !self.is_busy() {
            warn!("Ignoring chat result with no request in flight");
            return;
        }

        let message = match result {
            Ok(reply) => reply_message(reply),
            Err(e) => {
                e.log();
                Message::assistant(APOLOGY)
            }
        };
        self.transcript.push(message);

        self.loading.stop();
        self.state = SessionState::Idle;
        self.input_focused = true;
        debug!(messages = self.transcript.len(), "Chat request finished");
    }

    /// Runs a full submission against `backend`. Returns false when the
    /// submission was a no-op.
    pub async fn submit<B>(&mut self, backend: &B) -> bool
    where
        B: ChatBackend + ?Sized,
    {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let result = backend.send(&request).await;
        self.complete(result);
        true
    }

    /// Releases the loading timer when the owning view is torn down.
    pub fn shutdown(&mut self) {
        self.loading.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VenuexError;
    use crate::models::Venue;

    fn session() -> ChatSession {
        ChatSession::new("user123", Duration::from_secs(3))
    }

    #[test]
    fn test_new_session_has_greeting() {
        let session = session();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].text(), GREETING);
        assert!(session.show_examples());
        assert!(!session.is_busy());
        assert!(session.loading_label().is_none());
    }

    #[test]
    fn test_venues_found_text_pluralization() {
        assert_eq!(
            venues_found_text(1),
            "Found **1** venue for you. Check out the options below with booking details."
        );
        assert!(venues_found_text(3).starts_with("Found **3** venues"));
        assert!(venues_found_text(0).starts_with("Found **0** venues"));
    }

    #[test]
    fn test_reply_message_passes_text_through_without_venues() {
        let message = reply_message(ChatReply::text("No courts match that search."));
        assert_eq!(message.text(), "No courts match that search.");
        assert!(!message.has_venues());

        let message = reply_message(ChatReply::default());
        assert_eq!(message.text(), FALLBACK_REPLY);

        let message = reply_message(ChatReply::text(""));
        assert_eq!(message.text(), FALLBACK_REPLY);
    }

    #[test]
    fn test_reply_message_replaces_text_with_venues() {
        let venues = vec![Venue::new("Court A", "Playo"), Venue::new("Court B", "Hudle")];
        let message = reply_message(ChatReply::with_venues("raw backend listing", venues));
        assert_eq!(message.text(), venues_found_text(2));
        assert_eq!(message.venues().len(), 2);
    }

    #[test]
    fn test_blank_input_is_noop() {
        let mut session = session();
        for blank in ["", "   ", "\t\n"] {
            session.set_input(blank);
            assert!(session.begin_submit().is_none());
        }
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_begin_submit_appends_and_clears() {
        let mut session = session();
        session.set_input("  Find cricket venues in Mumbai ");
        let request = session.begin_submit().unwrap();

        assert_eq!(request.message, "  Find cricket venues in Mumbai ");
        assert_eq!(request.user_id, "user123");
        assert_eq!(session.input(), "");
        assert!(session.is_busy());
        assert!(!session.input_focused());
        assert_eq!(session.transcript().len(), 2);
        assert!(session.transcript()[1].is_user());
        assert_eq!(session.transcript()[1].text(), "  Find cricket venues in Mumbai ");
        assert!(!session.show_examples());
    }

    #[test]
    fn test_submit_while_busy_is_ignored() {
        let mut session = session();
        session.set_input("first");
        assert!(session.begin_submit().is_some());

        session.set_input("second");
        assert_eq!(session.input(), "");
        assert!(session.begin_submit().is_none());
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_complete_with_error_appends_apology() {
        let mut session = session();
        session.set_input("Find football grounds");
        session.begin_submit().unwrap();
        session.complete(Err(VenuexError::ApiServiceUnavailable(
            "connection refused".to_string(),
        )));

        assert!(!session.is_busy());
        assert!(session.input_focused());
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[2].text(), APOLOGY);
    }

    #[test]
    fn test_complete_without_request_is_ignored() {
        let mut session = session();
        session.complete(Ok(ChatReply::text("stray")));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_user_id_is_stable_across_requests() {
        let mut session = session();
        session.set_input("one");
        let first = session.begin_submit().unwrap();
        session.complete(Ok(ChatReply::text("ok")));

        session.set_input("two");
        let second = session.begin_submit().unwrap();
        assert_eq!(first.user_id, second.user_id);
    }

    #[test]
    fn test_apply_example() {
        let mut session = session();
        assert!(session.apply_example(0));
        assert_eq!(session.input(), EXAMPLE_QUERIES[0].text);
        assert!(!session.apply_example(EXAMPLE_QUERIES.len()));
    }
}
