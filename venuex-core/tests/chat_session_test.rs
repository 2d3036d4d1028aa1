use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use venuex_core::{
    venues_found_text, ChatBackend, ChatReply, ChatRequest, ChatSession, SessionState, Venue,
    VenuexError, VenuexResult, APOLOGY, FALLBACK_REPLY, GREETING, LOADING_MESSAGES,
};

struct MockBackend {
    reply: Arc<RwLock<Option<ChatReply>>>,
    requests: Arc<RwLock<Vec<ChatRequest>>>,
    delay: Duration,
}

impl MockBackend {
    fn replying(reply: ChatReply) -> Self {
        Self {
            reply: Arc::new(RwLock::new(Some(reply))),
            requests: Arc::new(RwLock::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    fn failing() -> Self {
        Self {
            reply: Arc::new(RwLock::new(None)),
            requests: Arc::new(RwLock::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn call_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn send(&self, request: &ChatRequest) -> VenuexResult<ChatReply> {
        self.requests.write().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.reply.read().unwrap().clone() {
            Some(reply) => Ok(reply),
            None => Err(VenuexError::ApiServiceUnavailable(
                "connection refused".to_string(),
            )),
        }
    }
}

fn session() -> ChatSession {
    ChatSession::new("tui_user_test", Duration::from_secs(3))
}

fn court(name: &str) -> Venue {
    Venue {
        rating: Some(4.5),
        is_bookable: true,
        booking_url: "https://playo.co/booking?venueId=123".to_string(),
        ..Venue::new(name, "Playo")
    }
}

#[tokio::test]
async fn test_submit_with_venues_appends_found_message() {
    let backend = MockBackend::replying(ChatReply::with_venues(
        "raw listing",
        vec![court("Mumbai Cricket Ground")],
    ));
    let mut session = session();
    session.set_input("Find cricket venues in Mumbai");

    assert!(session.submit(&backend).await);

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].text(), GREETING);
    assert_eq!(transcript[1].text(), "Find cricket venues in Mumbai");
    assert_eq!(transcript[2].text(), venues_found_text(1));
    assert_eq!(transcript[2].venues()[0].venue_name, "Mumbai Cricket Ground");
    assert!(!session.is_busy());
    assert!(session.input_focused());
}

#[tokio::test]
async fn test_submit_passes_text_through() {
    let backend = MockBackend::replying(ChatReply::text("No courts found in Pune yet."));
    let mut session = session();
    session.set_input("badminton in Pune");
    session.submit(&backend).await;

    assert_eq!(session.transcript()[2].text(), "No courts found in Pune yet.");
    assert!(!session.transcript()[2].has_venues());
}

#[tokio::test]
async fn test_missing_response_uses_fallback() {
    let backend = MockBackend::replying(ChatReply::default());
    let mut session = session();
    session.set_input("hello");
    session.submit(&backend).await;

    assert_eq!(session.transcript()[2].text(), FALLBACK_REPLY);
}

#[tokio::test]
async fn test_backend_failure_appends_apology() {
    let backend = MockBackend::failing();
    let mut session = session();
    session.set_input("Show me football grounds in Bangalore");
    session.submit(&backend).await;

    assert_eq!(session.transcript().len(), 3);
    assert_eq!(session.transcript()[2].text(), APOLOGY);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_blank_submission_never_reaches_backend() {
    let backend = MockBackend::replying(ChatReply::text("unused"));
    let mut session = session();
    session.set_input("   ");

    assert!(!session.submit(&backend).await);
    assert_eq!(backend.call_count(), 0);
    assert_eq!(session.transcript().len(), 1);
}

#[tokio::test]
async fn test_requests_carry_stable_user_id() {
    let backend = MockBackend::replying(ChatReply::text("ok"));
    let mut session = session();

    for query in ["first", "second", "third"] {
        session.set_input(query);
        session.submit(&backend).await;
    }

    let requests = backend.requests.read().unwrap();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.user_id == "tui_user_test"));
    assert_eq!(requests[1].message, "second");
    assert_eq!(session.transcript().len(), 7);
}

#[tokio::test]
async fn test_state_moves_idle_busy_idle() {
    let mut session = session();
    assert_eq!(session.state(), SessionState::Idle);

    session.set_input("   ");
    assert!(session.begin_submit().is_none());
    assert_eq!(session.state(), SessionState::Idle);

    session.set_input("Show me football grounds in Bangalore");
    session.begin_submit().unwrap();
    assert_eq!(session.state(), SessionState::Busy);

    session.set_input("second while busy");
    assert!(session.begin_submit().is_none());
    assert_eq!(session.state(), SessionState::Busy);

    session.complete(Err(VenuexError::ApiTimeout(30)));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.transcript().last().unwrap().text(), APOLOGY);
}

#[tokio::test(start_paused = true)]
async fn test_loading_label_rotates_while_request_in_flight() {
    let mut session = session();
    session.set_input("Find cricket venues in Delhi for weekend");
    let request = session.begin_submit().unwrap();
    assert_eq!(request.message, "Find cricket venues in Delhi for weekend");
    assert_eq!(session.loading_label(), Some(LOADING_MESSAGES[0]));

    tokio::time::sleep(Duration::from_millis(7_000)).await;
    assert_eq!(session.loading_index(), 2);
    assert_eq!(session.loading_label(), Some(LOADING_MESSAGES[2]));

    session.complete(Ok(ChatReply::text("done")));
    assert_eq!(session.loading_label(), None);

    session.set_input("again");
    session.begin_submit().unwrap();
    assert_eq!(session.loading_index(), 0);
    session.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_slow_backend_shows_fourth_label_at_ten_seconds() {
    let backend = MockBackend::replying(ChatReply::text("ok")).with_delay(Duration::from_secs(10));
    let mut session = session();
    session.set_input("slow query");
    let request = session.begin_submit().unwrap();

    let pending = backend.send(&request);
    tokio::pin!(pending);
    tokio::select! {
        _ = &mut pending => panic!("backend finished early"),
        _ = tokio::time::sleep(Duration::from_millis(9_500)) => {}
    }
    assert_eq!(session.loading_index(), 3);

    let result = pending.await;
    session.complete(result);
    assert!(!session.is_busy());
    assert_eq!(session.transcript()[2].text(), "ok");
}
