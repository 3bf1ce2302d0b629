//! Chat session state machine.
//!
//! Owns the ordered message log and the single in-flight-request gate, and
//! sequences user input, the outbound send and the inbound completion into
//! the log. The machine itself is synchronous; the async transport hangs off
//! the [`ChatTransport`] seam and feeds completions back in through
//! [`ChatSession::on_success`] / [`ChatSession::on_failure`].

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::OnboardResult;
use crate::types::{AssistantReply, Message};

/// Apology shown when the backend cannot be reached at all
pub const CONNECT_APOLOGY: &str =
    "Xin lỗi, không thể kết nối với server. Vui lòng kiểm tra lại backend.";

/// Apology shown when the backend answered but could not produce a reply
pub const GENERIC_APOLOGY: &str = "Xin lỗi, đã có lỗi xảy ra. Vui lòng thử lại.";

/// Whether a send may currently be issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Awaiting,
}

/// Proof that a send was accepted.
///
/// Tickets are invalidated by [`ChatSession::clear`], so a completion that
/// raced a reset is recognized and dropped instead of repopulating the
/// emptied log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTicket {
    epoch: u64,
}

/// One conversation: the append-only message log plus the pending-send gate
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<Message>,
    state: SessionState,
    epoch: u64,
    draft: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            state: SessionState::Idle,
            epoch: 0,
            draft: None,
        }
    }

    /// The ordered message log
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True while a send is outstanding
    pub fn is_pending(&self) -> bool {
        self.state == SessionState::Awaiting
    }

    /// Accepts user input and appends it to the log.
    ///
    /// Returns a ticket for the outbound send, or `None` when the input is
    /// rejected: whitespace-only text, or a send already in flight. Rejected
    /// input is dropped, not queued, and the log is untouched.
    pub fn submit(&mut self, input: &str) -> Option<SendTicket> {
        if self.state == SessionState::Awaiting {
            debug!("dropping input while a request is in flight");
            return None;
        }
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(Message::user(text));
        self.state = SessionState::Awaiting;
        Some(SendTicket { epoch: self.epoch })
    }

    /// Appends the assistant reply for an outstanding send and reopens the
    /// session. Returns false when the ticket is stale and the completion
    /// was discarded.
    pub fn on_success(&mut self, ticket: SendTicket, reply: AssistantReply) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.messages
            .push(Message::assistant(reply.content, reply.suggested_prompts));
        self.state = SessionState::Idle;
        true
    }

    /// Appends a displayable failure message for an outstanding send and
    /// reopens the session. Failures are ordinary transitions, never errors.
    pub fn on_failure(&mut self, ticket: SendTicket, error_text: impl Into<String>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.messages
            .push(Message::assistant(error_text.into(), Vec::new()));
        self.state = SessionState::Idle;
        true
    }

    /// Resets the log to empty and invalidates any outstanding send. A
    /// completion arriving for a pre-clear send will be discarded.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.state = SessionState::Idle;
        self.epoch += 1;
        self.draft = None;
    }

    /// Stages a suggestion chip as the pending input text without submitting
    pub fn select_suggestion(&mut self, text: impl Into<String>) {
        self.draft = Some(text.into());
    }

    /// The currently staged input text, if any
    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    /// Consumes the staged input text
    pub fn take_draft(&mut self) -> Option<String> {
        self.draft.take()
    }

    fn accepts(&self, ticket: SendTicket) -> bool {
        if ticket.epoch != self.epoch {
            debug!("discarding completion from a cleared session");
            return false;
        }
        self.state == SessionState::Awaiting
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// The abstract outbound send the session machine depends on.
/// `OnboardClient` is the production implementation.
#[async_trait]
pub trait ChatTransport {
    /// Sends the full updated log and returns the assistant's reply
    async fn send(&self, messages: &[Message]) -> OnboardResult<AssistantReply>;
}

/// What a completed turn did to the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Input was dropped: whitespace-only, or a send was already in flight
    Rejected,
    /// Assistant reply appended
    Answered,
    /// Failure converted into an apology message and appended
    Failed,
}

/// Runs one full round trip: submit the input, await the transport, feed the
/// completion back into the session.
///
/// Failures never escape; transport-level errors land in the log as the
/// connection apology, application-level errors as the generic one. The raw
/// error text is logged, not displayed.
pub async fn run_turn<T: ChatTransport + ?Sized>(
    session: &mut ChatSession,
    transport: &T,
    input: &str,
) -> TurnOutcome {
    let Some(ticket) = session.submit(input) else {
        return TurnOutcome::Rejected;
    };

    match transport.send(session.messages()).await {
        Ok(reply) => {
            session.on_success(ticket, reply);
            TurnOutcome::Answered
        }
        Err(e) => {
            warn!(error = %e, "chat request failed");
            let apology = if e.is_transport() {
                CONNECT_APOLOGY
            } else {
                GENERIC_APOLOGY
            };
            session.on_failure(ticket, apology);
            TurnOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OnboardError;
    use crate::types::Role;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn reply(content: &str, prompts: &[&str]) -> AssistantReply {
        AssistantReply {
            content: content.to_string(),
            suggested_prompts: prompts.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Transport that pops scripted results and counts outbound calls
    struct ScriptedTransport {
        script: Mutex<VecDeque<OnboardResult<AssistantReply>>>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(script: Vec<OnboardResult<AssistantReply>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        async fn send(&self, _messages: &[Message]) -> OnboardResult<AssistantReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(OnboardError::RequestError("script exhausted".into())))
        }
    }

    #[test]
    fn submit_appends_trimmed_user_message_and_awaits() {
        let mut session = ChatSession::new();
        let ticket = session.submit("  hello  ");

        assert!(ticket.is_some());
        assert_eq!(session.state(), SessionState::Awaiting);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::User);
        assert_eq!(session.messages()[0].content, "hello");
    }

    #[test]
    fn whitespace_only_input_is_rejected() {
        let mut session = ChatSession::new();
        assert!(session.submit("   \n\t").is_none());
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn submit_while_awaiting_is_a_no_op() {
        let mut session = ChatSession::new();
        session.submit("first").unwrap();

        assert!(session.submit("second").is_none());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, "first");
    }

    #[test]
    fn on_failure_reopens_session_with_empty_prompts() {
        let mut session = ChatSession::new();
        let ticket = session.submit("hello").unwrap();

        assert!(session.on_failure(ticket, GENERIC_APOLOGY));
        assert_eq!(session.state(), SessionState::Idle);

        let last = session.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, GENERIC_APOLOGY);
        assert!(last.suggested_prompts.is_empty());
    }

    #[test]
    fn completed_round_trips_alternate_roles() {
        let mut session = ChatSession::new();
        for i in 0..3 {
            let ticket = session.submit(&format!("question {}", i)).unwrap();
            assert!(session.on_success(ticket, reply("answer", &[])));
        }

        assert_eq!(session.messages().len(), 6);
        for (i, message) in session.messages().iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(message.role, expected);
        }

        // one more submit leaves the log at 2n + 1 while awaiting
        session.submit("question 3").unwrap();
        assert_eq!(session.messages().len(), 7);
    }

    #[test]
    fn vietnamese_round_trip_scenario() {
        let mut session = ChatSession::new();
        let ticket = session.submit("Nhiệm vụ của tôi là gì?").unwrap();

        assert!(session.is_pending());
        assert_eq!(session.messages()[0].content, "Nhiệm vụ của tôi là gì?");

        session.on_success(ticket, reply("Bạn có 3 task.", &["Xem chi tiết"]));

        assert!(!session.is_pending());
        assert_eq!(session.messages().len(), 2);
        let last = &session.messages()[1];
        assert_eq!(last.content, "Bạn có 3 task.");
        assert_eq!(last.suggested_prompts, vec!["Xem chi tiết"]);
    }

    #[test]
    fn clear_resets_log_regardless_of_pending_state() {
        let mut session = ChatSession::new();
        let ticket = session.submit("hello").unwrap();
        session.on_success(ticket, reply("hi", &[]));
        session.submit("still there?").unwrap();

        session.clear();
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn late_success_after_clear_is_discarded() {
        let mut session = ChatSession::new();
        let ticket = session.submit("hello").unwrap();
        session.clear();

        assert!(!session.on_success(ticket, reply("too late", &[])));
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn late_failure_after_clear_is_discarded() {
        let mut session = ChatSession::new();
        let ticket = session.submit("hello").unwrap();
        session.clear();

        assert!(!session.on_failure(ticket, CONNECT_APOLOGY));
        assert!(session.messages().is_empty());
    }

    #[test]
    fn select_suggestion_stages_text_without_submitting() {
        let mut session = ChatSession::new();
        session.select_suggestion("Xem chi tiết");

        assert_eq!(session.draft(), Some("Xem chi tiết"));
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Idle);

        assert_eq!(session.take_draft().as_deref(), Some("Xem chi tiết"));
        assert!(session.draft().is_none());
    }

    #[tokio::test]
    async fn run_turn_appends_reply_on_success() {
        let transport = ScriptedTransport::new(vec![Ok(reply("chào bạn", &["Tiếp tục"]))]);
        let mut session = ChatSession::new();

        let outcome = run_turn(&mut session, &transport, "xin chào").await;

        assert_eq!(outcome, TurnOutcome::Answered);
        assert_eq!(transport.calls(), 1);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].content, "chào bạn");
    }

    #[tokio::test]
    async fn run_turn_converts_transport_failure_to_connect_apology() {
        let transport = ScriptedTransport::new(vec![Err(OnboardError::RequestError(
            "connection refused".into(),
        ))]);
        let mut session = ChatSession::new();

        let outcome = run_turn(&mut session, &transport, "xin chào").await;

        assert_eq!(outcome, TurnOutcome::Failed);
        assert_eq!(session.messages()[1].content, CONNECT_APOLOGY);
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn run_turn_converts_api_failure_to_generic_apology() {
        let transport = ScriptedTransport::new(vec![Err(OnboardError::ApiError(
            "deployment not configured".into(),
        ))]);
        let mut session = ChatSession::new();

        run_turn(&mut session, &transport, "xin chào").await;

        assert_eq!(session.messages()[1].content, GENERIC_APOLOGY);
        assert!(session.messages()[1].suggested_prompts.is_empty());
    }

    #[tokio::test]
    async fn run_turn_while_pending_makes_no_outbound_call() {
        let transport = ScriptedTransport::new(vec![]);
        let mut session = ChatSession::new();
        session.submit("already in flight").unwrap();

        let outcome = run_turn(&mut session, &transport, "second").await;

        assert_eq!(outcome, TurnOutcome::Rejected);
        assert_eq!(transport.calls(), 0);
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn run_turn_rejects_empty_input_without_calling_out() {
        let transport = ScriptedTransport::new(vec![]);
        let mut session = ChatSession::new();

        let outcome = run_turn(&mut session, &transport, "   ").await;

        assert_eq!(outcome, TurnOutcome::Rejected);
        assert_eq!(transport.calls(), 0);
    }
}
