//! Chat session state machine.
//!
//! ```text
//! Idle ──begin_submit──▶ Sending ──finish──▶ Idle
//! ```
//!
//! The user message is appended before the request goes out and is never
//! rolled back. Every request ends with exactly one assistant message,
//! whatever happened on the wire.

use super::transcript::{ChatMessage, Role, Transcript};
use super::transport::{ChatReply, ChatTransport, TransportError};

/// Shown when the endpoint replied without an `answer`.
pub const NO_ANSWER_FALLBACK: &str = "Sorry, I encountered an error. Please try again later.";

/// Shown when the call itself failed.
pub const TRANSPORT_FALLBACK: &str = "Error talking to the assistant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

/// One browser-tab's worth of chat: input box, transcript, loading flag.
#[derive(Debug)]
pub struct ChatSession<T> {
    transport: T,
    transcript: Transcript,
    input: String,
    state: SessionState,
}

impl<T: ChatTransport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            transcript: Transcript::new(),
            input: String::new(),
            state: SessionState::Idle,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True while a request is in flight; the input is disabled meanwhile.
    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Sending
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    /// Start a submission.
    ///
    /// Returns the question to send, or `None` (and changes nothing) when a
    /// request is already in flight or the input is blank.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let question = std::mem::take(&mut self.input);
        self.transcript.push(Role::User, question.clone());
        self.state = SessionState::Sending;
        Some(question)
    }

    /// Finish the in-flight submission with its outcome.
    ///
    /// Appends one assistant message and returns to `Idle`. Returns `None`
    /// and changes nothing when no submission is in flight.
    pub fn finish(&mut self, outcome: Result<ChatReply, TransportError>) -> Option<&ChatMessage> {
        if self.state != SessionState::Sending {
            return None;
        }
        let content = match outcome {
            Ok(ChatReply {
                answer: Some(answer),
                ..
            }) if !answer.is_empty() => answer,
            Ok(_) => NO_ANSWER_FALLBACK.to_string(),
            Err(e) => {
                log::error!("{}", e);
                TRANSPORT_FALLBACK.to_string()
            }
        };
        self.state = SessionState::Idle;
        Some(self.transcript.push(Role::Assistant, content))
    }

    /// Submit the current input and wait for the reply.
    ///
    /// Returns the assistant message, or `None` when nothing was submitted.
    pub async fn submit(&mut self) -> Option<&ChatMessage> {
        let question = self.begin_submit()?;
        let outcome = self.transport.send(&question).await;
        self.finish(outcome)
    }
}
