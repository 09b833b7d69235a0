//! Client side of the chat: the transcript and submission state machine.
//!
//! The browser page (`static/index.html`) and the `chat` terminal binary
//! both follow the rules implemented by [`ChatSession`]:
//! optimistic user message, one assistant message per request, no parallel
//! submissions.

pub mod session;
pub mod transcript;
pub mod transport;

pub use session::{ChatSession, SessionState, NO_ANSWER_FALLBACK, TRANSPORT_FALLBACK};
pub use transcript::{ChatMessage, Role, Transcript};
pub use transport::{ChatReply, ChatTransport, HttpChatTransport, TransportError};
