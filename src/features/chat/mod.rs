//! Mental health support chat.
//!
//! Conversations are relayed to an OpenAI-style completion service with a
//! fixed system prompt. Failures never surface as errors; the user gets a
//! fallback reply instead.

pub mod client;
pub mod markdown;
pub mod message;
pub mod relay;

pub use client::{ChatTransport, HttpTransport};
pub use markdown::render_markdown;
pub use message::{ChatMessage, ChatReply, Role};
pub use relay::{strip_thinking, ChatRelay, Conversation, FALLBACK_MESSAGE, GREETING, SYSTEM_PROMPT};
