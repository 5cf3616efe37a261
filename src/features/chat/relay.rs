//! Relays a conversation to the assistant service.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{error, info};

use super::client::ChatTransport;
use super::message::{ChatMessage, ChatReply};

/// Instructions prepended to every relayed conversation.
pub const SYSTEM_PROMPT: &str = "You are a compassionate mental health support assistant for Salutis, a mental health platform. Your role is to:

1. Provide supportive, empathetic responses
2. Offer evidence-based mental health information and coping strategies
3. Encourage users to seek professional help when appropriate
4. Never provide medical diagnoses or replace professional treatment
5. Focus on mental health topics like depression, anxiety, PTSD, bipolar disorder, OCD, schizophrenia, and panic disorders
6. Provide practical coping techniques, breathing exercises, mindfulness practices, and self-care tips
7. Be encouraging and hopeful while acknowledging the user's struggles

IMPORTANT: Respond directly to the user without using any thinking tags, internal reasoning, or meta-commentary. Provide clear, helpful responses immediately.

Always remind users that while you can provide support and information, professional mental health care is important for serious concerns.";

/// Reply used whenever the service cannot be reached or answers badly.
pub const FALLBACK_MESSAGE: &str = "I'm sorry, I'm having trouble connecting right now. Please try again in a moment, or explore our mental health courses for immediate support.";

/// First assistant message of a conversation.
pub const GREETING: &str =
    "Hello! I'm your mental health support assistant. How can I help you today?";

static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<think>.*?</think>").unwrap_or_else(|e| panic!("Invalid think regex: {e}"))
});

/// Remove `<think>` blocks and surrounding whitespace from a reply.
#[must_use]
pub fn strip_thinking(content: &str) -> String {
    THINK_BLOCK.replace_all(content, "").trim().to_string()
}

/// Forwards conversations to a [`ChatTransport`].
pub struct ChatRelay<T: ChatTransport> {
    transport: T,
}

impl<T: ChatTransport> ChatRelay<T> {
    /// Create a relay over `transport`.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send `history` with the system prompt prepended.
    ///
    /// Never fails: transport errors become the fallback reply.
    pub fn relay(&self, history: &[ChatMessage]) -> ChatReply {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend(history.iter().cloned());

        match self.transport.send(&messages) {
            Ok(content) => {
                info!(messages = history.len(), "chat reply received");
                ChatReply {
                    message: strip_thinking(&content),
                    success: true,
                }
            }
            Err(e) => {
                error!(error = %e, "chat relay failed");
                ChatReply {
                    message: FALLBACK_MESSAGE.to_string(),
                    success: false,
                }
            }
        }
    }
}

/// A conversation kept across turns.
pub struct Conversation<T: ChatTransport> {
    relay: ChatRelay<T>,
    history: Vec<ChatMessage>,
}

impl<T: ChatTransport> Conversation<T> {
    /// Start a conversation. The greeting is shown to the user but not sent.
    #[must_use]
    pub const fn new(relay: ChatRelay<T>) -> Self {
        Self {
            relay,
            history: Vec::new(),
        }
    }

    /// Send a user message and record the exchange.
    ///
    /// A failed reply is returned but not added to the history, so the
    /// user's message can be retried.
    pub fn send(&mut self, text: &str) -> ChatReply {
        self.history.push(ChatMessage::user(text));
        let reply = self.relay.relay(&self.history);
        if reply.success {
            self.history.push(ChatMessage::assistant(reply.message.clone()));
        } else {
            self.history.pop();
        }
        reply
    }

    /// Messages exchanged so far.
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalutisError;
    use crate::features::chat::client::MockChatTransport;
    use crate::features::chat::message::Role;

    #[test]
    fn test_strip_thinking() {
        assert_eq!(strip_thinking("<think>hmm</think>Hello"), "Hello");
        assert_eq!(
            strip_thinking("<THINK>\nline one\nline two\n</Think>\n\n  Try box breathing. "),
            "Try box breathing."
        );
        assert_eq!(strip_thinking("a<think>x</think>b<think>y</think>c"), "abc");
        assert_eq!(strip_thinking("plain"), "plain");
    }

    #[test]
    fn test_relay_prepends_system_prompt() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .withf(|messages| {
                messages.len() == 2
                    && messages[0].role == Role::System
                    && messages[0].content == SYSTEM_PROMPT
                    && messages[1] == ChatMessage::user("I feel anxious")
            })
            .times(1)
            .returning(|_| Ok("<think>plan</think> Let's breathe together.".to_string()));

        let relay = ChatRelay::new(transport);
        let reply = relay.relay(&[ChatMessage::user("I feel anxious")]);

        assert!(reply.success);
        assert_eq!(reply.message, "Let's breathe together.");
    }

    #[test]
    fn test_relay_falls_back_on_error() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(SalutisError::Chat("AI API error: 502".to_string())));

        let reply = ChatRelay::new(transport).relay(&[ChatMessage::user("hello")]);

        assert!(!reply.success);
        assert_eq!(reply.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_conversation_keeps_history() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .withf(|messages| messages.len() == 2)
            .times(1)
            .returning(|_| Ok("First".to_string()));
        transport
            .expect_send()
            .withf(|messages| messages.len() == 4 && messages[2].content == "First")
            .times(1)
            .returning(|_| Ok("Second".to_string()));

        let mut conversation = Conversation::new(ChatRelay::new(transport));
        assert_eq!(conversation.send("one").message, "First");
        assert_eq!(conversation.send("two").message, "Second");
        assert_eq!(conversation.history().len(), 4);
    }

    #[test]
    fn test_conversation_drops_failed_turn() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(SalutisError::Chat("timeout".to_string())));

        let mut conversation = Conversation::new(ChatRelay::new(transport));
        let reply = conversation.send("hello");

        assert!(!reply.success);
        assert!(conversation.history().is_empty());
    }
}
