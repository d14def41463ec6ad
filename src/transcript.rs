//! In-memory conversation transcript.
//!
//! The transcript is owned by the presentation layer and scoped to one
//! session: ordered, append-only, no persistence. Clearing it resets to the
//! fixed greeting.

/// Default assistant greeting shown on start and after a clear.
pub const DEFAULT_GREETING: &str =
    "Hello! I'm your AI medical assistant. Ask me about symptoms, recovery, or health tips.";

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Ordered message history for one chat session.
#[derive(Debug, Clone)]
pub struct Transcript {
    greeting: String,
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates a transcript seeded with the default greeting.
    pub fn new() -> Self {
        Self::with_greeting(DEFAULT_GREETING)
    }

    /// Creates a transcript seeded with a custom greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let messages = vec![Message {
            role: Role::Assistant,
            content: greeting.clone(),
        }];
        Self { greeting, messages }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message {
            role: Role::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    /// Drops the most recent message (used to unwind a failed turn).
    pub fn pop(&mut self) -> Option<Message> {
        self.messages.pop()
    }

    /// Resets the history to the greeting alone.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.messages.push(Message {
            role: Role::Assistant,
            content: self.greeting.clone(),
        });
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
