//! crates/chat_relay_core/src/transcript.rs
//!
//! The ordered, append-only log of chat lines, plus the "typing" placeholders
//! of chat requests that are still in flight.

use crate::domain::{ChatMessage, RequestId};
use std::collections::BTreeSet;

#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    typing: BTreeSet<RequestId>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::user(text))
    }

    pub fn push_bot(&mut self, text: impl Into<String>, reply_to: Option<RequestId>) -> &ChatMessage {
        self.push(ChatMessage::bot(text, reply_to))
    }

    /// Shows a placeholder for `request` until `end_typing` is called with it.
    pub fn begin_typing(&mut self, request: RequestId) {
        self.typing.insert(request);
    }

    /// Removes the placeholder of `request` only. Returns whether it was shown.
    pub fn end_typing(&mut self, request: RequestId) -> bool {
        self.typing.remove(&request)
    }

    pub fn is_typing(&self) -> bool {
        !self.typing.is_empty()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}
