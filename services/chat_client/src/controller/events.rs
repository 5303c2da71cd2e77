//! services/chat_client/src/controller/events.rs
//!
//! Defines the rendering instructions the controller emits for whatever view
//! is attached (the terminal front-end, or a test collecting them).

use chat_relay_core::domain::{ChatMessage, RequestId, Status};
use serde::Serialize;

/// One change the view should apply, in the order the controller made it.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    /// A line was appended to the transcript.
    MessageAppended { message: ChatMessage },

    /// The submitted text was accepted; the input field should be emptied.
    InputCleared,

    /// A chat request is in flight; show its "typing" placeholder.
    TypingStarted { request: RequestId },

    /// The placeholder of `request` should go away.
    TypingStopped { request: RequestId },

    StatusShown { status: Status },

    /// The status area timed out and should be blank.
    StatusCleared,
}
