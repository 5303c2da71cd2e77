//! services/chat_client/src/controller/chat_task.rs
//!
//! The send-message cycle: echo, placeholder, one `/chat` request, reply.

use super::{events::ViewEvent, ChatController};
use chat_relay_core::domain::{ChatRequest, RequestId};
use chat_relay_core::ports::PortError;
use std::time::Instant;
use tracing::{error, info, warn};

/// Shown in the transcript when the backend could not be reached at all.
pub const CONNECTION_FAILURE_TEXT: &str =
    "Sorry, I couldn't connect to the server. Please check that the backend is running and try again.";

/// Shown while a reply is pending.
pub const TYPING_TEXT: &str = "Bot is typing...";

/// The transcript text for a failed chat call.
pub fn chat_error_text(err: &PortError) -> String {
    match err {
        PortError::Transport(_) => CONNECTION_FAILURE_TEXT.to_string(),
        other => format!("Error: {}", other.display_message()),
    }
}

impl ChatController {
    /// Relays one user message to the backend and renders the reply.
    ///
    /// Whitespace-only input is ignored and issues no request; the return value
    /// is then `None`. Replies are rendered in the order they arrive, each
    /// tagged with the request it answers and clearing only its own placeholder.
    pub async fn send_message(&self, text: &str) -> Option<RequestId> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }

        let request_id = self.next_request_id();
        let request = {
            let mut state = self.state.lock().await;
            let echoed = state.transcript.push_user(message).clone();
            self.emit(ViewEvent::MessageAppended { message: echoed });
            self.emit(ViewEvent::InputCleared);
            state.transcript.begin_typing(request_id);
            self.emit(ViewEvent::TypingStarted { request: request_id });

            ChatRequest {
                message: message.to_string(),
                last_uploaded_file: state.session.last_uploaded_file().map(str::to_string),
            }
        };

        info!(
            "Sending chat request {} (context file: {})",
            request_id,
            request.last_uploaded_file.as_deref().unwrap_or("none")
        );
        let started = Instant::now();
        let outcome = self.backend.send_chat(&request).await;

        let mut state = self.state.lock().await;
        if state.transcript.end_typing(request_id) {
            self.emit(ViewEvent::TypingStopped { request: request_id });
        }

        let reply_text = match outcome {
            Ok(reply) => {
                info!("Chat request {} answered in {:?}", request_id, started.elapsed());
                reply.response
            }
            Err(PortError::Transport(detail)) => {
                error!("Chat request {} could not reach the backend: {}", request_id, detail);
                CONNECTION_FAILURE_TEXT.to_string()
            }
            Err(e) => {
                warn!("Chat request {} failed: {}", request_id, e);
                chat_error_text(&e)
            }
        };

        let reply = state.transcript.push_bot(reply_text, Some(request_id)).clone();
        self.emit(ViewEvent::MessageAppended { message: reply });
        Some(request_id)
    }
}
