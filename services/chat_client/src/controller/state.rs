//! services/chat_client/src/controller/state.rs
//!
//! Defines the state the controller owns and the read-only snapshot it hands out.

use chat_relay_core::domain::{ChatMessage, Status, UploadRecord};
use chat_relay_core::{SessionState, StatusBoard, Transcript};
use tokio_util::sync::CancellationToken;

/// Everything the controller mutates, kept behind a single lock.
pub struct ClientState {
    pub session: SessionState,
    pub transcript: Transcript,
    pub status: StatusBoard,
    /// Cancels the auto-clear timer of the status currently shown.
    pub status_timer: CancellationToken,
    pub last_upload: Option<UploadRecord>,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            transcript: Transcript::new(),
            status: StatusBoard::new(),
            status_timer: CancellationToken::new(),
            last_upload: None,
        }
    }

    pub fn snapshot(&self) -> ClientSnapshot {
        ClientSnapshot {
            messages: self.transcript.messages().to_vec(),
            typing: self.transcript.is_typing(),
            status: self.status.current().cloned(),
            last_uploaded_file: self.session.last_uploaded_file().map(str::to_string),
            last_upload: self.last_upload.clone(),
        }
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

/// A copy of the visible state at one instant.
#[derive(Debug, Clone)]
pub struct ClientSnapshot {
    pub messages: Vec<ChatMessage>,
    pub typing: bool,
    pub status: Option<Status>,
    pub last_uploaded_file: Option<String>,
    pub last_upload: Option<UploadRecord>,
}
