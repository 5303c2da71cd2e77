//! crates/chat_relay_core/src/ports.rs
//!
//! Defines the service contract (trait) the client controller depends on.
//! The controller only talks to the backend through `ChatBackend`, so the
//! HTTP adapter can be swapped for a scripted one in tests.

use crate::domain::{ChatReply, ChatRequest, SelectedFile, UploadReceipt};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// Everything that can go wrong while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// The backend answered with a non-success status.
    /// `message` is whatever the body carried, if it could be read.
    #[error("Backend rejected the request with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// No response at all: DNS, refused connection, timeout.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// A success status whose body could not be understood.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The best user-facing text for a rejected or malformed response.
    ///
    /// A server-provided message wins; otherwise the text is derived from
    /// the HTTP status.
    pub fn display_message(&self) -> String {
        match self {
            PortError::Rejected { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            PortError::Rejected { status, .. } => format!("HTTP error! status: {}", status),
            PortError::Transport(detail) | PortError::Unexpected(detail) => detail.clone(),
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Relays one user message, with the remembered file as context.
    async fn send_chat(&self, request: &ChatRequest) -> PortResult<ChatReply>;

    /// Sends one file as a multipart upload.
    async fn upload_file(&self, file: &SelectedFile) -> PortResult<UploadReceipt>;
}
