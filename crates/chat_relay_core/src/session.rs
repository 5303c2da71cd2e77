//! crates/chat_relay_core/src/session.rs
//!
//! The one piece of state the client carries from request to request.

/// Cross-request session state owned by the client controller.
///
/// Written only when an upload succeeds, read on every chat call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    last_uploaded_file: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers a successfully uploaded file, replacing any earlier one.
    pub fn record_upload(&mut self, file_name: impl Into<String>) {
        self.last_uploaded_file = Some(file_name.into());
    }

    pub fn last_uploaded_file(&self) -> Option<&str> {
        self.last_uploaded_file.as_deref()
    }
}
