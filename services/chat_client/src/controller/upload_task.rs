//! services/chat_client/src/controller/upload_task.rs
//!
//! The upload cycle: validate the selection, one `/upload` request, then
//! status, remembered file and a confirmation line.

use super::{events::ViewEvent, state::ClientState, ChatController};
use chat_relay_core::domain::{SelectedFile, Status, UploadRecord};
use chat_relay_core::ports::PortError;
use tracing::{error, info, warn};

pub const NO_FILE_SELECTED_TEXT: &str = "Please select a file to upload.";

/// The status text for a failed upload.
pub fn upload_error_text(err: &PortError) -> String {
    match err {
        PortError::Transport(_) => "Upload failed: could not reach the server.".to_string(),
        other => format!("Upload failed: {}", other.display_message()),
    }
}

/// The transcript line confirming a stored upload.
pub fn upload_confirmation_text(filename: &str) -> String {
    format!(
        "File '{}' uploaded successfully. You can now ask questions about it.",
        filename
    )
}

impl ChatController {
    /// Uploads the selected file, if any.
    ///
    /// With no selection an error status is shown and no request is issued.
    /// The remembered file name changes only when the backend accepts the
    /// upload, and it is written when the response arrives, so among
    /// overlapping uploads the last response wins.
    pub async fn upload_file(&self, file: Option<SelectedFile>) -> UploadRecord {
        let Some(file) = file else {
            warn!("Upload requested with no file selected.");
            let mut state = self.state.lock().await;
            return self.finish_upload(&mut state, String::new(), Status::error(NO_FILE_SELECTED_TEXT));
        };

        self.show_status(Status::info(format!("Uploading {}...", file.file_name)))
            .await;
        info!("Uploading '{}' ({} bytes)", file.file_name, file.contents.len());

        let outcome = self.backend.upload_file(&file).await;

        let mut state = self.state.lock().await;
        match outcome {
            Ok(receipt) => {
                info!("Upload of '{}' stored as '{}'", file.file_name, receipt.filename);
                state.session.record_upload(receipt.filename.clone());
                let confirmation_text = upload_confirmation_text(&receipt.filename);
                let record =
                    self.finish_upload(&mut state, receipt.filename, Status::success(receipt.message));
                let confirmation = state.transcript.push_bot(confirmation_text, None).clone();
                self.emit(ViewEvent::MessageAppended { message: confirmation });
                record
            }
            Err(e) => {
                match &e {
                    PortError::Transport(detail) => {
                        error!("Upload of '{}' could not reach the backend: {}", file.file_name, detail)
                    }
                    other => warn!("Upload of '{}' failed: {}", file.file_name, other),
                }
                self.finish_upload(&mut state, file.file_name, Status::error(upload_error_text(&e)))
            }
        }
    }

    fn finish_upload(&self, state: &mut ClientState, file_name: String, status: Status) -> UploadRecord {
        let record = UploadRecord {
            file_name,
            status_text: status.text.clone(),
            status_kind: status.kind,
        };
        state.last_upload = Some(record.clone());
        self.show_status_locked(state, status);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_errors_use_server_message_or_status() {
        let with_message = PortError::Rejected { status: 400, message: Some("File type not allowed".to_string()) };
        assert_eq!(upload_error_text(&with_message), "Upload failed: File type not allowed");

        let bare = PortError::Rejected { status: 413, message: None };
        assert_eq!(upload_error_text(&bare), "Upload failed: HTTP error! status: 413");
    }

    #[test]
    fn transport_failures_get_the_fixed_upload_text() {
        let err = PortError::Transport("dns error".to_string());
        assert_eq!(upload_error_text(&err), "Upload failed: could not reach the server.");
    }

    #[test]
    fn confirmation_mentions_the_stored_name() {
        assert!(upload_confirmation_text("a.csv").contains("a.csv"));
    }
}
