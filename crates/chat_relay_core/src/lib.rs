pub mod domain;
pub mod ports;
pub mod session;
pub mod status;
pub mod transcript;

pub use domain::{
    ChatMessage, ChatReply, ChatRequest, RequestId, SelectedFile, Sender, Status, StatusKind,
    UploadReceipt, UploadRecord,
};
pub use ports::{ChatBackend, PortError, PortResult};
pub use session::SessionState;
pub use status::StatusBoard;
pub use transcript::Transcript;
