//! services/chat_client/src/adapters/http_backend.rs
//!
//! This module contains the adapter for the assistant backend's REST API.
//! It implements the `ChatBackend` port from the `core` crate using `reqwest`.

use async_trait::async_trait;
use chat_relay_core::domain::{ChatReply, ChatRequest, SelectedFile, UploadReceipt};
use chat_relay_core::ports::{ChatBackend, PortError, PortResult};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

//=========================================================================================
// Wire Bodies
//=========================================================================================

#[derive(Serialize)]
struct ChatBody<'a> {
    message: &'a str,
    last_uploaded_file: Option<&'a str>,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    response: String,
}

#[derive(Deserialize)]
struct UploadResponseBody {
    filename: String,
    message: String,
}

/// Error body of `/chat`: the message travels in `response`.
#[derive(Deserialize)]
struct ChatErrorBody {
    response: Option<String>,
}

/// Error body of `/upload`: the message travels in `message`.
#[derive(Deserialize)]
struct UploadErrorBody {
    message: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `ChatBackend` port over plain HTTP.
#[derive(Clone)]
pub struct HttpChatBackend {
    client: Client,
    base_url: String,
}

impl HttpChatBackend {
    /// Creates a new `HttpChatBackend` rooted at `base_url`.
    ///
    /// With no `timeout` the transport's own defaults apply.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turns a non-success response into `PortError::Rejected`, keeping whatever
/// message `read_message` finds in the body.
async fn rejection<F>(response: Response, read_message: F) -> PortError
where
    F: FnOnce(&str) -> Option<String>,
{
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = read_message(&text);
    if message.is_none() {
        debug!("Error body from backend carried no usable message (status {})", status);
    }
    PortError::Rejected { status, message }
}

fn chat_error_message(text: &str) -> Option<String> {
    serde_json::from_str::<ChatErrorBody>(text).ok().and_then(|body| body.response)
}

fn upload_error_message(text: &str) -> Option<String> {
    serde_json::from_str::<UploadErrorBody>(text).ok().and_then(|body| body.message)
}

/// A failure while reading a success body. Timeouts and broken connections
/// are transport failures; anything else means the body was not understood.
fn body_error(e: reqwest::Error, what: &str) -> PortError {
    if e.is_timeout() || e.is_request() || e.is_connect() || e.is_body() {
        return transport(e);
    }
    PortError::Unexpected(format!("Invalid {} response: {}", what, e))
}

fn transport(e: reqwest::Error) -> PortError {
    warn!("Request to backend failed before a response: {}", e);
    PortError::Transport(e.to_string())
}

//=========================================================================================
// `ChatBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send_chat(&self, request: &ChatRequest) -> PortResult<ChatReply> {
        let body = ChatBody {
            message: &request.message,
            last_uploaded_file: request.last_uploaded_file.as_deref(),
        };

        let response = self
            .client
            .post(self.endpoint("chat"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(rejection(response, chat_error_message).await);
        }

        let parsed: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| body_error(e, "chat"))?;

        Ok(ChatReply { response: parsed.response })
    }

    async fn upload_file(&self, file: &SelectedFile) -> PortResult<UploadReceipt> {
        let part = Part::bytes(file.contents.to_vec()).file_name(file.file_name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(rejection(response, upload_error_message).await);
        }

        let parsed: UploadResponseBody = response
            .json()
            .await
            .map_err(|e| body_error(e, "upload"))?;

        Ok(UploadReceipt {
            filename: parsed.filename,
            message: parsed.message,
        })
    }
}
