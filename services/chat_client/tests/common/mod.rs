//! Shared fixtures: a backend whose responses the test releases by hand, so
//! arrival order can be chosen freely.
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use chat_client_lib::{ChatController, ViewEvent};
use chat_relay_core::domain::{ChatReply, ChatRequest, SelectedFile, UploadReceipt};
use chat_relay_core::ports::{ChatBackend, PortError, PortResult};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;

#[derive(Default)]
pub struct ScriptedBackend {
    pub chat_replies: Mutex<VecDeque<oneshot::Receiver<PortResult<ChatReply>>>>,
    pub upload_replies: Mutex<VecDeque<oneshot::Receiver<PortResult<UploadReceipt>>>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub chat_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn script_chat(&self) -> oneshot::Sender<PortResult<ChatReply>> {
        let (tx, rx) = oneshot::channel();
        self.chat_replies.lock().unwrap().push_back(rx);
        tx
    }

    pub fn script_upload(&self) -> oneshot::Sender<PortResult<UploadReceipt>> {
        let (tx, rx) = oneshot::channel();
        self.upload_replies.lock().unwrap().push_back(rx);
        tx
    }

    pub fn reply_chat(&self, result: PortResult<ChatReply>) {
        let _ = self.script_chat().send(result);
    }

    pub fn reply_upload(&self, result: PortResult<UploadReceipt>) {
        let _ = self.script_upload().send(result);
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send_chat(&self, request: &ChatRequest) -> PortResult<ChatReply> {
        self.chat_requests.lock().unwrap().push(request.clone());
        let next = self.chat_replies.lock().unwrap().pop_front();
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(PortError::Transport("script dropped".to_string()))),
            None => Err(PortError::Transport("nothing scripted".to_string())),
        }
    }

    async fn upload_file(&self, _file: &SelectedFile) -> PortResult<UploadReceipt> {
        let next = self.upload_replies.lock().unwrap().pop_front();
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(PortError::Transport("script dropped".to_string()))),
            None => Err(PortError::Transport("nothing scripted".to_string())),
        }
    }
}

pub fn setup() -> (Arc<ScriptedBackend>, Arc<ChatController>, UnboundedReceiver<ViewEvent>) {
    let backend = Arc::new(ScriptedBackend::default());
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let controller = Arc::new(ChatController::new(
        backend.clone(),
        tx,
        Duration::from_secs(5),
    ));
    (backend, controller, rx)
}

pub fn drain(rx: &mut UnboundedReceiver<ViewEvent>) -> Vec<ViewEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn file(name: &str) -> SelectedFile {
    SelectedFile {
        file_name: name.to_string(),
        contents: Bytes::from_static(b"id,temperature\nroom1,21.5\n"),
    }
}

pub fn receipt(filename: &str, message: &str) -> UploadReceipt {
    UploadReceipt {
        filename: filename.to_string(),
        message: message.to_string(),
    }
}

pub async fn wait_for(counter: &AtomicUsize, expected: usize) {
    while counter.load(Ordering::SeqCst) < expected {
        tokio::task::yield_now().await;
    }
}

