//! services/chat_client/src/console.rs
//!
//! The terminal front-end: reads commands from an input stream, hands each
//! one to the controller as its own task, and prints the view events.

use crate::controller::{chat_task::TYPING_TEXT, events::ViewEvent, ChatController};
use crate::error::ClientError;
use bytes::Bytes;
use chat_relay_core::domain::{SelectedFile, Sender, Status, StatusKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub const HELP_TEXT: &str =
    "Type a message to chat. Commands: /upload <path>, /status, /help, /quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    /// `None` when no path was given.
    Upload(Option<PathBuf>),
    Status,
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head {
        "/upload" if rest.is_empty() => Command::Upload(None),
        "/upload" => Command::Upload(Some(PathBuf::from(rest))),
        "/status" => Command::Status,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Say(line.to_string()),
    }
}

/// Reads a file from disk into a selection ready for upload.
pub async fn load_selection(path: &Path) -> std::io::Result<SelectedFile> {
    let contents = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile {
        file_name,
        contents: Bytes::from(contents),
    })
}

/// Uploads the file at `path`. A missing path is passed through as "no file
/// selected"; an unreadable one is reported locally without a request.
pub async fn upload_from_path(controller: Arc<ChatController>, path: Option<PathBuf>) {
    let selection = match path {
        None => None,
        Some(path) => match load_selection(&path).await {
            Ok(file) => Some(file),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                controller
                    .show_status(Status::error(format!("Could not read {}: {}", path.display(), e)))
                    .await;
                return;
            }
        },
    };
    controller.upload_file(selection).await;
}

/// The main input loop. Each action runs as its own task so the loop keeps
/// reading while requests are in flight; on end of input it waits for them.
pub async fn run<R>(controller: Arc<ChatController>, input: R) -> Result<(), ClientError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Command::Say(text) => {
                let controller = controller.clone();
                in_flight.spawn(async move {
                    controller.send_message(&text).await;
                });
            }
            Command::Upload(path) => {
                in_flight.spawn(upload_from_path(controller.clone(), path));
            }
            Command::Status => {
                let remembered = controller.snapshot().await.last_uploaded_file;
                let text = match remembered {
                    Some(name) => format!("Questions will use '{}'.", name),
                    None => "No file uploaded yet.".to_string(),
                };
                controller.show_status(Status::info(text)).await;
            }
            Command::Help => controller.show_status(Status::info(HELP_TEXT)).await,
            Command::Quit => {
                info!("Quit requested.");
                break;
            }
        }

        // Reap whatever already finished so the set does not grow unbounded.
        while let Some(joined) = in_flight.try_join_next() {
            if let Err(e) = joined {
                error!("Console action panicked: {}", e);
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!("Console action panicked: {}", e);
        }
    }
    Ok(())
}

/// How one event reads in the terminal, if it shows at all.
///
/// The user's own lines are not repeated since the terminal already echoed them.
pub fn format_event(event: &ViewEvent) -> Option<String> {
    match event {
        ViewEvent::MessageAppended { message } => match message.sender {
            Sender::User => None,
            Sender::Bot => Some(format!("bot> {}", message.text)),
        },
        ViewEvent::TypingStarted { request } => Some(format!("   {} ({})", TYPING_TEXT, request)),
        ViewEvent::StatusShown { status } => {
            let tag = match status.kind {
                StatusKind::Info => "info",
                StatusKind::Success => "ok",
                StatusKind::Error => "error",
            };
            Some(format!("[{}] {}", tag, status.text))
        }
        ViewEvent::InputCleared | ViewEvent::TypingStopped { .. } | ViewEvent::StatusCleared => None,
    }
}

/// Prints view events until every sender is gone or `shutdown` fires.
///
/// Events already queued when `shutdown` fires are still printed.
pub async fn render_events<W>(
    mut events: UnboundedReceiver<ViewEvent>,
    mut out: W,
    shutdown: CancellationToken,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            biased;
            event = events.recv() => match event {
                Some(event) => write_event(&mut out, &event).await?,
                None => break,
            },
            _ = shutdown.cancelled() => {
                while let Ok(event) = events.try_recv() {
                    write_event(&mut out, &event).await?;
                }
                break;
            }
        }
    }
    Ok(())
}

async fn write_event<W>(out: &mut W, event: &ViewEvent) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if let Some(line) = format_event(event) {
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
    }
    Ok(())
}
