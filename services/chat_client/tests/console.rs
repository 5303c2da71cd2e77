//! The terminal input loop and file selection, driven with in-memory input.

mod common;

use chat_client_lib::console::{self, HELP_TEXT};
use chat_client_lib::controller::upload_task::NO_FILE_SELECTED_TEXT;
use chat_relay_core::domain::{ChatReply, Sender, Status, StatusKind};
use common::{receipt, setup, wait_for};
use std::sync::atomic::Ordering;

#[tokio::test]
async fn unreadable_path_shows_error_without_request() {
    let (backend, controller, _rx) = setup();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");

    console::upload_from_path(controller.clone(), Some(missing)).await;

    assert_eq!(backend.upload_calls.load(Ordering::SeqCst), 0);
    let snapshot = controller.snapshot().await;
    let status = snapshot.status.unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.starts_with("Could not read"));
    assert!(status.text.contains("missing.csv"));
    assert_eq!(snapshot.last_uploaded_file, None);
}

#[tokio::test]
async fn readable_path_is_uploaded_under_its_file_name() {
    let (backend, controller, _rx) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sensors.csv");
    std::fs::write(&path, "id,temperature\nroom1,21.5\n").unwrap();
    backend.reply_upload(Ok(receipt("sensors.csv", "File uploaded successfully")));

    console::upload_from_path(controller.clone(), Some(path)).await;

    assert_eq!(backend.upload_calls.load(Ordering::SeqCst), 1);
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.last_uploaded_file.as_deref(), Some("sensors.csv"));
    assert_eq!(snapshot.status, Some(Status::success("File uploaded successfully")));
}

#[tokio::test]
async fn run_dispatches_lines_until_quit() {
    let (backend, controller, _rx) = setup();
    backend.reply_chat(Ok(ChatReply { response: "hi".to_string() }));

    let input = b"hello\n   \n/upload\n/quit\nnever sent\n";
    console::run(controller.clone(), &input[..]).await.unwrap();

    assert_eq!(backend.chat_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.chat_requests.lock().unwrap()[0].message, "hello");
    assert_eq!(backend.upload_calls.load(Ordering::SeqCst), 0);

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.status, Some(Status::error(NO_FILE_SELECTED_TEXT)));
    let texts: Vec<(Sender, &str)> = snapshot
        .messages
        .iter()
        .map(|m| (m.sender, m.text.as_str()))
        .collect();
    assert_eq!(texts, vec![(Sender::User, "hello"), (Sender::Bot, "hi")]);
}

#[tokio::test]
async fn run_waits_for_in_flight_actions_at_end_of_input() {
    let (backend, controller, _rx) = setup();
    let reply = backend.script_chat();

    let loop_task = tokio::spawn(console::run(controller.clone(), &b"question\n"[..]));
    wait_for(&backend.chat_calls, 1).await;
    tokio::task::yield_now().await;
    assert!(!loop_task.is_finished());

    reply.send(Ok(ChatReply { response: "answer".to_string() })).unwrap();
    loop_task.await.unwrap().unwrap();

    let snapshot = controller.snapshot().await;
    assert!(!snapshot.typing);
    assert_eq!(snapshot.messages.last().unwrap().text, "answer");
}

#[tokio::test]
async fn status_and_help_commands_report_through_the_status_line() {
    let (backend, controller, _rx) = setup();

    console::run(controller.clone(), &b"/status\n"[..]).await.unwrap();
    assert_eq!(
        controller.snapshot().await.status,
        Some(Status::info("No file uploaded yet."))
    );

    backend.reply_upload(Ok(receipt("a.csv", "ok")));
    controller.upload_file(Some(common::file("a.csv"))).await;
    console::run(controller.clone(), &b"/status\n"[..]).await.unwrap();
    assert_eq!(
        controller.snapshot().await.status,
        Some(Status::info("Questions will use 'a.csv'."))
    );

    console::run(controller.clone(), &b"/help\n"[..]).await.unwrap();
    assert_eq!(controller.snapshot().await.status, Some(Status::info(HELP_TEXT)));
    assert_eq!(backend.chat_calls.load(Ordering::SeqCst), 0);
}
