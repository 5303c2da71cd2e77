pub mod adapters;
pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod telemetry;

pub use controller::{events::ViewEvent, ChatController};
