//! crates/chat_relay_core/src/status.rs
//!
//! The status area: one visible line at a time, tagged with a generation so
//! that an expired timer from an older line can never erase a newer one.

use crate::domain::Status;

#[derive(Debug, Default, Clone)]
pub struct StatusBoard {
    current: Option<Status>,
    generation: u64,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever is shown and returns the generation of the new line.
    pub fn show(&mut self, status: Status) -> u64 {
        self.generation += 1;
        self.current = Some(status);
        self.generation
    }

    /// Clears the line only if it is still the one shown at `generation`.
    pub fn clear_if_current(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn current(&self) -> Option<&Status> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_generation_does_not_clear_newer_status() {
        let mut board = StatusBoard::new();
        let first = board.show(Status::info("Uploading a.csv..."));
        let second = board.show(Status::success("ok"));

        assert!(!board.clear_if_current(first));
        assert_eq!(board.current(), Some(&Status::success("ok")));

        assert!(board.clear_if_current(second));
        assert_eq!(board.current(), None);
        assert!(!board.clear_if_current(second));
    }
}
