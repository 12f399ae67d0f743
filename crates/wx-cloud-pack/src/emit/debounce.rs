//! Leading-edge debounce
//!
//! The first trigger after a quiet period fires; triggers arriving while the
//! gate is armed are dropped. Every trigger re-arms the gate for `wait`, so the
//! gate only reopens once triggers stop for a full window.

use std::time::Duration;
use tokio::time::Instant;

/// Default quiet window between generation passes
pub const DEFAULT_WAIT: Duration = Duration::from_millis(666);

#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Duration,
    /// `None` while idle, otherwise the instant the gate reopens
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Register a trigger; returns true when it should run
    pub fn check(&mut self) -> bool {
        let now = Instant::now();
        let armed = matches!(self.deadline, Some(deadline) if now < deadline);
        self.deadline = Some(now + self.wait);
        !armed
    }

    /// Whether a trigger issued now would be dropped
    pub fn is_armed(&self) -> bool {
        matches!(self.deadline, Some(deadline) if Instant::now() < deadline)
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_WAIT)
    }
}
