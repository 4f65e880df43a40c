//! # Countdown State
//!
//! The one piece of mutable state in clti: a single countdown session.
//!
//! ```text
//! Countdown
//! ├── deadline: Instant               // when the countdown hits zero
//! ├── last_rendered: u64              // whole seconds currently on screen
//! ├── phase: Phase                    // Running / Paused / Finished
//! └── post_command: Option<String>    // handed off to on completion
//! ```
//!
//! State changes only happen through `update(countdown, action)` in action.rs.

use std::time::{Duration, Instant};

/// Deadline cap for countdowns too long to represent: 100 years.
pub const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

/// How a finished countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Deadline reached without interruption.
    Completed,
    /// The user pressed quit.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Holds the time that was left when the pause began.
    Paused { remaining: Duration },
    Finished(Outcome),
}

#[derive(Debug)]
pub struct Countdown {
    pub(crate) deadline: Instant,
    pub(crate) last_rendered: u64,
    pub(crate) phase: Phase,
    post_command: Option<String>,
}

impl Countdown {
    /// Starts a countdown of `seconds` at `now`.
    ///
    /// Negative durations are allowed and produce a deadline that has already
    /// passed; the first rendered value is clamped to zero. A deadline beyond
    /// what `Instant` can hold is capped at [`FAR_FUTURE`] from now.
    pub fn start(now: Instant, seconds: i64, post_command: Option<String>) -> Self {
        let span = Duration::from_secs(seconds.unsigned_abs());
        let deadline = if seconds >= 0 {
            now.checked_add(span)
                .or_else(|| now.checked_add(FAR_FUTURE))
                .unwrap_or(now)
        } else {
            now.checked_sub(span).unwrap_or(now)
        };

        Self {
            deadline,
            last_rendered: seconds.max(0) as u64,
            phase: Phase::Running,
            post_command,
        }
    }

    /// Whole seconds currently shown on screen.
    pub fn last_rendered(&self) -> u64 {
        self.last_rendered
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn post_command(&self) -> Option<&str> {
        self.post_command.as_deref()
    }

    /// Time left before the deadline, or the frozen value while paused.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Paused { remaining } => remaining,
            Phase::Finished(_) => Duration::ZERO,
            Phase::Running => self.deadline.saturating_duration_since(now),
        }
    }
}

/// Rounds a remaining duration up to whole seconds.
///
/// The display must never show less time than is actually left.
pub fn ceil_seconds(remaining: Duration) -> u64 {
    remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
}
