//! How the process ends once the countdown is over.

use crate::core::state::Outcome;

/// Setup, terminal and usage errors.
pub const EXIT_FAILURE: u8 = 1;
/// The user quit before the deadline.
pub const EXIT_QUIT: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit<'a> {
    /// Leave with this status.
    Code(u8),
    /// Replace the process with the post-command.
    HandOff(&'a str),
}

/// Only an uninterrupted countdown reaches the post-command.
pub fn finish(outcome: Outcome, post_command: Option<&str>) -> Exit<'_> {
    match (outcome, post_command) {
        (Outcome::Aborted, _) => Exit::Code(EXIT_QUIT),
        (Outcome::Completed, Some(command)) => Exit::HandOff(command),
        (Outcome::Completed, None) => Exit::Code(0),
    }
}
