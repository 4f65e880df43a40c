//! # Actions
//!
//! Everything that can happen to a countdown becomes an `Action`.
//! A tick of the loop? That's `Action::Tick(now)`.
//! User hits `p`? That's `Action::Pause(now)`.
//!
//! The `update()` function applies an action to the countdown and returns the
//! `Effect` the adapter has to carry out (redraw, show the pause prompt,
//! finish). No I/O happens here; time comes in with the action.
//!
//! ```text
//! Countdown + Action  →  update()  →  Effect
//! ```

use std::time::Instant;

use log::debug;

use crate::core::state::{Countdown, Outcome, Phase, ceil_seconds};

/// A command key, independent of how the terminal reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pause,
    Resume,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Tick(Instant),
    Pause(Instant),
    Resume(Instant),
    Quit,
}

impl Action {
    pub fn from_command(command: Command, now: Instant) -> Self {
        match command {
            Command::Pause => Action::Pause(now),
            Command::Resume => Action::Resume(now),
            Command::Quit => Action::Quit,
        }
    }
}

/// What the adapter must do after an `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Draw this many whole seconds.
    Redraw(u64),
    ShowPaused,
    Finish(Outcome),
}

pub fn update(countdown: &mut Countdown, action: Action) -> Effect {
    match (countdown.phase, action) {
        (Phase::Finished(_), _) => Effect::None,

        (_, Action::Quit) => {
            debug!("Quit requested in phase {:?}", countdown.phase);
            countdown.phase = Phase::Finished(Outcome::Aborted);
            Effect::Finish(Outcome::Aborted)
        }

        (Phase::Running, Action::Pause(now)) => {
            let remaining = countdown.deadline.saturating_duration_since(now);
            debug!("Paused with {:?} remaining", remaining);
            countdown.phase = Phase::Paused { remaining };
            Effect::ShowPaused
        }

        // The deadline moves; the remaining time does not.
        (Phase::Paused { remaining }, Action::Resume(now)) => {
            countdown.deadline = now + remaining;
            countdown.phase = Phase::Running;
            debug!("Resumed with {:?} remaining", remaining);
            Effect::None
        }

        (Phase::Running, Action::Tick(now)) => {
            if now >= countdown.deadline {
                countdown.phase = Phase::Finished(Outcome::Completed);
                countdown.last_rendered = 0;
                return Effect::Finish(Outcome::Completed);
            }

            let dt = ceil_seconds(countdown.deadline - now);
            if dt == countdown.last_rendered {
                return Effect::None;
            }
            countdown.last_rendered = dt;
            Effect::Redraw(dt)
        }

        // Pause while paused, resume while running, ticks while paused.
        _ => Effect::None,
    }
}
