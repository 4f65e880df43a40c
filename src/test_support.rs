//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crate::core::action::Command;
use crate::core::clock::Clock;
use crate::tui::Screen;
use crate::tui::event::KeySource;

/// A clock that only moves when the loop sleeps.
pub struct FakeClock {
    start: Instant,
    elapsed: Cell<Duration>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed.get()
    }

    fn sleep(&self, period: Duration) {
        self.elapsed.set(self.elapsed.get() + period);
    }
}

/// Hands out commands on given poll numbers (the first poll is 1).
#[derive(Default)]
pub struct ScriptedKeys {
    script: HashMap<usize, Command>,
    fail: bool,
    pub polls: usize,
}

impl ScriptedKeys {
    pub fn new(script: impl IntoIterator<Item = (usize, Command)>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Default::default()
        }
    }

    /// A key source whose every poll fails, like a missing tty.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

impl KeySource for ScriptedKeys {
    fn poll(&mut self) -> io::Result<Option<Command>> {
        self.polls += 1;
        if self.fail {
            return Err(io::Error::other("no tty"));
        }
        Ok(self.script.get(&self.polls).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    Seconds(u64),
    Paused,
}

/// Remembers every draw instead of touching a terminal.
#[derive(Default)]
pub struct RecordingScreen {
    pub shown: Vec<Shown>,
}

impl RecordingScreen {
    pub fn seconds(&self) -> Vec<u64> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Seconds(n) => Some(*n),
                Shown::Paused => None,
            })
            .collect()
    }
}

impl Screen for RecordingScreen {
    fn render(&mut self, total_seconds: u64) -> io::Result<()> {
        self.shown.push(Shown::Seconds(total_seconds));
        Ok(())
    }

    fn show_paused(&mut self) -> io::Result<()> {
        self.shown.push(Shown::Paused);
        Ok(())
    }
}
