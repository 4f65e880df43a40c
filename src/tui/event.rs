use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::core::action::Command;

/// Anything the countdown loop can ask for the next command key.
pub trait KeySource {
    /// Returns at most one pending command without blocking.
    ///
    /// `Err` is reserved for terminal-capability failures (no tty, raw mode
    /// refused). Nothing pending is `Ok(None)`.
    fn poll(&mut self) -> io::Result<Option<Command>>;
}

/// Reads keys from the controlling terminal.
///
/// Raw mode (no echo, no line buffering) is only switched on for the duration
/// of each poll, so the terminal is in its normal state between ticks.
#[derive(Debug, Default)]
pub struct KeyPoller;

impl KeySource for KeyPoller {
    fn poll(&mut self) -> io::Result<Option<Command>> {
        let _raw = RawModeGuard::enter()?;
        Ok(read_pending().and_then(|key| map_key(&key)))
    }
}

/// Enables raw mode and restores the previous mode on drop.
struct RawModeGuard {
    enabled_here: bool,
}

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        let already_raw = terminal::is_raw_mode_enabled()?;
        if !already_raw {
            terminal::enable_raw_mode()?;
        }
        Ok(Self {
            enabled_here: !already_raw,
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.enabled_here {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// One pending key press, if any. Read errors count as "no key".
fn read_pending() -> Option<KeyEvent> {
    match event::poll(Duration::ZERO) {
        Ok(true) => match event::read() {
            Ok(Event::Key(key)) => {
                log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
                Some(key)
            }
            Ok(_) => None,
            Err(e) => {
                log::debug!("Key read failed: {}", e);
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            log::debug!("Key poll failed: {}", e);
            None
        }
    }
}

/// Map a key press to a countdown command.
pub fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
        (_, KeyCode::Char('p') | KeyCode::Char('P')) => Some(Command::Pause),
        (_, KeyCode::Char('r') | KeyCode::Char('R')) => Some(Command::Resume),
        (_, KeyCode::Char('q') | KeyCode::Char('Q')) => Some(Command::Quit),
        _ => None,
    }
}
