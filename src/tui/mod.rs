//! # TUI Adapter
//!
//! The terminal-specific layer. Polls keys, redraws the digits, and turns
//! both into `core::Action` values fed through `core::action::update()`.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! ```text
//! render(initial)
//! loop {
//!     sleep(TICK)                  // fixed, never shortened by key presses
//!     poll one key                 // raw mode only for this call
//!     update(key action)           // pause / resume / quit
//!     update(Tick(now))            // redraw only when the second changes
//! }
//! ```
//!
//! The screen stays on the main terminal buffer; each redraw clears it first,
//! so the digits update in place instead of scrolling.

pub mod banner;
pub mod event;
pub mod figfont;
pub mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::core::action::{Action, Effect, update};
use crate::core::clock::Clock;
use crate::core::state::{Countdown, Outcome};
use crate::tui::banner::TextRenderer;
use crate::tui::event::KeySource;

/// One iteration of the polling loop.
pub const TICK: Duration = Duration::from_millis(100);

/// Where the countdown is shown.
pub trait Screen {
    /// Clears and redraws with `total_seconds` remaining.
    fn render(&mut self, total_seconds: u64) -> io::Result<()>;

    /// Adds the pause prompt under the current digits.
    fn show_paused(&mut self) -> io::Result<()>;
}

/// Draws on the real terminal through ratatui.
pub struct TerminalScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    renderer: Box<dyn TextRenderer>,
    banner: String,
}

impl TerminalScreen {
    pub fn new(renderer: Box<dyn TextRenderer>) -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        debug!("Terminal screen ready, text renderer: {}", renderer.name());
        Ok(Self {
            terminal,
            renderer,
            banner: String::new(),
        })
    }

    fn draw(&mut self, prompt: Option<&str>) -> io::Result<()> {
        let banner = &self.banner;
        self.terminal.draw(|frame| {
            ui::draw_countdown(frame, banner, prompt);
        })?;
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn render(&mut self, total_seconds: u64) -> io::Result<()> {
        self.banner = self.renderer.render(&ui::format_hms(total_seconds));
        self.terminal.clear()?;
        self.draw(None)
    }

    fn show_paused(&mut self) -> io::Result<()> {
        self.draw(Some(ui::PAUSE_PROMPT))
    }
}

/// Runs the countdown until it completes or the user quits.
///
/// Renders the initial value first. A failing key source is treated as "no
/// key pressed" so the countdown keeps going on a degraded terminal.
pub fn run<K, S, C>(
    countdown: &mut Countdown,
    keys: &mut K,
    screen: &mut S,
    clock: &C,
) -> io::Result<Outcome>
where
    K: KeySource + ?Sized,
    S: Screen + ?Sized,
    C: Clock + ?Sized,
{
    screen.render(countdown.last_rendered())?;
    let mut poll_failed = false;

    loop {
        clock.sleep(TICK);

        let command = match keys.poll() {
            Ok(command) => command,
            Err(e) => {
                if !poll_failed {
                    warn!("Key polling unavailable, continuing without keys: {}", e);
                    poll_failed = true;
                }
                None
            }
        };
        let now = clock.now();

        if let Some(command) = command {
            let effect = update(countdown, Action::from_command(command, now));
            if let Some(outcome) = apply(effect, screen)? {
                return Ok(outcome);
            }
        }

        let effect = update(countdown, Action::Tick(now));
        if let Some(outcome) = apply(effect, screen)? {
            return Ok(outcome);
        }
    }
}

fn apply<S: Screen + ?Sized>(effect: Effect, screen: &mut S) -> io::Result<Option<Outcome>> {
    match effect {
        Effect::None => Ok(None),
        Effect::Redraw(seconds) => {
            screen.render(seconds)?;
            Ok(None)
        }
        Effect::ShowPaused => {
            screen.show_paused()?;
            Ok(None)
        }
        Effect::Finish(Outcome::Completed) => {
            screen.render(0)?;
            Ok(Some(Outcome::Completed))
        }
        Effect::Finish(Outcome::Aborted) => Ok(Some(Outcome::Aborted)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Command;
    use crate::test_support::{FakeClock, RecordingScreen, ScriptedKeys, Shown};

    fn start(clock: &FakeClock, seconds: i64) -> Countdown {
        Countdown::start(clock.now(), seconds, None)
    }

    #[test]
    fn test_run_counts_down_to_zero() {
        let clock = FakeClock::new();
        let mut countdown = start(&clock, 3);
        let mut keys = ScriptedKeys::default();
        let mut screen = RecordingScreen::default();

        let outcome = run(&mut countdown, &mut keys, &mut screen, &clock).unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(
            screen.shown,
            vec![Shown::Seconds(3), Shown::Seconds(2), Shown::Seconds(1), Shown::Seconds(0)]
        );
        assert_eq!(clock.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn test_run_zero_duration_renders_zero_and_stops() {
        let clock = FakeClock::new();
        let mut countdown = start(&clock, 0);
        let mut keys = ScriptedKeys::default();
        let mut screen = RecordingScreen::default();

        let outcome = run(&mut countdown, &mut keys, &mut screen, &clock).unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(screen.shown, vec![Shown::Seconds(0), Shown::Seconds(0)]);
        assert_eq!(clock.elapsed(), TICK);
    }

    #[test]
    fn test_run_no_consecutive_duplicate_redraws() {
        let clock = FakeClock::new();
        let mut countdown = start(&clock, 75);
        let mut keys = ScriptedKeys::default();
        let mut screen = RecordingScreen::default();

        run(&mut countdown, &mut keys, &mut screen, &clock).unwrap();

        let seconds: Vec<u64> = screen.seconds();
        assert_eq!(seconds.len(), 76);
        assert!(seconds.windows(2).all(|w| w[0] == w[1] + 1));
    }

    #[test]
    fn test_run_pause_does_not_consume_time() {
        let clock = FakeClock::new();
        let mut countdown = start(&clock, 2);
        // Pause on tick 5, resume on tick 305 (30 seconds later).
        let mut keys = ScriptedKeys::new([(5, Command::Pause), (305, Command::Resume)]);
        let mut screen = RecordingScreen::default();

        let outcome = run(&mut countdown, &mut keys, &mut screen, &clock).unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(
            screen.shown,
            vec![
                Shown::Seconds(2),
                Shown::Paused,
                Shown::Seconds(1),
                Shown::Seconds(0)
            ]
        );
        assert_eq!(clock.elapsed(), Duration::from_millis(32_000));
    }

    #[test]
    fn test_run_ignores_other_keys_while_paused() {
        let clock = FakeClock::new();
        let mut countdown = start(&clock, 1);
        let mut keys = ScriptedKeys::new([
            (1, Command::Pause),
            (2, Command::Pause),
            (50, Command::Resume),
        ]);
        let mut screen = RecordingScreen::default();

        run(&mut countdown, &mut keys, &mut screen, &clock).unwrap();

        assert_eq!(
            screen.shown,
            vec![Shown::Seconds(1), Shown::Paused, Shown::Seconds(0)]
        );
        // 1 tick running, 49 paused, 9 more running before the deadline.
        assert_eq!(clock.elapsed(), Duration::from_millis(5_900));
    }

    #[test]
    fn test_run_quit_while_running() {
        let clock = FakeClock::new();
        let mut countdown = start(&clock, 60);
        let mut keys = ScriptedKeys::new([(3, Command::Quit)]);
        let mut screen = RecordingScreen::default();

        let outcome = run(&mut countdown, &mut keys, &mut screen, &clock).unwrap();

        assert_eq!(outcome, Outcome::Aborted);
        assert_eq!(screen.shown, vec![Shown::Seconds(60)]);
    }

    #[test]
    fn test_run_quit_while_paused() {
        let clock = FakeClock::new();
        let mut countdown = start(&clock, 60);
        let mut keys = ScriptedKeys::new([(3, Command::Pause), (40, Command::Quit)]);
        let mut screen = RecordingScreen::default();

        let outcome = run(&mut countdown, &mut keys, &mut screen, &clock).unwrap();

        assert_eq!(outcome, Outcome::Aborted);
        assert_eq!(screen.shown, vec![Shown::Seconds(60), Shown::Paused]);
    }

    #[test]
    fn test_run_survives_failing_key_source() {
        let clock = FakeClock::new();
        let mut countdown = start(&clock, 1);
        let mut keys = ScriptedKeys::failing();
        let mut screen = RecordingScreen::default();

        let outcome = run(&mut countdown, &mut keys, &mut screen, &clock).unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(screen.seconds(), vec![1, 0]);
        assert_eq!(keys.polls, 10);
    }
}
