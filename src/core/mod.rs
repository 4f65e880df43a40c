//! # Core Countdown Logic
//!
//! This module contains clti's business logic.
//! It knows nothing about terminals, fonts or key codes.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Countdown (state)    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Session setup        │
//!                    │                         │
//!                    │  No terminal. Pure.     │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Countdown` struct: deadline, phase, last shown value
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`clock`]: Time source used by the run loop
//! - [`config`]: Defaults, config file loading and three-tier resolution
//! - [`duration`]: Duration parsers
//! - [`exit`]: Exit status or post-command hand-off for a finished countdown
//! - [`session`]: Session setup feeding the countdown

pub mod action;
pub mod clock;
pub mod config;
pub mod duration;
pub mod exit;
pub mod session;
pub mod state;
