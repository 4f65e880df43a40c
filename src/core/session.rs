//! # Session Setup
//!
//! One synchronous step between the command line and the countdown: parse
//! the duration, find the config file and merge everything into a single
//! immutable [`SessionConfig`].

use std::fmt;

use log::info;

use crate::core::config::{self, ConfigError, Defaults, Overrides, SessionConfig};
use crate::core::duration::{DurationError, DurationParser, MAX_SECONDS};

#[derive(Debug)]
pub enum SetupError {
    Duration(DurationError),
    Config(ConfigError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Duration(e) => write!(f, "invalid duration: {e}"),
            SetupError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Duration(e) => Some(e),
            SetupError::Config(e) => Some(e),
        }
    }
}

impl From<DurationError> for SetupError {
    fn from(e: DurationError) -> Self {
        SetupError::Duration(e)
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        SetupError::Config(e)
    }
}

/// Seconds for the positional tokens.
///
/// A lone number is always minutes; anything else goes to `parser`.
/// Durations longer than [`MAX_SECONDS`] either way are rejected.
pub fn parse_duration(tokens: &[String], parser: &dyn DurationParser) -> Result<i64, DurationError> {
    let seconds = match tokens {
        [single] => match single.trim().parse::<i64>() {
            Ok(minutes) => minutes.saturating_mul(60),
            Err(_) if single.trim().parse::<f64>().is_ok() => {
                parser.parse(&[single.clone(), "m".to_string()])?
            }
            Err(_) => parser.parse(tokens)?,
        },
        _ => parser.parse(tokens)?,
    };

    if seconds.unsigned_abs() > MAX_SECONDS {
        return Err(DurationError::TooLong);
    }
    Ok(seconds)
}

/// Builds the session configuration from the command line.
pub fn prepare(
    tokens: &[String],
    overrides: &Overrides,
    defaults: &Defaults,
    parser: &dyn DurationParser,
) -> Result<SessionConfig, SetupError> {
    let duration_secs = parse_duration(tokens, parser)?;
    let loaded = config::load_config(overrides.config.as_deref(), defaults)?;
    let session = config::resolve(duration_secs, overrides, loaded.as_ref(), defaults);

    info!(
        "Session: {}s, font {} ({}), command {:?}, parser {}",
        session.duration_secs,
        session.font,
        session.font_path.display(),
        session.command,
        parser.name()
    );
    Ok(session)
}
