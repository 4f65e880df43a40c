//! # Duration Parsing
//!
//! Turns the positional command-line tokens into a number of seconds.
//!
//! Two parsers implement [`DurationParser`]:
//!
//! - [`SimpleDurationParser`] reads `value unit` pairs (`1 h 30 m`).
//! - [`NaturalDurationParser`] also understands compact and spelled-out forms
//!   (`1h30m`, `1.5 hours`, `2 minutes and 10 seconds`, `1:30:00`).
//!
//! [`default_parser`] picks one at startup; the natural parser is compiled in
//! with the `natural-duration` feature.

use std::fmt;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;

/// Longest accepted countdown, in either direction: 100 years.
pub const MAX_SECONDS: u64 = 100 * 365 * 24 * 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    Empty,
    /// A token that should have been a number.
    InvalidNumber(String),
    /// A word that is not a known time unit.
    UnknownUnit(String),
    /// A clock form like `1:2:3:4` or `1:xx`.
    InvalidClock(String),
    /// More than [`MAX_SECONDS`] either way.
    TooLong,
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationError::Empty => write!(f, "no duration given"),
            DurationError::InvalidNumber(s) => write!(f, "not a number: {s:?}"),
            DurationError::UnknownUnit(s) => write!(f, "unknown time unit: {s:?}"),
            DurationError::InvalidClock(s) => write!(f, "invalid clock time: {s:?}"),
            DurationError::TooLong => write!(f, "longer than {MAX_SECONDS} seconds"),
        }
    }
}

impl std::error::Error for DurationError {}

pub trait DurationParser {
    /// Returns the name of the parser.
    fn name(&self) -> &str;

    /// Parses the tokens into a (possibly negative) number of seconds.
    ///
    /// A number without a unit is minutes in every implementation, and a
    /// leading `-` makes a value negative.
    fn parse(&self, tokens: &[String]) -> Result<i64, DurationError>;
}

/// The parser compiled into this build.
pub fn default_parser() -> Box<dyn DurationParser> {
    #[cfg(feature = "natural-duration")]
    {
        Box::new(NaturalDurationParser)
    }
    #[cfg(not(feature = "natural-duration"))]
    {
        Box::new(SimpleDurationParser)
    }
}

/// Seconds per unit, chosen by the unit word's first letter.
/// Anything unrecognised counts as minutes.
fn simple_unit_seconds(unit: Option<&str>) -> i64 {
    let first = unit
        .and_then(|u| u.chars().next())
        .map(|c| c.to_ascii_lowercase());
    match first {
        Some('h') => 3600,
        Some('s') => 1,
        _ => 60,
    }
}

// ============================================================================
// Simple parser
// ============================================================================

/// Sums `value unit` pairs: `1 h 20 m 5 s`. A value without a unit is minutes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleDurationParser;

impl DurationParser for SimpleDurationParser {
    fn name(&self) -> &str {
        "simple"
    }

    fn parse(&self, tokens: &[String]) -> Result<i64, DurationError> {
        if tokens.is_empty() {
            return Err(DurationError::Empty);
        }

        let mut total: i64 = 0;
        for pair in tokens.chunks(2) {
            let value: i64 = pair[0]
                .trim()
                .parse()
                .map_err(|_| DurationError::InvalidNumber(pair[0].clone()))?;
            let unit = pair.get(1).map(String::as_str);
            total = total.saturating_add(value.saturating_mul(simple_unit_seconds(unit)));
        }
        Ok(total)
    }
}

// ============================================================================
// Natural parser
// ============================================================================

/// Free-form durations.
///
/// Numbers may be decimals and are followed by an optional unit word matched
/// by prefix (`w`, `d`, `h`, `m`, `s`). A number without a unit is minutes.
/// `and` and commas are ignored. `m:s` and `h:m:s` clock forms are accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalDurationParser;

#[derive(Debug, PartialEq)]
enum Token {
    Number(f64),
    Clock(f64),
    Word(String),
}

impl DurationParser for NaturalDurationParser {
    fn name(&self) -> &str {
        "natural"
    }

    fn parse(&self, tokens: &[String]) -> Result<i64, DurationError> {
        let input = tokens.join(" ").to_lowercase();
        let lexed = lex(&input)?;
        if lexed.is_empty() {
            return Err(DurationError::Empty);
        }

        let mut total = 0.0;
        let mut pending: Option<f64> = None;

        for token in lexed {
            match token {
                Token::Number(n) => {
                    if let Some(previous) = pending.replace(n) {
                        total += previous * MINUTE;
                    }
                }
                Token::Clock(seconds) => {
                    if let Some(previous) = pending.take() {
                        total += previous * MINUTE;
                    }
                    total += seconds;
                }
                Token::Word(word) if word == "and" => {}
                Token::Word(word) => {
                    let scale = natural_unit_seconds(&word)
                        .ok_or_else(|| DurationError::UnknownUnit(word.clone()))?;
                    let value = pending
                        .take()
                        .ok_or_else(|| DurationError::InvalidNumber(word.clone()))?;
                    total += value * scale;
                }
            }
        }
        if let Some(previous) = pending {
            total += previous * MINUTE;
        }

        Ok(total.round() as i64)
    }
}

fn natural_unit_seconds(word: &str) -> Option<f64> {
    match word.chars().next()? {
        'w' => Some(WEEK),
        'd' => Some(DAY),
        'h' => Some(HOUR),
        'm' => Some(MINUTE),
        's' => Some(1.0),
        _ => None,
    }
}

fn lex(input: &str) -> Result<Vec<Token>, DurationError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    let mut sign = 1.0;

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() || c == ',' {
            chars.next();
        } else if c == '-' {
            chars.next();
            // A sign binds to the number right after it.
            match chars.peek() {
                Some(&(_, d)) if d.is_ascii_digit() || d == '.' => sign = -sign,
                _ => return Err(DurationError::UnknownUnit(c.to_string())),
            }
        } else if c.is_ascii_digit() || c == '.' {
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_digit() || d == '.' || d == ':' {
                    end = i + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let text = &input[start..end];
            if text.contains(':') {
                tokens.push(Token::Clock(sign * parse_clock(text)?));
            } else {
                let n: f64 = text
                    .parse()
                    .map_err(|_| DurationError::InvalidNumber(text.to_string()))?;
                tokens.push(Token::Number(sign * n));
            }
            sign = 1.0;
        } else if c.is_alphabetic() {
            let mut end = start;
            while let Some(&(i, a)) = chars.peek() {
                if a.is_alphabetic() {
                    end = i + a.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Word(input[start..end].to_string()));
        } else {
            return Err(DurationError::UnknownUnit(c.to_string()));
        }
    }

    Ok(tokens)
}

/// `m:s` or `h:m:s`.
fn parse_clock(text: &str) -> Result<f64, DurationError> {
    let invalid = || DurationError::InvalidClock(text.to_string());
    let parts = text
        .split(':')
        .map(|p| p.parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [m, s] => Ok(m * MINUTE + s),
        [h, m, s] => Ok(h * HOUR + m * MINUTE + s),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_simple_pairs() {
        let p = SimpleDurationParser;
        assert_eq!(p.parse(&tokens("1 h 30 m")), Ok(5400));
        assert_eq!(p.parse(&tokens("2 hours 5 seconds")), Ok(7205));
        assert_eq!(p.parse(&tokens("10 S")), Ok(10));
    }

    #[test]
    fn test_simple_missing_or_unknown_unit_is_minutes() {
        let p = SimpleDurationParser;
        assert_eq!(p.parse(&tokens("5")), Ok(300));
        assert_eq!(p.parse(&tokens("1 h 5")), Ok(3900));
        assert_eq!(p.parse(&tokens("3 fortnights")), Ok(180));
    }

    #[test]
    fn test_simple_rejects_non_numbers() {
        let p = SimpleDurationParser;
        assert_eq!(
            p.parse(&tokens("ten m")),
            Err(DurationError::InvalidNumber("ten".to_string()))
        );
        assert_eq!(p.parse(&[]), Err(DurationError::Empty));
    }

    #[test]
    fn test_simple_negative_values() {
        assert_eq!(SimpleDurationParser.parse(&tokens("-1 m")), Ok(-60));
    }

    #[test]
    fn test_natural_spelled_out() {
        let p = NaturalDurationParser;
        assert_eq!(p.parse(&tokens("1 hour 30 minutes")), Ok(5400));
        assert_eq!(p.parse(&tokens("2 minutes and 10 seconds")), Ok(130));
        assert_eq!(p.parse(&tokens("1 day, 2 hours")), Ok(93_600));
        assert_eq!(p.parse(&tokens("1 week")), Ok(604_800));
    }

    #[test]
    fn test_natural_compact() {
        let p = NaturalDurationParser;
        assert_eq!(p.parse(&tokens("1h30m")), Ok(5400));
        assert_eq!(p.parse(&tokens("90s")), Ok(90));
        assert_eq!(p.parse(&tokens("1H 5M 3S")), Ok(3903));
    }

    #[test]
    fn test_natural_decimals_round_to_seconds() {
        let p = NaturalDurationParser;
        assert_eq!(p.parse(&tokens("1.5 hours")), Ok(5400));
        assert_eq!(p.parse(&tokens("0.01 m")), Ok(1));
    }

    #[test]
    fn test_natural_unitless_number_is_minutes() {
        let p = NaturalDurationParser;
        assert_eq!(p.parse(&tokens("45")), Ok(2700));
        assert_eq!(p.parse(&tokens("1.5")), Ok(90));
        assert_eq!(p.parse(&tokens("1 h 30")), Ok(5400));
        assert_eq!(p.parse(&tokens("30s 1")), Ok(90));
    }

    #[test]
    fn test_unitless_numbers_agree_across_parsers() {
        for input in ["5", "1 h 30", "-1 m", "2 h -15 m"] {
            assert_eq!(
                NaturalDurationParser.parse(&tokens(input)),
                SimpleDurationParser.parse(&tokens(input)),
                "{input}"
            );
        }
    }

    #[test]
    fn test_natural_negative_values() {
        let p = NaturalDurationParser;
        assert_eq!(p.parse(&tokens("-1 m")), Ok(-60));
        assert_eq!(p.parse(&tokens("-90s")), Ok(-90));
        assert_eq!(p.parse(&tokens("-1:30")), Ok(-90));
        assert_eq!(
            p.parse(&tokens("- 5 m")),
            Err(DurationError::UnknownUnit("-".to_string()))
        );
    }

    #[test]
    fn test_natural_clock_forms() {
        let p = NaturalDurationParser;
        assert_eq!(p.parse(&tokens("1:30")), Ok(90));
        assert_eq!(p.parse(&tokens("1:00:05")), Ok(3605));
        assert_eq!(
            p.parse(&tokens("1:2:3:4")),
            Err(DurationError::InvalidClock("1:2:3:4".to_string()))
        );
    }

    #[test]
    fn test_natural_errors() {
        let p = NaturalDurationParser;
        assert_eq!(
            p.parse(&tokens("5 parsecs")),
            Err(DurationError::UnknownUnit("parsecs".to_string()))
        );
        assert_eq!(
            p.parse(&tokens("minutes")),
            Err(DurationError::InvalidNumber("minutes".to_string()))
        );
        assert_eq!(p.parse(&tokens("and")), Ok(0));
        assert_eq!(p.parse(&[]), Err(DurationError::Empty));
        assert!(p.parse(&tokens("5 m!")).is_err());
    }

    #[test]
    fn test_default_parser_name() {
        let expected = if cfg!(feature = "natural-duration") {
            "natural"
        } else {
            "simple"
        };
        assert_eq!(default_parser().name(), expected);
    }
}
