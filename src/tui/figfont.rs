//! # FIGlet fonts
//!
//! Reader for `flf2a` font files and a full-width typesetter.
//!
//! ```text
//! flf2a$ 6 5 20 15 3          ← signature+hardblank, height, baseline,
//! comment line 1                max length, old layout, comment lines
//! comment line 2
//! comment line 3
//! $@                          ← glyph for ' ' (32), `height` rows, each
//! $@                            ending in an endmark; the last row ends
//! ...                           with a doubled endmark
//! $@@
//! ```
//!
//! Glyphs follow for every printable ASCII character from 32 to 126. Extra
//! code-tagged glyphs after those are ignored. Glyphs are set side by side
//! without smushing.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

const SIGNATURE: &str = "flf2a";
const FIRST_CHAR: u8 = b' ';
const LAST_CHAR: u8 = b'~';

#[derive(Debug)]
pub enum FontError {
    Io(io::Error),
    /// Missing or malformed header line.
    Header(String),
    /// The file ended before all required glyphs were read.
    Truncated { glyph: char },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Io(e) => write!(f, "font I/O error: {e}"),
            FontError::Header(msg) => write!(f, "bad font header: {msg}"),
            FontError::Truncated { glyph } => {
                write!(f, "font ends before glyph {glyph:?}")
            }
        }
    }
}

impl std::error::Error for FontError {}

impl From<io::Error> for FontError {
    fn from(e: io::Error) -> Self {
        FontError::Io(e)
    }
}

#[derive(Debug, Clone)]
pub struct FigFont {
    height: usize,
    glyphs: HashMap<char, Vec<String>>,
}

impl FigFont {
    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, FontError> {
        let mut lines = contents.lines().map(|l| l.trim_end_matches('\r'));

        let header = lines
            .next()
            .ok_or_else(|| FontError::Header("empty file".to_string()))?;
        let (hardblank, height, comment_lines) = parse_header(header)?;

        for _ in 0..comment_lines {
            lines.next();
        }

        let mut glyphs = HashMap::with_capacity(usize::from(LAST_CHAR - FIRST_CHAR) + 1);
        for code in FIRST_CHAR..=LAST_CHAR {
            let ch = char::from(code);
            let mut rows = Vec::with_capacity(height);
            for _ in 0..height {
                let line = lines.next().ok_or(FontError::Truncated { glyph: ch })?;
                rows.push(strip_endmarks(line).replace(hardblank, " "));
            }
            glyphs.insert(ch, rows);
        }

        Ok(Self { height, glyphs })
    }

    /// Typesets `text`, one output line per font row.
    ///
    /// Characters without a glyph are skipped.
    pub fn render(&self, text: &str) -> String {
        let mut rows = vec![String::new(); self.height];
        for ch in text.chars() {
            if let Some(glyph) = self.glyphs.get(&ch) {
                for (row, part) in rows.iter_mut().zip(glyph) {
                    row.push_str(part);
                }
            }
        }
        rows.join("\n")
    }
}

/// Returns `(hardblank, height, comment_lines)`.
fn parse_header(header: &str) -> Result<(char, usize, usize), FontError> {
    let rest = header
        .strip_prefix(SIGNATURE)
        .ok_or_else(|| FontError::Header(format!("missing {SIGNATURE} signature")))?;

    let mut chars = rest.chars();
    let hardblank = chars
        .next()
        .ok_or_else(|| FontError::Header("missing hardblank".to_string()))?;

    let fields: Vec<&str> = chars.as_str().split_whitespace().collect();
    let field = |index: usize, name: &str| -> Result<usize, FontError> {
        fields
            .get(index)
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| FontError::Header(format!("bad {name}")))
    };

    let height = field(0, "height")?;
    if height == 0 {
        return Err(FontError::Header("zero height".to_string()));
    }
    let comment_lines = field(4, "comment line count")?;
    Ok((hardblank, height, comment_lines))
}

/// Drops the trailing run of endmark characters (the row's last character).
fn strip_endmarks(line: &str) -> &str {
    let line = line.trim_end();
    match line.chars().last() {
        Some(endmark) => line.trim_end_matches(endmark),
        None => line,
    }
}
