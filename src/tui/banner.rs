//! Large-text rendering for the countdown digits.
//!
//! The renderer is picked once at startup: a FIGlet font when one can be
//! loaded, plain text otherwise.

use std::path::Path;

use log::{info, warn};

use crate::tui::figfont::FigFont;

pub trait TextRenderer {
    /// Returns the name of the renderer.
    fn name(&self) -> &str;

    /// Turns `text` into its (possibly multi-line) display form.
    fn render(&self, text: &str) -> String;
}

/// Passes text through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainText;

impl TextRenderer for PlainText {
    fn name(&self) -> &str {
        "plain"
    }

    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct FigletText {
    font: FigFont,
}

impl FigletText {
    pub fn new(font: FigFont) -> Self {
        Self { font }
    }
}

impl TextRenderer for FigletText {
    fn name(&self) -> &str {
        "figlet"
    }

    fn render(&self, text: &str) -> String {
        self.font.render(text)
    }
}

/// Loads the font at `font_path`, falling back to plain text if it cannot be used.
pub fn select_renderer(font_path: &Path) -> Box<dyn TextRenderer> {
    match FigFont::from_file(font_path) {
        Ok(font) => {
            info!("Using FIGlet font {}", font_path.display());
            Box::new(FigletText::new(font))
        }
        Err(e) => {
            warn!(
                "Cannot use font {} ({}), falling back to plain text",
                font_path.display(),
                e
            );
            Box::new(PlainText)
        }
    }
}
