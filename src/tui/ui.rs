use ratatui::Frame;
use ratatui::layout::Position;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

pub const PAUSE_PROMPT: &str = "pausing - hit 'r' to resume, 'q' to quit";

/// `HH : MM : SS`, zero-padded. Hours are not capped at 24 (or 99).
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02} : {minutes:02} : {seconds:02}")
}

/// Draws the rendered digits top-left, with an optional prompt underneath.
///
/// The cursor is parked on the row after the text, so it stays visible and
/// the shell prompt lands below the digits however the process ends.
/// Returns the number of rows used, clamped to the frame.
pub fn draw_countdown(frame: &mut Frame, banner: &str, prompt: Option<&str>) -> u16 {
    let mut lines: Vec<Line> = banner.lines().map(Line::raw).collect();
    if let Some(prompt) = prompt {
        lines.push(Line::raw(prompt));
    }

    let area = frame.area();
    let used = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
    frame.render_widget(Paragraph::new(lines), area);

    let cursor_row = used.min(area.height.saturating_sub(1));
    frame.set_cursor_position(Position::new(area.x, area.y + cursor_row));
    used
}
