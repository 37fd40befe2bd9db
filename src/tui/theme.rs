//! TUI style constants.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Color semantics:
//! - Cyan: the prompt being asked
//! - Bold: what the user typed
//! - Dim: placeholders, counters, key hints

use ratatui::style::{Color, Modifier, Style};

/// Question prompt.
pub const STYLE_PROMPT: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Typed answer text.
pub const STYLE_ANSWER: Style = Style::new().add_modifier(Modifier::BOLD);

/// Placeholder shown in an empty field.
pub const STYLE_PLACEHOLDER: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::ITALIC);

/// Panel border.
pub const STYLE_BORDER: Style = Style::new().fg(Color::DarkGray);

/// De-emphasized metadata (question counter, loading text).
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Summary header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_dim_and_italic() {
        assert_eq!(STYLE_PLACEHOLDER.fg, Some(Color::DarkGray));
        assert!(STYLE_PLACEHOLDER.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn answer_stands_out_from_placeholder() {
        assert!(STYLE_ANSWER.add_modifier.contains(Modifier::BOLD));
        assert_ne!(STYLE_ANSWER, STYLE_PLACEHOLDER);
    }
}
