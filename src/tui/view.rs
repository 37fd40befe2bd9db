//! Pure rendering: map Wizard state to text and to ratatui widget trees.
//!
//! Three frames, picked in this order:
//! - done: the summary of every prompt/answer pair
//! - no viewport yet: a loading placeholder
//! - otherwise: the current prompt and its field, centered in the viewport
//!
//! `frame_text` is the plain-text rendering; `render` draws the same frame
//! into a ratatui `Frame`. The only effect is `Frame::render_widget()`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::report::format_summary;
use crate::types::{FieldKind, OutputFormat};

use super::state::{Viewport, Wizard};
use super::theme;

/// Shown until the first resize event arrives.
pub const LOADING: &str = "loading ...";

/// Widest the question panel gets, borders included.
const PANEL_WIDTH: u16 = 64;

// ============================================================================
// TEXT FRAME
// ============================================================================

/// Render the wizard as plain text.
pub fn frame_text(wizard: &Wizard) -> String {
    if wizard.is_done() {
        return summary_text(wizard);
    }

    let viewport = wizard.viewport();
    if viewport.is_unset() {
        return LOADING.to_string();
    }

    let question = wizard.current();
    let view = question.field().view(field_width(viewport));
    format!("{}\n{}", question.prompt(), view.visible_text())
}

/// One `"<prompt>: <answer>"` line per question, in question order.
pub fn summary_text(wizard: &Wizard) -> String {
    format_summary(&wizard.answers(), OutputFormat::Human)
}

/// Columns available to a field inside the bordered panel.
fn field_width(viewport: Viewport) -> u16 {
    viewport.width.min(PANEL_WIDTH).saturating_sub(2)
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current frame to the terminal.
///
/// Layout happens inside the stored viewport, clipped to the real frame.
pub fn render(wizard: &Wizard, frame: &mut Frame) {
    let area = frame.area();

    if wizard.is_done() {
        render_summary(wizard, frame, area);
        return;
    }

    let viewport = wizard.viewport();
    if viewport.is_unset() {
        frame.render_widget(Paragraph::new(LOADING).style(theme::STYLE_DIM), area);
        return;
    }

    let stage = Rect::new(area.x, area.y, viewport.width, viewport.height).intersection(area);
    render_question(wizard, frame, stage);
}

// ============================================================================
// SCREEN: QUESTION
// ============================================================================

fn render_question(wizard: &Wizard, frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Min(0),    // panel
        Constraint::Length(1), // help
    ])
    .split(area);

    let question = wizard.current();
    let field = question.field();
    let view = field.view(field_width(wizard.viewport()));

    // borders (2) + prompt (1) + gap (1) + field
    let panel = centered(
        chunks[0],
        field_width(wizard.viewport()) + 2,
        view.height + 4,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::STYLE_BORDER)
        .title(Span::styled(
            format!(" {}/{} ", wizard.index() + 1, wizard.questions().len()),
            theme::STYLE_DIM,
        ));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(view.height),
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(question.prompt(), theme::STYLE_PROMPT)),
        rows[0],
    );

    let style = if view.placeholder {
        theme::STYLE_PLACEHOLDER
    } else {
        theme::STYLE_ANSWER
    };
    let lines: Vec<Line> = view.lines.iter().map(|l| Line::from(l.as_str())).collect();
    let field_area = rows[2];
    frame.render_widget(
        Paragraph::new(lines).style(style).scroll(view.scroll),
        field_area,
    );

    if field.is_active() && field_area.width > 0 && field_area.height > 0 {
        let (x, y) = view.cursor;
        frame.set_cursor_position((
            field_area.x + x.min(field_area.width - 1),
            field_area.y + y.min(field_area.height - 1),
        ));
    }

    frame.render_widget(
        Paragraph::new(Span::styled(help_text(field.kind()), theme::STYLE_HELP)),
        chunks[1],
    );
}

/// Key hints for the current field.
fn help_text(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Short => "[Enter] confirm  [Esc] cancel",
        FieldKind::Long => "[Enter] confirm  [Alt+Enter] new line  [Esc] cancel",
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .split(vertical[1]);

    horizontal[1]
}

// ============================================================================
// SCREEN: SUMMARY
// ============================================================================

fn render_summary(wizard: &Wizard, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled("Summary", theme::STYLE_TITLE)),
        Line::from(""),
    ];

    for answer in wizard.answers() {
        let mut parts = answer.answer.split('\n');
        let first = parts.next().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", answer.prompt), theme::STYLE_PROMPT),
            Span::styled(first.to_string(), theme::STYLE_ANSWER),
        ]));
        // Continuation lines of long answers
        for rest in parts {
            lines.push(Line::from(Span::styled(
                format!("  {}", rest),
                theme::STYLE_ANSWER,
            )));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// TESTS
// ============================================================================
