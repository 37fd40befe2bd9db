//! Answer fields: the text-entry units owned by each question.
//!
//! Two variants behind one closed enum:
//! - `Short`: a single physical line (name, editor, ...)
//! - `Long`: free text with embedded line breaks (quotes, descriptions)
//!
//! Each variant owns its own buffer and cursor. Every operation takes the
//! field by value and hands back the new field plus an optional cursor
//! [`Directive`] for the effects layer. Short answers edit through
//! `tui_input::Input`, long answers through `tui_textarea::TextArea`.
//! Scroll offsets and cursor positions are in display columns.

use tui_input::{Input, InputRequest};
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthChar;

use crate::types::FieldKind;

use super::state::Action;

/// Text shown in place of an empty buffer.
pub const PLACEHOLDER: &str = "Your answer here:";

/// Visible rows of a long answer.
pub const LONG_ANSWER_HEIGHT: u16 = 6;

// ============================================================================
// DIRECTIVES
// ============================================================================

/// Cursor-indicator request emitted by a field.
///
/// Pure code never touches the terminal cursor, it only asks.
/// The effects boundary carries these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Show the input indicator and (re)start its blink cycle.
    Blink,
    /// Stop showing the input indicator.
    Hide,
}

// ============================================================================
// FIELD VIEW
// ============================================================================

/// Renderable snapshot of a field at a fixed width.
///
/// `scroll` is `(rows, columns)` in the shape ratatui's `Paragraph::scroll`
/// expects. `cursor` is `(x, y)` relative to the visible area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub lines: Vec<String>,
    pub placeholder: bool,
    pub scroll: (u16, u16),
    pub cursor: (u16, u16),
    pub height: u16,
}

impl FieldView {
    fn placeholder(height: u16) -> Self {
        FieldView {
            lines: vec![PLACEHOLDER.to_string()],
            placeholder: true,
            scroll: (0, 0),
            cursor: (0, 0),
            height,
        }
    }

    /// Visible text, one terminal row per line, scroll offsets applied.
    pub fn visible_text(&self) -> String {
        let (row_scroll, col_scroll) = self.scroll;
        self.lines
            .iter()
            .skip(usize::from(row_scroll))
            .take(usize::from(self.height))
            .map(|line| skip_columns(line, usize::from(col_scroll)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Drop leading characters until `columns` display columns are skipped.
fn skip_columns(line: &str, columns: usize) -> String {
    let mut skipped = 0;
    line.chars()
        .skip_while(|c| {
            let skip = skipped < columns;
            skipped += char_width(*c);
            skip
        })
        .collect()
}

// ============================================================================
// ANSWER FIELD
// ============================================================================

/// A question's input capability.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerField {
    Short(ShortAnswer),
    Long(LongAnswer),
}

/// Empty short answer (used as placeholder during transitions).
impl Default for AnswerField {
    fn default() -> Self {
        AnswerField::Short(ShortAnswer::default())
    }
}

impl AnswerField {
    /// Create an empty, inactive field of the given kind.
    pub fn new(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Short => AnswerField::Short(ShortAnswer::default()),
            FieldKind::Long => AnswerField::Long(LongAnswer::default()),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            AnswerField::Short(_) => FieldKind::Short,
            AnswerField::Long(_) => FieldKind::Long,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            AnswerField::Short(f) => f.active,
            AnswerField::Long(f) => f.active,
        }
    }

    /// Start receiving input. Idempotent.
    pub fn activate(self) -> (Self, Option<Directive>) {
        match self {
            AnswerField::Short(f) => {
                let (f, directive) = f.activate();
                (AnswerField::Short(f), directive)
            }
            AnswerField::Long(f) => {
                let (f, directive) = f.activate();
                (AnswerField::Long(f), directive)
            }
        }
    }

    /// Stop receiving input. Idempotent.
    pub fn deactivate(self) -> (Self, Option<Directive>) {
        match self {
            AnswerField::Short(f) => {
                let (f, directive) = f.deactivate();
                (AnswerField::Short(f), directive)
            }
            AnswerField::Long(f) => {
                let (f, directive) = f.deactivate();
                (AnswerField::Long(f), directive)
            }
        }
    }

    /// Current buffer content.
    pub fn value(&self) -> String {
        match self {
            AnswerField::Short(f) => f.value().to_string(),
            AnswerField::Long(f) => f.value(),
        }
    }

    /// Apply one editing action. Unrecognized actions are no-ops.
    pub fn handle(self, action: &Action) -> (Self, Option<Directive>) {
        match self {
            AnswerField::Short(f) => {
                let (f, directive) = f.handle(action);
                (AnswerField::Short(f), directive)
            }
            AnswerField::Long(f) => {
                let (f, directive) = f.handle(action);
                (AnswerField::Long(f), directive)
            }
        }
    }

    /// Render the buffer and cursor for a fixed width.
    pub fn view(&self, width: u16) -> FieldView {
        match self {
            AnswerField::Short(f) => f.view(width),
            AnswerField::Long(f) => f.view(width),
        }
    }
}

/// Map an editing action onto a `tui_input` request.
///
/// Control characters never reach the buffer; line breaks in particular
/// are only produced by [`Action::NewLine`] on long answers.
fn edit_request(action: &Action) -> Option<InputRequest> {
    match action {
        Action::Insert(c) if !c.is_control() => Some(InputRequest::InsertChar(*c)),
        Action::DeletePrev => Some(InputRequest::DeletePrevChar),
        Action::DeleteNext => Some(InputRequest::DeleteNextChar),
        Action::DeletePrevWord => Some(InputRequest::DeletePrevWord),
        Action::ClearLine => Some(InputRequest::DeleteLine),
        Action::MoveLeft => Some(InputRequest::GoToPrevChar),
        Action::MoveRight => Some(InputRequest::GoToNextChar),
        Action::WordLeft => Some(InputRequest::GoToPrevWord),
        Action::WordRight => Some(InputRequest::GoToNextWord),
        Action::MoveHome => Some(InputRequest::GoToStart),
        Action::MoveEnd => Some(InputRequest::GoToEnd),
        _ => None,
    }
}

/// Columns available for text once one is reserved for the cursor.
fn text_width(width: u16) -> usize {
    usize::from(width.saturating_sub(1).max(1))
}

// ============================================================================
// SHORT ANSWER
// ============================================================================

/// Single-line field.
#[derive(Debug, Clone, Default)]
pub struct ShortAnswer {
    input: Input,
    active: bool,
}

impl PartialEq for ShortAnswer {
    fn eq(&self, other: &Self) -> bool {
        self.active == other.active
            && self.input.value() == other.input.value()
            && self.input.cursor() == other.input.cursor()
    }
}

impl ShortAnswer {
    pub fn activate(mut self) -> (Self, Option<Directive>) {
        if self.active {
            return (self, None);
        }
        self.active = true;
        (self, Some(Directive::Blink))
    }

    pub fn deactivate(mut self) -> (Self, Option<Directive>) {
        if !self.active {
            return (self, None);
        }
        self.active = false;
        (self, Some(Directive::Hide))
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn handle(mut self, action: &Action) -> (Self, Option<Directive>) {
        if !self.active {
            return (self, None);
        }
        let Some(request) = edit_request(action) else {
            return (self, None);
        };
        let directive = self.input.handle(request).map(|_| Directive::Blink);
        (self, directive)
    }

    pub fn view(&self, width: u16) -> FieldView {
        if self.input.value().is_empty() {
            return FieldView::placeholder(1);
        }
        let scroll = self.input.visual_scroll(text_width(width));
        let cursor_x = self.input.visual_cursor().saturating_sub(scroll);
        FieldView {
            lines: vec![self.input.value().to_string()],
            placeholder: false,
            scroll: (0, scroll as u16),
            cursor: (cursor_x as u16, 0),
            height: 1,
        }
    }
}

// ============================================================================
// LONG ANSWER
// ============================================================================

/// Multi-line field backed by a `TextArea`.
///
/// Only the editing model is used; the widget itself is never rendered,
/// [`LongAnswer::view`] does its own scrolling.
#[derive(Debug, Clone, Default)]
pub struct LongAnswer {
    textarea: TextArea<'static>,
    active: bool,
}

impl PartialEq for LongAnswer {
    fn eq(&self, other: &Self) -> bool {
        self.active == other.active
            && self.textarea.cursor() == other.textarea.cursor()
            && self.textarea.lines() == other.textarea.lines()
    }
}

impl LongAnswer {
    pub fn activate(mut self) -> (Self, Option<Directive>) {
        if self.active {
            return (self, None);
        }
        self.active = true;
        (self, Some(Directive::Blink))
    }

    pub fn deactivate(mut self) -> (Self, Option<Directive>) {
        if !self.active {
            return (self, None);
        }
        self.active = false;
        (self, Some(Directive::Hide))
    }

    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Cursor as `(row, column)` in characters.
    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    pub fn line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    pub fn handle(mut self, action: &Action) -> (Self, Option<Directive>) {
        if !self.active {
            return (self, None);
        }

        let before = self.textarea.cursor();
        let textarea = &mut self.textarea;
        let edited = match action {
            Action::Insert(c) if !c.is_control() => {
                textarea.insert_char(*c);
                true
            }
            Action::NewLine => {
                textarea.insert_newline();
                true
            }
            Action::DeletePrev => textarea.delete_char(),
            Action::DeleteNext => textarea.delete_next_char(),
            Action::DeletePrevWord => textarea.delete_word(),
            Action::ClearLine => {
                textarea.move_cursor(CursorMove::Head);
                // delete_line_by_end joins lines when the line is empty
                let (row, _) = textarea.cursor();
                !textarea.lines()[row].is_empty() && textarea.delete_line_by_end()
            }
            _ => {
                if let Some(movement) = cursor_move(action) {
                    textarea.move_cursor(movement);
                }
                false
            }
        };

        let changed = edited || self.textarea.cursor() != before;
        (self, changed.then_some(Directive::Blink))
    }

    pub fn view(&self, width: u16) -> FieldView {
        let lines = self.textarea.lines();
        if lines.len() == 1 && lines[0].is_empty() {
            return FieldView::placeholder(LONG_ANSWER_HEIGHT);
        }

        let (row, col) = self.textarea.cursor();
        let cursor_x = columns_before(&lines[row], col);
        let col_scroll = visual_scroll(&lines[row], cursor_x, text_width(width));
        let row_scroll = row.saturating_sub(usize::from(LONG_ANSWER_HEIGHT) - 1);

        FieldView {
            lines: lines.to_vec(),
            placeholder: false,
            scroll: (row_scroll as u16, col_scroll as u16),
            cursor: ((cursor_x - col_scroll) as u16, (row - row_scroll) as u16),
            height: LONG_ANSWER_HEIGHT,
        }
    }
}

/// Map a navigation action onto a `TextArea` cursor movement.
///
/// Horizontal and word moves cross line boundaries; vertical moves keep
/// the column where the target line allows.
fn cursor_move(action: &Action) -> Option<CursorMove> {
    match action {
        Action::MoveLeft => Some(CursorMove::Back),
        Action::MoveRight => Some(CursorMove::Forward),
        Action::MoveUp => Some(CursorMove::Up),
        Action::MoveDown => Some(CursorMove::Down),
        Action::WordLeft => Some(CursorMove::WordBack),
        Action::WordRight => Some(CursorMove::WordForward),
        Action::MoveHome => Some(CursorMove::Head),
        Action::MoveEnd => Some(CursorMove::End),
        _ => None,
    }
}

/// Display columns taken by the first `chars` characters of `line`.
fn columns_before(line: &str, chars: usize) -> usize {
    line.chars().take(chars).map(char_width).sum()
}

/// Columns to scroll so the cursor stays visible, rounded up to a
/// character boundary.
fn visual_scroll(line: &str, cursor_x: usize, width: usize) -> usize {
    let needed = cursor_x.saturating_sub(width);
    let mut scroll = 0;
    for c in line.chars() {
        if scroll >= needed {
            break;
        }
        scroll += char_width(c);
    }
    scroll.min(cursor_x)
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

// ============================================================================
// TESTS
// ============================================================================
