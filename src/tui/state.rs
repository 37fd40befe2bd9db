//! Wizard state algebra: pure types, zero effects.
//!
//! These types define the entire wizard state space. The transition
//! function (`update`) and the rendering layer (`view`) both program
//! against them.
//!
//! Design principle: a `Wizard` is a value. Transitions consume the old
//! value and return a new one; nothing holds a mutable alias into it.
//! The viewport is recorded from resize events, never inferred.

use crossterm::event::KeyEvent;

use crate::types::{Answer, FieldKind};

use super::field::{AnswerField, Directive};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// A single reader thread forwards terminal events; the loop maps them
/// to [`Action`]s with `map_event` before calling `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A terminal key event.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions. `update` decides what
/// each Action means for the wizard; editing actions are forwarded to the
/// current field, which ignores whatever it does not understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Type a character.
    Insert(char),
    /// Insert a line break (long answers only).
    NewLine,
    /// Delete the character before the cursor.
    DeletePrev,
    /// Delete the character under the cursor.
    DeleteNext,
    /// Delete the word before the cursor.
    DeletePrevWord,
    /// Clear the current line.
    ClearLine,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    WordLeft,
    WordRight,
    MoveHome,
    MoveEnd,
    /// Commit the current answer and advance.
    Confirm,
    /// Abort the run immediately.
    Cancel,
    /// Record a new viewport size.
    Resize { width: u16, height: u16 },
}

// ============================================================================
// QUESTIONS
// ============================================================================

/// A prompt, its input field, and the committed answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    prompt: String,
    /// `None` until the user confirms this question.
    pub(crate) answer: Option<String>,
    pub(crate) field: AnswerField,
}

impl Question {
    pub fn new(prompt: impl Into<String>, kind: FieldKind) -> Self {
        Question {
            prompt: prompt.into(),
            answer: None,
            field: AnswerField::new(kind),
        }
    }

    /// Single-line question.
    pub fn short(prompt: impl Into<String>) -> Self {
        Question::new(prompt, FieldKind::Short)
    }

    /// Multi-line question.
    pub fn long(prompt: impl Into<String>) -> Self {
        Question::new(prompt, FieldKind::Long)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn field(&self) -> &AnswerField {
        &self.field
    }

    /// Run a by-value field operation, storing the new field back.
    pub(crate) fn with_field(
        &mut self,
        op: impl FnOnce(AnswerField) -> (AnswerField, Option<Directive>),
    ) -> Option<Directive> {
        let (field, directive) = op(std::mem::take(&mut self.field));
        self.field = field;
        directive
    }
}

// ============================================================================
// WIZARD
// ============================================================================

/// Last known terminal size. Zero until the first resize event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn is_unset(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Top-level wizard model.
///
/// Invariants: `questions` is non-empty and never changes length or
/// order; `index < questions.len()`; `done` goes false to true once.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    pub(crate) questions: Vec<Question>,
    pub(crate) index: usize,
    pub(crate) done: bool,
    pub(crate) viewport: Viewport,
}

/// Construction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// A wizard needs at least one question.
    NoQuestions,
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::NoQuestions => write!(f, "Questionnaire has no questions"),
        }
    }
}

impl std::error::Error for WizardError {}

impl Wizard {
    /// Create a wizard positioned on the first question.
    ///
    /// Fields start inactive; call [`Wizard::init`] once to focus the
    /// first one.
    pub fn new(questions: Vec<Question>) -> Result<Self, WizardError> {
        if questions.is_empty() {
            return Err(WizardError::NoQuestions);
        }
        Ok(Wizard {
            questions,
            index: 0,
            done: false,
            viewport: Viewport::default(),
        })
    }

    /// Startup step: activate the first field.
    ///
    /// Returns the wizard plus the directive the effects layer should
    /// carry out before the first render.
    pub fn init(mut self) -> (Self, Vec<Directive>) {
        let directive = self.questions[0].with_field(AnswerField::activate);
        (self, directive.into_iter().collect())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.index]
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Prompt/answer pairs in question order. Unanswered questions
    /// carry an empty answer.
    pub fn answers(&self) -> Vec<Answer> {
        self.questions
            .iter()
            .map(|q| Answer {
                prompt: q.prompt.clone(),
                answer: q.answer.clone().unwrap_or_default(),
            })
            .collect()
    }
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// Pure code describes WHAT should happen; the effects boundary
/// decides HOW (cursor styling, redraws, exiting).
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Keep running with this wizard, after carrying out `directives`
    /// in order.
    Continue {
        wizard: Wizard,
        directives: Vec<Directive>,
    },
    /// Stop immediately. Nothing else is rendered.
    Quit,
}

/// How a run ended.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Every question was answered.
    Completed(Wizard),
    /// Cancelled. Carries the frame that was on screen at the time;
    /// no summary is produced.
    Cancelled { last_frame: String },
    /// Input ran out before completion or cancellation.
    Pending(Wizard),
}

// ============================================================================
// TESTS
// ============================================================================
