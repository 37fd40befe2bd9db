//! Core types for termizard.
//!
//! Plain data shared by the questionnaire loader, the wizard and the
//! report formatter. No I/O here.

use serde::{Deserialize, Serialize};

// ============================================================================
// QUESTIONNAIRE
// ============================================================================

/// Which input field a question uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single line of text.
    #[default]
    Short,
    /// Free text spanning several lines.
    Long,
}

/// One entry of a questionnaire file.
///
/// ```json
/// { "prompt": "What is your favourite quote ?", "kind": "long" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub prompt: String,
    #[serde(default)]
    pub kind: FieldKind,
}

impl QuestionSpec {
    pub fn new(prompt: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            prompt: prompt.into(),
            kind,
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// A committed prompt/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub prompt: String,
    pub answer: String,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for the final summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `prompt: answer` line per question.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
