//! Questionnaire sources: the built-in question set and JSON files.
//!
//! A questionnaire file is a JSON array of [`QuestionSpec`]:
//!
//! ```json
//! [
//!   { "prompt": "What is your name ?" },
//!   { "prompt": "What is your favourite quote ?", "kind": "long" }
//! ]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::tui::state::Question;
use crate::types::{FieldKind, QuestionSpec};

/// Error loading a questionnaire file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionnaireError {
    /// The file could not be read.
    Read { path: PathBuf, message: String },

    /// The file is not a valid questionnaire.
    Parse { path: PathBuf, message: String },
}

impl std::fmt::Display for QuestionnaireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionnaireError::Read { path, message } => {
                write!(f, "Cannot read questionnaire {}: {}", path.display(), message)
            }
            QuestionnaireError::Parse { path, message } => {
                write!(f, "Invalid questionnaire {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for QuestionnaireError {}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// The built-in question set.
pub fn default_questions() -> Vec<QuestionSpec> {
    vec![
        QuestionSpec::new("What is your name ?", FieldKind::Short),
        QuestionSpec::new("What is your favourite editor ?", FieldKind::Short),
        QuestionSpec::new("What is your favourite quote ?", FieldKind::Long),
    ]
}

/// Parse questionnaire JSON.
///
/// `origin` is only used to label errors.
pub fn parse_questionnaire(
    json: &str,
    origin: &Path,
) -> Result<Vec<QuestionSpec>, QuestionnaireError> {
    serde_json::from_str(json).map_err(|e| QuestionnaireError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

/// Turn specs into fresh, unanswered questions.
pub fn build_questions(specs: &[QuestionSpec]) -> Vec<Question> {
    specs
        .iter()
        .map(|spec| Question::new(spec.prompt.clone(), spec.kind))
        .collect()
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Read and parse a questionnaire file.
///
/// An empty array parses fine; the wizard rejects it at construction.
pub fn load_questionnaire(path: &Path) -> Result<Vec<QuestionSpec>, QuestionnaireError> {
    let json = fs::read_to_string(path).map_err(|e| QuestionnaireError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let specs = parse_questionnaire(&json, path)?;
    info!("loaded {} questions from {}", specs.len(), path.display());
    Ok(specs)
}

// ============================================================================
// TESTS
// ============================================================================
