//! termizard: a step-by-step questionnaire wizard for the terminal.

pub mod logging;
pub mod questionnaire;
pub mod report;
pub mod tui;
pub mod types;
