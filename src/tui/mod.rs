//! Interactive questionnaire wizard.
//!
//! Organized along FP/Unix boundaries:
//! - `field`: answer fields (single-line and multi-line input)
//! - `state`: pure data types (Wizard, Question, Action, Transition)
//! - `update`: pure transitions
//! - `view`: pure rendering
//! - `run`: effects (terminal, event loop)

pub mod field;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
