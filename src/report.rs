//! Summary formatting for completed questionnaires.
//!
//! Pure functions: (answers, OutputFormat) → String.
//! No I/O, no side effects.

use crate::types::{Answer, OutputFormat};

/// Format the collected answers for output.
pub fn format_summary(answers: &[Answer], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(answers),
        OutputFormat::Json => format_json(answers),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(answers: &[Answer]) -> String {
    answers
        .iter()
        .map(|a| format!("{}: {}\n", a.prompt, a.answer))
        .collect()
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(answers: &[Answer]) -> String {
    // Plain strings only; serialization cannot fail for these types.
    let mut out = serde_json::to_string_pretty(answers).unwrap_or_else(|e| {
        panic!("Failed to serialize answers to JSON: {}", e)
    });
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_answers() -> Vec<Answer> {
        vec![
            Answer {
                prompt: "What is your name ?".into(),
                answer: "Alice".into(),
            },
            Answer {
                prompt: "What is your favourite quote ?".into(),
                answer: "to be\nor not".into(),
            },
        ]
    }

    #[test]
    fn human_format_is_one_line_per_question() {
        let output = format_summary(&sample_answers()[..1], OutputFormat::Human);
        assert_eq!(output, "What is your name ?: Alice\n");
    }

    #[test]
    fn human_format_keeps_question_order() {
        let output = format_summary(&sample_answers(), OutputFormat::Human);
        let name = output.find("What is your name ?").unwrap();
        let quote = output.find("What is your favourite quote ?").unwrap();
        assert!(name < quote);
    }

    #[test]
    fn human_format_of_nothing_is_empty() {
        assert_eq!(format_summary(&[], OutputFormat::Human), "");
    }

    #[test]
    fn json_format_is_valid_json() {
        let output = format_summary(&sample_answers(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["prompt"], "What is your name ?");
        assert_eq!(parsed[0]["answer"], "Alice");
        assert_eq!(parsed[1]["answer"], "to be\nor not");
    }

    #[test]
    fn json_format_ends_with_newline() {
        let output = format_summary(&sample_answers(), OutputFormat::Json);
        assert!(output.ends_with("]\n"));
    }
}
