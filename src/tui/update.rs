//! Pure state transitions: (Wizard, Action) → Transition.
//!
//! This is the core logic of the wizard. Fully testable without a terminal.
//! Cancel and Resize are honoured in every state; everything else is
//! ignored once the wizard is done.

use log::debug;

use super::field::{AnswerField, Directive};
use super::state::{Action, Outcome, Transition, Viewport, Wizard};
use super::view::frame_text;

/// Pure state transition function.
///
/// Takes the wizard by value and returns the next transition. The effects
/// boundary interprets the result.
pub fn update(wizard: Wizard, action: &Action) -> Transition {
    match action {
        Action::Cancel => Transition::Quit,
        Action::Resize { width, height } => resize(wizard, *width, *height),
        _ if wizard.done => unchanged(wizard),
        Action::Confirm => confirm(wizard),
        _ => edit(wizard, action),
    }
}

/// Fold a recorded action sequence through [`update`], the way the event
/// loop does: stop at the first Cancel, or as soon as the wizard is done.
///
/// A cancelled run yields the frame that was on screen before the cancel.
pub fn replay<'a>(wizard: Wizard, actions: impl IntoIterator<Item = &'a Action>) -> Outcome {
    let mut wizard = wizard;
    let mut last_frame = frame_text(&wizard);

    for action in actions {
        match update(wizard, action) {
            Transition::Quit => return Outcome::Cancelled { last_frame },
            Transition::Continue { wizard: next, .. } => {
                if next.is_done() {
                    return Outcome::Completed(next);
                }
                last_frame = frame_text(&next);
                wizard = next;
            }
        }
    }

    Outcome::Pending(wizard)
}

// ============================================================================
// HANDLERS
// ============================================================================

fn resize(mut wizard: Wizard, width: u16, height: u16) -> Transition {
    wizard.viewport = Viewport { width, height };
    unchanged(wizard)
}

/// Commit the current answer, blur its field and advance.
///
/// The index wraps to 0 after the last question even though the wizard is
/// done by then; rendering ignores the index once `done` is set.
fn confirm(mut wizard: Wizard) -> Transition {
    let index = wizard.index;
    let len = wizard.questions.len();

    let question = &mut wizard.questions[index];
    question.answer = Some(question.field.value());
    let mut directives: Vec<Directive> = question
        .with_field(AnswerField::deactivate)
        .into_iter()
        .collect();

    if index == len - 1 {
        wizard.done = true;
    }
    wizard.index = (index + 1) % len;

    // The next field takes focus straight away.
    if !wizard.done {
        directives.extend(wizard.questions[wizard.index].with_field(AnswerField::activate));
    }

    debug!(
        "confirmed question {}/{}, done={}",
        index + 1,
        len,
        wizard.done
    );

    Transition::Continue { wizard, directives }
}

/// Forward an editing action to the current field.
fn edit(mut wizard: Wizard, action: &Action) -> Transition {
    let index = wizard.index;
    let directive = wizard.questions[index].with_field(|field| field.handle(action));
    Transition::Continue {
        wizard,
        directives: directive.into_iter().collect(),
    }
}

fn unchanged(wizard: Wizard) -> Transition {
    Transition::Continue {
        wizard,
        directives: Vec::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::format_summary;
    use crate::tui::state::Question;
    use crate::types::OutputFormat;

    fn scenario_questions() -> Vec<Question> {
        vec![
            Question::short("What is your name ?"),
            Question::short("What is your favourite editor ?"),
            Question::long("What is your favourite quote ?"),
        ]
    }

    fn started() -> Wizard {
        Wizard::new(scenario_questions()).unwrap().init().0
    }

    fn typing(text: &str) -> Vec<Action> {
        text.chars().map(Action::Insert).collect()
    }

    /// Expect a Continue transition and return its parts.
    fn step(wizard: Wizard, action: Action) -> (Wizard, Vec<Directive>) {
        match update(wizard, &action) {
            Transition::Continue { wizard, directives } => (wizard, directives),
            Transition::Quit => panic!("Expected Continue for {:?}", action),
        }
    }

    fn apply(wizard: Wizard, actions: &[Action]) -> Wizard {
        actions.iter().fold(wizard, |w, a| step(w, *a).0)
    }

    // -- Resize --

    #[test]
    fn resize_records_viewport() {
        let (wizard, directives) = step(started(), Action::Resize { width: 80, height: 24 });
        assert_eq!(wizard.viewport(), Viewport { width: 80, height: 24 });
        assert_eq!(wizard.index(), 0);
        assert!(directives.is_empty());
    }

    #[test]
    fn resize_is_idempotent() {
        let resize = Action::Resize { width: 100, height: 30 };
        let (once, _) = step(started(), resize);
        let (twice, _) = step(once.clone(), resize);
        assert_eq!(once, twice);
    }

    #[test]
    fn resize_still_applies_when_done() {
        let mut wizard = Wizard::new(vec![Question::short("Only ?")]).unwrap().init().0;
        wizard = step(wizard, Action::Confirm).0;
        assert!(wizard.is_done());
        let (wizard, _) = step(wizard, Action::Resize { width: 10, height: 5 });
        assert_eq!(wizard.viewport(), Viewport { width: 10, height: 5 });
    }

    // -- Cancel --

    #[test]
    fn cancel_quits_from_any_state() {
        assert_eq!(update(started(), &Action::Cancel), Transition::Quit);

        let done = step(
            Wizard::new(vec![Question::short("Only ?")]).unwrap().init().0,
            Action::Confirm,
        )
        .0;
        assert_eq!(update(done, &Action::Cancel), Transition::Quit);
    }

    #[test]
    fn replay_stops_at_cancel() {
        let mut actions = typing("Alice");
        actions.push(Action::Cancel);
        actions.extend(typing("ignored"));
        actions.push(Action::Confirm);

        match replay(started(), &actions) {
            Outcome::Cancelled { .. } => {}
            other => panic!("Expected Cancelled, got {:?}", other),
        }
    }

    // -- Confirm --

    #[test]
    fn confirm_commits_answer_and_advances() {
        let wizard = apply(started(), &typing("Alice"));
        let (wizard, _) = step(wizard, Action::Confirm);
        assert_eq!(wizard.questions()[0].answer(), Some("Alice"));
        assert_eq!(wizard.index(), 1);
        assert!(!wizard.is_done());
    }

    #[test]
    fn confirm_blurs_current_and_focuses_next() {
        let (wizard, directives) = step(started(), Action::Confirm);
        assert_eq!(directives, vec![Directive::Hide, Directive::Blink]);
        assert!(!wizard.questions()[0].field().is_active());
        assert!(wizard.questions()[1].field().is_active());
    }

    #[test]
    fn confirm_accepts_empty_answer() {
        let (wizard, _) = step(started(), Action::Confirm);
        assert_eq!(wizard.questions()[0].answer(), Some(""));
    }

    #[test]
    fn confirm_on_last_question_sets_done_and_wraps_index() {
        let wizard = apply(started(), &[Action::Confirm, Action::Confirm]);
        assert_eq!(wizard.index(), 2);

        let (wizard, directives) = step(wizard, Action::Confirm);
        assert!(wizard.is_done());
        assert_eq!(wizard.index(), 0);
        // Nothing regains focus once done.
        assert_eq!(directives, vec![Directive::Hide]);
        assert!(wizard.questions().iter().all(|q| !q.field().is_active()));
    }

    #[test]
    fn done_wizard_ignores_input_and_confirm() {
        let done = apply(started(), &[Action::Confirm, Action::Confirm, Action::Confirm]);
        for action in [Action::Confirm, Action::Insert('z'), Action::NewLine] {
            let (after, directives) = step(done.clone(), action);
            assert_eq!(after, done);
            assert!(directives.is_empty());
        }
    }

    // -- Editing --

    #[test]
    fn edits_go_to_current_field_only() {
        let wizard = apply(started(), &[Action::Confirm]);
        let wizard = apply(wizard, &typing("vim"));
        assert_eq!(wizard.questions()[1].field().value(), "vim");
        assert_eq!(wizard.questions()[0].field().value(), "");
        assert_eq!(wizard.questions()[2].field().value(), "");
    }

    #[test]
    fn edit_propagates_field_directive() {
        let (_, directives) = step(started(), Action::Insert('a'));
        assert_eq!(directives, vec![Directive::Blink]);
    }

    #[test]
    fn unrecognized_action_is_noop_on_short_field() {
        let wizard = apply(started(), &typing("Al"));
        let (after, directives) = step(wizard.clone(), Action::MoveUp);
        assert_eq!(after, wizard);
        assert!(directives.is_empty());
    }

    #[test]
    fn long_question_keeps_line_breaks_in_answer() {
        let mut actions = vec![Action::Confirm, Action::Confirm];
        actions.extend(typing("to be"));
        actions.push(Action::NewLine);
        actions.extend(typing("or not"));
        let wizard = apply(started(), &actions);
        let (wizard, _) = step(wizard, Action::Confirm);
        assert_eq!(wizard.questions()[2].answer(), Some("to be\nor not"));
    }

    // -- Scenarios --

    #[test]
    fn full_scenario_produces_ordered_summary() {
        let mut actions = vec![Action::Resize { width: 80, height: 24 }];
        actions.extend(typing("Alice"));
        actions.push(Action::Confirm);
        actions.push(Action::Resize { width: 120, height: 40 });
        actions.extend(typing("vim"));
        actions.push(Action::MoveUp);
        actions.push(Action::Confirm);
        actions.extend(typing("to be or not to be"));
        actions.push(Action::Confirm);

        let wizard = match replay(started(), &actions) {
            Outcome::Completed(wizard) => wizard,
            other => panic!("Expected Completed, got {:?}", other),
        };

        assert_eq!(
            frame_text(&wizard),
            "What is your name ?: Alice\n\
             What is your favourite editor ?: vim\n\
             What is your favourite quote ?: to be or not to be\n"
        );
        assert_eq!(
            format_summary(&wizard.answers(), OutputFormat::Human),
            frame_text(&wizard)
        );
    }

    #[test]
    fn cancel_mid_flow_yields_last_frame_and_no_summary() {
        let mut actions = vec![Action::Resize { width: 80, height: 24 }];
        actions.extend(typing("Alice"));
        actions.push(Action::Confirm);
        actions.push(Action::Cancel);

        match replay(started(), &actions) {
            Outcome::Cancelled { last_frame } => {
                assert!(last_frame.starts_with("What is your favourite editor ?"));
                assert!(!last_frame.contains("Alice"));
            }
            other => panic!("Expected Cancelled, got {:?}", other),
        }
    }

    #[test]
    fn replay_without_completion_is_pending() {
        match replay(started(), &typing("Al")) {
            Outcome::Pending(wizard) => {
                assert_eq!(wizard.current().field().value(), "Al");
            }
            other => panic!("Expected Pending, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use crate::tui::state::Question;
    use proptest::prelude::*;

    /// Every action kind except Cancel, which ends the run.
    const PALETTE: [Action; 18] = [
        Action::Insert('x'),
        Action::Insert(' '),
        Action::NewLine,
        Action::DeletePrev,
        Action::DeleteNext,
        Action::DeletePrevWord,
        Action::ClearLine,
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
        Action::WordLeft,
        Action::WordRight,
        Action::MoveHome,
        Action::MoveEnd,
        Action::Confirm,
        Action::Resize { width: 80, height: 24 },
        Action::Resize { width: 0, height: 0 },
    ];

    fn actions() -> impl Strategy<Value = Vec<Action>> {
        prop::collection::vec(prop::sample::select(PALETTE.to_vec()), 0..300)
    }

    fn started() -> Wizard {
        let questions = vec![
            Question::short("What is your name ?"),
            Question::short("What is your favourite editor ?"),
            Question::long("What is your favourite quote ?"),
        ];
        Wizard::new(questions).unwrap().init().0
    }

    fn next(wizard: Wizard, action: &Action) -> Wizard {
        match update(wizard, action) {
            Transition::Continue { wizard, .. } => wizard,
            Transition::Quit => panic!("Expected Continue for {:?}", action),
        }
    }

    proptest! {
        #[test]
        fn index_stays_in_bounds(actions in actions()) {
            let mut wizard = started();
            for action in &actions {
                wizard = next(wizard, action);
                prop_assert!(wizard.index() < wizard.questions().len());
            }
        }

        #[test]
        fn completion_is_monotonic(actions in actions()) {
            let mut wizard = started();
            let mut seen_done = false;
            for action in &actions {
                wizard = next(wizard, action);
                if seen_done {
                    prop_assert!(wizard.is_done(), "completion reset by {:?}", action);
                }
                seen_done |= wizard.is_done();
            }
        }

        #[test]
        fn answers_are_set_at_most_once(actions in actions()) {
            let mut wizard = started();
            let mut committed: Vec<Option<String>> = vec![None; 3];
            for action in &actions {
                wizard = next(wizard, action);
                for (slot, question) in committed.iter_mut().zip(wizard.questions()) {
                    match (slot.as_ref(), question.answer()) {
                        (Some(before), Some(now)) => prop_assert_eq!(before.as_str(), now),
                        (None, Some(now)) => *slot = Some(now.to_string()),
                        (Some(_), None) => prop_assert!(false, "answer was cleared"),
                        (None, None) => {}
                    }
                }
            }
        }
    }
}
