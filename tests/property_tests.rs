//! Property-based tests for the registry engine.
//!
//! Random sequences of registry operations over a small identifier pool, so
//! collisions (reassignment, re-enrollment, removal of known learners) are
//! common.

use enrollment_registry::{Command, RegistryEngine, Reply};
use proptest::prelude::*;
use std::collections::HashMap;

// ============================================================================
// Generators
// ============================================================================

fn arb_learner() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e", "f"]).prop_map(str::to_string)
}

fn arb_supervisor() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["p", "q", "r"]).prop_map(str::to_string)
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        3 => (arb_learner(), arb_supervisor())
            .prop_map(|(learner, supervisor)| Command::Enroll { learner, supervisor }),
        1 => (arb_learner(), arb_supervisor())
            .prop_map(|(learner, supervisor)| Command::IsEnrolledUnder { learner, supervisor }),
        1 => arb_learner().prop_map(|learner| Command::ScoreOf { learner }),
        2 => (arb_learner(), -50_i64..50)
            .prop_map(|(learner, delta)| Command::AdjustScore { learner, delta }),
        1 => (arb_supervisor(), -50_i64..50)
            .prop_map(|(supervisor, threshold)| Command::ExamList { supervisor, threshold }),
        1 => arb_learner().prop_map(|learner| Command::Remove { learner }),
    ]
}

/// Reference model: learner -> (supervisor, score)
fn apply_model(model: &mut HashMap<String, (String, i64)>, command: &Command) {
    match command {
        Command::Enroll {
            learner,
            supervisor,
        } => {
            let score = model.get(learner).map(|(_, score)| *score).unwrap_or(0);
            model.insert(learner.clone(), (supervisor.clone(), score));
        }
        Command::AdjustScore { learner, delta } => {
            if let Some((_, score)) = model.get_mut(learner) {
                *score += delta;
            }
        }
        Command::Remove { learner } => {
            model.remove(learner);
        }
        _ => {}
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Learner assignments and supervisor rosters agree after every command.
    #[test]
    fn rosters_stay_consistent(commands in prop::collection::vec(arb_command(), 0..80)) {
        let mut engine = RegistryEngine::new();
        for command in &commands {
            let _ = engine.execute(command);
            let found = engine.find_inconsistencies();
            prop_assert!(found.is_empty(), "after {:?}: {:?}", command, found);

            for learner in ["a", "b", "c", "d", "e", "f"] {
                for supervisor in ["p", "q", "r"] {
                    let listed = engine
                        .roster(supervisor)
                        .is_some_and(|roster| roster.contains(learner));
                    prop_assert_eq!(engine.is_enrolled_under(learner, supervisor), listed);
                }
            }
        }
    }

    /// The engine agrees with a plain map model on every query.
    #[test]
    fn engine_matches_model(commands in prop::collection::vec(arb_command(), 0..80)) {
        let mut engine = RegistryEngine::new();
        let mut model: HashMap<String, (String, i64)> = HashMap::new();

        for command in &commands {
            let result = engine.execute(command);
            match (command, &result) {
                (Command::ScoreOf { learner }, Ok(Reply::Score { score, .. })) => {
                    prop_assert_eq!(Some(*score), model.get(learner).map(|(_, s)| *s));
                }
                (Command::ScoreOf { learner }, Err(_))
                | (Command::AdjustScore { learner, .. }, Err(_))
                | (Command::Remove { learner }, Err(_)) => {
                    prop_assert!(!model.contains_key(learner));
                }
                (Command::ExamList { supervisor, threshold }, Ok(Reply::ExamList { learners, .. })) => {
                    let mut expected: Vec<String> = model
                        .iter()
                        .filter(|(_, (s, score))| s == supervisor && score >= threshold)
                        .map(|(learner, _)| learner.clone())
                        .collect();
                    expected.sort();
                    prop_assert_eq!(learners, &expected);
                }
                (_, Err(err)) => prop_assert!(false, "unexpected error {:?} for {:?}", err, command),
                _ => {}
            }
            apply_model(&mut model, command);
        }

        prop_assert_eq!(engine.learner_count(), model.len());
    }

    /// Enrolling a learner where it already is changes nothing observable.
    #[test]
    fn reenroll_is_idempotent(
        commands in prop::collection::vec(arb_command(), 0..40),
        learner in arb_learner(),
        supervisor in arb_supervisor(),
    ) {
        let mut engine = RegistryEngine::new();
        for command in &commands {
            let _ = engine.execute(command);
        }
        engine.enroll(&learner, &supervisor);
        let score = engine.score_of(&learner);
        let listing = engine.exam_list(&supervisor, i64::MIN);

        engine.enroll(&learner, &supervisor);
        prop_assert_eq!(engine.score_of(&learner), score);
        prop_assert_eq!(engine.exam_list(&supervisor, i64::MIN), listing);
    }

    /// Moving a learner to another supervisor keeps its score.
    #[test]
    fn reassignment_keeps_score(
        delta in -1000_i64..1000,
        from in arb_supervisor(),
        to in arb_supervisor(),
    ) {
        let mut engine = RegistryEngine::new();
        engine.enroll("x", &from);
        engine.adjust_score("x", delta).unwrap();
        engine.enroll("x", &to);

        prop_assert_eq!(engine.score_of("x").unwrap(), delta);
        prop_assert!(engine.is_enrolled_under("x", &to));
        if from != to {
            prop_assert!(!engine.is_enrolled_under("x", &from));
        }
    }
}
