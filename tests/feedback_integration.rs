//! Integration tests for the feedback rule engine
//!
//! The random gates are scripted so every property is deterministic.

use pretty_assertions::assert_eq;
use speakeasy::core::{FeedbackEngine, Randomness};
use speakeasy::types::FeedbackCategory;

/// Deterministic draws: chance() pops the script front, picks are fixed.
struct Scripted {
    gates: Vec<bool>,
    pick: usize,
}

impl Scripted {
    fn gates_closed() -> Self {
        Self {
            gates: Vec::new(),
            pick: 0,
        }
    }

    fn new(gates: &[bool], pick: usize) -> Self {
        Self {
            gates: gates.to_vec(),
            pick,
        }
    }
}

impl Randomness for Scripted {
    fn chance(&mut self, _probability: f64) -> bool {
        if self.gates.is_empty() {
            false
        } else {
            self.gates.remove(0)
        }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.pick.min(len - 1)
    }
}

#[test]
fn test_i_is_prefix_yields_i_am_suggestion() {
    let engine = FeedbackEngine::new();

    for utterance in [
        "i is happy today and i want to order food",
        "I is going to the market",
        "I IS ready",
    ] {
        let mut rng = Scripted::gates_closed();
        let item = engine.evaluate(utterance, &mut rng).expect(utterance);
        assert_eq!(item.category, FeedbackCategory::Grammar);
        assert!(
            item.suggestion.as_deref().unwrap().contains("I am"),
            "expected an 'I am' suggestion for {:?}",
            utterance
        );
    }
}

#[test]
fn test_short_unmatched_utterance_yields_fluency() {
    let engine = FeedbackEngine::new();

    for utterance in ["yes", "no thanks", "hello there"] {
        let mut rng = Scripted::gates_closed();
        let item = engine.evaluate(utterance, &mut rng).expect(utterance);
        assert_eq!(item.category, FeedbackCategory::Fluency);
    }
}

#[test]
fn test_skip_gate_only_applies_to_long_utterances() {
    let engine = FeedbackEngine::new();

    // Long enough: the open gate swallows the feedback
    let mut rng = Scripted::new(&[true], 0);
    assert!(engine
        .evaluate("i is very happy about all of this today", &mut rng)
        .is_none());

    // Too short for the gate: the grammar rule still fires
    let mut rng = Scripted::new(&[true], 0);
    let item = engine.evaluate("i is happy", &mut rng).unwrap();
    assert_eq!(item.category, FeedbackCategory::Grammar);
}

#[test]
fn test_rule_order_grammar_before_vocabulary_before_brevity() {
    let engine = FeedbackEngine::new();

    // Grammar and vocabulary both present: grammar wins
    let mut rng = Scripted::gates_closed();
    let item = engine.evaluate("we is a good team", &mut rng).unwrap();
    assert_eq!(item.category, FeedbackCategory::Grammar);

    // Vocabulary and brevity both present: vocabulary wins
    let mut rng = Scripted::gates_closed();
    let item = engine.evaluate("very good", &mut rng).unwrap();
    assert_eq!(item.category, FeedbackCategory::Vocabulary);
}

#[test]
fn test_praise_draws_every_template() {
    let engine = FeedbackEngine::new();
    let clean = "the weather seems pleasant this afternoon";

    for (idx, template) in FeedbackEngine::praise_templates().iter().enumerate() {
        // Skip gate closed, praise gate open, pick scripted to idx
        let mut rng = Scripted::new(&[false, true], idx);
        let item = engine.evaluate(clean, &mut rng).unwrap();
        assert_eq!(item.category, FeedbackCategory::Praise);
        assert_eq!(item.message, *template);
    }
}

#[test]
fn test_at_most_one_item_per_utterance() {
    // The engine returns Option, so this property is structural; assert the
    // None arm as well for an utterance that triggers nothing.
    let engine = FeedbackEngine::new();
    let mut rng = Scripted::gates_closed();
    assert!(engine
        .evaluate("the weather seems pleasant this afternoon", &mut rng)
        .is_none());
}

#[test]
fn test_evaluate_is_pure_under_identical_draws() {
    let engine = FeedbackEngine::new();
    let utterance = "I is happy today and I want to order food";

    let mut a = Scripted::gates_closed();
    let mut b = Scripted::gates_closed();
    let first = engine.evaluate(utterance, &mut a);
    let second = engine.evaluate(utterance, &mut b);

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first.category, second.category);
    assert_eq!(first.message, second.message);
    assert_eq!(first.suggestion, second.suggestion);
}
