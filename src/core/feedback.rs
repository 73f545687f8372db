//! Feedback rule engine: grammar, vocabulary, brevity, praise
//!
//! Evaluation order is fixed, first match wins:
//! 1. skip gate (0.25, utterance > 20 chars) → no feedback
//! 2. grammar rules (subject/verb agreement)
//! 3. vocabulary rules (overused words)
//! 4. brevity (< 3 tokens)
//! 5. praise gate (0.4, utterance > 15 chars)

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::random::Randomness;
use crate::types::{FeedbackCategory, FeedbackItem};
use crate::{
    MIN_FLUENT_TOKENS, PRAISE_MIN_CHARS, PRAISE_PROBABILITY, SKIP_FEEDBACK_MIN_CHARS,
    SKIP_FEEDBACK_PROBABILITY,
};

/// One subject/verb-agreement rule
struct GrammarRule {
    pattern: Regex,
    correction: &'static str,
}

/// One overused-word rule
struct VocabularyRule {
    pattern: Regex,
    word: &'static str,
    synonyms: &'static str,
}

lazy_static! {
    // =========================================================================
    // Grammar: subject/verb agreement, ordered, first match wins
    // =========================================================================
    static ref GRAMMAR_RULES: Vec<GrammarRule> = vec![
        GrammarRule {
            pattern: Regex::new(r"(?i)\bi (is|am|are) ").unwrap(),
            correction: "I am",
        },
        GrammarRule {
            pattern: Regex::new(r"(?i)\byou (is|am) ").unwrap(),
            correction: "you are",
        },
        GrammarRule {
            pattern: Regex::new(r"(?i)\bhe (am|are) ").unwrap(),
            correction: "he is",
        },
        GrammarRule {
            pattern: Regex::new(r"(?i)\bshe (am|are) ").unwrap(),
            correction: "she is",
        },
        GrammarRule {
            pattern: Regex::new(r"(?i)\bthey (is|am) ").unwrap(),
            correction: "they are",
        },
        GrammarRule {
            pattern: Regex::new(r"(?i)\bwe (is|am) ").unwrap(),
            correction: "we are",
        },
    ];

    // =========================================================================
    // Vocabulary: overused words with richer alternatives
    // =========================================================================
    static ref VOCABULARY_RULES: Vec<VocabularyRule> = vec![
        VocabularyRule {
            pattern: Regex::new(r"(?i)\bgood\b").unwrap(),
            word: "good",
            synonyms: "excellent, great, wonderful",
        },
        VocabularyRule {
            pattern: Regex::new(r"(?i)\bbad\b").unwrap(),
            word: "bad",
            synonyms: "poor, terrible, unpleasant",
        },
        VocabularyRule {
            pattern: Regex::new(r"(?i)\bbig\b").unwrap(),
            word: "big",
            synonyms: "large, enormous, substantial",
        },
        VocabularyRule {
            pattern: Regex::new(r"(?i)\bsmall\b").unwrap(),
            word: "small",
            synonyms: "tiny, compact, miniature",
        },
    ];
}

/// Praise templates for when nothing needs correcting
const PRAISE_TEMPLATES: [&str; 5] = [
    "Well done! Your sentence structure is excellent.",
    "Great job using that vocabulary correctly!",
    "Your pronunciation sounds very natural.",
    "Excellent use of grammar in that sentence!",
    "You're expressing yourself very clearly!",
];

/// Rule engine producing at most one feedback item per utterance
#[derive(Debug, Default)]
pub struct FeedbackEngine;

impl FeedbackEngine {
    /// Create new engine
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one learner utterance
    ///
    /// Pure given the injected randomness: the same utterance with the same
    /// draws always yields the same item.
    pub fn evaluate(&self, utterance: &str, rng: &mut dyn Randomness) -> Option<FeedbackItem> {
        // Don't comment on every turn
        if rng.chance(SKIP_FEEDBACK_PROBABILITY) && utterance.len() > SKIP_FEEDBACK_MIN_CHARS {
            return None;
        }

        for rule in GRAMMAR_RULES.iter() {
            if rule.pattern.is_match(utterance) {
                return Some(FeedbackItem::new(
                    FeedbackCategory::Grammar,
                    "I noticed a small grammar issue in your sentence.",
                    Some(format!("Try using \"{}\" instead.", rule.correction)),
                ));
            }
        }

        for rule in VOCABULARY_RULES.iter() {
            if rule.pattern.is_match(utterance) {
                return Some(FeedbackItem::new(
                    FeedbackCategory::Vocabulary,
                    "You could use more varied vocabulary here.",
                    Some(format!("Instead of \"{}\", try: {}", rule.word, rule.synonyms)),
                ));
            }
        }

        if utterance.split_whitespace().count() < MIN_FLUENT_TOKENS {
            return Some(FeedbackItem::new(
                FeedbackCategory::Fluency,
                "Try to provide longer responses to practice more.",
                Some("Expand your answer with details or explanations.".to_string()),
            ));
        }

        if rng.chance(PRAISE_PROBABILITY) && utterance.len() > PRAISE_MIN_CHARS {
            let template = PRAISE_TEMPLATES[rng.pick_index(PRAISE_TEMPLATES.len())];
            return Some(FeedbackItem::new(FeedbackCategory::Praise, template, None));
        }

        None
    }

    /// The praise template list, for distribution tests and docs
    pub fn praise_templates() -> &'static [&'static str] {
        &PRAISE_TEMPLATES
    }
}

// =============================================================================
// TESTS
// =============================================================================
