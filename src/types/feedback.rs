//! Language-learning feedback items

use serde::{Deserialize, Serialize};

/// The five kinds of feedback the rule engine can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Grammar,
    Pronunciation,
    Vocabulary,
    Fluency,
    Praise,
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FeedbackCategory::Grammar => "grammar",
            FeedbackCategory::Pronunciation => "pronunciation",
            FeedbackCategory::Vocabulary => "vocabulary",
            FeedbackCategory::Fluency => "fluency",
            FeedbackCategory::Praise => "praise",
        };
        write!(f, "{}", name)
    }
}

/// One piece of feedback tied to a learner turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub category: FeedbackCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl FeedbackItem {
    pub fn new(
        category: FeedbackCategory,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            suggestion,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
