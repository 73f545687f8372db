//! Dialogue responder: keyword classification over canned reply templates
//!
//! Stateless: every reply is a function of the utterance, the topic title,
//! and one uniform draw. No dialogue history is consulted.

use crate::core::random::Randomness;
use crate::types::{Difficulty, Topic};

/// The fixed reply buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    Restaurant,
    JobInterview,
    Business,
    Default,
}

impl std::fmt::Display for ReplyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReplyCategory::Restaurant => "restaurant",
            ReplyCategory::JobInterview => "job interview",
            ReplyCategory::Business => "business",
            ReplyCategory::Default => "default",
        };
        write!(f, "{}", name)
    }
}

const RESTAURANT_REPLIES: [&str; 5] = [
    "That sounds delicious! Would you like anything to drink with that?",
    "Great choice! Would you like that with fries or a salad?",
    "Would you prefer your steak well-done, medium, or rare?",
    "We also have a special today. Would you be interested in hearing about it?",
    "Is this your first time dining with us?",
];

const JOB_INTERVIEW_REPLIES: [&str; 5] = [
    "That's interesting. Can you tell me about a challenge you faced in your previous role?",
    "What would you say are your greatest strengths?",
    "Where do you see yourself in five years?",
    "How would your colleagues describe your work style?",
    "What interests you about this position specifically?",
];

const BUSINESS_REPLIES: [&str; 5] = [
    "I see your point. What do you think about our proposed timeline?",
    "That's a reasonable request. Can we discuss the budget implications?",
    "I'm interested in your perspective on the market trends. What do you foresee?",
    "Let's explore how we can create a win-win situation for both companies.",
    "What are your thoughts on extending our partnership for another year?",
];

const DEFAULT_REPLIES: [&str; 5] = [
    "That's interesting! Tell me more.",
    "I understand. Could you elaborate on that?",
    "Thank you for sharing that with me.",
    "Let's explore that idea further.",
    "I see what you mean. How do you feel about that?",
];

/// Responder over the fixed template tables
#[derive(Debug, Default)]
pub struct DialogueResponder;

impl DialogueResponder {
    /// Create new responder
    pub fn new() -> Self {
        Self
    }

    /// Classify an utterance/topic pair into a reply bucket
    ///
    /// Topic-title keywords are checked alongside utterance keywords,
    /// first matching bucket wins, default otherwise.
    pub fn classify(&self, utterance: &str, topic_title: &str) -> ReplyCategory {
        let input = utterance.to_lowercase();
        let topic = topic_title.to_lowercase();

        if topic.contains("restaurant")
            || input.contains("food")
            || input.contains("order")
            || input.contains("eat")
        {
            ReplyCategory::Restaurant
        } else if topic.contains("job")
            || topic.contains("interview")
            || input.contains("work")
            || input.contains("experience")
        {
            ReplyCategory::JobInterview
        } else if topic.contains("business")
            || topic.contains("negotiation")
            || input.contains("deal")
            || input.contains("partner")
        {
            ReplyCategory::Business
        } else {
            ReplyCategory::Default
        }
    }

    /// Produce the avatar's reply: classify, then pick uniformly
    pub fn respond(&self, utterance: &str, topic_title: &str, rng: &mut dyn Randomness) -> String {
        let templates = Self::replies(self.classify(utterance, topic_title));
        templates[rng.pick_index(templates.len())].to_string()
    }

    /// A level-appropriate conversation starter
    pub fn next_question(&self, topic: Option<&Topic>) -> &'static str {
        match topic {
            None => "What would you like to talk about today?",
            Some(t) => match t.difficulty {
                Difficulty::Beginner => {
                    "Let's practice some simple everyday phrases. How are you today?"
                }
                Difficulty::Intermediate => {
                    "Let's dive a bit deeper. Could you tell me about a recent challenge you faced?"
                }
                Difficulty::Advanced => {
                    "Let's explore some complex topics. What are your thoughts on globalization and its impact on language learning?"
                }
            },
        }
    }

    /// The reply table for one bucket
    pub fn replies(category: ReplyCategory) -> &'static [&'static str] {
        match category {
            ReplyCategory::Restaurant => &RESTAURANT_REPLIES,
            ReplyCategory::JobInterview => &JOB_INTERVIEW_REPLIES,
            ReplyCategory::Business => &BUSINESS_REPLIES,
            ReplyCategory::Default => &DEFAULT_REPLIES,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{catalog, DisplayLanguage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_classify_by_topic_title() {
        let responder = DialogueResponder::new();
        assert_eq!(
            responder.classify("hello there", "Ordering at a Restaurant"),
            ReplyCategory::Restaurant
        );
        assert_eq!(
            responder.classify("hello there", "Job Interview"),
            ReplyCategory::JobInterview
        );
        assert_eq!(
            responder.classify("hello there", "Business Negotiation"),
            ReplyCategory::Business
        );
        assert_eq!(
            responder.classify("hello there", "Small Talk"),
            ReplyCategory::Default
        );
    }

    #[test]
    fn test_classify_by_utterance_keyword() {
        let responder = DialogueResponder::new();
        assert_eq!(
            responder.classify("I want to order food", ""),
            ReplyCategory::Restaurant
        );
        assert_eq!(
            responder.classify("tell me about your work", ""),
            ReplyCategory::JobInterview
        );
        assert_eq!(
            responder.classify("let's close this deal", ""),
            ReplyCategory::Business
        );
    }

    #[test]
    fn test_restaurant_keyword_beats_interview_topic() {
        // Bucket order is fixed: restaurant keywords are checked first
        let responder = DialogueResponder::new();
        assert_eq!(
            responder.classify("what do you eat for lunch", "Job Interview"),
            ReplyCategory::Restaurant
        );
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let responder = DialogueResponder::new();
        assert_eq!(
            responder.classify("I WANT TO ORDER", "RESTAURANT"),
            ReplyCategory::Restaurant
        );
    }

    #[test]
    fn test_empty_inputs_fall_back_to_default() {
        let responder = DialogueResponder::new();
        assert_eq!(responder.classify("", ""), ReplyCategory::Default);
    }

    #[test]
    fn test_respond_draws_from_matching_bucket() {
        let responder = DialogueResponder::new();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let reply = responder.respond("hello", "Job Interview", &mut rng);
            assert!(DialogueResponder::replies(ReplyCategory::JobInterview)
                .contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_respond_covers_all_templates() {
        // Over enough draws every template in the bucket should appear
        let responder = DialogueResponder::new();
        let mut rng = StdRng::seed_from_u64(7);
        let templates = DialogueResponder::replies(ReplyCategory::Restaurant);
        let mut seen = vec![false; templates.len()];

        for _ in 0..200 {
            let reply = responder.respond("I want to order", "", &mut rng);
            let idx = templates.iter().position(|t| *t == reply).unwrap();
            seen[idx] = true;
        }

        assert!(seen.iter().all(|s| *s), "all 5 templates should be drawn");
    }

    #[test]
    fn test_next_question_per_difficulty() {
        let responder = DialogueResponder::new();
        let topics = catalog(DisplayLanguage::En);

        assert!(responder.next_question(Some(&topics[0])).contains("simple everyday"));
        assert!(responder.next_question(Some(&topics[1])).contains("deeper"));
        assert!(responder.next_question(Some(&topics[2])).contains("globalization"));
        assert!(responder.next_question(None).contains("talk about today"));
    }
}
