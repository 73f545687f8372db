//! SpeakEasy: rule-based conversation-practice engine
//!
//! Pipeline: learner utterance → SessionStore → FeedbackEngine → DialogueResponder → avatar turn

pub mod core;
pub mod types;

// =============================================================================
// FEEDBACK GATES - tuned values carried over from the shipped rule tables
// =============================================================================

/// Probability of skipping feedback entirely on a long-enough utterance
pub const SKIP_FEEDBACK_PROBABILITY: f64 = 0.25;

/// Minimum utterance length (chars) for the skip gate to apply
pub const SKIP_FEEDBACK_MIN_CHARS: usize = 20;

/// Probability of praise when no rule fired
pub const PRAISE_PROBABILITY: f64 = 0.4;

/// Minimum utterance length (chars) for praise to apply
pub const PRAISE_MIN_CHARS: usize = 15;

/// Utterances below this token count draw a fluency nudge
pub const MIN_FLUENT_TOKENS: usize = 3;

// =============================================================================
// PACING - advisory delays between submit and the avatar's reply
// =============================================================================

/// Delay before feedback is evaluated (milliseconds)
pub const FEEDBACK_DELAY_MS: u64 = 1000;

/// Delay before the avatar starts "speaking" (milliseconds)
pub const SPEAKING_DELAY_MS: u64 = 2000;

/// Delay before the avatar's reply lands (milliseconds)
/// SPEAKING_DELAY_MS plus 1500ms of speaking animation
pub const REPLY_DELAY_MS: u64 = 3500;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
