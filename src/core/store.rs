//! Conversation state store
//!
//! Owns the transcript, the feedback list, the learner draft, and the
//! selection fields. All operations are total: no input makes them fail.
//! The epoch counter lets paced tasks detect a reset that happened while
//! they were waiting.

use crate::types::{
    Difficulty, DisplayLanguage, FeedbackItem, SessionSnapshot, Speaker, Topic, Turn,
};

/// What reset() does to the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Empty transcript
    Bare,
    /// Re-seed with the active topic's opening line as the first avatar turn
    #[default]
    Reseed,
}

/// Single-session conversation state
#[derive(Debug)]
pub struct SessionStore {
    transcript: Vec<Turn>,
    feedback: Vec<FeedbackItem>,
    active_topic: Option<Topic>,
    avatar_speaking: bool,
    draft: String,
    level: Difficulty,
    language: DisplayLanguage,
    reset_policy: ResetPolicy,
    next_turn_id: u64,
    epoch: u64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create an empty session
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            feedback: Vec::new(),
            active_topic: None,
            avatar_speaking: false,
            draft: String::new(),
            level: Difficulty::Beginner,
            language: DisplayLanguage::En,
            reset_policy: ResetPolicy::default(),
            next_turn_id: 1,
            epoch: 0,
        }
    }

    /// Create a session with an explicit reset policy
    pub fn with_policy(reset_policy: ResetPolicy) -> Self {
        Self {
            reset_policy,
            ..Self::new()
        }
    }

    /// Append a turn; empty text is the caller's problem, not ours
    pub fn append_turn(&mut self, speaker: Speaker, text: impl Into<String>) -> &Turn {
        let id = self.next_turn_id;
        self.next_turn_id += 1;
        self.transcript.push(Turn::new(id, speaker, text));
        self.transcript.last().unwrap()
    }

    /// Set the learner input draft
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Clear the learner input draft
    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Append a feedback item; no de-duplication
    pub fn add_feedback(&mut self, item: FeedbackItem) {
        self.feedback.push(item);
    }

    /// Toggle the avatar's speaking flag
    pub fn set_avatar_speaking(&mut self, speaking: bool) {
        self.avatar_speaking = speaking;
    }

    /// Select the active topic
    pub fn select_topic(&mut self, topic: Topic) {
        self.active_topic = Some(topic);
    }

    /// Set proficiency level
    pub fn set_level(&mut self, level: Difficulty) {
        self.level = level;
    }

    /// Set display language
    pub fn set_language(&mut self, language: DisplayLanguage) {
        self.language = language;
    }

    /// Clear transcript, feedback and draft; topic/level/language survive.
    /// Bumps the epoch so pending paced writes become stale.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.feedback.clear();
        self.draft.clear();
        self.avatar_speaking = false;
        self.epoch += 1;

        if self.reset_policy == ResetPolicy::Reseed {
            if let Some(opening) = self.active_topic.as_ref().map(|t| t.opening_line.clone()) {
                self.append_turn(Speaker::Avatar, opening);
            }
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn feedback(&self) -> &[FeedbackItem] {
        &self.feedback
    }

    pub fn topic(&self) -> Option<&Topic> {
        self.active_topic.as_ref()
    }

    pub fn avatar_speaking(&self) -> bool {
        self.avatar_speaking
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn level(&self) -> Difficulty {
        self.level
    }

    pub fn language(&self) -> DisplayLanguage {
        self.language
    }

    /// Current epoch; captured by paced tasks at submit time
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Point-in-time copy for the presentation boundary
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            transcript: self.transcript.clone(),
            feedback: self.feedback.clone(),
            active_topic: self.active_topic.clone(),
            avatar_speaking: self.avatar_speaking,
            draft: self.draft.clone(),
            level: self.level,
            language: self.language,
            epoch: self.epoch,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
