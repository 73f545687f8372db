//! Serializable read view of a session for the presentation boundary

use serde::{Deserialize, Serialize};

use super::feedback::FeedbackItem;
use super::topic::{Difficulty, DisplayLanguage, Topic};
use super::turn::Turn;

/// Point-in-time copy of the session state, safe to hand to views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub transcript: Vec<Turn>,
    pub feedback: Vec<FeedbackItem>,
    pub active_topic: Option<Topic>,
    pub avatar_speaking: bool,
    pub draft: String,
    pub level: Difficulty,
    pub language: DisplayLanguage,
    /// Bumped on every reset; pending paced writes check it
    pub epoch: u64,
}

impl SessionSnapshot {
    /// Number of learner turns in the transcript
    pub fn user_turn_count(&self) -> usize {
        self.transcript.iter().filter(|t| t.is_user()).count()
    }
}
