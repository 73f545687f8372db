//! Conversation turn model
//!
//! A turn is one utterance attributed to the learner or the avatar.
//! Turns are immutable once created; ordering is owned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Avatar,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Speaker::User => "user",
            Speaker::Avatar => "avatar",
        };
        write!(f, "{}", name)
    }
}

/// A single turn in the transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Opaque id, unique within one store
    pub id: u64,
    pub speaker: Speaker,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a new turn stamped with the current time
    pub fn new(id: u64, speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            id,
            speaker,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Turn belongs to the learner
    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}

// =============================================================================
// TESTS
// =============================================================================
