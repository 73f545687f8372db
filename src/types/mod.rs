//! Core types for SpeakEasy

mod feedback;
mod session;
mod topic;
mod turn;

pub use feedback::{FeedbackCategory, FeedbackItem};
pub use session::SessionSnapshot;
pub use topic::{catalog, find_topic, Difficulty, DisplayLanguage, Topic};
pub use turn::{Speaker, Turn};
