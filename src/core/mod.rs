//! Core modules for SpeakEasy

pub mod api;
pub mod dialogue;
pub mod feedback;
pub mod practice;
pub mod random;
pub mod speech;
pub mod store;

pub use api::{create_router, run_server};
pub use dialogue::{DialogueResponder, ReplyCategory};
pub use feedback::FeedbackEngine;
pub use practice::{PracticeDriver, PracticeEvent};
pub use random::Randomness;
pub use speech::{
    RecognizerConfig, ScriptedRecognizer, SpeechEvent, SpeechRecognizer, SpeechSession,
    UnsupportedRecognizer,
};
pub use store::{ResetPolicy, SessionStore};
