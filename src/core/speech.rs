//! Speech capability boundary
//!
//! The recognizer is an external capability: start, stop, and a stream of
//! partial results. Results arrive whenever the capability feels like it -
//! a partial delivered after stop() is still applied to the draft, which is
//! the observed browser behavior (no cancellation is propagated on stop).

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::core::store::SessionStore;

/// Events delivered by a recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Streaming partial transcript
    Partial(String),
    /// Runtime error code; the session continues
    Error(String),
    /// The capability stopped delivering results
    Ended,
}

/// Recognizer configuration, mirroring the capability's knobs
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    pub lang: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
            continuous: true,
            interim_results: true,
        }
    }
}

/// The capability contract: probe, start, stop
pub trait SpeechRecognizer {
    /// Did the feature probe succeed?
    fn supported(&self) -> bool;

    /// Begin delivering events; the error string is the capability's code
    fn start(&mut self) -> Result<(), String>;

    /// Request stop; already-queued events may still arrive
    fn stop(&mut self);
}

/// Probe-failed capability: voice input must be disabled, text entry remains
#[derive(Debug, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn supported(&self) -> bool {
        false
    }

    fn start(&mut self) -> Result<(), String> {
        Err("Speech recognition is not supported in this browser.".to_string())
    }

    fn stop(&mut self) {}
}

/// Deterministic recognizer fed from a fixed event script.
/// Used by tests and the CLI dictation demo.
pub struct ScriptedRecognizer {
    script: Vec<SpeechEvent>,
    tx: Sender<SpeechEvent>,
    pub config: RecognizerConfig,
}

impl ScriptedRecognizer {
    /// Build a recognizer and the receiving end of its event stream
    pub fn new(script: Vec<SpeechEvent>) -> (Self, Receiver<SpeechEvent>) {
        let (tx, rx) = channel();
        (
            Self {
                script,
                tx,
                config: RecognizerConfig::default(),
            },
            rx,
        )
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn supported(&self) -> bool {
        true
    }

    fn start(&mut self) -> Result<(), String> {
        // Queue the whole script; delivery timing is the consumer's pump
        for event in self.script.drain(..) {
            let _ = self.tx.send(event);
        }
        Ok(())
    }

    fn stop(&mut self) {
        // No cancellation reaches the capability; queued events survive
    }
}

/// Glue between a recognizer and the session store
pub struct SpeechSession<R: SpeechRecognizer> {
    recognizer: R,
    events: Receiver<SpeechEvent>,
    listening: bool,
    error: Option<String>,
}

impl<R: SpeechRecognizer> SpeechSession<R> {
    pub fn new(recognizer: R, events: Receiver<SpeechEvent>) -> Self {
        Self {
            recognizer,
            events,
            listening: false,
            error: None,
        }
    }

    pub fn supported(&self) -> bool {
        self.recognizer.supported()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Last runtime error, if any; never fatal
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start listening; a failed start lands in the error field
    pub fn start_listening(&mut self) {
        self.error = None;
        match self.recognizer.start() {
            Ok(()) => self.listening = true,
            Err(code) => self.error = Some(code),
        }
    }

    /// Stop listening; queued partials may still be applied later
    pub fn stop_listening(&mut self) {
        self.recognizer.stop();
        self.listening = false;
    }

    /// Drain delivered events into the store. Partials overwrite the draft
    /// fire-and-forget, even when listening has already stopped.
    pub fn pump(&mut self, store: &mut SessionStore) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SpeechEvent::Partial(text) => store.set_draft(text),
                SpeechEvent::Error(code) => {
                    self.error = Some(format!("Speech recognition error: {}", code));
                }
                SpeechEvent::Ended => self.listening = false,
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_probe() {
        let recognizer = UnsupportedRecognizer;
        assert!(!recognizer.supported());
    }

    #[test]
    fn test_unsupported_start_is_non_fatal() {
        let (_, rx) = channel();
        let mut session = SpeechSession::new(UnsupportedRecognizer, rx);
        session.start_listening();
        assert!(!session.is_listening());
        assert!(session.error().unwrap().contains("not supported"));
    }

    #[test]
    fn test_partials_update_draft() {
        let (recognizer, rx) = ScriptedRecognizer::new(vec![
            SpeechEvent::Partial("i".to_string()),
            SpeechEvent::Partial("i am".to_string()),
            SpeechEvent::Partial("i am happy".to_string()),
        ]);
        let mut session = SpeechSession::new(recognizer, rx);
        let mut store = SessionStore::new();

        session.start_listening();
        assert!(session.is_listening());
        session.pump(&mut store);

        assert_eq!(store.draft(), "i am happy");
    }

    #[test]
    fn test_runtime_error_recorded_and_session_continues() {
        let (recognizer, rx) = ScriptedRecognizer::new(vec![
            SpeechEvent::Error("no-speech".to_string()),
            SpeechEvent::Partial("still here".to_string()),
        ]);
        let mut session = SpeechSession::new(recognizer, rx);
        let mut store = SessionStore::new();

        session.start_listening();
        session.pump(&mut store);

        assert!(session.error().unwrap().contains("no-speech"));
        assert_eq!(store.draft(), "still here");
    }

    #[test]
    fn test_late_partial_overwrites_cleared_draft() {
        // Observed race: stop() does not cancel queued results, so a stale
        // partial supersedes a freshly cleared draft.
        let (recognizer, rx) =
            ScriptedRecognizer::new(vec![SpeechEvent::Partial("stale result".to_string())]);
        let mut session = SpeechSession::new(recognizer, rx);
        let mut store = SessionStore::new();

        session.start_listening();
        session.stop_listening();
        store.clear_draft();
        session.pump(&mut store);

        assert_eq!(store.draft(), "stale result");
    }

    #[test]
    fn test_ended_clears_listening() {
        let (recognizer, rx) = ScriptedRecognizer::new(vec![SpeechEvent::Ended]);
        let mut session = SpeechSession::new(recognizer, rx);
        let mut store = SessionStore::new();

        session.start_listening();
        session.pump(&mut store);
        assert!(!session.is_listening());
    }
}
