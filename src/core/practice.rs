//! Paced practice flow
//!
//! Drives the submit pipeline the presentation layer relies on:
//! user turn lands immediately, feedback after 1000ms, the avatar starts
//! speaking at 2000ms and replies at 3500ms. Every delayed application is
//! guarded by the session epoch captured at submit time, so a reset that
//! happens while a delay is pending drops the stale write instead of
//! applying it to the fresh session.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::time::sleep;

use crate::core::dialogue::DialogueResponder;
use crate::core::feedback::FeedbackEngine;
use crate::core::random::Randomness;
use crate::core::store::SessionStore;
use crate::types::{FeedbackItem, Speaker, Turn};
use crate::{FEEDBACK_DELAY_MS, REPLY_DELAY_MS, SPEAKING_DELAY_MS};

/// What the paced pipeline tells its observers
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PracticeEvent {
    UserTurn { turn: Turn },
    Feedback { item: FeedbackItem },
    Speaking { speaking: bool },
    AvatarTurn { turn: Turn },
    /// A pending write was dropped because the session was reset
    StaleDrop { submitted_epoch: u64 },
    Reset { epoch: u64 },
}

/// Paced driver over one session store
#[derive(Clone)]
pub struct PracticeDriver {
    store: Arc<RwLock<SessionStore>>,
    rng: Arc<Mutex<Box<dyn Randomness + Send>>>,
    events: broadcast::Sender<PracticeEvent>,
}

impl PracticeDriver {
    /// Driver with injected randomness
    pub fn new(store: SessionStore, rng: Box<dyn Randomness + Send>) -> Self {
        let (events, _) = broadcast::channel(100);
        Self {
            store: Arc::new(RwLock::new(store)),
            rng: Arc::new(Mutex::new(rng)),
            events,
        }
    }

    /// Driver with a seeded PRNG
    pub fn with_seed(store: SessionStore, seed: u64) -> Self {
        Self::new(store, Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Subscribe to pipeline events
    pub fn subscribe(&self) -> broadcast::Receiver<PracticeEvent> {
        self.events.subscribe()
    }

    /// Shared handle to the underlying store
    pub fn store(&self) -> Arc<RwLock<SessionStore>> {
        Arc::clone(&self.store)
    }

    /// Submit a learner utterance. The user turn is appended synchronously;
    /// feedback and the avatar reply land on the paced schedule. Returns the
    /// epoch the scheduled writes are bound to.
    pub async fn submit(&self, text: &str) -> u64 {
        let (epoch, topic_title) = {
            let mut store = self.store.write().await;
            let turn = store.append_turn(Speaker::User, text).clone();
            store.clear_draft();
            let _ = self.events.send(PracticeEvent::UserTurn { turn });
            (
                store.epoch(),
                store.topic().map(|t| t.title.clone()).unwrap_or_default(),
            )
        };

        let driver = self.clone();
        let text = text.to_string();
        tokio::spawn(async move {
            driver.run_paced(epoch, text, topic_title).await;
        });

        epoch
    }

    /// Reset the session; any pending paced writes become stale
    pub async fn reset(&self) -> u64 {
        let mut store = self.store.write().await;
        store.reset();
        let epoch = store.epoch();
        let _ = self.events.send(PracticeEvent::Reset { epoch });
        epoch
    }

    async fn run_paced(&self, epoch: u64, text: String, topic_title: String) {
        // Feedback leg
        sleep(Duration::from_millis(FEEDBACK_DELAY_MS)).await;
        {
            let mut store = self.store.write().await;
            if store.epoch() != epoch {
                let _ = self
                    .events
                    .send(PracticeEvent::StaleDrop { submitted_epoch: epoch });
                return;
            }
            let item = {
                let mut rng = self.rng.lock().await;
                FeedbackEngine::new().evaluate(&text, rng.as_mut())
            };
            if let Some(item) = item {
                store.add_feedback(item.clone());
                let _ = self.events.send(PracticeEvent::Feedback { item });
            }
        }

        // Speaking leg
        sleep(Duration::from_millis(SPEAKING_DELAY_MS - FEEDBACK_DELAY_MS)).await;
        {
            let mut store = self.store.write().await;
            if store.epoch() != epoch {
                let _ = self
                    .events
                    .send(PracticeEvent::StaleDrop { submitted_epoch: epoch });
                return;
            }
            store.set_avatar_speaking(true);
            let _ = self.events.send(PracticeEvent::Speaking { speaking: true });
        }

        // Reply leg
        sleep(Duration::from_millis(REPLY_DELAY_MS - SPEAKING_DELAY_MS)).await;
        {
            let mut store = self.store.write().await;
            if store.epoch() != epoch {
                // reset() already cleared the speaking flag
                let _ = self
                    .events
                    .send(PracticeEvent::StaleDrop { submitted_epoch: epoch });
                return;
            }
            let reply = {
                let mut rng = self.rng.lock().await;
                DialogueResponder::new().respond(&text, &topic_title, rng.as_mut())
            };
            let turn = store.append_turn(Speaker::Avatar, reply).clone();
            store.set_avatar_speaking(false);
            let _ = self.events.send(PracticeEvent::AvatarTurn { turn });
            let _ = self.events.send(PracticeEvent::Speaking { speaking: false });
        }
    }
}
