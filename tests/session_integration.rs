//! Integration tests for the session store and the full
//! utterance → feedback → reply path

use pretty_assertions::assert_eq;
use speakeasy::core::{
    DialogueResponder, FeedbackEngine, Randomness, ReplyCategory, ResetPolicy, SessionStore,
};
use speakeasy::types::{find_topic, Difficulty, DisplayLanguage, FeedbackCategory, Speaker};

/// All gates closed, picks fixed at zero
struct GatesClosed;

impl Randomness for GatesClosed {
    fn chance(&mut self, _probability: f64) -> bool {
        false
    }

    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}

#[test]
fn test_transcript_preserves_insertion_order() {
    let mut store = SessionStore::new();
    store.append_turn(Speaker::User, "A");
    store.append_turn(Speaker::Avatar, "B");
    store.append_turn(Speaker::User, "C");

    let texts: Vec<_> = store.transcript().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["A", "B", "C"]);
}

#[test]
fn test_reset_clears_conversation_but_not_selection() {
    let mut store = SessionStore::with_policy(ResetPolicy::Bare);
    let topic = find_topic(DisplayLanguage::En, "2").unwrap().clone();
    store.select_topic(topic);
    store.set_level(Difficulty::Intermediate);
    store.set_language(DisplayLanguage::Pt);
    store.append_turn(Speaker::User, "hello");

    store.reset();

    assert!(store.transcript().is_empty());
    assert!(store.feedback().is_empty());
    assert_eq!(store.topic().unwrap().id, "2");
    assert_eq!(store.level(), Difficulty::Intermediate);
    assert_eq!(store.language(), DisplayLanguage::Pt);
}

#[test]
fn test_restaurant_scenario_end_to_end() {
    // "I is happy today and I want to order food" with the restaurant topic:
    // classification = restaurant, feedback (gates closed) = grammar "I am"
    let mut store = SessionStore::new();
    let topic = find_topic(DisplayLanguage::En, "1").unwrap().clone();
    store.select_topic(topic.clone());
    store.reset(); // seed the opening line

    assert_eq!(store.transcript().len(), 1);
    assert_eq!(store.transcript()[0].text, topic.opening_line);

    let utterance = "I is happy today and I want to order food";
    store.append_turn(Speaker::User, utterance);

    let engine = FeedbackEngine::new();
    let mut rng = GatesClosed;
    let item = engine.evaluate(utterance, &mut rng).unwrap();
    assert_eq!(item.category, FeedbackCategory::Grammar);
    assert!(item.suggestion.as_deref().unwrap().contains("I am"));
    store.add_feedback(item);

    let responder = DialogueResponder::new();
    assert_eq!(
        responder.classify(utterance, &topic.title),
        ReplyCategory::Restaurant
    );
    let reply = responder.respond(utterance, &topic.title, &mut rng);
    assert!(DialogueResponder::replies(ReplyCategory::Restaurant).contains(&reply.as_str()));
    store.append_turn(Speaker::Avatar, reply);

    assert_eq!(store.transcript().len(), 3);
    assert_eq!(store.feedback().len(), 1);

    // One reset wipes the whole exchange and replays the opening
    store.reset();
    assert_eq!(store.transcript().len(), 1);
    assert!(store.feedback().is_empty());
}

#[test]
fn test_snapshot_serializes_for_the_view_layer() {
    let mut store = SessionStore::new();
    let topic = find_topic(DisplayLanguage::En, "3").unwrap().clone();
    store.select_topic(topic);
    store.append_turn(Speaker::User, "about that deal");

    let snapshot = store.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();

    assert!(json.contains("\"transcript\""));
    assert!(json.contains("\"active_topic\""));
    assert!(json.contains("about that deal"));
}

#[test]
fn test_next_question_tracks_active_topic_level() {
    let responder = DialogueResponder::new();
    let mut store = SessionStore::new();

    assert!(responder
        .next_question(store.topic())
        .contains("talk about today"));

    let topic = find_topic(DisplayLanguage::En, "3").unwrap().clone();
    store.select_topic(topic);
    assert!(responder
        .next_question(store.topic())
        .contains("globalization"));
}
