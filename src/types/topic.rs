//! Conversation topics and the static, language-keyed catalog
//!
//! The catalog is fixed data: two display languages, three scenarios each.
//! Selection assigns a clone; catalog entries are never mutated.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Proficiency / topic difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// Display language for topic descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLanguage {
    En,
    Pt,
}

impl std::fmt::Display for DisplayLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DisplayLanguage::En => "en",
            DisplayLanguage::Pt => "pt",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for DisplayLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(DisplayLanguage::En),
            "pt" => Ok(DisplayLanguage::Pt),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}

/// A conversation scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// The avatar's scripted first line for this scenario
    pub opening_line: String,
}

impl Topic {
    fn new(
        id: &str,
        title: &str,
        description: &str,
        difficulty: Difficulty,
        opening_line: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            difficulty,
            opening_line: opening_line.to_string(),
        }
    }
}

lazy_static! {
    static ref TOPICS_EN: Vec<Topic> = vec![
        Topic::new(
            "1",
            "Ordering at a Restaurant",
            "Practice ordering food and drinks at a restaurant.",
            Difficulty::Beginner,
            "Hello! Welcome to our restaurant. What would you like to order today?",
        ),
        Topic::new(
            "2",
            "Job Interview",
            "Practice answering common job interview questions.",
            Difficulty::Intermediate,
            "Good morning! Thanks for coming in today. Could you tell me a bit about yourself?",
        ),
        Topic::new(
            "3",
            "Business Negotiation",
            "Practice negotiating a business deal or contract.",
            Difficulty::Advanced,
            "Let's discuss the terms of our potential partnership. What are your thoughts on our initial proposal?",
        ),
    ];

    // Portuguese descriptions, English opening lines: learners practice English
    static ref TOPICS_PT: Vec<Topic> = vec![
        Topic::new(
            "1",
            "Pedindo em um Restaurante",
            "Pratique fazer pedidos de comida e bebida em inglês.",
            Difficulty::Beginner,
            "Hello! Welcome to our restaurant. What would you like to order today?",
        ),
        Topic::new(
            "2",
            "Entrevista de Emprego",
            "Pratique responder perguntas comuns de entrevista de emprego em inglês.",
            Difficulty::Intermediate,
            "Good morning! Thanks for coming in today. Could you tell me a bit about yourself?",
        ),
        Topic::new(
            "3",
            "Negociação Empresarial",
            "Pratique negociar acordos e contratos em inglês.",
            Difficulty::Advanced,
            "Let's discuss the terms of our potential partnership. What are your thoughts on our initial proposal?",
        ),
    ];
}

/// The topic catalog for one display language
pub fn catalog(lang: DisplayLanguage) -> &'static [Topic] {
    match lang {
        DisplayLanguage::En => &TOPICS_EN,
        DisplayLanguage::Pt => &TOPICS_PT,
    }
}

/// Look up a topic by id in one language's catalog
pub fn find_topic(lang: DisplayLanguage, id: &str) -> Option<&'static Topic> {
    catalog(lang).iter().find(|t| t.id == id)
}

// =============================================================================
// TESTS
// =============================================================================
