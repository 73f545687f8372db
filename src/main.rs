//! SpeakEasy CLI
//!
//! Usage:
//!   speakeasy --text "I is happy"            # Single evaluation
//!   speakeasy --interactive                  # Chat REPL
//!   speakeasy --topics                       # List the topic catalog
//!   speakeasy --serve                        # HTTP API server
//!   speakeasy --text "..." --json            # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use speakeasy::core::{run_server, DialogueResponder, FeedbackEngine, SessionStore};
use speakeasy::types::{
    catalog, find_topic, Difficulty, DisplayLanguage, FeedbackCategory, FeedbackItem, Speaker,
};
use speakeasy::VERSION;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(
    name = "speakeasy",
    version = VERSION,
    about = "SpeakEasy - practice English conversations against a rule-based avatar",
    long_about = "SpeakEasy simulates a conversation partner for language learners.\n\n\
                  Each utterance gets at most one piece of feedback (grammar,\n\
                  vocabulary, fluency, or praise) and a canned reply matched to\n\
                  the active scenario.\n\n\
                  Modes:\n  \
                  --interactive  Chat REPL (default)\n  \
                  --text         Single evaluation\n  \
                  --topics       List the topic catalog\n  \
                  --serve        HTTP API server mode"
)]
struct Args {
    /// Text to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive chat mode - read utterances from stdin
    #[arg(short, long)]
    interactive: bool,

    /// List the topic catalog and exit
    #[arg(long)]
    topics: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Topic id from the catalog (see --topics)
    #[arg(long)]
    topic: Option<String>,

    /// Proficiency level: beginner, intermediate, advanced
    #[arg(long, default_value = "beginner")]
    level: Difficulty,

    /// Display language: en, pt
    #[arg(long, default_value = "en")]
    lang: DisplayLanguage,

    /// Seed the random draws for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.serve {
        run_serve(&args).await;
    } else if args.topics {
        run_topics(&args);
    } else if let Some(ref text) = args.text {
        run_single(text, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args);
    }
}

fn make_rng(args: &Args) -> StdRng {
    match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Run single text evaluation
fn run_single(text: &str, args: &Args) {
    let mut rng = make_rng(args);
    let engine = FeedbackEngine::new();
    let responder = DialogueResponder::new();

    let topic_title = args
        .topic
        .as_deref()
        .and_then(|id| find_topic(args.lang, id))
        .map(|t| t.title.clone())
        .unwrap_or_default();

    let feedback = engine.evaluate(text, &mut rng);
    let reply = responder.respond(text, &topic_title, &mut rng);

    if args.json {
        #[derive(serde::Serialize)]
        struct SingleOutput<'a> {
            feedback: &'a Option<FeedbackItem>,
            reply: &'a str,
        }
        let out = SingleOutput {
            feedback: &feedback,
            reply: &reply,
        };
        println!("{}", serde_json::to_string_pretty(&out).unwrap());
        return;
    }

    if let Some(item) = feedback {
        print_feedback(&item);
    }
    println!("{} {}", "avatar:".bold(), reply);
}

/// List the topic catalog
fn run_topics(args: &Args) {
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(catalog(args.lang)).unwrap()
        );
        return;
    }

    println!("Topics ({}):", args.lang);
    for topic in catalog(args.lang) {
        println!(
            "  [{}] {} ({})",
            topic.id.bold(),
            topic.title,
            topic.difficulty.to_string().cyan()
        );
        println!("      {}", topic.description.dimmed());
    }
}

/// Run interactive chat mode
fn run_interactive(args: &Args) {
    let mut rng = make_rng(args);
    let engine = FeedbackEngine::new();
    let responder = DialogueResponder::new();

    let mut store = SessionStore::new();
    store.set_language(args.lang);
    store.set_level(args.level);

    if let Some(ref id) = args.topic {
        match find_topic(args.lang, id) {
            Some(topic) => {
                store.select_topic(topic.clone());
                store.reset(); // seeds the opening line
            }
            None => {
                eprintln!("Unknown topic id: {} (see --topics)", id);
                std::process::exit(1);
            }
        }
    }

    print_header(args);
    println!("Type an utterance and press Enter. Commands: 'reset', 'topics', 'quit'.");
    println!();

    if let Some(turn) = store.transcript().last() {
        println!("{} {}", "avatar:".bold(), turn.text);
    } else {
        println!("{} {}", "avatar:".bold(), responder.next_question(store.topic()));
    }
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", "you:".green().bold());
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            let turns = store.transcript().len();
            println!("\nSession ended. Turns: {}", turns);
            break;
        }
        if line.eq_ignore_ascii_case("reset") {
            store.reset();
            println!("{}", "Conversation reset.".dimmed());
            if let Some(turn) = store.transcript().last() {
                println!("{} {}", "avatar:".bold(), turn.text);
            }
            continue;
        }
        if line.eq_ignore_ascii_case("topics") {
            run_topics(args);
            continue;
        }
        if line.is_empty() {
            continue;
        }

        store.append_turn(Speaker::User, line);

        if let Some(item) = engine.evaluate(line, &mut rng) {
            print_feedback(&item);
            store.add_feedback(item);
        }

        let topic_title = store.topic().map(|t| t.title.clone()).unwrap_or_default();
        let reply = responder.respond(line, &topic_title, &mut rng);
        println!("{} {}", "avatar:".bold(), reply);
        store.append_turn(Speaker::Avatar, reply);

        if args.json {
            let snapshot = store.snapshot();
            println!("{}", serde_json::to_string(&snapshot).unwrap());
        }
    }
}

/// Print one feedback item, colored by category
fn print_feedback(item: &FeedbackItem) {
    let tag = format!("[{}]", item.category);
    let tag = match item.category {
        FeedbackCategory::Grammar => tag.yellow(),
        FeedbackCategory::Vocabulary => tag.cyan(),
        FeedbackCategory::Fluency => tag.blue(),
        FeedbackCategory::Praise => tag.green(),
        FeedbackCategory::Pronunciation => tag.magenta(),
    };
    println!("  {} {}", tag, item.message);
    if let Some(ref suggestion) = item.suggestion {
        println!("  {}", suggestion.dimmed());
    }
}

/// Print header
fn print_header(args: &Args) {
    println!("========================================");
    println!("  SpeakEasy v{} - Practice Mode", VERSION);
    if let Some(topic) = args
        .topic
        .as_deref()
        .and_then(|id| find_topic(args.lang, id))
    {
        println!("  Topic: {} ({})", topic.title, topic.difficulty);
    }
    println!("========================================");
    println!();
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!();
    println!("SpeakEasy API Server v{}", VERSION);
    println!();

    if let Err(e) = run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
