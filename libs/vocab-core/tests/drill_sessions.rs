//! End-to-end drill sessions against a scripted console.

mod common;

use common::{open, table, words, ScriptedConsole};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use vocab_core::session::NO_WORDS_MESSAGE;
use vocab_core::{
    DrillRunner, Matcher, MemoryRepository, SessionError, SessionKind, Stage, StageCounts,
};

fn translations() -> HashMap<&'static str, &'static str> {
    HashMap::from([("cat", "kot"), ("dog", "pies"), ("bird", "ptak")])
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn all_correct_answers_promote_every_card() {
    let repo = MemoryRepository::new(table(&[
        ("cat", "kot", 1),
        ("dog", "pies", 1),
        ("bird", "ptak", 1),
    ]));
    let mut store = open(&repo);
    let answers = translations();
    let mut turns = 0;
    let mut console = ScriptedConsole::new(|prompt: &str, _| {
        turns += 1;
        answers[prompt].to_string()
    });

    let report = DrillRunner::new(&mut console, rng(), Matcher::default())
        .learn(&mut store, Stage::Introduction)
        .unwrap()
        .unwrap();

    assert_eq!(report.kind, SessionKind::Learning(Stage::Introduction));
    assert_eq!(report.to_string(), "Words learned: 3/3 (100.0%)");
    assert!(console.said("Words learned: 3/3 (100.0%)"));
    assert!(console.said("Good job!"));
    assert_eq!(words(&store, Stage::Reverse), vec!["bird", "cat", "dog"]);
    assert_eq!(store.stage_len(Stage::Introduction), 0);
    assert_eq!(repo.save_count(), 1);
    assert!(repo.content().contains("cat;kot;The *** is here.;meaning of cat;2"));
    drop(console);
    assert_eq!(turns, 6);
}

#[test]
fn hinted_answers_never_count() {
    let repo = MemoryRepository::new(table(&[
        ("cat", "kot", 1),
        ("dog", "pies", 1),
        ("bird", "ptak", 1),
    ]));
    let mut store = open(&repo);
    let answers = translations();
    let mut dog_turns = 0;
    let mut console = ScriptedConsole::new(|prompt: &str, asked| {
        if prompt == "dog" {
            if asked == 0 {
                dog_turns += 1;
            }
            // Warmup turns use a hint first, refinement answers directly.
            if dog_turns <= 2 && asked == 0 {
                return "l".to_string();
            }
        }
        answers[prompt].to_string()
    });

    let report = DrillRunner::new(&mut console, rng(), Matcher::default())
        .learn(&mut store, Stage::Introduction)
        .unwrap()
        .unwrap();

    assert_eq!(report.to_string(), "Words learned: 2/3 (66.67%)");
    assert!(console.said("p"));
    assert!(console.said("Correct!"));
    assert_eq!(words(&store, Stage::Introduction), vec!["dog"]);
    assert_eq!(words(&store, Stage::Reverse), vec!["bird", "cat"]);
    drop(console);
    assert_eq!(dog_turns, 3);
}

#[test]
fn repeated_hints_reveal_more_letters() {
    let repo = MemoryRepository::new(table(&[("dog", "pies", 1)]));
    let store = open(&repo);
    let card = store.find_by_english_word("dog").unwrap();
    let mut console = ScriptedConsole::new(|_: &str, asked| match asked {
        0 | 1 => "l".to_string(),
        2 => "s".to_string(),
        3 => "d".to_string(),
        _ => "pies".to_string(),
    });

    let mut runner = DrillRunner::new(&mut console, rng(), Matcher::default());
    let turn = runner
        .drill_turn(card, Stage::Introduction.direction())
        .unwrap();

    assert!(turn.correct);
    assert_eq!(turn.letters_revealed, 2);
    assert!(!turn.scored());
    drop(runner);
    assert_eq!(
        console.transcript,
        vec![
            "dog",
            "p",
            "pi",
            "The *** is here.",
            "meaning of dog",
            "Correct!",
            "meaning of dog",
            "The *** is here.",
        ]
    );
    assert_eq!(console.pauses, 1);
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn examples_and_definitions_do_not_cost_the_score() {
    let repo = MemoryRepository::new(table(&[("cat", "kot", 2)]));
    let mut store = open(&repo);
    let mut console = ScriptedConsole::new(|_: &str, asked| match asked {
        0 => "s".to_string(),
        1 => "d".to_string(),
        _ => "cat".to_string(),
    });

    let report = DrillRunner::new(&mut console, rng(), Matcher::default())
        .learn(&mut store, Stage::Reverse)
        .unwrap()
        .unwrap();

    assert_eq!(report.moved.len(), 1);
    assert_eq!(store.stage_len(Stage::Review), 1);
}

#[test]
fn reverse_stage_prompts_with_translations() {
    let repo = MemoryRepository::new(table(&[("cat", "kot/kocur", 2)]));
    let store = open(&repo);
    let mut prompts = Vec::new();
    let mut console = ScriptedConsole::new(|prompt: &str, _| {
        prompts.push(prompt.to_string());
        "wrong".to_string()
    });

    let card = store.find_by_english_word("cat").unwrap();
    let turn = DrillRunner::new(&mut console, rng(), Matcher::default())
        .drill_turn(card, Stage::Reverse.direction())
        .unwrap();

    assert!(!turn.correct);
    assert!(console.said("cat"));
    drop(console);
    assert_eq!(prompts, vec!["kot / kocur"]);
}

#[test]
fn wrong_answers_are_retried_until_correct() {
    let repo = MemoryRepository::new(table(&[("cat", "kot", 1), ("dog", "pies", 1)]));
    let mut store = open(&repo);
    let answers = translations();
    let mut cat_turns = 0;
    let mut console = ScriptedConsole::new(|prompt: &str, _| {
        if prompt == "cat" {
            cat_turns += 1;
            if cat_turns <= 4 {
                return "pies".to_string();
            }
        }
        answers[prompt].to_string()
    });

    let report = DrillRunner::new(&mut console, rng(), Matcher::default())
        .learn(&mut store, Stage::Introduction)
        .unwrap()
        .unwrap();

    assert_eq!(report.to_string(), "Words learned: 1/2 (50.0%)");
    assert_eq!(words(&store, Stage::Introduction), vec!["cat"]);
    drop(console);
    // two warmup turns, two failed refinement turns, one success
    assert_eq!(cat_turns, 5);
}

#[test]
fn revision_demotes_words_missed_in_warmup() {
    let repo = MemoryRepository::new(table(&[
        ("cat", "kot", 3),
        ("dog", "pies", 3),
        ("bird", "ptak", 3),
    ]));
    let mut store = open(&repo);
    let answers = translations();
    let mut bird_turns = 0;
    let mut console = ScriptedConsole::new(|prompt: &str, _| {
        if prompt == "bird" {
            bird_turns += 1;
            if bird_turns <= 2 {
                return "nie wiem".to_string();
            }
        }
        answers[prompt].to_string()
    });

    let report = DrillRunner::new(&mut console, rng(), Matcher::default())
        .revise(&mut store, 3)
        .unwrap()
        .unwrap();

    assert_eq!(report.kind, SessionKind::Revision);
    assert_eq!(report.to_string(), "Forgotten words: 1/3 (33.33%)");
    assert_eq!(words(&store, Stage::Introduction), vec!["bird"]);
    assert_eq!(words(&store, Stage::Review), vec!["cat", "dog"]);
    assert_eq!(repo.save_count(), 1);
}

#[test]
fn learned_words_are_saved_before_the_summary() {
    let repo = MemoryRepository::new(table(&[("cat", "kot", 1), ("dog", "pies", 1)]));
    let mut store = open(&repo);
    let answers = translations();
    let mut console =
        ScriptedConsole::new(|prompt: &str, _| answers[prompt].to_string()).closing_at_summary();

    let result = DrillRunner::new(&mut console, rng(), Matcher::default())
        .learn(&mut store, Stage::Introduction);

    assert!(matches!(result, Err(SessionError::Console(_))));
    assert!(console.said("Words learned: 2/2 (100.0%)"));
    assert_eq!(repo.save_count(), 1);
    assert!(repo.content().contains("cat;kot;The *** is here.;meaning of cat;2"));
    assert!(repo.content().contains("dog;pies;The *** is here.;meaning of dog;2"));
}

#[test]
fn forgotten_words_are_saved_before_the_summary() {
    let repo = MemoryRepository::new(table(&[("cat", "kot", 3)]));
    let mut store = open(&repo);
    let mut cat_turns = 0;
    let mut console = ScriptedConsole::new(|_: &str, _| {
        cat_turns += 1;
        if cat_turns <= 2 { "nie wiem" } else { "kot" }.to_string()
    })
    .closing_at_summary();

    let result = DrillRunner::new(&mut console, rng(), Matcher::default()).revise(&mut store, 1);

    assert!(matches!(result, Err(SessionError::Console(_))));
    assert_eq!(repo.save_count(), 1);
    assert!(repo.content().contains("cat;kot;The *** is here.;meaning of cat;1"));
}

#[test]
fn revision_samples_the_requested_number_of_words() {
    let repo = MemoryRepository::new(table(&[
        ("cat", "kot", 3),
        ("dog", "pies", 3),
        ("bird", "ptak", 3),
    ]));
    let mut store = open(&repo);
    let answers = translations();
    let mut seen = Vec::new();
    let mut console = ScriptedConsole::new(|prompt: &str, _| {
        seen.push(prompt.to_string());
        answers[prompt].to_string()
    });

    let report = DrillRunner::new(&mut console, rng(), Matcher::default())
        .revise(&mut store, 2)
        .unwrap()
        .unwrap();

    assert_eq!(report.total, 2);
    assert!(report.moved.is_empty());
    assert_eq!(store.counts(), StageCounts { introduction: 0, reverse: 0, review: 3, total: 3 });
    drop(console);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 2);
}

#[test]
fn revision_cannot_exceed_review_pool() {
    let repo = MemoryRepository::new(table(&[("cat", "kot", 3)]));
    let mut store = open(&repo);
    let mut console = ScriptedConsole::new(|_: &str, _| String::new());

    let result = DrillRunner::new(&mut console, rng(), Matcher::default()).revise(&mut store, 2);

    assert!(matches!(
        result,
        Err(SessionError::NotEnoughWords { requested: 2, available: 1 })
    ));
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn empty_stage_reports_no_words() {
    let repo = MemoryRepository::new(table(&[("cat", "kot", 3)]));
    let mut store = open(&repo);
    let mut console = ScriptedConsole::new(|_: &str, _| String::new());

    let report = DrillRunner::new(&mut console, rng(), Matcher::default())
        .learn(&mut store, Stage::Introduction)
        .unwrap();

    assert!(report.is_none());
    assert!(console.said(NO_WORDS_MESSAGE));
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn review_stage_is_not_learned() {
    let repo = MemoryRepository::new(table(&[("cat", "kot", 3)]));
    let mut store = open(&repo);
    let mut console = ScriptedConsole::new(|_: &str, _| String::new());

    let result = DrillRunner::new(&mut console, rng(), Matcher::default())
        .learn(&mut store, Stage::Review);

    assert!(matches!(result, Err(SessionError::NotLearningStage(3))));
}
