//! Shared helpers for vocab-core integration tests.

#![allow(dead_code)]

use std::io;
use vocab_core::{Console, MemoryRepository, Stage, Store};

pub const HEADER: &str = "english_word;polish_words;example;definition;stage\n";

/// Build table content from `(word, translations, stage)` rows.
pub fn table(rows: &[(&str, &str, u8)]) -> String {
    let mut content = HEADER.to_string();
    for (word, translations, stage) in rows {
        content.push_str(&format!(
            "{word};{translations};The *** is here.;meaning of {word};{stage}\n"
        ));
    }
    content
}

pub fn open(repo: &MemoryRepository) -> Store<&MemoryRepository> {
    Store::open(repo).expect("fixture table should load")
}

pub fn words(store: &Store<&MemoryRepository>, stage: Stage) -> Vec<String> {
    let mut words: Vec<String> = store
        .stage_cards(stage)
        .map(|card| card.english_word.clone())
        .collect();
    words.sort();
    words
}

/// Console that answers from a closure.
///
/// The closure receives the prompt of the current drill turn (the first line
/// shown after a clear) and how many answers were already given in that turn.
pub struct ScriptedConsole<F> {
    answer: F,
    prompt: String,
    awaiting_prompt: bool,
    asks_in_turn: usize,
    closes_at_summary: bool,
    pub transcript: Vec<String>,
    pub pauses: usize,
}

impl<F> ScriptedConsole<F>
where
    F: FnMut(&str, usize) -> String,
{
    pub fn new(answer: F) -> Self {
        Self {
            answer,
            prompt: String::new(),
            awaiting_prompt: false,
            asks_in_turn: 0,
            closes_at_summary: false,
            transcript: Vec::new(),
            pauses: 0,
        }
    }

    /// Input ends at the pause after the session summary.
    pub fn closing_at_summary(mut self) -> Self {
        self.closes_at_summary = true;
        self
    }

    pub fn said(&self, line: &str) -> bool {
        self.transcript.iter().any(|l| l == line)
    }
}

impl<F> Console for ScriptedConsole<F>
where
    F: FnMut(&str, usize) -> String,
{
    fn clear(&mut self) -> io::Result<()> {
        self.awaiting_prompt = true;
        self.asks_in_turn = 0;
        Ok(())
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        if self.awaiting_prompt {
            self.prompt = text.to_string();
            self.awaiting_prompt = false;
        }
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn ask(&mut self) -> io::Result<String> {
        let asked = self.asks_in_turn;
        self.asks_in_turn += 1;
        Ok((self.answer)(&self.prompt, asked))
    }

    fn pause(&mut self) -> io::Result<()> {
        if self.closes_at_summary && self.said("Good job!") {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        self.pauses += 1;
        Ok(())
    }
}
