//! Command line and environment configuration.

use crate::cambridge::DEFAULT_DICTIONARY_URL;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vocab_core::matching::DEFAULT_FUZZY_THRESHOLD;
use vocab_core::{Matcher, MatchingMode};

#[derive(Parser, Debug)]
#[command(
    name = "vocab-trainer",
    about = "English/Polish vocabulary flashcards",
    version
)]
pub struct Cli {
    /// Flashcard table (default: local data directory)
    #[arg(long, global = true, env = "VOCAB_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Dictionary page prefix, the word is appended to it
    #[arg(long, global = true, env = "VOCAB_DICTIONARY_URL", default_value = DEFAULT_DICTIONARY_URL)]
    pub dictionary_url: String,

    /// Answer matching: exact, case-insensitive or fuzzy
    #[arg(long, global = true, env = "VOCAB_MATCHING", default_value = "exact", value_parser = parse_matching)]
    pub matching: MatchingMode,

    /// Similarity needed by fuzzy matching, between 0 and 1
    #[arg(long, global = true, env = "VOCAB_FUZZY_THRESHOLD", default_value_t = DEFAULT_FUZZY_THRESHOLD, value_parser = parse_threshold)]
    pub fuzzy_threshold: f64,

    /// Never contact the online dictionary
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Learn the words of stage 1, or stage 2 with --reverse
    Learn {
        /// Polish to English
        #[arg(long)]
        reverse: bool,
    },

    /// Revise random words from stage 3
    Revise {
        /// Number of words
        count: usize,
    },

    /// Add a word using the online dictionary
    Add {
        /// English word
        word: String,
    },

    /// Show how many flashcards each stage holds
    Stats {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Table location, and whether it is the default one.
    pub fn data_path(&self) -> (PathBuf, bool) {
        match &self.data_file {
            Some(path) => (path.clone(), false),
            None => (default_data_path(), true),
        }
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.matching, self.fuzzy_threshold)
    }
}

fn default_data_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-trainer")
        .join("data.csv")
}

fn parse_matching(value: &str) -> Result<MatchingMode, String> {
    MatchingMode::from_str(value)
        .ok_or_else(|| format!("unknown matching mode {value:?}, expected exact, case-insensitive or fuzzy"))
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(format!("{threshold} is not between 0 and 1"))
    }
}
