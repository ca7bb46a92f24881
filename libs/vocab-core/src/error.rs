//! Error types for vocab-core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while loading or writing the flashcard table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file with given path does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("stage must be 1, 2 or 3 at line {line}, found {value:?}")]
    InvalidStage { line: usize, value: String },

    #[error("no polish translations at line {line}")]
    MissingTranslations { line: usize },

    #[error("empty english word at line {line}")]
    MissingWord { line: usize },

    #[error("duplicate english word {word:?} at line {line}")]
    DuplicateWord { word: String, line: usize },

    #[error("flashcards in the last stage cannot be promoted")]
    NoHigherStage,
}

/// Errors returned by a dictionary lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("no entry found for {0:?}")]
    NotFound(String),

    #[error("unexpected page layout: {0}")]
    Parse(String),

    #[error("dictionary lookup is disabled")]
    Disabled,
}

/// Errors that prevent a flashcard from being created.
#[derive(Debug, Error)]
pub enum CreationError {
    #[error("flashcard with word {0:?} cannot be created: {1}")]
    Lookup(String, #[source] LookupError),

    #[error("english word cannot be empty")]
    EmptyWord,

    #[error("flashcard with word {0:?} has no polish translations")]
    NoTranslations(String),

    #[error("example {chosen} does not exist, only {available} offered")]
    InvalidExampleChoice { chosen: usize, available: usize },

    #[error("could not choose an example: {0}")]
    Chooser(#[from] io::Error),
}

/// Rejected or failed flashcard edits.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("flashcard not found")]
    NotFound,

    #[error("a flashcard with the word {0} already exists")]
    DuplicateWord(String),

    #[error("the translation {0} already exists for this flashcard")]
    DuplicateTranslation(String),

    #[error("the translation {0} cannot contain \"/\"")]
    SeparatorInTranslation(String),

    #[error("translation number {index} does not exist (flashcard has {len})")]
    TranslationIndex { index: usize, len: usize },

    #[error("cannot delete polish translation from flashcard with only one polish translation")]
    LastTranslation,

    #[error("value cannot be empty")]
    EmptyValue,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that abort a drill session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console error: {0}")]
    Console(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("stage {0} is not a learning stage")]
    NotLearningStage(u8),

    #[error("there are only {available} words to revise, {requested} requested")]
    NotEnoughWords { requested: usize, available: usize },
}
