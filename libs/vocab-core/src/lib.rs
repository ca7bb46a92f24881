//! Core vocabulary trainer library.
//!
//! Provides:
//! - Flashcard model with example redaction
//! - `;`-delimited table codec and repositories
//! - Stage store with promotion and demotion
//! - Drill session state machine (warmup, refinement, summary)
//! - Answer matching (exact, case-insensitive, Levenshtein distance)
//! - Dictionary lookup and console contracts

pub mod console;
pub mod dictionary;
pub mod error;
pub mod flashcard;
pub mod matching;
pub mod parser;
pub mod repository;
pub mod session;
pub mod store;
pub mod types;

pub use console::Console;
pub use dictionary::{Dictionary, ExampleChooser, NoDictionary};
pub use error::{CreationError, EditError, LookupError, Result, SessionError, StoreError};
pub use flashcard::Flashcard;
pub use matching::Matcher;
pub use repository::{CsvRepository, FlashcardRepository, MemoryRepository};
pub use session::{DrillRunner, DrillSession, Phase, SessionKind, SessionReport, TurnResult};
pub use store::{AddOutcome, Store};
pub use types::{DictionaryEntry, Direction, FlashcardId, MatchingMode, Stage, StageCounts};
