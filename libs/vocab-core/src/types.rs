//! Core types for the vocabulary trainer.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a flashcard for the lifetime of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlashcardId(Uuid);

impl FlashcardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FlashcardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FlashcardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Learning stage of a flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// New words, drilled English to Polish.
    Introduction,
    /// Drilled Polish to English.
    Reverse,
    /// Long-term review pool.
    Review,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Self::Introduction, Self::Reverse, Self::Review];

    /// Convert to the 1-based number stored in the table.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Introduction => 1,
            Self::Reverse => 2,
            Self::Review => 3,
        }
    }

    /// Create from the 1-based stage number.
    pub fn from_number(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Introduction),
            2 => Some(Self::Reverse),
            3 => Some(Self::Review),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Introduction => Some(Self::Reverse),
            Self::Reverse => Some(Self::Review),
            Self::Review => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.to_number() - 1)
    }

    /// Drill direction used when studying this stage.
    pub fn direction(self) -> Direction {
        match self {
            Self::Reverse => Direction::PolishToEnglish,
            Self::Introduction | Self::Review => Direction::EnglishToPolish,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_number())
    }
}

/// Which side of the flashcard is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    EnglishToPolish,
    PolishToEnglish,
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Exact
    }
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case-insensitive",
            Self::Fuzzy => "fuzzy",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "exact" => Some(Self::Exact),
            "case-insensitive" | "case_insensitive" => Some(Self::CaseInsensitive),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

impl fmt::Display for MatchingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of flashcards per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StageCounts {
    pub introduction: usize,
    pub reverse: usize,
    pub review: usize,
    pub total: usize,
}

/// Data returned by a dictionary for a single English word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub translations: Vec<String>,
    pub definition: String,
    pub examples: Vec<String>,
}
