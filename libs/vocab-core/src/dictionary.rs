//! Contract for online dictionaries used to fill in new flashcards.

use crate::error::LookupError;
use crate::types::DictionaryEntry;
use std::io;

/// At most this many examples are offered when creating a flashcard.
pub const MAX_EXAMPLES: usize = 3;

/// Source of translations, definitions and example sentences.
pub trait Dictionary {
    fn lookup(&self, word: &str) -> Result<DictionaryEntry, LookupError>;
}

/// Picks one of the example sentences returned by a dictionary.
pub trait ExampleChooser {
    /// Returns a 0-based index into `examples`. Never called with an empty slice.
    fn choose_example(&mut self, examples: &[String]) -> io::Result<usize>;
}

/// Dictionary that refuses every lookup, used when running offline.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDictionary;

impl Dictionary for NoDictionary {
    fn lookup(&self, _word: &str) -> Result<DictionaryEntry, LookupError> {
        Err(LookupError::Disabled)
    }
}

impl<F> ExampleChooser for F
where
    F: FnMut(&[String]) -> io::Result<usize>,
{
    fn choose_example(&mut self, examples: &[String]) -> io::Result<usize> {
        self(examples)
    }
}
