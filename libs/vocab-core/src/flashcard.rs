//! A single vocabulary entry.

use crate::dictionary::{Dictionary, ExampleChooser, MAX_EXAMPLES};
use crate::error::CreationError;
use crate::types::FlashcardId;

/// Example text stored when the dictionary offers no sentences.
pub const EXAMPLE_PLACEHOLDER: &str = "---";

/// Replacement for the English word inside example sentences.
pub const REDACTION: &str = "***";

/// Separator of polish translations in the persisted table.
pub const TRANSLATION_SEPARATOR: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    id: FlashcardId,
    pub english_word: String,
    pub polish_translations: Vec<String>,
    pub definition: String,
    pub example: String,
}

impl Flashcard {
    /// Create a flashcard from explicit fields.
    ///
    /// Translations are trimmed and deduplicated; at least one must remain.
    pub fn new(
        english_word: impl Into<String>,
        polish_translations: impl IntoIterator<Item = String>,
        definition: impl Into<String>,
        example: impl Into<String>,
    ) -> Result<Self, CreationError> {
        let english_word = english_word.into().trim().to_string();
        if english_word.is_empty() {
            return Err(CreationError::EmptyWord);
        }

        let polish_translations = normalize_translations(polish_translations);
        if polish_translations.is_empty() {
            return Err(CreationError::NoTranslations(english_word));
        }

        Ok(Self {
            id: FlashcardId::new(),
            english_word,
            polish_translations,
            definition: definition.into(),
            example: example.into(),
        })
    }

    /// Create a flashcard by looking the word up in a dictionary.
    ///
    /// The chooser picks one of up to three examples; the word is then
    /// redacted from it.
    pub fn from_dictionary(
        english_word: &str,
        dictionary: &dyn Dictionary,
        chooser: &mut dyn ExampleChooser,
    ) -> Result<Self, CreationError> {
        let word = english_word.trim();
        if word.is_empty() {
            return Err(CreationError::EmptyWord);
        }

        let entry = dictionary
            .lookup(word)
            .map_err(|e| CreationError::Lookup(word.to_string(), e))?;

        let mut examples = entry.examples;
        examples.truncate(MAX_EXAMPLES);

        let example = if examples.is_empty() {
            EXAMPLE_PLACEHOLDER.to_string()
        } else {
            let chosen = chooser.choose_example(&examples)?;
            let available = examples.len();
            let sentence = examples
                .into_iter()
                .nth(chosen)
                .ok_or(CreationError::InvalidExampleChoice { chosen, available })?;
            redact(&sentence, word)
        };

        Self::new(word, entry.translations, entry.definition.trim(), example)
    }

    pub fn id(&self) -> FlashcardId {
        self.id
    }

    /// Translations joined the way they are shown to the user.
    pub fn joined_translations(&self) -> String {
        self.polish_translations.join(" / ")
    }

    /// Translations joined the way they are persisted.
    pub fn stored_translations(&self) -> String {
        self.polish_translations.join(TRANSLATION_SEPARATOR)
    }

    /// All fields, one per line.
    pub fn summary(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            self.english_word,
            self.joined_translations(),
            self.definition,
            self.example
        )
    }
}

/// Split a persisted `a/b/c` translation list.
pub fn parse_translations(raw: &str) -> Vec<String> {
    normalize_translations([raw.to_string()])
}

/// Entries holding the separator are split, so every translation is stored
/// and reloaded as-is.
fn normalize_translations(translations: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for entry in translations {
        for translation in entry.split(TRANSLATION_SEPARATOR) {
            let translation = translation.trim();
            if translation.is_empty() || result.iter().any(|t| t == translation) {
                continue;
            }
            result.push(translation.to_string());
        }
    }
    result
}

/// Hide `word` in an example sentence.
///
/// Exact occurrences are replaced first, then occurrences of the word without
/// its last character, which catches most inflected forms.
pub fn redact(example: &str, word: &str) -> String {
    if word.is_empty() {
        return example.to_string();
    }
    let redacted = example.replace(word, REDACTION);

    let stem_len = word.char_indices().last().map(|(i, _)| i).unwrap_or(0);
    let stem = &word[..stem_len];
    if stem.is_empty() {
        return redacted;
    }
    redacted.replace(stem, REDACTION)
}
