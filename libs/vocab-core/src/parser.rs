//! Delimited table codec for the flashcard collection.
//!
//! # Format
//! ```text
//! english_word;polish_words;example;definition;stage
//! cat;kot/kocur;The *** sat on the mat.;a small animal;1
//! dog;pies;The *** barked.;an animal;3
//! ```
//!
//! Translations are joined with `/`, the stage is a 1-based number. Fields
//! holding the delimiter or quotes use standard CSV quoting.

use crate::error::{Result, StoreError};
use crate::flashcard::{parse_translations, Flashcard};
use crate::types::Stage;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;

pub const DELIMITER: u8 = b';';

/// One row of the persisted table, in column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct TableRow {
    english_word: String,
    polish_words: String,
    example: String,
    definition: String,
    stage: String,
}

/// A flashcard read from the table together with its stage.
#[derive(Debug, Clone)]
pub struct StagedFlashcard {
    pub stage: Stage,
    pub flashcard: Flashcard,
    pub line_number: usize,
}

/// Parse table content into staged flashcards.
pub fn parse(content: &str) -> Result<Vec<StagedFlashcard>> {
    read(content.as_bytes())
}

/// Read a table from any reader.
pub fn read<R: io::Read>(reader: R) -> Result<Vec<StagedFlashcard>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut seen_words = HashSet::new();
    let mut cards = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or_default();
        let row: TableRow = record.deserialize(Some(&headers))?;
        let staged = build(row, line)?;

        if !seen_words.insert(staged.flashcard.english_word.clone()) {
            return Err(StoreError::DuplicateWord {
                word: staged.flashcard.english_word,
                line,
            });
        }
        cards.push(staged);
    }

    Ok(cards)
}

fn build(row: TableRow, line: usize) -> Result<StagedFlashcard> {
    let stage = row
        .stage
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(Stage::from_number)
        .ok_or_else(|| StoreError::InvalidStage {
            line,
            value: row.stage.clone(),
        })?;

    if row.english_word.trim().is_empty() {
        return Err(StoreError::MissingWord { line });
    }
    let translations = parse_translations(&row.polish_words);
    if translations.is_empty() {
        return Err(StoreError::MissingTranslations { line });
    }

    let flashcard = Flashcard::new(row.english_word, translations, row.definition, row.example)
        .map_err(|_| StoreError::MissingTranslations { line })?;

    Ok(StagedFlashcard {
        stage,
        flashcard,
        line_number: line,
    })
}

/// Write staged flashcards as a table, header first.
pub fn write<'a, W, I>(writer: W, cards: I) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = (Stage, &'a Flashcard)>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_writer(writer);

    let mut empty = true;
    for (stage, flashcard) in cards {
        writer.serialize(TableRow {
            english_word: flashcard.english_word.clone(),
            polish_words: flashcard.stored_translations(),
            example: flashcard.example.clone(),
            definition: flashcard.definition.clone(),
            stage: stage.to_number().to_string(),
        })?;
        empty = false;
    }

    // serialize() only emits the header alongside the first row
    if empty {
        writer.write_record(["english_word", "polish_words", "example", "definition", "stage"])?;
    }

    writer.flush()?;
    Ok(())
}

/// Render staged flashcards to a string.
pub fn render<'a, I>(cards: I) -> Result<String>
where
    I: IntoIterator<Item = (Stage, &'a Flashcard)>,
{
    let mut buffer = Vec::new();
    write(&mut buffer, cards)?;
    String::from_utf8(buffer)
        .map_err(|e| StoreError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
