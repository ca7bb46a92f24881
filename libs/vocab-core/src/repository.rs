//! Persistence backends for the flashcard table.

use crate::error::{Result, StoreError};
use crate::flashcard::Flashcard;
use crate::parser::{self, StagedFlashcard};
use crate::types::Stage;
use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

/// Loads and saves the whole flashcard collection.
pub trait FlashcardRepository {
    fn load(&self) -> Result<Vec<StagedFlashcard>>;

    /// Overwrite persisted state with `cards`, in iteration order.
    fn save(&self, cards: &[(Stage, &Flashcard)]) -> Result<()>;
}

/// Table stored in a `;`-delimited file.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    path: PathBuf,
}

impl CsvRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty table if the file does not exist yet.
    pub fn create_if_missing(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.save(&[])?;
        tracing::info!(path = %self.path.display(), "created empty flashcard table");
        Ok(true)
    }
}

impl FlashcardRepository for CsvRepository {
    fn load(&self) -> Result<Vec<StagedFlashcard>> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::MissingFile(self.path.clone()),
            _ => StoreError::Io(e),
        })?;
        let cards = parser::read(BufReader::new(file))?;
        tracing::debug!(path = %self.path.display(), rows = cards.len(), "loaded flashcard table");
        Ok(cards)
    }

    fn save(&self, cards: &[(Stage, &Flashcard)]) -> Result<()> {
        let file = File::create(&self.path)?;
        parser::write(BufWriter::new(file), cards.iter().copied())?;
        tracing::debug!(path = %self.path.display(), rows = cards.len(), "saved flashcard table");
        Ok(())
    }
}

/// In-memory table, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    content: RefCell<String>,
    saves: RefCell<usize>,
}

impl MemoryRepository {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: RefCell::new(content.into()),
            saves: RefCell::new(0),
        }
    }

    /// Current table content.
    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    /// How many times the table was written.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl FlashcardRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<StagedFlashcard>> {
        parser::parse(&self.content.borrow())
    }

    fn save(&self, cards: &[(Stage, &Flashcard)]) -> Result<()> {
        *self.content.borrow_mut() = parser::render(cards.iter().copied())?;
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

impl<R: FlashcardRepository + ?Sized> FlashcardRepository for &R {
    fn load(&self) -> Result<Vec<StagedFlashcard>> {
        (**self).load()
    }

    fn save(&self, cards: &[(Stage, &Flashcard)]) -> Result<()> {
        (**self).save(cards)
    }
}
