//! In-memory flashcard collection partitioned into learning stages.

use crate::dictionary::{Dictionary, ExampleChooser};
use crate::error::{CreationError, EditError, Result, StoreError};
use crate::flashcard::{Flashcard, TRANSLATION_SEPARATOR};
use crate::repository::{CsvRepository, FlashcardRepository};
use crate::types::{FlashcardId, Stage, StageCounts};
use std::collections::{HashMap, HashSet};

type EditResult<T = ()> = std::result::Result<T, EditError>;

/// Result of adding a new word to the collection.
#[derive(Debug)]
pub enum AddOutcome {
    Created(FlashcardId),
    AlreadyExists,
    LookupFailed(CreationError),
}

/// Flashcards grouped by stage, backed by a repository.
///
/// Every flashcard belongs to exactly one stage. Stage membership is kept as
/// ordered id lists so promotions never depend on positions.
pub struct Store<R: FlashcardRepository = CsvRepository> {
    repository: R,
    cards: HashMap<FlashcardId, Flashcard>,
    stages: [Vec<FlashcardId>; 3],
}

impl<R: FlashcardRepository> Store<R> {
    /// Load the collection from `repository`.
    pub fn open(repository: R) -> Result<Self> {
        let mut store = Self {
            repository,
            cards: HashMap::new(),
            stages: Default::default(),
        };

        for staged in store.repository.load()? {
            store.insert(staged.stage, staged.flashcard);
        }

        let counts = store.counts();
        tracing::info!(
            introduction = counts.introduction,
            reverse = counts.reverse,
            review = counts.review,
            "flashcards loaded"
        );
        Ok(store)
    }

    fn insert(&mut self, stage: Stage, flashcard: Flashcard) -> FlashcardId {
        let id = flashcard.id();
        self.stages[stage.index()].push(id);
        self.cards.insert(id, flashcard);
        id
    }

    pub fn get(&self, id: FlashcardId) -> Option<&Flashcard> {
        self.cards.get(&id)
    }

    /// Ids of the flashcards in `stage`, in stage order.
    pub fn stage_ids(&self, stage: Stage) -> &[FlashcardId] {
        &self.stages[stage.index()]
    }

    pub fn stage_cards(&self, stage: Stage) -> impl Iterator<Item = &Flashcard> + '_ {
        self.stage_ids(stage)
            .iter()
            .filter_map(move |id| self.cards.get(id))
    }

    pub fn stage_len(&self, stage: Stage) -> usize {
        self.stages[stage.index()].len()
    }

    pub fn stage_of(&self, id: FlashcardId) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|stage| self.stage_ids(*stage).contains(&id))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn counts(&self) -> StageCounts {
        StageCounts {
            introduction: self.stage_len(Stage::Introduction),
            reverse: self.stage_len(Stage::Reverse),
            review: self.stage_len(Stage::Review),
            total: self.len(),
        }
    }

    /// Find a flashcard by its English word, scanning stages 1, 2 and 3.
    pub fn find_by_english_word(&self, word: &str) -> Option<&Flashcard> {
        Stage::ALL
            .into_iter()
            .flat_map(move |stage| self.stage_cards(stage))
            .find(|card| card.english_word == word)
    }

    /// Move the given flashcards from `from` to the next stage.
    ///
    /// Ids that are not in `from` are ignored. Returns how many moved.
    pub fn promote(&mut self, ids: &[FlashcardId], from: Stage) -> Result<usize> {
        let to = from.next().ok_or(StoreError::NoHigherStage)?;
        Ok(self.move_between(ids, from, to))
    }

    /// Move the given review flashcards back to the first stage.
    pub fn demote_to_first_stage(&mut self, ids: &[FlashcardId]) -> usize {
        self.move_between(ids, Stage::Review, Stage::Introduction)
    }

    fn move_between(&mut self, ids: &[FlashcardId], from: Stage, to: Stage) -> usize {
        let selected: HashSet<FlashcardId> = ids.iter().copied().collect();
        let (moved, kept): (Vec<FlashcardId>, Vec<FlashcardId>) =
            std::mem::take(&mut self.stages[from.index()])
                .into_iter()
                .partition(|id| selected.contains(id));

        self.stages[from.index()] = kept;
        let count = moved.len();
        self.stages[to.index()].extend(moved);

        tracing::info!(from = %from, to = %to, count, "flashcards moved");
        count
    }

    /// Write the whole collection back to the repository.
    pub fn persist(&self) -> Result<()> {
        let rows: Vec<(Stage, &Flashcard)> = Stage::ALL
            .into_iter()
            .flat_map(move |stage| self.stage_cards(stage).map(move |card| (stage, card)))
            .collect();
        self.repository.save(&rows)
    }

    /// Create a flashcard for `word` from the dictionary and add it to the
    /// first stage.
    pub fn add_word(
        &mut self,
        word: &str,
        dictionary: &dyn Dictionary,
        chooser: &mut dyn ExampleChooser,
    ) -> Result<AddOutcome> {
        if self.find_by_english_word(word.trim()).is_some() {
            return Ok(AddOutcome::AlreadyExists);
        }

        match Flashcard::from_dictionary(word, dictionary, chooser) {
            Ok(flashcard) => self.add_flashcard(flashcard),
            Err(e) => {
                tracing::warn!(word, error = %e, "dictionary lookup failed");
                Ok(AddOutcome::LookupFailed(e))
            }
        }
    }

    /// Add an already built flashcard to the first stage.
    pub fn add_flashcard(&mut self, flashcard: Flashcard) -> Result<AddOutcome> {
        if self.find_by_english_word(&flashcard.english_word).is_some() {
            return Ok(AddOutcome::AlreadyExists);
        }

        tracing::info!(word = %flashcard.english_word, "flashcard added");
        let id = self.insert(Stage::Introduction, flashcard);
        self.persist()?;
        Ok(AddOutcome::Created(id))
    }

    fn card_mut(&mut self, id: FlashcardId) -> EditResult<&mut Flashcard> {
        self.cards.get_mut(&id).ok_or(EditError::NotFound)
    }

    /// Change the English word, keeping it unique across all stages.
    pub fn rename_word(&mut self, id: FlashcardId, new_word: &str) -> EditResult {
        let new_word = new_word.trim();
        if new_word.is_empty() {
            return Err(EditError::EmptyValue);
        }
        if !self.cards.contains_key(&id) {
            return Err(EditError::NotFound);
        }
        if self.find_by_english_word(new_word).is_some() {
            return Err(EditError::DuplicateWord(new_word.to_string()));
        }

        self.card_mut(id)?.english_word = new_word.to_string();
        self.persist()?;
        Ok(())
    }

    /// Replace the translation at 0-based `index`.
    pub fn replace_translation(
        &mut self,
        id: FlashcardId,
        index: usize,
        new_translation: &str,
    ) -> EditResult {
        let new_translation = checked_translation(new_translation)?;

        let card = self.card_mut(id)?;
        let len = card.polish_translations.len();
        if index >= len {
            return Err(EditError::TranslationIndex { index, len });
        }
        let duplicate = card
            .polish_translations
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && t == new_translation);
        if duplicate {
            return Err(EditError::DuplicateTranslation(new_translation.to_string()));
        }

        card.polish_translations[index] = new_translation.to_string();
        self.persist()?;
        Ok(())
    }

    pub fn add_translation(&mut self, id: FlashcardId, translation: &str) -> EditResult {
        let translation = checked_translation(translation)?;

        let card = self.card_mut(id)?;
        if card.polish_translations.iter().any(|t| t == translation) {
            return Err(EditError::DuplicateTranslation(translation.to_string()));
        }

        card.polish_translations.push(translation.to_string());
        self.persist()?;
        Ok(())
    }

    /// Remove the translation at 0-based `index`. The last one cannot be removed.
    pub fn remove_translation(&mut self, id: FlashcardId, index: usize) -> EditResult {
        let card = self.card_mut(id)?;
        let len = card.polish_translations.len();
        if len < 2 {
            return Err(EditError::LastTranslation);
        }
        if index >= len {
            return Err(EditError::TranslationIndex { index, len });
        }

        card.polish_translations.remove(index);
        self.persist()?;
        Ok(())
    }

    pub fn set_definition(&mut self, id: FlashcardId, definition: &str) -> EditResult {
        self.card_mut(id)?.definition = definition.to_string();
        self.persist()?;
        Ok(())
    }

    pub fn set_example(&mut self, id: FlashcardId, example: &str) -> EditResult {
        self.card_mut(id)?.example = example.to_string();
        self.persist()?;
        Ok(())
    }

    /// Remove a flashcard from whichever stage holds it.
    pub fn delete_flashcard(&mut self, id: FlashcardId) -> EditResult<Flashcard> {
        let stage = self.stage_of(id).ok_or(EditError::NotFound)?;
        self.stages[stage.index()].retain(|other| *other != id);
        let removed = self.cards.remove(&id).ok_or(EditError::NotFound)?;

        tracing::info!(word = %removed.english_word, stage = %stage, "flashcard deleted");
        self.persist()?;
        Ok(removed)
    }
}

/// Trim a translation typed for an edit. It must survive the `/`-joined
/// table column unchanged.
fn checked_translation(translation: &str) -> EditResult<&str> {
    let translation = translation.trim();
    if translation.is_empty() {
        return Err(EditError::EmptyValue);
    }
    if translation.contains(TRANSLATION_SEPARATOR) {
        return Err(EditError::SeparatorInTranslation(translation.to_string()));
    }
    Ok(translation)
}
