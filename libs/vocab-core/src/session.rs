//! Drill sessions over one stage of the store.
//!
//! A session runs in three phases:
//! - warmup: every item is drilled twice, reshuffled each pass;
//! - refinement: items never answered correctly are drilled again, pass after
//!   pass, until each has been answered correctly once;
//! - summary: learned items are promoted, or forgotten review items demoted.
//!
//! Only answers given without revealed letters count toward an item's score.

use crate::console::Console;
use crate::error::SessionError;
use crate::flashcard::Flashcard;
use crate::matching::{reveal_prefix, Matcher};
use crate::repository::FlashcardRepository;
use crate::store::Store;
use crate::types::{Direction, FlashcardId, Stage};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::io;

/// Score an item needs to be promoted after a learning session.
pub const PROMOTION_SCORE: u8 = 2;

/// Number of warmup passes over every item.
pub const WARMUP_PASSES: usize = 2;

pub const HINT_COMMAND: &str = "l";
pub const EXAMPLE_COMMAND: &str = "s";
pub const DEFINITION_COMMAND: &str = "d";

pub const NO_WORDS_MESSAGE: &str = "There are no words to learn!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Warmup,
    Refinement,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Learning stage 1 or 2; learned items are promoted.
    Learning(Stage),
    /// Revising stage 3; forgotten items go back to stage 1.
    Revision,
}

/// Outcome of a single drill turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnResult {
    pub correct: bool,
    pub letters_revealed: usize,
}

impl TurnResult {
    /// Whether the turn counts toward the item's score.
    pub fn scored(&self) -> bool {
        self.correct && self.letters_revealed == 0
    }
}

/// Scores and phase of one drill session.
#[derive(Debug, Clone)]
pub struct DrillSession {
    kind: SessionKind,
    items: Vec<FlashcardId>,
    scores: HashMap<FlashcardId, u8>,
    phase: Phase,
    warmup_passes: usize,
    missed_in_warmup: Vec<FlashcardId>,
}

impl DrillSession {
    pub fn new(kind: SessionKind, items: Vec<FlashcardId>) -> Self {
        let scores = items.iter().map(|id| (*id, 0)).collect();
        Self {
            kind,
            items,
            scores,
            phase: Phase::Warmup,
            warmup_passes: 0,
            missed_in_warmup: Vec::new(),
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn score(&self, id: FlashcardId) -> u8 {
        self.scores.get(&id).copied().unwrap_or_default()
    }

    /// Items for the next pass, in session order, or `None` once the session
    /// has reached its summary.
    pub fn next_pass(&mut self) -> Option<Vec<FlashcardId>> {
        loop {
            match self.phase {
                Phase::Warmup if self.warmup_passes < WARMUP_PASSES => {
                    self.warmup_passes += 1;
                    return Some(self.items.clone());
                }
                Phase::Warmup => {
                    self.missed_in_warmup = self.unanswered();
                    tracing::debug!(missed = self.missed_in_warmup.len(), "warmup finished");
                    self.phase = Phase::Refinement;
                }
                Phase::Refinement => {
                    let remaining = self.unanswered();
                    if !remaining.is_empty() {
                        return Some(remaining);
                    }
                    self.finish();
                }
                Phase::Summary => return None,
            }
        }
    }

    /// Record the outcome of a turn for `id`.
    pub fn record(&mut self, id: FlashcardId, turn: TurnResult) {
        if !turn.scored() {
            return;
        }
        if let Some(score) = self.scores.get_mut(&id) {
            *score = score.saturating_add(1).min(PROMOTION_SCORE);
        }
    }

    fn unanswered(&self) -> Vec<FlashcardId> {
        self.items
            .iter()
            .copied()
            .filter(|id| self.score(*id) < 1)
            .collect()
    }

    fn finish(&mut self) {
        if self.kind == SessionKind::Revision {
            // Items missed during warmup count as forgotten even when the
            // refinement retry succeeded.
            for id in &self.missed_in_warmup {
                self.scores.insert(*id, 0);
            }
        }
        self.phase = Phase::Summary;
    }

    /// Items answered correctly, unhinted, twice.
    pub fn learned(&self) -> Vec<FlashcardId> {
        self.items_with(|score| score >= PROMOTION_SCORE)
    }

    /// Items left with no successful answer.
    pub fn forgotten(&self) -> Vec<FlashcardId> {
        self.items_with(|score| score == 0)
    }

    fn items_with(&self, predicate: impl Fn(u8) -> bool) -> Vec<FlashcardId> {
        self.items
            .iter()
            .copied()
            .filter(|id| predicate(self.score(*id)))
            .collect()
    }
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub kind: SessionKind,
    pub total: usize,
    /// Promoted items for learning sessions, demoted items for revisions.
    pub moved: Vec<FlashcardId>,
}

impl SessionReport {
    pub fn percentage(&self) -> String {
        format_percentage(self.moved.len(), self.total)
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            SessionKind::Learning(_) => "Words learned",
            SessionKind::Revision => "Forgotten words",
        };
        write!(
            f,
            "{label}: {}/{} ({}%)",
            self.moved.len(),
            self.total,
            self.percentage()
        )
    }
}

/// `part / total` as a percentage rounded to two decimals, keeping at least
/// one decimal place (`100.0`, `66.67`).
pub fn format_percentage(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    let value = part as f64 / total as f64 * 100.0;
    let rounded = (value * 100.0).round() / 100.0;
    let mut text = format!("{rounded:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.push('0');
    }
    text
}

/// Drives drill sessions against a console.
pub struct DrillRunner<C: Console, G: Rng> {
    console: C,
    rng: G,
    matcher: Matcher,
}

impl<C: Console, G: Rng> DrillRunner<C, G> {
    pub fn new(console: C, rng: G, matcher: Matcher) -> Self {
        Self {
            console,
            rng,
            matcher,
        }
    }

    pub fn console(&mut self) -> &mut C {
        &mut self.console
    }

    /// Learn every flashcard of stage 1 or 2 and promote the learned ones.
    ///
    /// Returns `None` when the stage is empty.
    pub fn learn<R: FlashcardRepository>(
        &mut self,
        store: &mut Store<R>,
        stage: Stage,
    ) -> Result<Option<SessionReport>, SessionError> {
        if stage.next().is_none() {
            return Err(SessionError::NotLearningStage(stage.to_number()));
        }

        let items = store.stage_ids(stage).to_vec();
        if items.is_empty() {
            self.no_words()?;
            return Ok(None);
        }

        tracing::info!(stage = %stage, words = items.len(), "learning session started");
        let mut session = DrillSession::new(SessionKind::Learning(stage), items);
        self.run(store, &mut session, stage.direction())?;

        let learned = session.learned();
        store.promote(&learned, stage)?;
        let report = SessionReport {
            kind: session.kind(),
            total: session.len(),
            moved: learned,
        };
        store.persist()?;
        self.summarize(&report)?;
        Ok(Some(report))
    }

    /// Revise `count` random flashcards from the review stage and demote the
    /// forgotten ones.
    ///
    /// Returns `None` when there is nothing to revise.
    pub fn revise<R: FlashcardRepository>(
        &mut self,
        store: &mut Store<R>,
        count: usize,
    ) -> Result<Option<SessionReport>, SessionError> {
        let pool = store.stage_ids(Stage::Review);
        if count > pool.len() {
            return Err(SessionError::NotEnoughWords {
                requested: count,
                available: pool.len(),
            });
        }
        if count == 0 {
            self.no_words()?;
            return Ok(None);
        }

        let items: Vec<FlashcardId> = rand::seq::index::sample(&mut self.rng, pool.len(), count)
            .into_iter()
            .map(|i| pool[i])
            .collect();

        tracing::info!(words = items.len(), "revision session started");
        let mut session = DrillSession::new(SessionKind::Revision, items);
        self.run(store, &mut session, Stage::Review.direction())?;

        let forgotten = session.forgotten();
        store.demote_to_first_stage(&forgotten);
        let report = SessionReport {
            kind: session.kind(),
            total: session.len(),
            moved: forgotten,
        };
        store.persist()?;
        self.summarize(&report)?;
        Ok(Some(report))
    }

    fn run<R: FlashcardRepository>(
        &mut self,
        store: &Store<R>,
        session: &mut DrillSession,
        direction: Direction,
    ) -> io::Result<()> {
        while let Some(mut order) = session.next_pass() {
            order.shuffle(&mut self.rng);
            tracing::debug!(phase = ?session.phase(), items = order.len(), "starting pass");

            for id in order {
                let Some(card) = store.get(id) else {
                    continue;
                };
                let turn = self.drill_turn(card, direction)?;
                session.record(id, turn);
            }
        }
        Ok(())
    }

    /// Show one flashcard and read answers until a translation attempt is made.
    pub fn drill_turn(&mut self, card: &Flashcard, direction: Direction) -> io::Result<TurnResult> {
        let (prompt, accepted) = match direction {
            Direction::EnglishToPolish => {
                (card.english_word.clone(), card.polish_translations.as_slice())
            }
            Direction::PolishToEnglish => {
                (card.joined_translations(), std::slice::from_ref(&card.english_word))
            }
        };
        let hint_source = accepted.first().map(String::as_str).unwrap_or_default();

        self.console.clear()?;
        self.console.say(&prompt)?;

        let mut letters_revealed = 0;
        loop {
            let answer = self.console.ask()?;
            match answer.as_str() {
                HINT_COMMAND => {
                    letters_revealed += 1;
                    self.console.say(&reveal_prefix(hint_source, letters_revealed))?;
                }
                EXAMPLE_COMMAND => self.console.say(&card.example)?,
                DEFINITION_COMMAND => self.console.say(&card.definition)?,
                _ => {
                    let correct = self.matcher.is_accepted(&answer, accepted);
                    if correct {
                        self.console.say("Correct!")?;
                    } else {
                        self.console.say(&accepted.join(" / "))?;
                    }
                    self.console.say(&card.definition)?;
                    self.console.say(&card.example)?;
                    self.console.pause()?;

                    return Ok(TurnResult {
                        correct,
                        letters_revealed,
                    });
                }
            }
        }
    }

    fn no_words(&mut self) -> io::Result<()> {
        self.console.say(NO_WORDS_MESSAGE)?;
        self.console.pause()
    }

    fn summarize(&mut self, report: &SessionReport) -> io::Result<()> {
        tracing::info!(
            kind = ?report.kind,
            total = report.total,
            moved = report.moved.len(),
            "session finished"
        );
        self.console.clear()?;
        self.console.say("Good job!")?;
        self.console.say(&report.to_string())?;
        self.console.pause()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CLEAN: TurnResult = TurnResult {
        correct: true,
        letters_revealed: 0,
    };
    const HINTED: TurnResult = TurnResult {
        correct: true,
        letters_revealed: 1,
    };
    const WRONG: TurnResult = TurnResult {
        correct: false,
        letters_revealed: 0,
    };

    fn ids(n: usize) -> Vec<FlashcardId> {
        (0..n).map(|_| FlashcardId::new()).collect()
    }

    #[test]
    fn hinted_turns_do_not_score() {
        assert!(CLEAN.scored());
        assert!(!HINTED.scored());
        assert!(!WRONG.scored());
    }

    #[test]
    fn warmup_runs_two_full_passes() {
        let items = ids(3);
        let mut session = DrillSession::new(SessionKind::Learning(Stage::Introduction), items.clone());

        for _ in 0..WARMUP_PASSES {
            assert_eq!(session.phase(), Phase::Warmup);
            let pass = session.next_pass().unwrap();
            assert_eq!(pass, items);
            for id in pass {
                session.record(id, CLEAN);
            }
        }

        assert_eq!(session.next_pass(), None);
        assert_eq!(session.phase(), Phase::Summary);
        assert_eq!(session.learned(), items);
    }

    #[test]
    fn refinement_repeats_only_unanswered_items() {
        let items = ids(2);
        let (good, bad) = (items[0], items[1]);
        let mut session = DrillSession::new(SessionKind::Learning(Stage::Reverse), items);

        for _ in 0..WARMUP_PASSES {
            session.next_pass().unwrap();
            session.record(good, CLEAN);
            session.record(bad, HINTED);
        }

        assert_eq!(session.next_pass(), Some(vec![bad]));
        assert_eq!(session.phase(), Phase::Refinement);
        session.record(bad, WRONG);
        assert_eq!(session.next_pass(), Some(vec![bad]));
        session.record(bad, CLEAN);
        assert_eq!(session.next_pass(), None);

        assert_eq!(session.learned(), vec![good]);
        assert_eq!(session.score(bad), 1);
    }

    #[test]
    fn revision_forgets_items_missed_in_warmup() {
        let items = ids(3);
        let (kept, once, missed) = (items[0], items[1], items[2]);
        let mut session = DrillSession::new(SessionKind::Revision, items);

        session.next_pass().unwrap();
        session.record(kept, CLEAN);
        session.record(once, WRONG);
        session.record(missed, WRONG);
        session.next_pass().unwrap();
        session.record(kept, CLEAN);
        session.record(once, CLEAN);
        session.record(missed, WRONG);

        assert_eq!(session.next_pass(), Some(vec![missed]));
        session.record(missed, CLEAN);
        assert_eq!(session.next_pass(), None);

        assert_eq!(session.score(missed), 0);
        assert_eq!(session.forgotten(), vec![missed]);
    }

    #[test]
    fn learning_keeps_refinement_successes() {
        let items = ids(1);
        let id = items[0];
        let mut session = DrillSession::new(SessionKind::Learning(Stage::Introduction), items);
        session.next_pass().unwrap();
        session.record(id, WRONG);
        session.next_pass().unwrap();
        session.record(id, WRONG);
        session.next_pass().unwrap();
        session.record(id, CLEAN);
        assert_eq!(session.next_pass(), None);

        assert_eq!(session.score(id), 1);
        assert!(session.learned().is_empty());
        assert!(session.forgotten().is_empty());
    }

    #[test]
    fn scores_never_exceed_promotion_score() {
        let items = ids(1);
        let id = items[0];
        let mut session = DrillSession::new(SessionKind::Revision, items);
        for _ in 0..5 {
            session.record(id, CLEAN);
        }
        assert_eq!(session.score(id), PROMOTION_SCORE);
    }

    #[test]
    fn percentage_matches_summary_format() {
        assert_eq!(format_percentage(3, 3), "100.0");
        assert_eq!(format_percentage(2, 3), "66.67");
        assert_eq!(format_percentage(1, 3), "33.33");
        assert_eq!(format_percentage(1, 8), "12.5");
        assert_eq!(format_percentage(0, 4), "0.0");
    }

    #[test]
    fn report_labels_depend_on_kind() {
        let moved = ids(1);
        let learning = SessionReport {
            kind: SessionKind::Learning(Stage::Introduction),
            total: 2,
            moved: moved.clone(),
        };
        let revision = SessionReport {
            kind: SessionKind::Revision,
            total: 4,
            moved,
        };
        assert_eq!(learning.to_string(), "Words learned: 1/2 (50.0%)");
        assert_eq!(revision.to_string(), "Forgotten words: 1/4 (25.0%)");
    }
}
