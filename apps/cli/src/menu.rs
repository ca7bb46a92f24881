//! Interactive menus around the store and drill sessions.

use rand::Rng;
use std::io;
use vocab_core::flashcard::{parse_translations, EXAMPLE_PLACEHOLDER};
use vocab_core::{
    AddOutcome, Console, CreationError, Dictionary, DrillRunner, EditError, Flashcard,
    FlashcardId, FlashcardRepository, SessionError, Stage, Store,
};

const MAIN_MENU: [&str; 7] = [
    "1. Learning (english to polish)",
    "2. Learning (polish to english)",
    "3. Revising already learned words",
    "4. Add new word",
    "5. Modify a word",
    "6. Show statistics",
    "7. Quit",
];

const MODIFY_MENU: [&str; 8] = [
    "1. Change the English translation",
    "2. Change a Polish translation",
    "3. Add a Polish translation",
    "4. Delete a Polish translation",
    "5. Change the definition",
    "6. Change the example",
    "7. Delete the flashcard",
    "8. Go back",
];

const NO_EXAMPLES_NOTICE: &str = "Unfortunately there are no examples available for this word, \
    but you can add yours in the modifying section of the main menu";

/// First option number from `1..=options` that appears in `input`.
///
/// Lower numbers win, so `"21"` selects option 1.
pub fn menu_choice(input: &str, options: usize) -> Option<usize> {
    (1..=options.min(9)).find(|n| {
        char::from_digit(*n as u32, 10).is_some_and(|digit| input.contains(digit))
    })
}

fn is_confirmation(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "yes" || answer == "y"
}

fn parse_position(input: &str) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// The interactive application: a store, a drill runner and a dictionary.
pub struct App<'d, R: FlashcardRepository, C: Console, G: Rng> {
    store: Store<R>,
    runner: DrillRunner<C, G>,
    dictionary: &'d dyn Dictionary,
}

impl<'d, R: FlashcardRepository, C: Console, G: Rng> App<'d, R, C, G> {
    pub fn new(store: Store<R>, runner: DrillRunner<C, G>, dictionary: &'d dyn Dictionary) -> Self {
        Self {
            store,
            runner,
            dictionary,
        }
    }

    pub fn store(&self) -> &Store<R> {
        &self.store
    }

    fn console(&mut self) -> &mut C {
        self.runner.console()
    }

    fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        self.console().say(text.as_ref())
    }

    fn ask(&mut self) -> io::Result<String> {
        self.console().ask()
    }

    fn pause(&mut self) -> io::Result<()> {
        self.console().pause()
    }

    /// Show a message and wait for the user.
    fn notify(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        self.say(text)?;
        self.pause()
    }

    /// Main menu loop. Returns when the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.console().clear()?;
            self.say("\t\tMenu:")?;
            for line in MAIN_MENU {
                self.say(line)?;
            }
            let action = self.ask()?;
            self.console().clear()?;

            match menu_choice(&action, MAIN_MENU.len()) {
                Some(1) => self.learn(Stage::Introduction)?,
                Some(2) => self.learn(Stage::Reverse)?,
                Some(3) => self.revise_prompt()?,
                Some(4) => self.add_word_prompt()?,
                Some(5) => self.modify_word_prompt()?,
                Some(6) => self.show_statistics()?,
                Some(_) => {
                    tracing::debug!("quit selected");
                    return Ok(());
                }
                None => {}
            }
        }
    }

    /// Run a learning session, reporting failures on the console.
    pub fn learn(&mut self, stage: Stage) -> io::Result<()> {
        let result = self.runner.learn(&mut self.store, stage);
        self.finish_session(result.map(|_| ()))
    }

    /// Run a revision of `count` words, reporting failures on the console.
    pub fn revise(&mut self, count: usize) -> io::Result<()> {
        let result = self.runner.revise(&mut self.store, count);
        self.finish_session(result.map(|_| ()))
    }

    fn finish_session(&mut self, result: Result<(), SessionError>) -> io::Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(SessionError::Console(e)) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, "session failed");
                self.notify(format!("Error: {e}"))
            }
        }
    }

    /// Ask how many review words to revise, then revise them.
    pub fn revise_prompt(&mut self) -> io::Result<()> {
        loop {
            self.say("How many words to revise:")?;
            let input = self.ask()?;
            match parse_position(&input) {
                None => self.say("Wrong input!")?,
                Some(count) if count > self.store.stage_len(Stage::Review) => {
                    self.say("There are not that many words to revise!")?
                }
                Some(count) => return self.revise(count),
            }
            self.pause()?;
            self.console().clear()?;
        }
    }

    pub fn add_word_prompt(&mut self) -> io::Result<()> {
        self.console().clear()?;
        self.say("Type new english word:")?;
        let word = self.ask()?;
        self.add_word(&word)
    }

    /// Add `word` from the dictionary, falling back to manual entry.
    pub fn add_word(&mut self, word: &str) -> io::Result<()> {
        let word = word.trim();
        let outcome = {
            let console = self.runner.console();
            let mut chooser = |examples: &[String]| choose_example(&mut *console, examples);
            self.store.add_word(word, self.dictionary, &mut chooser)
        };

        match outcome {
            Ok(AddOutcome::Created(id)) => {
                let summary = card_summary(&self.store, id);
                let without_example = self
                    .store
                    .get(id)
                    .is_some_and(|card| card.example == EXAMPLE_PLACEHOLDER);
                if without_example {
                    self.notify(NO_EXAMPLES_NOTICE)?;
                }
                self.console().clear()?;
                self.say(summary)?;
                self.say(format!("\nSuccessfully added a word {word}!"))?;
                self.say("\nWould you like to modify anything?")?;
                self.modify_menu(id)
            }
            Ok(AddOutcome::AlreadyExists) => {
                self.notify(format!("\nA flashcard with the word {word} already exists!"))
            }
            Ok(AddOutcome::LookupFailed(CreationError::Chooser(e))) => Err(e),
            Ok(AddOutcome::LookupFailed(e)) => {
                tracing::debug!(error = %e, "offering manual entry");
                self.say(format!("\nCannot add a word {word}!"))?;
                self.say("\nWould you like to add a flashcard manually? (yes / no)")?;
                if is_confirmation(&self.ask()?) {
                    self.add_word_manually()?;
                }
                Ok(())
            }
            Err(e) => self.notify(format!("Error: {e}")),
        }
    }

    /// Ask for every field of a new flashcard.
    pub fn add_word_manually(&mut self) -> io::Result<()> {
        self.say("Type an English word:")?;
        let english_word = self.ask()?;
        self.say("Type a Polish translation:")?;
        let polish_words = self.ask()?;
        self.say("Type a definition:")?;
        let definition = self.ask()?;
        self.say("Type an example:")?;
        let example = self.ask()?;

        let flashcard = match Flashcard::new(
            english_word,
            parse_translations(&polish_words),
            definition,
            example,
        ) {
            Ok(flashcard) => flashcard,
            Err(e) => return self.notify(format!("Cannot add a flashcard: {e}")),
        };
        let word = flashcard.english_word.clone();

        match self.store.add_flashcard(flashcard) {
            Ok(AddOutcome::Created(_)) => self.notify("Flashcard added!"),
            Ok(_) => self.notify(format!("A flashcard with the word {word} already exists!")),
            Err(e) => self.notify(format!("Error: {e}")),
        }
    }

    pub fn modify_word_prompt(&mut self) -> io::Result<()> {
        self.say("Type the english word you want to change:")?;
        let word = self.ask()?;
        let Some(id) = self.store.find_by_english_word(&word).map(Flashcard::id) else {
            return self.notify("There is no flashcard with this word in the database!");
        };

        let summary = card_summary(&self.store, id);
        self.console().clear()?;
        self.say(summary)?;
        self.say("\nChoose an action to be performed:")?;
        self.modify_menu(id)
    }

    fn modify_menu(&mut self, id: FlashcardId) -> io::Result<()> {
        for line in MODIFY_MENU {
            self.say(line)?;
        }
        let action = self.ask()?;
        self.say("")?;

        match action.trim() {
            "1" => self.change_english_word(id),
            "2" => self.change_translation(id),
            "3" => self.add_translation(id),
            "4" => self.delete_translation(id),
            "5" => self.change_definition(id),
            "6" => self.change_example(id),
            "7" => self.delete_flashcard(id),
            _ => Ok(()),
        }
    }

    fn change_english_word(&mut self, id: FlashcardId) -> io::Result<()> {
        self.say("Enter new english translation:")?;
        let new_word = self.ask()?;
        match self.store.rename_word(id, &new_word) {
            Ok(()) => self.notify("\nEnglish translation changed!"),
            Err(EditError::DuplicateWord(word)) => {
                self.notify(format!("\nA flashcard with the word {word} already exists!"))
            }
            Err(e) => self.notify(format!("\n{e}")),
        }
    }

    fn change_translation(&mut self, id: FlashcardId) -> io::Result<()> {
        self.say("Enter new polish translation:")?;
        let new_translation = self.ask()?;
        self.say("\nSelect polish translation you want to change:")?;
        self.list_translations(id)?;

        loop {
            let input = self.ask()?;
            let Some(position) = parse_position(&input).filter(|p| *p > 0) else {
                self.say("Wrong input! Try again:")?;
                continue;
            };
            match self
                .store
                .replace_translation(id, position - 1, &new_translation)
            {
                Ok(()) => return self.notify("\nPolish translation changed!"),
                Err(EditError::TranslationIndex { .. }) => self.say("Wrong input! Try again:")?,
                Err(e) => return self.notify(format!("\n{e}")),
            }
        }
    }

    fn add_translation(&mut self, id: FlashcardId) -> io::Result<()> {
        self.say("Enter new polish translation:")?;
        let new_translation = self.ask()?;
        match self.store.add_translation(id, &new_translation) {
            Ok(()) => self.notify("\nPolish translation added!"),
            Err(EditError::DuplicateTranslation(translation)) => self.notify(format!(
                "\nThe translation {translation} already exists for this flashcard!"
            )),
            Err(e) => self.notify(format!("\n{e}")),
        }
    }

    fn delete_translation(&mut self, id: FlashcardId) -> io::Result<()> {
        let count = self
            .store
            .get(id)
            .map(|card| card.polish_translations.len())
            .unwrap_or_default();
        if count < 2 {
            return self.notify(
                "Cannot delete polish translation from flashcard with only one polish translation!",
            );
        }

        self.say("\nSelect polish translation you want to delete:")?;
        self.list_translations(id)?;
        loop {
            let input = self.ask()?;
            let Some(position) = parse_position(&input).filter(|p| *p > 0) else {
                self.say("Wrong input! Try again:")?;
                continue;
            };
            match self.store.remove_translation(id, position - 1) {
                Ok(()) => return self.notify("\nPolish translation deleted!"),
                Err(EditError::TranslationIndex { .. }) => self.say("Wrong input! Try again:")?,
                Err(e) => return self.notify(format!("\n{e}")),
            }
        }
    }

    fn list_translations(&mut self, id: FlashcardId) -> io::Result<()> {
        let translations = self
            .store
            .get(id)
            .map(|card| card.polish_translations.clone())
            .unwrap_or_default();
        for (i, translation) in translations.iter().enumerate() {
            self.say(format!("{}. {translation}", i + 1))?;
        }
        Ok(())
    }

    fn change_definition(&mut self, id: FlashcardId) -> io::Result<()> {
        self.say("Enter new definition:")?;
        let definition = self.ask()?;
        match self.store.set_definition(id, &definition) {
            Ok(()) => self.notify("\nDefinition changed!"),
            Err(e) => self.notify(format!("\n{e}")),
        }
    }

    fn change_example(&mut self, id: FlashcardId) -> io::Result<()> {
        self.say("Enter new example:")?;
        let example = self.ask()?;
        match self.store.set_example(id, &example) {
            Ok(()) => self.notify("\nExample changed!"),
            Err(e) => self.notify(format!("\n{e}")),
        }
    }

    fn delete_flashcard(&mut self, id: FlashcardId) -> io::Result<()> {
        self.say("Are you sure?")?;
        self.say("1. Yes")?;
        self.say("2. No")?;
        let decision = self.ask()?;
        if decision.trim() != "1" && decision.trim().to_lowercase() != "yes" {
            return Ok(());
        }

        match self.store.delete_flashcard(id) {
            Ok(_) => self.notify("\nFlashcard deleted!"),
            Err(e) => {
                tracing::warn!(error = %e, "flashcard deletion failed");
                self.notify("\nDeletion failed!")
            }
        }
    }

    pub fn show_statistics(&mut self) -> io::Result<()> {
        let counts = self.store.counts();
        self.console().clear()?;
        for (stage, count) in [
            (Stage::Introduction, counts.introduction),
            (Stage::Reverse, counts.reverse),
            (Stage::Review, counts.review),
        ] {
            self.say(format!("Number of flashcards in stage {stage}: {count}"))?;
        }
        self.notify(format!("Total number of flashcards: {}", counts.total))
    }

    /// Print stage counts as JSON.
    pub fn print_statistics_json(&mut self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.store.counts())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.say(json)
    }
}

fn card_summary<R: FlashcardRepository>(store: &Store<R>, id: FlashcardId) -> String {
    store.get(id).map(Flashcard::summary).unwrap_or_default()
}

/// Let the user pick one of the offered examples, returning its 0-based index.
fn choose_example<C: Console + ?Sized>(console: &mut C, examples: &[String]) -> io::Result<usize> {
    console.say("Choose an example to save:")?;
    for (i, example) in examples.iter().enumerate() {
        console.say(&format!("{}. {example}", i + 1))?;
    }
    loop {
        let choice = console.ask()?;
        if let Some(n) = menu_choice(&choice, examples.len()) {
            return Ok(n - 1);
        }
        console.say("Incorrect input! Try again:")?;
    }
}
