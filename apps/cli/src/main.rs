mod cambridge;
mod config;
mod console;
mod menu;

use anyhow::Context;
use clap::Parser;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vocab_core::{CsvRepository, Dictionary, DrillRunner, NoDictionary, Stage, Store};

use crate::cambridge::CambridgeDictionary;
use crate::config::{Cli, Command};
use crate::console::Terminal;
use crate::menu::App;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(matching = %cli.matching, threshold = cli.fuzzy_threshold, "answer matching");
    let store = open_store(&cli)?;

    let dictionary: Box<dyn Dictionary> = if cli.offline {
        Box::new(NoDictionary)
    } else {
        Box::new(CambridgeDictionary::new(&cli.dictionary_url)?)
    };

    let runner = DrillRunner::new(Terminal::stdio(), rand::thread_rng(), cli.matcher());
    let mut app = App::new(store, runner, dictionary.as_ref());

    let result = match cli.command {
        None => app.run(),
        Some(Command::Learn { reverse }) => {
            app.learn(if reverse { Stage::Reverse } else { Stage::Introduction })
        }
        Some(Command::Revise { count }) => {
            let available = app.store().stage_len(Stage::Review);
            anyhow::ensure!(
                count <= available,
                "there are only {available} words to revise, {count} requested"
            );
            app.revise(count)
        }
        Some(Command::Add { word }) => app.add_word(&word),
        Some(Command::Stats { json: true }) => app.print_statistics_json(),
        Some(Command::Stats { json: false }) => app.show_statistics(),
    };

    match result {
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            tracing::debug!("end of input");
            Ok(())
        }
        other => other.context("console error"),
    }
}

fn open_store(cli: &Cli) -> anyhow::Result<Store> {
    let (path, is_default) = cli.data_path();
    let repository = CsvRepository::new(&path);
    if is_default {
        repository
            .create_if_missing()
            .with_context(|| format!("cannot create {}", path.display()))?;
    }

    Store::open(repository).with_context(|| format!("cannot load flashcards from {}", path.display()))
}
