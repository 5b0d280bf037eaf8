use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hangman::corpus::WORDS_URL;
use hangman::web::HANGMAN_API_URL;
use hangman::{
    GameResult, GameService, GameSession, HangmanApi, LocalGame, WordCorpus, MAX_WRONG_GUESSES,
};

/// Play hangman automatically, one most-frequent letter at a time
#[derive(Parser)]
#[clap(author, version, about)]
struct Opts {
    /// Read candidate words from this file instead of downloading them
    #[clap(long)]
    words_file: Option<PathBuf>,
    /// Where to download the newline separated word list from
    #[clap(long, default_value = WORDS_URL)]
    words_url: String,
    /// Wrong guesses allowed before the game is lost
    #[clap(long, default_value_t = MAX_WRONG_GUESSES)]
    max_wrong_guesses: usize,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one game against the hangman web service
    Play {
        #[clap(long, default_value = HANGMAN_API_URL)]
        service_url: String,
    },
    /// Play one game against a local host that hides the given word
    Simulate { word: String },
}

async fn load_corpus(opts: &Opts) -> Result<WordCorpus> {
    match &opts.words_file {
        Some(path) => WordCorpus::from_file(path)
            .with_context(|| format!("Failed to read words from {}", path.display())),
        None => WordCorpus::fetch(&opts.words_url)
            .await
            .with_context(|| format!("Failed to download words from {}", opts.words_url)),
    }
}

async fn run<S: GameService>(
    service: S,
    corpus: &WordCorpus,
    max_wrong_guesses: usize,
) -> Result<()> {
    println!("Starting Hangman Game...");
    let session = GameSession::start(service, corpus, max_wrong_guesses)
        .await
        .context("Failed to start a game")?;
    println!("Word Length: {}", session.state().word_length());

    match session.play().await.context("Game aborted")? {
        GameResult::Won {
            word,
            guesses,
            wrong_guesses,
        } => {
            println!("You Won! The word was \x1b[1m{}\x1b[0m", word);
            println!("{} guesses, {} wrong: {:?}", guesses.len(), wrong_guesses, guesses);
        }
        GameResult::Lost {
            masked_word,
            guesses,
        } => {
            println!("You Lost! Got as far as \x1b[1m{}\x1b[0m", masked_word);
            println!("Guessed: {:?}", guesses);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();
    let corpus = load_corpus(&opts).await?;
    match &opts.command {
        Command::Play { service_url } => {
            run(HangmanApi::new(service_url), &corpus, opts.max_wrong_guesses).await
        }
        Command::Simulate { word } => {
            run(LocalGame::new(word), &corpus, opts.max_wrong_guesses).await
        }
    }
}
