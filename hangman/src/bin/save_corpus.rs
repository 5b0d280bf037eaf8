use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use hangman::corpus::WORDS_URL;
use hangman::WordCorpus;

#[derive(Parser)]
struct Opts {
    // URL of the newline separated word list
    #[clap(short, long, default_value = WORDS_URL)]
    words_url: String,
    // Path to save the cleaned word list
    #[clap(short, long)]
    output_path: String,
}

#[tokio::main]
/// Utility to save the word list to disk for later "replay"
///
/// Games can then be played offline with `hangman --words-file`
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts: Opts = Opts::parse();
    let corpus = WordCorpus::fetch(&opts.words_url)
        .await
        .context("Failed to download word list")?;
    fs::write(&opts.output_path, corpus.to_text())
        .with_context(|| format!("Failed to write word list to {}", opts.output_path))?;
    println!("Saved {} words to {}", corpus.len(), opts.output_path);
    Ok(())
}
