use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::Deref;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::Word;

pub static WORDS_URL: &str = "https://raw.githubusercontent.com/despo/hangman/master/words";

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("could not read the word list")]
    Io(#[from] io::Error),

    #[error("could not download the word list")]
    Http(#[from] reqwest::Error),
}

/// Every word the solver may consider, in the order the source listed them.
///
/// Words are lowercased, blank lines are dropped, as is anything that is not purely alphabetic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCorpus {
    words: Vec<Word>,
}

impl WordCorpus {
    /// Parse newline separated words
    pub fn from_text(text: &str) -> Self {
        Self::from_iter(text.lines())
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
        Ok(Self::from_iter(lines))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let corpus = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!("Loaded {} words from file", corpus.len());
        Ok(corpus)
    }

    /// Download the word list from `url`
    pub async fn fetch(url: &str) -> Result<Self, CorpusError> {
        let text = reqwest::get(url).await?.error_for_status()?.text().await?;
        let corpus = Self::from_text(&text);
        info!("Downloaded {} words from {}", corpus.len(), url);
        Ok(corpus)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Newline separated text that [`WordCorpus::from_text`] reads back unchanged
    pub fn to_text(&self) -> String {
        self.words.iter().map(|w| format!("{w}\n")).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordCorpus {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .filter_map(|line| {
                    let word = line.as_ref().trim().to_lowercase();
                    if word.is_empty() || !word.chars().all(|c| c.is_alphabetic()) {
                        return None;
                    }
                    Some(word.into())
                })
                .collect(),
        }
    }
}

impl Deref for WordCorpus {
    type Target = [Word];

    fn deref(&self) -> &[Word] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn from_text_normalizes_lines() {
        let corpus = WordCorpus::from_text("Cat\r\n\n  dog \nrock'n'roll\nx-ray\nBAT\n");
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.words(), ["cat", "dog", "bat"].map(Word::from));
    }

    #[test]
    fn from_reader_keeps_order() {
        let corpus = WordCorpus::from_reader(Cursor::new("zebra\napple\nmango\n")).unwrap();
        assert_eq!(&*corpus, ["zebra", "apple", "mango"].map(Word::from));
    }

    #[test]
    fn missing_file() {
        assert_matches!(
            WordCorpus::from_file("does/not/exist/words.txt"),
            Err(CorpusError::Io(e)) if e.kind() == io::ErrorKind::NotFound
        );
    }

    #[test]
    fn empty_source() {
        assert!(WordCorpus::from_text("").is_empty());
        assert!(WordCorpus::from_text("\n\n").is_empty());
    }

    #[test]
    fn text_round_trip() {
        let corpus = WordCorpus::from_text("one\ntwo\nthree\n");
        assert_eq!(WordCorpus::from_text(&corpus.to_text()), corpus);
    }
}
