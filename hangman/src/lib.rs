use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

pub mod algorithm;
pub use algorithm::{choose_letter, frequency_of, merge, LetterFrequencies};
pub mod corpus;
pub use corpus::WordCorpus;
pub mod session;
pub use session::{GameResult, GameSession, GameState, GameStatus};
pub mod web;
pub use web::{GameService, GuessFeedback, GuessOutcome, HangmanApi, NewGame, ServiceError};

/// Marker the game service uses for a letter that has not been revealed yet
pub const BLANK: char = '_';

/// Number of wrong guesses after which the game is lost
pub const MAX_WRONG_GUESSES: usize = 7;

pub type Word = Box<str>;

#[derive(Debug, Error)]
pub enum HangmanError {
    #[error("word length must be a positive integer, got {0}")]
    InvalidLength(usize),

    #[error("no candidate word is consistent with the known constraints")]
    NoCandidateWords,

    #[error("every letter of the remaining candidates has already been guessed")]
    NoUnguessedLetters,

    #[error("no candidate word contains the correctly guessed letter '{0}'")]
    UnlocatedLetter(char),

    #[error("letter '{0}' cannot be both excluded and fixed to a position")]
    ConflictingConstraint(char),

    #[error("the maximum number of wrong guesses must be at least 1")]
    InvalidMaxWrongGuesses,

    #[error("the game service failed")]
    Service(#[from] ServiceError),
}

/// What is known about the hidden word so far.
///
/// Values are never modified in place: every piece of feedback produces a new `Constraints`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    excluded: BTreeSet<char>,
    fixed: BTreeMap<char, usize>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build constraints from a set of wrong letters and a set of located letters
    pub fn from_parts(
        excluded: impl IntoIterator<Item = char>,
        fixed: impl IntoIterator<Item = (char, usize)>,
    ) -> Result<Self, HangmanError> {
        let constraints = excluded
            .into_iter()
            .try_fold(Self::new(), |c, letter| c.with_excluded(letter))?;
        fixed
            .into_iter()
            .try_fold(constraints, |c, (letter, index)| c.with_fixed(letter, index))
    }

    /// Letters known not to be in the word
    pub fn excluded(&self) -> &BTreeSet<char> {
        &self.excluded
    }

    /// Letters known to be in the word, with the index they are assumed to occupy
    pub fn fixed(&self) -> &BTreeMap<char, usize> {
        &self.fixed
    }

    pub fn with_excluded(&self, letter: char) -> Result<Self, HangmanError> {
        if self.fixed.contains_key(&letter) {
            return Err(HangmanError::ConflictingConstraint(letter));
        }
        let mut next = self.clone();
        next.excluded.insert(letter);
        Ok(next)
    }

    pub fn with_fixed(&self, letter: char, index: usize) -> Result<Self, HangmanError> {
        if self.excluded.contains(&letter) {
            return Err(HangmanError::ConflictingConstraint(letter));
        }
        let mut next = self.clone();
        next.fixed.insert(letter, index);
        Ok(next)
    }

    /// Whether `word` has the given length and agrees with every known letter
    pub fn matches(&self, word: &str, length: usize) -> bool {
        word.chars().count() == length
            && !self.excluded.iter().any(|&letter| word.contains(letter))
            && self
                .fixed
                .iter()
                .all(|(&letter, &index)| word.chars().nth(index) == Some(letter))
    }
}

/// Keep the words of `length` letters that satisfy `constraints`, in their original order.
pub fn filter_words<'a, S>(
    words: &'a [S],
    length: usize,
    constraints: &Constraints,
) -> Result<Vec<&'a str>, HangmanError>
where
    S: AsRef<str>,
{
    if length == 0 {
        return Err(HangmanError::InvalidLength(length));
    }
    Ok(words
        .iter()
        .map(AsRef::as_ref)
        .filter(|word| constraints.matches(word, length))
        .collect())
}

/// Whether the masked word has no blanks left
pub fn is_solved(masked_word: &str) -> bool {
    !masked_word.contains(BLANK)
}

/// A game hosted in-process for a hidden word we already know.
///
/// Behaves like the remote service: correct letters are revealed at every position they occupy
/// and a repeated letter is answered with [`GuessFeedback::AlreadyTried`].
pub struct LocalGame {
    word: Word,
    tried: BTreeSet<char>,
}

impl LocalGame {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.trim().to_lowercase().into(),
            tried: BTreeSet::new(),
        }
    }

    /// The hidden word with every untried letter blanked out
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| if self.tried.contains(&c) { c } else { BLANK })
            .collect()
    }
}

impl GameService for LocalGame {
    async fn start_game(&mut self) -> Result<NewGame, ServiceError> {
        self.tried.clear();
        Ok(NewGame {
            hangman: self.masked_word(),
            token: "local".into(),
        })
    }

    async fn check_guess(
        &mut self,
        letter: char,
        _token: &str,
    ) -> Result<GuessFeedback, ServiceError> {
        if !self.tried.insert(letter) {
            return Ok(GuessFeedback::AlreadyTried(letter));
        }
        Ok(GuessFeedback::Resolved(GuessOutcome {
            letter,
            correct: self.word.contains(letter),
            masked_word: self.masked_word(),
            next_token: None,
        }))
    }
}

#[cfg(test)]
macro_rules! constraints {
    ([$($excluded:literal),*] [$($letter:literal @ $index:literal),*]) => {{
        let excluded: Vec<char> = vec![$($excluded),*];
        let fixed: Vec<(char, usize)> = vec![$(($letter, $index)),*];
        $crate::Constraints::from_parts(excluded, fixed).expect("test constraints are consistent")
    }};
}

#[cfg(test)]
mod tests {
    mod constraints {
        use crate::{Constraints, HangmanError};
        use assert_matches::assert_matches;

        macro_rules! check {
            ($word:literal [$len:literal] + $c:expr => allows) => {
                assert!($c.matches($word, $len))
            };
            ($word:literal [$len:literal] + $c:expr => disallows) => {
                assert!(!$c.matches($word, $len))
            };
        }

        #[test]
        fn matches() {
            check!("cat" [3] + constraints!([] []) => allows);
            check!("cat" [4] + constraints!([] []) => disallows);
            check!("cat" [3] + constraints!(['c'] []) => disallows);
            check!("cat" [3] + constraints!(['d', 'o'] []) => allows);
            check!("cat" [3] + constraints!([] ['t' @ 2]) => allows);
            check!("cat" [3] + constraints!([] ['t' @ 1]) => disallows);
            check!("cat" [3] + constraints!(['b'] ['a' @ 1, 't' @ 2]) => allows);
            check!("cat" [3] + constraints!([] ['s' @ 3]) => disallows);
        }

        #[test]
        fn updates_return_new_values() {
            let empty = Constraints::new();
            let wrong = empty.with_excluded('z').unwrap();
            let located = wrong.with_fixed('a', 1).unwrap();

            assert!(empty.excluded().is_empty());
            assert!(wrong.fixed().is_empty());
            assert_eq!(located, constraints!(['z'] ['a' @ 1]));
        }

        #[test]
        fn letter_cannot_be_fixed_and_excluded() {
            let c = constraints!(['x'] ['a' @ 0]);
            assert_matches!(c.with_fixed('x', 2), Err(HangmanError::ConflictingConstraint('x')));
            assert_matches!(c.with_excluded('a'), Err(HangmanError::ConflictingConstraint('a')));
        }
    }

    mod filter {
        use crate::{filter_words, HangmanError};
        use assert_matches::assert_matches;
        use proptest::prelude::*;

        static WORDS: [&str; 6] = ["cat", "dog", "bat", "rat", "goat", "at"];

        #[test]
        fn length_only() {
            let words = filter_words(&WORDS, 3, &constraints!([] [])).unwrap();
            assert_eq!(words, vec!["cat", "dog", "bat", "rat"]);
        }

        #[test]
        fn fixed_position() {
            let words = filter_words(&WORDS[..4], 3, &constraints!([] ['t' @ 2])).unwrap();
            assert_eq!(words, vec!["cat", "bat", "rat"]);
        }

        #[test]
        fn excluded_letters() {
            let words = filter_words(&WORDS, 3, &constraints!(['b', 'r'] [])).unwrap();
            assert_eq!(words, vec!["cat", "dog"]);
        }

        #[test]
        fn nothing_left() {
            let words = filter_words(&WORDS, 3, &constraints!(['a', 'o'] [])).unwrap();
            assert!(words.is_empty());
        }

        #[test]
        fn zero_length() {
            assert_matches!(
                filter_words(&WORDS, 0, &constraints!([] [])),
                Err(HangmanError::InvalidLength(0))
            );
        }

        fn word_list() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec("[a-f]{1,5}", 0..40)
        }

        proptest! {
            #[test]
            fn unconstrained_filter_keeps_every_word_of_that_length(
                words in word_list(),
                length in 1usize..6,
            ) {
                let filtered = filter_words(&words, length, &constraints!([] [])).unwrap();
                let expected: Vec<&str> = words
                    .iter()
                    .map(String::as_str)
                    .filter(|w| w.len() == length)
                    .collect();
                prop_assert_eq!(filtered, expected);
            }

            #[test]
            fn excluded_letters_never_survive(
                words in word_list(),
                length in 1usize..6,
                excluded in prop::collection::btree_set("[a-f]", 0..3),
            ) {
                let c = crate::Constraints::from_parts(
                    excluded.iter().filter_map(|s| s.chars().next()),
                    std::iter::empty::<(char, usize)>(),
                ).unwrap();
                for word in filter_words(&words, length, &c).unwrap() {
                    prop_assert!(!c.excluded().iter().any(|&l| word.contains(l)));
                }
            }

            #[test]
            fn filter_is_idempotent(
                words in word_list(),
                length in 1usize..6,
                letter in "[a-f]",
                index in 0usize..5,
            ) {
                let letter = letter.chars().next().unwrap();
                let c = constraints!(['a'] []);
                let c = if letter == 'a' { c } else { c.with_fixed(letter, index).unwrap() };
                let once = filter_words(&words, length, &c).unwrap();
                let twice = filter_words(&once, length, &c).unwrap();
                prop_assert_eq!(&once, &twice);
            }
        }
    }

    mod local_game {
        use crate::{GameService, GuessFeedback, LocalGame};
        use assert_matches::assert_matches;

        #[tokio::test]
        async fn reveals_every_occurrence() {
            let mut game = LocalGame::new("banana");
            let start = game.start_game().await.unwrap();
            assert_eq!(start.hangman, "______");

            let feedback = game.check_guess('a', &start.token).await.unwrap();
            assert_matches!(feedback, GuessFeedback::Resolved(outcome) => {
                assert!(outcome.correct);
                assert_eq!(outcome.masked_word, "_a_a_a");
            });

            let feedback = game.check_guess('z', &start.token).await.unwrap();
            assert_matches!(feedback, GuessFeedback::Resolved(outcome) => {
                assert!(!outcome.correct);
                assert_eq!(outcome.masked_word, "_a_a_a");
            });
        }

        #[tokio::test]
        async fn repeated_letter_is_already_tried() {
            let mut game = LocalGame::new("cat");
            let start = game.start_game().await.unwrap();
            game.check_guess('a', &start.token).await.unwrap();

            assert_matches!(
                game.check_guess('a', &start.token).await,
                Ok(GuessFeedback::AlreadyTried('a'))
            );
            assert_eq!(game.masked_word(), "_a_");
        }
    }
}
