use std::collections::BTreeSet;

use itertools::Itertools;
use log::{debug, info, warn};

use crate::algorithm::choose_letter;
use crate::web::{GameService, GuessFeedback, GuessOutcome};
use crate::{filter_words, is_solved, Constraints, HangmanError, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    word_length: usize,
    wrong_guess_count: usize,
    constraints: Constraints,
    status: GameStatus,
}

impl GameState {
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn wrong_guess_count(&self) -> usize {
        self.wrong_guess_count
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }
}

/// How a finished game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    Won {
        word: String,
        guesses: Vec<char>,
        wrong_guesses: usize,
    },
    Lost {
        masked_word: String,
        guesses: Vec<char>,
    },
}

/// One game against a [`GameService`], played one letter per turn.
///
/// Each turn filters the corpus by what is known so far, guesses the most frequent letter
/// not yet submitted, and folds the service's answer back into the constraints.
pub struct GameSession<'a, S> {
    service: S,
    corpus: &'a [Word],
    token: String,
    masked_word: String,
    max_wrong_guesses: usize,
    state: GameState,
    // Every letter sent to the service, including ones it reported as already tried
    submitted: BTreeSet<char>,
    guesses: Vec<char>,
}

impl<'a, S: GameService> GameSession<'a, S> {
    /// Ask the service for a new game and size it from the masked word
    pub async fn start(
        mut service: S,
        corpus: &'a [Word],
        max_wrong_guesses: usize,
    ) -> Result<GameSession<'a, S>, HangmanError> {
        if max_wrong_guesses == 0 {
            return Err(HangmanError::InvalidMaxWrongGuesses);
        }
        let game = service.start_game().await?;
        let word_length = game.hangman.chars().count();
        if word_length == 0 {
            return Err(HangmanError::InvalidLength(word_length));
        }
        info!("Starting Hangman game, word length: {}", word_length);
        Ok(Self {
            service,
            corpus,
            token: game.token,
            masked_word: game.hangman,
            max_wrong_guesses,
            state: GameState {
                word_length,
                wrong_guess_count: 0,
                constraints: Constraints::new(),
                status: GameStatus::InProgress,
            },
            submitted: BTreeSet::new(),
            guesses: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The latest masked word reported by the service
    pub fn masked_word(&self) -> &str {
        &self.masked_word
    }

    /// Letters guessed so far, in order. Letters the service had already seen are not included.
    pub fn guesses(&self) -> &[char] {
        &self.guesses
    }

    /// Words still consistent with everything learnt so far
    pub fn candidates(&self) -> Result<Vec<&'a str>, HangmanError> {
        filter_words(self.corpus, self.state.word_length, &self.state.constraints)
    }

    /// Play a single turn and return the status it leaves the game in.
    ///
    /// A finished game is left untouched.
    pub async fn take_turn(&mut self) -> Result<GameStatus, HangmanError> {
        if self.state.status != GameStatus::InProgress {
            return Ok(self.state.status);
        }
        let candidates = self.candidates()?;
        debug!("{} candidate words remain", candidates.len());
        let letter = choose_letter(&candidates, &self.submitted)?;
        info!("Letter is {}, checking...", letter);

        let feedback = self.service.check_guess(letter, &self.token).await?;
        self.submitted.insert(letter);
        match feedback {
            GuessFeedback::AlreadyTried(letter) => {
                warn!("Letter {} was already tried", letter);
            }
            GuessFeedback::Resolved(outcome) => {
                self.guesses.push(letter);
                self.resolve(&candidates, outcome)?;
            }
        }
        Ok(self.state.status)
    }

    fn resolve(&mut self, candidates: &[&str], outcome: GuessOutcome) -> Result<(), HangmanError> {
        let GuessOutcome {
            letter,
            correct,
            masked_word,
            next_token,
        } = outcome;
        if let Some(token) = next_token {
            self.token = token;
        }
        self.masked_word = masked_word;

        if correct {
            info!("Guess was correct!");
            // The service does not say where the letter is, so assume the first candidate
            // containing it has it in the right place.
            let index = candidates
                .iter()
                .find_map(|word| word.chars().position(|c| c == letter))
                .ok_or(HangmanError::UnlocatedLetter(letter))?;
            debug!("Assuming '{}' is at index {}", letter, index);
            self.state.constraints = self.state.constraints.with_fixed(letter, index)?;
            if is_solved(&self.masked_word) {
                info!("You Won!");
                self.state.status = GameStatus::Won;
            }
        } else {
            info!("Guess was wrong!");
            self.state.constraints = self.state.constraints.with_excluded(letter)?;
            self.state.wrong_guess_count += 1;
            if self.state.wrong_guess_count >= self.max_wrong_guesses {
                info!("Max allowed guesses reached! You Lost!");
                self.state.status = GameStatus::Lost;
            }
        }
        Ok(())
    }

    /// Take turns until the game is won or lost
    pub async fn play(mut self) -> Result<GameResult, HangmanError> {
        loop {
            match self.take_turn().await? {
                GameStatus::InProgress => continue,
                GameStatus::Won => {
                    info!("Won with guesses [{}]", self.guesses.iter().join(", "));
                    return Ok(GameResult::Won {
                        word: self.masked_word,
                        guesses: self.guesses,
                        wrong_guesses: self.state.wrong_guess_count,
                    });
                }
                GameStatus::Lost => {
                    info!("Lost with guesses [{}]", self.guesses.iter().join(", "));
                    return Ok(GameResult::Lost {
                        masked_word: self.masked_word,
                        guesses: self.guesses,
                    });
                }
            }
        }
    }
}
