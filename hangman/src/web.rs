use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

pub static HANGMAN_API_URL: &str = "http://hangman-api.herokuapp.com/hangman";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to the hangman service failed")]
    Http(#[from] reqwest::Error),

    #[error("hangman service answered with unexpected status {0}")]
    UnexpectedStatus(u16),
}

/// A freshly started game
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewGame {
    /// Masked word, one `_` per hidden letter
    pub hangman: String,
    pub token: String,
}

/// The service's verdict on one submitted letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub letter: char,
    pub correct: bool,
    pub masked_word: String,
    /// Replacement session token, if the service issued one
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessFeedback {
    Resolved(GuessOutcome),
    /// The letter was already submitted in this game; nothing changed
    AlreadyTried(char),
}

/// Something that hosts hangman games
#[allow(async_fn_in_trait)]
pub trait GameService {
    async fn start_game(&mut self) -> Result<NewGame, ServiceError>;

    async fn check_guess(
        &mut self,
        letter: char,
        token: &str,
    ) -> Result<GuessFeedback, ServiceError>;
}

impl<T: GameService> GameService for &mut T {
    async fn start_game(&mut self) -> Result<NewGame, ServiceError> {
        (**self).start_game().await
    }

    async fn check_guess(
        &mut self,
        letter: char,
        token: &str,
    ) -> Result<GuessFeedback, ServiceError> {
        (**self).check_guess(letter, token).await
    }
}

#[derive(Debug, Deserialize)]
struct GuessResponse {
    hangman: String,
    correct: bool,
    token: Option<String>,
}

/// Client for the hangman HTTP API
pub struct HangmanApi {
    client: Client,
    url: String,
}

impl Default for HangmanApi {
    fn default() -> Self {
        Self::new(HANGMAN_API_URL)
    }
}

impl HangmanApi {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }
}

impl GameService for HangmanApi {
    async fn start_game(&mut self) -> Result<NewGame, ServiceError> {
        let response = self.client.post(&self.url).send().await?;
        debug!("POST {} -> {}", self.url, response.status());
        if !response.status().is_success() {
            return Err(ServiceError::UnexpectedStatus(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn check_guess(
        &mut self,
        letter: char,
        token: &str,
    ) -> Result<GuessFeedback, ServiceError> {
        let letter_param = letter.to_string();
        let response = self
            .client
            .put(&self.url)
            .form(&[("letter", letter_param.as_str()), ("token", token)])
            .send()
            .await?;
        debug!("PUT {} letter={} -> {}", self.url, letter, response.status());
        // The service answers 304 for a letter this game has already seen
        if response.status() == StatusCode::NOT_MODIFIED {
            return Ok(GuessFeedback::AlreadyTried(letter));
        }
        if !response.status().is_success() {
            return Err(ServiceError::UnexpectedStatus(response.status().as_u16()));
        }
        let body: GuessResponse = response.json().await?;
        Ok(GuessFeedback::Resolved(GuessOutcome {
            letter,
            correct: body.correct,
            masked_word: body.hangman,
            next_token: body.token,
        }))
    }
}
