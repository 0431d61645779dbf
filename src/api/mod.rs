//! Backend collaborators.
//!
//! The state containers only ever talk to these traits. Production code wires
//! them to [`http::HttpApi`] and optionally [`dictionary::DictionaryClient`];
//! tests substitute an in-memory fake.
//!
//! | Call              | Method | Path                 |
//! |-------------------|--------|----------------------|
//! | all words         | GET    | `/words/all-words`   |
//! | random word       | GET    | `/words/random-word` |
//! | validate word     | POST   | `/words/validate`    |
//! | save score        | POST   | `/scores/save-score` |
//! | top scores        | GET    | `/scores/top-scores` |

pub mod dictionary;
pub mod http;
#[cfg(test)]
pub(crate) mod test_server;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::scores::LeaderboardEntry;

pub use dictionary::DictionaryClient;
pub use http::HttpApi;

pub const ALL_WORDS_PATH: &str = "/words/all-words";
pub const RANDOM_WORD_PATH: &str = "/words/random-word";
pub const VALIDATE_PATH: &str = "/words/validate";
pub const SAVE_SCORE_PATH: &str = "/scores/save-score";
pub const TOP_SCORES_PATH: &str = "/scores/top-scores";

/// A word as the backend returns it. Any extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationRequest<'a> {
    pub word: &'a str,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
}

/// Body of a score submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub username: String,
    pub score: u32,
}

#[async_trait]
pub trait WordApi: Send + Sync {
    async fn all_words(&self) -> Result<Vec<WordRecord>, ApiError>;

    async fn random_word(&self) -> Result<WordRecord, ApiError>;
}

/// Answers whether a word is acceptable as a guess.
#[async_trait]
pub trait WordValidator: Send + Sync {
    async fn validate(&self, word: &str) -> Result<bool, ApiError>;
}

#[async_trait]
pub trait ScoreApi: Send + Sync {
    /// Persist a finished game. The response body is not consumed.
    async fn save_score(&self, submission: &ScoreSubmission) -> Result<(), ApiError>;

    /// Leaderboard, already ranked and limited by the server.
    async fn top_scores(&self) -> Result<Vec<LeaderboardEntry>, ApiError>;
}
