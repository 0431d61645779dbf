//! State containers for the word game client.
//!
//! - `session` - Current player, in-progress flag and score
//! - `words` - Word list, current word, validation
//! - `scores` - Score submission and leaderboard
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         GameState                             │
//! │                                                               │
//! │                  ┌─────────────────────┐                      │
//! │                  │  SessionController  │                      │
//! │                  │  player, score,     │                      │
//! │                  │  in_progress        │                      │
//! │                  └──────┬───────┬──────┘                      │
//! │            start_session│       │end_session                  │
//! │                         ▼       ▼                             │
//! │      ┌─────────────────────┐ ┌─────────────────────┐         │
//! │      │    WordProvider     │ │     ScoreLedger     │         │
//! │      │ words, current word │ │     leaderboard     │         │
//! │      └──────────┬──────────┘ └──────────┬──────────┘         │
//! └─────────────────┼───────────────────────┼────────────────────┘
//!                   ▼                       ▼
//!          WordApi + WordValidator       ScoreApi
//! ```
//!
//! Every container keeps its data in a `watch` channel: `snapshot()` reads the
//! current value and `subscribe()` yields a receiver woken on each change.
//! Containers are cheap handles; clones share state.

#[cfg(test)]
pub(crate) mod fake;
mod loading;
pub mod scores;
pub mod session;
pub mod words;

use std::sync::Arc;

pub use scores::{Leaderboard, LeaderboardEntry, ScoreLedger};
pub use session::{compute_score, Session, SessionController, SessionStatus};
pub use words::{WordProvider, WordSet};

use crate::api::{DictionaryClient, HttpApi, ScoreApi, WordApi, WordValidator};
use crate::config::{ClientConfig, ValidationFailurePolicy, ValidationSource};
use crate::error::ApiError;

/// Application-root owner of all game state.
///
/// Build one at startup and hand clones (or the individual containers) to
/// whatever needs them.
#[derive(Debug, Clone)]
pub struct GameState {
    pub words: WordProvider,
    pub scores: ScoreLedger,
    pub session: SessionController,
}

impl GameState {
    /// Wire the containers to explicit collaborators.
    pub fn new(
        word_api: Arc<dyn WordApi>,
        validator: Arc<dyn WordValidator>,
        score_api: Arc<dyn ScoreApi>,
        failure_policy: ValidationFailurePolicy,
    ) -> Self {
        let words = WordProvider::new(word_api, validator, failure_policy);
        let scores = ScoreLedger::new(score_api);
        let session = SessionController::new(words.clone(), scores.clone());
        Self {
            words,
            scores,
            session,
        }
    }

    /// Wire the containers to the HTTP backends named in `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let backend = Arc::new(HttpApi::new(&config.api_base_url)?);

        let validator: Arc<dyn WordValidator> = match config.validation_source {
            ValidationSource::Backend => backend.clone(),
            ValidationSource::Dictionary => Arc::new(DictionaryClient::new(&config.dictionary_url)?),
        };

        tracing::debug!(
            base_url = backend.base_url(),
            validation = ?config.validation_source,
            failure_policy = ?config.validation_failure,
            "game state configured"
        );

        Ok(Self::new(
            backend.clone(),
            validator,
            backend,
            config.validation_failure,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fake::{self, FakeApi};

    fn state(api: &Arc<FakeApi>) -> GameState {
        GameState::new(
            api.clone(),
            api.clone(),
            api.clone(),
            ValidationFailurePolicy::FailClosed,
        )
    }

    #[tokio::test]
    async fn test_containers_share_state() {
        let api = Arc::new(FakeApi::new());
        api.set_random_word("spell");
        let game = state(&api);

        game.session.start_session().await.unwrap();

        // The session fetched through the same provider the root exposes
        assert_eq!(game.words.current_word(), "spell");

        game.session.set_player_name("alice");
        game.session.update_score(0, 20);
        game.session.end_session().unwrap().await.unwrap();

        api.set_leaderboard(vec![fake::entry("1", "alice", 1100)]);
        game.scores.fetch_leaderboard().await;
        assert_eq!(game.scores.entries()[0].username, "alice");
    }

    #[test]
    fn test_from_config_rejects_bad_dictionary_url() {
        let mut config = ClientConfig::new("http://localhost:8085/api");
        config.validation_source = ValidationSource::Dictionary;
        config.dictionary_url = "mailto:nobody@example.com".to_string();

        assert!(matches!(
            GameState::from_config(&config),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_from_config_backend() {
        let config = ClientConfig::new("http://localhost:8085/api");
        let game = GameState::from_config(&config).unwrap();
        assert!(!game.session.is_in_progress());
        assert_eq!(
            game.words.failure_policy(),
            ValidationFailurePolicy::FailClosed
        );
    }
}
