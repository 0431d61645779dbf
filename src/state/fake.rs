//! In-memory backend used by the state tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::{ScoreApi, ScoreSubmission, WordApi, WordRecord, WordValidator};
use crate::error::ApiError;
use crate::state::scores::LeaderboardEntry;

#[derive(Default)]
pub(crate) struct FakeApi {
    pub failing: AtomicBool,
    pub words: Mutex<Vec<String>>,
    pub random_word: Mutex<String>,
    pub valid: AtomicBool,
    pub leaderboard: Mutex<Vec<LeaderboardEntry>>,
    pub submissions: Mutex<Vec<ScoreSubmission>>,
    /// When set, `random_word` waits for a notification before answering.
    pub random_gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            random_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_words(&self, words: &[&str]) {
        *self.words.lock().unwrap() = words.iter().map(|w| w.to_string()).collect();
    }

    pub fn set_random_word(&self, word: &str) {
        *self.random_word.lock().unwrap() = word.to_string();
    }

    pub fn set_leaderboard(&self, entries: Vec<LeaderboardEntry>) {
        *self.leaderboard.lock().unwrap() = entries;
    }

    /// Every save attempt, successful or not.
    pub fn submissions(&self) -> Vec<ScoreSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    fn check(&self, path: &str) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ApiError::Status {
                path: path.to_string(),
                status: 500,
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WordApi for FakeApi {
    async fn all_words(&self) -> Result<Vec<WordRecord>, ApiError> {
        self.check(crate::api::ALL_WORDS_PATH)?;
        let words = self.words.lock().unwrap().clone();
        Ok(words.into_iter().map(|word| WordRecord { word }).collect())
    }

    async fn random_word(&self) -> Result<WordRecord, ApiError> {
        if let Some(gate) = &self.random_gate {
            gate.notified().await;
        }
        self.check(crate::api::RANDOM_WORD_PATH)?;
        let word = self.random_word.lock().unwrap().clone();
        Ok(WordRecord { word })
    }
}

#[async_trait]
impl WordValidator for FakeApi {
    async fn validate(&self, _word: &str) -> Result<bool, ApiError> {
        self.check(crate::api::VALIDATE_PATH)?;
        Ok(self.valid.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl ScoreApi for FakeApi {
    async fn save_score(&self, submission: &ScoreSubmission) -> Result<(), ApiError> {
        // Recorded even when failing so tests can see the attempt.
        self.submissions.lock().unwrap().push(submission.clone());
        self.check(crate::api::SAVE_SCORE_PATH)
    }

    async fn top_scores(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.check(crate::api::TOP_SCORES_PATH)?;
        Ok(self.leaderboard.lock().unwrap().clone())
    }
}

pub(crate) fn entry(id: &str, username: &str, score: u32) -> LeaderboardEntry {
    LeaderboardEntry {
        id: id.to_string(),
        username: username.to_string(),
        score,
    }
}
