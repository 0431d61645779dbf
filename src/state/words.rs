//! Word list state.
//!
//! Holds the full word list, the word currently being guessed, and the outcome
//! of the last request. A failed fetch leaves the previously fetched data in
//! place; only the error fields change.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::loading::LoadingGuard;
use crate::api::{WordApi, WordValidator};
use crate::config::ValidationFailurePolicy;

pub const FETCH_WORDS_ERROR: &str = "Error fetching words";
pub const FETCH_RANDOM_WORD_ERROR: &str = "Error fetching random word";
pub const VALIDATE_WORD_ERROR: &str = "Error validating word";

/// Snapshot of the word state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordSet {
    pub all_words: Vec<String>,

    /// Word for the current round (empty until the first fetch succeeds)
    pub current_word: String,

    /// Whether a word request is in flight
    pub loading: bool,

    /// Message from the last failed fetch
    pub last_error: Option<String>,

    /// Message from the last failed validation lookup
    pub validation_error: Option<String>,
}

/// Fetches words and validates guesses.
///
/// Clones share the same state. Concurrent fetches that write the same field
/// resolve last-write-wins.
#[derive(Clone)]
pub struct WordProvider {
    state: Arc<watch::Sender<WordSet>>,
    api: Arc<dyn WordApi>,
    validator: Arc<dyn WordValidator>,
    failure_policy: ValidationFailurePolicy,
}

impl std::fmt::Debug for WordProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordProvider")
            .field("state", &*self.state.borrow())
            .field("failure_policy", &self.failure_policy)
            .finish_non_exhaustive()
    }
}

impl WordProvider {
    pub fn new(
        api: Arc<dyn WordApi>,
        validator: Arc<dyn WordValidator>,
        failure_policy: ValidationFailurePolicy,
    ) -> Self {
        let (state, _) = watch::channel(WordSet::default());
        Self {
            state: Arc::new(state),
            api,
            validator,
            failure_policy,
        }
    }

    pub fn snapshot(&self) -> WordSet {
        self.state.borrow().clone()
    }

    /// Receiver notified on every change to the word state.
    pub fn subscribe(&self) -> watch::Receiver<WordSet> {
        self.state.subscribe()
    }

    pub fn all_words(&self) -> Vec<String> {
        self.state.borrow().all_words.clone()
    }

    pub fn current_word(&self) -> String {
        self.state.borrow().current_word.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    pub fn validation_error(&self) -> Option<String> {
        self.state.borrow().validation_error.clone()
    }

    pub fn failure_policy(&self) -> ValidationFailurePolicy {
        self.failure_policy
    }

    /// Replace the word list with the backend's.
    pub async fn fetch_all_words(&self) {
        let _loading = self.begin_loading();

        match self.api.all_words().await {
            Ok(records) => {
                let words: Vec<String> = records.into_iter().map(|r| r.word).collect();
                tracing::debug!(count = words.len(), "fetched word list");
                self.state.send_modify(|s| s.all_words = words);
            }
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "{}", FETCH_WORDS_ERROR);
                self.set_error(FETCH_WORDS_ERROR);
            }
        }
    }

    /// Replace the current word with a random one. On failure the previous
    /// word stays current.
    pub async fn fetch_random_word(&self) {
        let _loading = self.begin_loading();

        match self.api.random_word().await {
            Ok(record) => {
                tracing::debug!("fetched random word");
                self.state.send_modify(|s| s.current_word = record.word);
            }
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "{}", FETCH_RANDOM_WORD_ERROR);
                self.set_error(FETCH_RANDOM_WORD_ERROR);
            }
        }
    }

    /// Check a guess. A failed lookup records `validation_error` and answers
    /// according to the configured [`ValidationFailurePolicy`].
    pub async fn validate_word(&self, word: &str) -> bool {
        match self.validator.validate(word).await {
            Ok(valid) => {
                self.state.send_if_modified(|s| s.validation_error.take().is_some());
                valid
            }
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), word, "{}", VALIDATE_WORD_ERROR);
                self.state
                    .send_modify(|s| s.validation_error = Some(VALIDATE_WORD_ERROR.to_string()));
                self.failure_policy.outcome()
            }
        }
    }

    fn begin_loading(&self) -> LoadingGuard<'_, WordSet> {
        LoadingGuard::begin(
            &self.state,
            |s| {
                s.loading = true;
                s.last_error = None;
            },
            |s| s.loading = false,
        )
    }

    fn set_error(&self, message: &str) {
        self.state
            .send_modify(|s| s.last_error = Some(message.to_string()));
    }
}
