//! Score submission and leaderboard state.
//!
//! The leaderboard is a read replica of the server's: every fetch replaces it
//! wholesale, in the order the server returned it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::loading::LoadingGuard;
use crate::api::{ScoreApi, ScoreSubmission};

pub const SUBMIT_SCORE_ERROR: &str = "Error submitting score";
pub const FETCH_LEADERBOARD_ERROR: &str = "Error fetching leaderboard";

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LeaderboardRow")]
pub struct LeaderboardEntry {
    /// Opaque id assigned by the score service
    pub id: String,
    pub username: String,
    pub score: u32,
}

/// Row as the score service sends it. The id arrives as `id`, `_id`, or both.
#[derive(Deserialize)]
struct LeaderboardRow {
    id: Option<String>,
    #[serde(rename = "_id")]
    object_id: Option<String>,
    username: String,
    score: u32,
}

impl TryFrom<LeaderboardRow> for LeaderboardEntry {
    type Error = &'static str;

    fn try_from(row: LeaderboardRow) -> Result<Self, Self::Error> {
        let id = row
            .id
            .or(row.object_id)
            .ok_or("leaderboard row has neither `id` nor `_id`")?;
        Ok(Self {
            id,
            username: row.username,
            score: row.score,
        })
    }
}

/// Snapshot of the score state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl Leaderboard {
    /// Convert to JSON for the leaderboard view.
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                serde_json::json!({
                    "rank": i + 1,
                    "id": e.id,
                    "username": e.username,
                    "score": e.score
                })
            })
            .collect();

        serde_json::json!({
            "entries": rows,
            "loading": self.loading,
            "error": self.last_error
        })
    }
}

/// Submits finished games and keeps the leaderboard.
///
/// Every call is made once: no retry, no backoff.
#[derive(Clone)]
pub struct ScoreLedger {
    state: Arc<watch::Sender<Leaderboard>>,
    api: Arc<dyn ScoreApi>,
}

impl std::fmt::Debug for ScoreLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreLedger")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl ScoreLedger {
    pub fn new(api: Arc<dyn ScoreApi>) -> Self {
        let (state, _) = watch::channel(Leaderboard::default());
        Self {
            state: Arc::new(state),
            api,
        }
    }

    pub fn snapshot(&self) -> Leaderboard {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Leaderboard> {
        self.state.subscribe()
    }

    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        self.state.borrow().entries.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Persist a finished game's score.
    pub async fn submit_score(&self, username: String, score: u32) {
        let _loading = self.begin_loading();
        let submission = ScoreSubmission { username, score };

        match self.api.save_score(&submission).await {
            Ok(()) => tracing::info!(username = %submission.username, score, "score submitted"),
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "{}", SUBMIT_SCORE_ERROR);
                self.set_error(SUBMIT_SCORE_ERROR);
            }
        }
    }

    /// Replace the leaderboard with the server's. On failure the previous
    /// leaderboard stays.
    pub async fn fetch_leaderboard(&self) {
        let _loading = self.begin_loading();

        match self.api.top_scores().await {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "fetched leaderboard");
                self.state.send_modify(|s| s.entries = entries);
            }
            Err(err) => {
                tracing::error!(error = %err, status = ?err.status(), "{}", FETCH_LEADERBOARD_ERROR);
                self.set_error(FETCH_LEADERBOARD_ERROR);
            }
        }
    }

    fn begin_loading(&self) -> LoadingGuard<'_, Leaderboard> {
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
