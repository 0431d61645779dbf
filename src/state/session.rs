//! Game session state machine.
//!
//! A session is either idle or active. There are no transition guards:
//! starting an active session simply restarts it, ending an idle one simply
//! clears it again.
//!
//! # State Diagram
//!
//! ```text
//!            start_session (score = 0, fetch random word)
//!   ┌──────┐ ───────────────────────────────────────▶ ┌────────┐
//!   │ Idle │                                          │ Active │
//!   └──────┘ ◀─────────────────────────────────────── └────────┘
//!            end_session (submit if score > 0, clear player name)
//! ```
//!
//! Word fetches and score submissions run as spawned tasks. Their handles are
//! returned so callers can await them, but nothing cancels them: a session
//! ended before its word arrives still sees that word land in the
//! [`WordProvider`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::scores::ScoreLedger;
use super::words::WordProvider;

/// Score for a perfect round.
pub const BASE_SCORE: u32 = 1200;

/// Points lost per guess.
pub const ATTEMPT_PENALTY: u32 = 50;

/// Points lost per elapsed second.
pub const SECOND_PENALTY: u32 = 5;

/// Score for a round: `max(0, 1200 - (attempts * 50 + seconds * 5))`.
pub fn compute_score(attempts: u32, elapsed_seconds: u32) -> u32 {
    let penalty = attempts
        .saturating_mul(ATTEMPT_PENALTY)
        .saturating_add(elapsed_seconds.saturating_mul(SECOND_PENALTY));
    BASE_SCORE.saturating_sub(penalty)
}

/// Session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
        }
    }
}

/// Snapshot of the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Stored verbatim, may be empty
    pub player_name: String,
    pub in_progress: bool,
    pub score: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn status(&self) -> SessionStatus {
        if self.in_progress {
            SessionStatus::Active
        } else {
            SessionStatus::Idle
        }
    }

    /// Whole seconds since the session started, if it has.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Option<u32> {
        let started = self.started_at?;
        let secs = (now - started).num_seconds().max(0);
        Some(u32::try_from(secs).unwrap_or(u32::MAX))
    }

    /// Convert to JSON for sending to the game view.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "player_name": self.player_name,
            "status": self.status().as_str(),
            "score": self.score,
            "started_at": self.started_at.map(|t| t.to_rfc3339()),
            "ended_at": self.ended_at.map(|t| t.to_rfc3339())
        })
    }
}

/// Drives a single game session over the word and score containers.
#[derive(Debug, Clone)]
pub struct SessionController {
    state: Arc<watch::Sender<Session>>,
    words: WordProvider,
    scores: ScoreLedger,
}

impl SessionController {
    pub fn new(words: WordProvider, scores: ScoreLedger) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            state: Arc::new(state),
            words,
            scores,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn player_name(&self) -> String {
        self.state.borrow().player_name.clone()
    }

    pub fn is_in_progress(&self) -> bool {
        self.state.borrow().in_progress
    }

    pub fn score(&self) -> u32 {
        self.state.borrow().score
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    pub fn set_player_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.state.send_modify(|s| s.player_name = name);
    }

    /// Begin (or restart) a session and request its word.
    ///
    /// The word lands in the [`WordProvider`]; the returned handle only
    /// signals completion and may be dropped.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_session(&self) -> JoinHandle<()> {
        self.state.send_modify(|s| {
            s.in_progress = true;
            s.score = 0;
            s.started_at = Some(Utc::now());
            s.ended_at = None;
        });
        tracing::info!(player = %self.player_name(), "session started");

        let words = self.words.clone();
        tokio::spawn(async move { words.fetch_random_word().await })
    }

    /// End the session.
    ///
    /// A positive score is submitted under the player name held at the time of
    /// the call; the name is cleared before this returns, whatever the
    /// submission's fate. Returns the submission task if one was spawned.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime when the score is positive.
    pub fn end_session(&self) -> Option<JoinHandle<()>> {
        let mut finished = (String::new(), 0);
        self.state.send_modify(|s| {
            s.in_progress = false;
            s.ended_at = Some(Utc::now());
            finished = (std::mem::take(&mut s.player_name), s.score);
        });
        let (player_name, score) = finished;
        tracing::info!(player = %player_name, score, "session ended");

        if score == 0 {
            return None;
        }

        let scores = self.scores.clone();
        Some(tokio::spawn(async move {
            scores.submit_score(player_name, score).await
        }))
    }

    /// Recompute the score from this round's figures. The last computation wins.
    pub fn update_score(&self, attempts: u32, elapsed_seconds: u32) -> u32 {
        let score = compute_score(attempts, elapsed_seconds);
        self.state.send_modify(|s| s.score = score);
        score
    }

    /// Recompute the score using the time elapsed since the session started.
    pub fn update_score_from_clock(&self, attempts: u32) -> u32 {
        let elapsed = self.state.borrow().elapsed_seconds(Utc::now()).unwrap_or(0);
        self.update_score(attempts, elapsed)
    }
}
