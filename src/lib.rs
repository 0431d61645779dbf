//! Word Game State Library
//!
//! Client-side state for the word guessing game: the current session, the word
//! list, and the leaderboard, kept in sync with the word/score backend.
//!
//! # Overview
//!
//! - **Session** - Player name, in-progress flag and score. Starting a session
//!   fetches a random word; ending one submits a positive score.
//!
//! - **Words** - Full word list, the current word, and guess validation against
//!   the backend or a public dictionary.
//!
//! - **Scores** - Score submission and the server-ranked leaderboard.
//!
//! # Design Principles
//!
//! 1. **Explicit ownership** - All state hangs off one [`GameState`] built by
//!    the application root; there are no globals.
//!
//! 2. **Errors become state** - Failed requests are logged and recorded in the
//!    container's `last_error`; previous data is left untouched.
//!
//! 3. **Observable background work** - Operations that kick off requests
//!    return their task handle instead of hiding it.
//!
//! # Example
//!
//! ```rust,no_run
//! use wordgame_state::{ClientConfig, GameState};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let game = GameState::from_config(&config)?;
//!
//! game.session.set_player_name("Alice");
//! game.session.start_session().await?;
//! println!("guess: {}", game.words.current_word());
//!
//! game.session.update_score(3, 42);
//! if let Some(submission) = game.session.end_session() {
//!     submission.await?;
//! }
//!
//! game.scores.fetch_leaderboard().await;
//! for entry in game.scores.entries() {
//!     println!("{} {}", entry.username, entry.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;

pub use config::{ClientConfig, ValidationFailurePolicy, ValidationSource};
pub use error::{ApiError, ConfigError};
pub use state::{
    compute_score, GameState, Leaderboard, LeaderboardEntry, ScoreLedger, Session,
    SessionController, SessionStatus, WordProvider, WordSet,
};
