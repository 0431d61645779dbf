//! Print the leaderboard from the configured backend.

use std::process::ExitCode;

use clap::Parser;
use wordgame_state::{telemetry, ClientConfig, GameState};

#[derive(Debug, Parser)]
#[command(name = "leaderboard")]
#[command(about = "Show the word game leaderboard")]
struct Args {
    /// Also fetch and print a random word
    #[arg(long)]
    word: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    telemetry::init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let game = match GameState::from_config(&config) {
        Ok(game) => game,
        Err(err) => {
            tracing::error!(error = %err, "could not build clients");
            return ExitCode::FAILURE;
        }
    };

    if args.word {
        game.words.fetch_random_word().await;
        if let Some(err) = game.words.last_error() {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
        println!("word: {}", game.words.current_word());
    }

    game.scores.fetch_leaderboard().await;
    let board = game.scores.snapshot();
    if let Some(err) = board.last_error {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    for (rank, entry) in board.entries.iter().enumerate() {
        println!("{:>3}. {:<20} {:>5}", rank + 1, entry.username, entry.score);
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_flag() {
        assert!(!Args::try_parse_from(["leaderboard"]).unwrap().word);
        assert!(Args::try_parse_from(["leaderboard", "--word"]).unwrap().word);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = Args::try_parse_from(["leaderboard", "--wrod"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
