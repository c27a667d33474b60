use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line driver for the SkillSwap matching engine.
#[derive(Debug, Parser)]
#[command(
    name = "skillswap-match",
    about = "Rank compatible SkillSwap users and record swipes over a snapshot file"
)]
pub struct Cli {
    /// Snapshot file to read (overrides `snapshot.path` from configuration).
    #[arg(long, global = true, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Configuration file to use instead of `config/default.toml` and `config/local.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Prints ranked recommendations for a user.
    Recommend {
        /// The seeker's user id.
        user_id: i64,
        /// Number of results (clamped to 1..=50; defaults to `matching.default_limit`).
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Records a swipe and saves the snapshot, creating a match on a mutual like.
    Swipe {
        swiper_id: i64,
        swipee_id: i64,
        /// Record a like instead of a pass.
        #[arg(long, default_value_t = false)]
        like: bool,
    },
    /// Lists everyone a user is matched with.
    Matches {
        user_id: i64,
    },
}
