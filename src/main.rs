mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use skillswap_match::config::{LoggingSettings, Settings};
use skillswap_match::core::{MatchError, Matcher};
use skillswap_match::models::{ErrorResponse, MatchesResponse, RecommendationsResponse, UserId};
use skillswap_match::services::InMemoryStore;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli, settings: Settings) -> Result<ExitCode> {
    let snapshot_path = cli
        .snapshot
        .unwrap_or_else(|| settings.snapshot.path.clone().into());

    let mut store = InMemoryStore::load(&snapshot_path)
        .with_context(|| format!("failed to load snapshot {}", snapshot_path.display()))?;

    match cli.command {
        Commands::Recommend { user_id, limit } => {
            let matcher = Matcher::new(settings.scoring_weights());
            let seeker_id = UserId::from(user_id);
            let limit = limit.unwrap_or(settings.matching.default_limit);

            match matcher.recommend(&store, seeker_id, limit) {
                Ok(recommendations) => {
                    print_json(&RecommendationsResponse::new(seeker_id, recommendations))?;
                }
                Err(e @ MatchError::SeekerNotFound(_)) => {
                    error!("{}", e);
                    print_json(&ErrorResponse {
                        error: "not_found".to_string(),
                        message: e.to_string(),
                    })?;
                    return Ok(ExitCode::from(2));
                }
            }
        }
        Commands::Swipe {
            swiper_id,
            swipee_id,
            like,
        } => {
            let outcome = store
                .record_swipe(
                    UserId::from(swiper_id),
                    UserId::from(swipee_id),
                    like,
                    chrono::Utc::now(),
                )
                .context("failed to record swipe")?;
            store.save(&snapshot_path).context("failed to save snapshot")?;
            print_json(&outcome)?;
        }
        Commands::Matches { user_id } => {
            let user_id = UserId::from(user_id);
            let matches = store.matches_for(user_id);
            print_json(&MatchesResponse {
                user_id,
                count: matches.len(),
                matches,
            })?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => Settings::load().context("failed to load configuration")?,
    };

    init_logging(&settings.logging);

    info!("Starting SkillSwap matching engine");

    run(cli, settings)
}
