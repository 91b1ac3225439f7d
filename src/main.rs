use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reward_console::client::RewardsClient;
use reward_console::config::ConsoleConfig;
use reward_console::duration::{is_valid_duration, is_valid_reward_duration_expression};
use reward_console::models::RewardAction;
use reward_console::registry::{reward_types, RewardActionKind};

#[derive(Parser)]
#[command(name = "reward-console")]
#[command(about = "Dashboard data and client layer for a Twitch channel-point rewards service")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available reward action types
    Types,

    /// Validate reward action JSON (a `{type, data}` object or an array of them)
    Check {
        /// Path to the JSON file
        path: String,
    },

    /// Fetch and print a broadcaster's rewards
    List {
        /// Broadcaster ID to list rewards for
        #[arg(long)]
        broadcaster: String,

        /// Bearer token (overrides the config file)
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = if Path::new(&cli.config).exists() {
        ConsoleConfig::from_file(Path::new(&cli.config))
            .with_context(|| format!("Failed to load {}", cli.config))?
    } else {
        ConsoleConfig::default()
    };

    match cli.command {
        Commands::Types => {
            println!("=== Reward Types ===\n");
            for option in reward_types() {
                println!("  {:<14} {}", option.value, option.display);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { path } => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path))?;
            let json: serde_json::Value =
                serde_json::from_str(&contents).context("File is not valid JSON")?;

            let actions = match json {
                serde_json::Value::Array(items) => items,
                other => vec![other],
            };

            let mut problems = 0u32;
            for (index, action) in actions.iter().enumerate() {
                problems += check_action(index, action);
            }

            println!("\n=== Check Results ===");
            println!("Actions checked:  {}", actions.len());
            println!("Problems:         {}", problems);

            if problems > 0 {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::List { broadcaster, token } => {
            let mut client_config = config.api.client_config()?;
            if token.is_some() {
                client_config.token = token;
            }
            let client = RewardsClient::new(client_config)?;

            let rewards = client.rewards(&broadcaster).await?;

            println!("=== Rewards for {} ({}) ===\n", broadcaster, rewards.len());
            for reward in &rewards {
                let cooldown = &reward.twitch.global_cooldown_setting;
                println!(
                    "  {:<30} {:>8} pts  {:<14} cooldown: {}",
                    reward.twitch.title,
                    reward.twitch.cost,
                    reward.data.kind().to_string(),
                    if cooldown.is_enabled {
                        format!("{}s", cooldown.global_cooldown_seconds)
                    } else {
                        "-".to_string()
                    }
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Check one `{type, data}` value; returns the number of problems found.
fn check_action(index: usize, action: &serde_json::Value) -> u32 {
    let mut problems = 0;

    let tag = match action.get("type").and_then(|t| t.as_str()) {
        Some(tag) => tag,
        None => {
            println!("  [{}] missing \"type\" tag", index);
            return 1;
        }
    };

    let kind = match RewardActionKind::from_tag(tag) {
        Some(kind) => kind,
        None => {
            println!("  [{}] unknown reward type {:?}", index, tag);
            return 1;
        }
    };

    let payload = action.get("data").cloned().unwrap_or(serde_json::Value::Null);
    if !kind.validate_wire(&payload) {
        println!("  [{}] {}: payload does not match the type's shape", index, kind);
        return 1;
    }

    // The shape is fine; flag unparseable duration fields inside it.
    let parsed: RewardAction = match serde_json::from_value(action.clone()) {
        Ok(parsed) => parsed,
        Err(e) => {
            println!("  [{}] {}: {}", index, kind, e);
            return 1;
        }
    };

    for (field, value) in duration_fields(&parsed) {
        if !is_valid_reward_duration_expression(value) {
            println!("  [{}] {}: bad rand expression in {}: {:?}", index, kind, field, value);
            problems += 1;
        } else if !value.starts_with("rand") && !is_valid_duration(value) {
            println!("  [{}] {}: unparseable {}: {:?}", index, kind, field, value);
            problems += 1;
        }
    }

    if problems == 0 {
        println!("  [{}] {}: ok", index, kind);
    }
    problems
}

/// The duration-valued fields of an action, by name.
fn duration_fields(action: &RewardAction) -> Vec<(&'static str, &str)> {
    match action {
        RewardAction::Timeout(data) => vec![("duration", data.duration.as_str())],
        RewardAction::SubOnly(duration) | RewardAction::EmoteOnly(duration) => {
            vec![("duration", duration.as_str())]
        }
        RewardAction::BttvSlot(data)
        | RewardAction::FfzSlot(data)
        | RewardAction::SevenTvSlot(data) => vec![("expiration", data.expiration.as_str())],
        RewardAction::BttvSwap(_)
        | RewardAction::FfzSwap(_)
        | RewardAction::SevenTvSwap(_)
        | RewardAction::SpotifySkip(_)
        | RewardAction::SpotifyQueue(_)
        | RewardAction::SpotifyPlay(_) => Vec::new(),
    }
}
