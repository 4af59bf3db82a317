//! `slack-search` -- search Slack messages from the terminal.
//!
//! The token comes from `--token` or `SLACK_USER_TOKEN`. Results are printed
//! grouped by channel, busiest channel first.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};

use slack_search::core::config::{AppConfig, ENV_DISPLAY_TZ, ENV_USER_TOKEN};
use slack_search::panel::{SearchSession, render_cheatsheet, render_results};
use slack_search::search::GroupKey;
use slack_search::slack::SlackClient;
use slack_search::time_format::DisplayZone;

/// Search Slack messages and list them by channel.
#[derive(Parser, Debug)]
#[command(name = "slack-search", version, about)]
struct Cli {
    /// Slack search query, including modifiers such as `from:` or `before:`.
    query: Vec<String>,

    /// User token (xoxp-...). Overrides SLACK_USER_TOKEN.
    #[arg(long)]
    token: Option<String>,

    /// Group by channel id instead of channel name.
    #[arg(long)]
    by_channel_id: bool,

    /// IANA timezone for timestamps, e.g. Asia/Tokyo. Overrides SLACK_SEARCH_TZ.
    #[arg(long)]
    timezone: Option<String>,

    /// Print the query modifier cheat sheet and exit.
    #[arg(long)]
    cheatsheet: bool,

    /// Enable debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    slack_search::setup_logging_with_default(if cli.verbose { "debug" } else { "warn" });

    if cli.cheatsheet {
        print!("{}", render_cheatsheet());
        return Ok(());
    }

    let query = cli.query.join(" ");
    if query.trim().is_empty() {
        bail!("a search query is required (see --cheatsheet for modifiers)");
    }

    let config = AppConfig::from_lookup(|key| match key {
        ENV_USER_TOKEN if cli.token.is_some() => cli.token.clone(),
        ENV_DISPLAY_TZ if cli.timezone.is_some() => cli.timezone.clone(),
        _ => std::env::var(key).ok(),
    })
    .context("failed to load configuration")?;

    let client = SlackClient::from_config(&config);
    let key = if cli.by_channel_id {
        GroupKey::ChannelId
    } else {
        GroupKey::ChannelName
    };

    let mut session = SearchSession::new();
    let seq = session.begin();
    info!(seq = seq.value(), "Starting search");

    match client.search(&query).await {
        Ok(envelope) => {
            session.complete(seq, envelope);
        }
        Err(e) => {
            session.fail(seq);
            error!("Search failed: {}", e);
            return Err(e).context("search.messages failed");
        }
    }

    if let Some(envelope) = session.latest() {
        let zone = DisplayZone::from(config.display_tz);
        print!("{}", render_results(envelope, key, zone, Utc::now()));
    }

    Ok(())
}
