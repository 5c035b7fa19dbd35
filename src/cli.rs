//! Command-line interface: argument parsing and command execution.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};

use crate::adapter::llm::{Llm, OpenRouter};
use crate::adapter::oddsapi::OddsApiClient;
use crate::adapter::statsapi::StatsClient;
use crate::app::{self, GameRecordBuilder, SlateRequest};
use crate::config::Config;
use crate::domain::{AliasTable, League, NameResolver, Resolution, Slate, TeamId, TeamRef};
use crate::error::{Error, Result};

#[derive(Debug, Parser)]
#[command(name = "slatebook", version, about = "Sports betting-line aggregation")]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build and print the slate for a league and date.
    Slate {
        /// League to build (nba, nfl, mlb, nhl, ncaab, ncaaf).
        #[arg(long)]
        league: League,
        /// Date to build (YYYY-MM-DD); defaults to today in UTC.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Only include games involving this team (name or abbreviation).
        #[arg(long)]
        team: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Append LLM-generated commentary per game.
        #[arg(long)]
        narrate: bool,
    },
    /// Resolve a name against the alias table (offline maintenance aid).
    Resolve {
        /// League scope for the lookup.
        #[arg(long)]
        league: League,
        /// The name to resolve.
        name: String,
    },
    /// Show the odds provider's remaining API quota.
    Quota,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

/// Execute the parsed command.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Command::Slate {
            league,
            date,
            team,
            format,
            narrate,
        } => run_slate(&config, league, date, team, format, narrate).await,
        Command::Resolve { league, name } => run_resolve(&config, league, &name),
        Command::Quota => run_quota(&config).await,
    }
}

async fn run_slate(
    config: &Config,
    league: League,
    date: Option<NaiveDate>,
    team: Option<String>,
    format: OutputFormat,
    narrate: bool,
) -> Result<()> {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    let resolver = NameResolver::new(load_aliases(config), config.resolver.fuzzy_threshold);

    let stats = Arc::new(StatsClient::new(config.network.stats_base_url.clone()));
    let odds = Arc::new(OddsApiClient::from_config(&config.network)?);
    let builder = GameRecordBuilder::new(stats, odds, resolver);

    let slate = builder.build(&SlateRequest { league, date, team }).await?;

    match format {
        OutputFormat::Table => {
            println!("{}", app::summary(&slate));
            println!("{}", app::render_table(&slate));
        }
        OutputFormat::Json => println!("{}", app::render_json(&slate)?),
        OutputFormat::Markdown => println!("{}", app::render_markdown(&slate)),
    }

    if narrate {
        narrate_slate(config, &slate).await?;
    }

    Ok(())
}

async fn narrate_slate(config: &Config, slate: &Slate) -> Result<()> {
    if !config.llm.enabled {
        warn!("--narrate requested but [llm] is disabled in config");
        return Ok(());
    }

    let llm = OpenRouter::from_config(&config.llm)?;
    for game in &slate.games {
        let prompt = app::narrative_prompt(game)?;
        match llm.complete(&prompt).await {
            Ok(text) => println!("\n### {}\n\n{}", game.matchup(), text.trim()),
            // One failed completion shouldn't kill the remaining previews.
            Err(e) => warn!(game = %game.game_id, error = %e, "narrative generation failed"),
        }
    }
    Ok(())
}

fn run_resolve(config: &Config, league: League, name: &str) -> Result<()> {
    let resolver = NameResolver::new(load_aliases(config), config.resolver.fuzzy_threshold);

    // The alias table's canonical names stand in for a live candidate set,
    // which keeps this command fully offline.
    let candidates: Vec<TeamRef> = resolver
        .aliases()
        .canonicals(league)
        .iter()
        .map(|canonical| {
            TeamRef::new(TeamId::new(canonical.as_str()), canonical.as_str(), "", league)
        })
        .collect();

    match resolver.resolve(league, name, &candidates) {
        Resolution::Match(team) => {
            println!("{} -> {}", name, team.canonical_name());
        }
        Resolution::Unresolved(gap) => match gap.best_candidate {
            Some(candidate) => println!(
                "unresolved: {:?} (closest: {} at {:.3})",
                gap.input, candidate, gap.best_score
            ),
            None => println!("unresolved: {:?} (no candidates for {league})", gap.input),
        },
    }
    Ok(())
}

async fn run_quota(config: &Config) -> Result<()> {
    let odds = OddsApiClient::from_config(&config.network)?;
    let quota = odds.refresh_quota().await.map_err(Error::Odds)?;

    match (quota.remaining, quota.used) {
        (Some(remaining), Some(used)) => {
            println!("requests remaining: {remaining}\nrequests used: {used}");
        }
        _ => println!("provider did not report quota headers"),
    }
    Ok(())
}

fn load_aliases(config: &Config) -> AliasTable {
    match AliasTable::load(&config.resolver.alias_file) {
        Ok(table) => {
            debug!(
                path = %config.resolver.alias_file.display(),
                variants = table.len(),
                "alias table loaded"
            );
            table
        }
        Err(e) => {
            warn!(
                path = %config.resolver.alias_file.display(),
                error = %e,
                "alias table unavailable, continuing without aliases"
            );
            AliasTable::default()
        }
    }
}
