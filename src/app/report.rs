//! Slate rendering for terminal, JSON, and markdown consumers, plus the
//! prompt handed to the LLM commentary path.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::{FeedStatus, GameRecord, MarketKind, QuoteSide, Slate};
use crate::error::Result;

#[derive(Tabled)]
struct GameRow {
    #[tabled(rename = "Matchup")]
    matchup: String,
    #[tabled(rename = "Start (UTC)")]
    start: String,
    #[tabled(rename = "Moneyline")]
    moneyline: String,
    #[tabled(rename = "Spread")]
    spread: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Props")]
    props: String,
    #[tabled(rename = "Flags")]
    flags: String,
}

/// Render the slate as a terminal table.
pub fn render_table(slate: &Slate) -> String {
    let rows: Vec<GameRow> = slate
        .games
        .iter()
        .map(|game| GameRow {
            matchup: game.matchup(),
            start: game.start_time.format("%m-%d %H:%M").to_string(),
            moneyline: fmt_two_sided(game, &MarketKind::Moneyline, QuoteSide::Home, QuoteSide::Away),
            spread: fmt_two_sided(game, &MarketKind::Spread, QuoteSide::Home, QuoteSide::Away),
            total: fmt_two_sided(game, &MarketKind::Total, QuoteSide::Over, QuoteSide::Under),
            props: if game.player_props.is_empty() {
                "-".into()
            } else {
                format!("{} players", game.player_props.len())
            },
            flags: fmt_flags(game),
        })
        .collect();

    Table::new(rows).with(Style::sharp()).to_string()
}

/// One-line colored summary printed above the table.
pub fn summary(slate: &Slate) -> String {
    let mut line = format!(
        "{} slate for {}: {} games",
        slate.league,
        slate.date,
        slate.games.len().bold()
    );
    let partial = slate.partial_count();
    if partial > 0 {
        line.push_str(&format!(", {} partial", partial.yellow()));
    }
    let missing = slate.missing_odds_count();
    if missing > 0 {
        line.push_str(&format!(", {} without odds", missing.red()));
    }
    if !slate.orphan_events.is_empty() {
        line.push_str(&format!(
            ", {} unmatched odds events",
            slate.orphan_events.len().yellow()
        ));
    }
    if let FeedStatus::Unavailable { reason } = &slate.odds_feed {
        line.push_str(&format!("\n{}: {}", "odds feed down".red().bold(), reason));
    }
    line
}

/// Render the slate as pretty-printed JSON.
pub fn render_json(slate: &Slate) -> Result<String> {
    Ok(serde_json::to_string_pretty(slate)?)
}

/// Render the slate as a markdown report.
pub fn render_markdown(slate: &Slate) -> String {
    let mut out = format!("# {} slate - {}\n", slate.league, slate.date);

    if let FeedStatus::Unavailable { reason } = &slate.odds_feed {
        out.push_str(&format!("\n> odds feed unavailable: {reason}\n"));
    }

    if slate.games.is_empty() {
        out.push_str("\nNo games scheduled.\n");
    }

    for game in &slate.games {
        out.push_str(&format!(
            "\n## {} - {}\n\n",
            game.matchup(),
            game.start_time.format("%Y-%m-%d %H:%M UTC")
        ));

        if game.missing_odds {
            out.push_str("- no odds matched for this game\n");
        }
        push_market_line(&mut out, game, "moneyline", &MarketKind::Moneyline, QuoteSide::Home, QuoteSide::Away);
        push_market_line(&mut out, game, "spread", &MarketKind::Spread, QuoteSide::Home, QuoteSide::Away);
        push_market_line(&mut out, game, "total", &MarketKind::Total, QuoteSide::Over, QuoteSide::Under);

        if !game.player_props.is_empty() {
            out.push_str("- props:\n");
            for props in &game.player_props {
                for best in &props.markets {
                    out.push_str(&format!(
                        "  - {} {} {} {} {} ({})\n",
                        props.player.display_name(),
                        best.market,
                        best.side,
                        best.line.map(|l| l.to_string()).unwrap_or_default(),
                        best.price,
                        best.book,
                    ));
                }
            }
        }

        if !game.unresolved.is_empty() {
            out.push_str("- unresolved names:\n");
            for gap in &game.unresolved {
                match &gap.best_candidate {
                    Some(candidate) => out.push_str(&format!(
                        "  - {:?} (closest: {} at {:.2})\n",
                        gap.input, candidate, gap.best_score
                    )),
                    None => out.push_str(&format!("  - {:?}\n", gap.input)),
                }
            }
        }
    }

    out
}

/// Build the prose-generation prompt for one record.
///
/// The record is passed as JSON so the model sees exactly the joined data,
/// nothing upstream of it.
pub fn narrative_prompt(game: &GameRecord) -> Result<String> {
    let record = serde_json::to_string_pretty(game)?;
    Ok(format!(
        "You are a sports betting analyst. Write a short, factual preview \
         of this game based only on the data below. Mention the best \
         available moneyline prices and any notable player props. Do not \
         invent statistics.\n\n{record}"
    ))
}

fn fmt_two_sided(
    game: &GameRecord,
    market: &MarketKind,
    first: QuoteSide,
    second: QuoteSide,
) -> String {
    let fmt = |side: QuoteSide| {
        game.best_for(market, side).map(|best| match best.line {
            Some(line) => format!("{} {} ({})", line, best.price, best.book),
            None => format!("{} ({})", best.price, best.book),
        })
    };

    match (fmt(first), fmt(second)) {
        (None, None) => "-".into(),
        (a, b) => format!(
            "{} / {}",
            a.unwrap_or_else(|| "-".into()),
            b.unwrap_or_else(|| "-".into())
        ),
    }
}

fn fmt_flags(game: &GameRecord) -> String {
    let mut flags = Vec::new();
    if game.missing_odds {
        flags.push("no odds");
    }
    if game.partial {
        flags.push("partial");
    }
    if flags.is_empty() {
        "-".into()
    } else {
        flags.join(", ")
    }
}

fn push_market_line(
    out: &mut String,
    game: &GameRecord,
    label: &str,
    market: &MarketKind,
    first: QuoteSide,
    second: QuoteSide,
) {
    let line = fmt_two_sided(game, market, first, second);
    if line != "-" {
        out.push_str(&format!("- {label}: {line}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedStatus, League};
    use crate::testkit::domain::{record_with_moneyline, slate_with};

    #[test]
    fn table_lists_every_game() {
        let slate = slate_with(vec![record_with_moneyline()]);
        let table = render_table(&slate);
        assert!(table.contains("Boston Red Sox @ New York Yankees"));
        assert!(table.contains("+142"));
    }

    #[test]
    fn markdown_contains_matchup_heading_and_lines() {
        let slate = slate_with(vec![record_with_moneyline()]);
        let md = render_markdown(&slate);
        assert!(md.contains("## Boston Red Sox @ New York Yankees"));
        assert!(md.contains("moneyline"));
    }

    #[test]
    fn markdown_notes_empty_slate() {
        let slate = slate_with(vec![]);
        assert!(render_markdown(&slate).contains("No games scheduled"));
    }

    #[test]
    fn markdown_notes_feed_outage() {
        let mut slate = slate_with(vec![]);
        slate.odds_feed = FeedStatus::Unavailable {
            reason: "HTTP 503".into(),
        };
        assert!(render_markdown(&slate).contains("odds feed unavailable"));
    }

    #[test]
    fn json_round_trips_game_ids() {
        let slate = slate_with(vec![record_with_moneyline()]);
        let json = render_json(&slate).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["league"], League::Mlb.key());
        assert_eq!(value["games"][0]["game_id"], "401472100");
    }

    #[test]
    fn narrative_prompt_embeds_record_json() {
        let prompt = narrative_prompt(&record_with_moneyline()).unwrap();
        assert!(prompt.contains("New York Yankees"));
        assert!(prompt.contains("Do not invent statistics"));
    }
}
