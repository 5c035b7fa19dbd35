//! Slate building: the join of schedule, odds, and rosters.
//!
//! [`GameRecordBuilder`] owns the two source seams and the name resolver,
//! all injected at construction. Every build is stateless: fetch the
//! schedule and the odds concurrently, resolve the odds-side team names
//! onto the schedule's canonical refs, aggregate each matched game's quotes,
//! and emit one [`GameRecord`] per scheduled game.
//!
//! Failure containment follows the value of each source: a dead stats
//! source means there is no slate to build and the error is fatal; a dead
//! odds source degrades every game to `missing_odds` and the slate still
//! ships.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{
    best_markets, normalize, FeedStatus, GameRecord, League, NameResolver, OddsQuote, OrphanEvent,
    PlayerId, PlayerRef, QuoteSide, Resolution, Slate, TeamId, Unresolved,
};
use crate::error::{Error, Result, SourceError};
use crate::source::{GameOdds, GameStub, OddsSource, RawSide, StatsSource};

/// Parameters for one slate build.
#[derive(Debug, Clone)]
pub struct SlateRequest {
    pub league: League,
    pub date: NaiveDate,
    /// Optional team filter: canonical name or abbreviation.
    pub team: Option<String>,
}

/// Builds normalized per-game records from injected sources.
pub struct GameRecordBuilder {
    stats: Arc<dyn StatsSource>,
    odds: Arc<dyn OddsSource>,
    resolver: NameResolver,
}

impl GameRecordBuilder {
    /// Create a builder over the given sources and resolver.
    pub fn new(
        stats: Arc<dyn StatsSource>,
        odds: Arc<dyn OddsSource>,
        resolver: NameResolver,
    ) -> Self {
        Self {
            stats,
            odds,
            resolver,
        }
    }

    /// Build the slate for one league and date.
    ///
    /// # Errors
    ///
    /// Fails only when the stats source cannot deliver a schedule; odds
    /// failures degrade into `missing_odds` records instead.
    pub async fn build(&self, request: &SlateRequest) -> Result<Slate> {
        let league = request.league;
        let date = request.date;

        let (schedule, odds_events) = tokio::join!(
            fetch_with_retry(|| self.stats.fetch_schedule(league, date)),
            fetch_with_retry(|| self.odds.fetch_odds(league, date)),
        );

        let mut schedule = schedule.map_err(Error::Stats)?;
        let (odds_events, odds_feed) = match odds_events {
            Ok(events) => (events, FeedStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "odds feed unavailable, building slate without lines");
                (
                    Vec::new(),
                    FeedStatus::Unavailable {
                        reason: e.to_string(),
                    },
                )
            }
        };

        schedule.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.game_id.cmp(&b.game_id))
        });

        let filtered = request.team.is_some();
        if let Some(filter) = &request.team {
            schedule.retain(|stub| team_matches(stub, filter));
        }

        let teams: Vec<_> = schedule
            .iter()
            .flat_map(|stub| [stub.home.clone(), stub.away.clone()])
            .collect();

        // Tie each odds event to a scheduled game by its resolved home/away
        // pair. Events that resolve to no pair stay visible as orphans.
        let mut by_pair: HashMap<(TeamId, TeamId), GameOdds> = HashMap::new();
        let mut orphan_events = Vec::new();
        for event in odds_events {
            let home = self.resolver.resolve(league, &event.home_name, &teams);
            let away = self.resolver.resolve(league, &event.away_name, &teams);
            match (home, away) {
                (Resolution::Match(home), Resolution::Match(away)) => {
                    let key = (home.team_id().clone(), away.team_id().clone());
                    by_pair.insert(key, event);
                }
                (home, away) => {
                    if filtered {
                        // The filter shrank the candidate set on purpose;
                        // out-of-scope events are expected, not gaps.
                        continue;
                    }
                    let mut unresolved = Vec::new();
                    if let Resolution::Unresolved(u) = home {
                        unresolved.push(u);
                    }
                    if let Resolution::Unresolved(u) = away {
                        unresolved.push(u);
                    }
                    warn!(
                        home = %event.home_name,
                        away = %event.away_name,
                        "odds event teams did not resolve to a scheduled game"
                    );
                    orphan_events.push(OrphanEvent {
                        home_name: event.home_name,
                        away_name: event.away_name,
                        unresolved,
                    });
                }
            }
        }

        let mut games = Vec::with_capacity(schedule.len());
        for stub in schedule {
            let key = (stub.home.team_id().clone(), stub.away.team_id().clone());
            let event = by_pair.remove(&key);
            games.push(self.build_game(league, stub, event).await);
        }

        // Events whose teams resolved but paired with no scheduled game.
        if !filtered {
            for (_, event) in by_pair {
                orphan_events.push(OrphanEvent {
                    home_name: event.home_name,
                    away_name: event.away_name,
                    unresolved: Vec::new(),
                });
            }
        }
        orphan_events.sort_by(|a, b| {
            (&a.home_name, &a.away_name).cmp(&(&b.home_name, &b.away_name))
        });

        info!(
            league = %league,
            date = %date,
            games = games.len(),
            partial = games.iter().filter(|g| g.partial).count(),
            missing_odds = games.iter().filter(|g| g.missing_odds).count(),
            orphan_events = orphan_events.len(),
            "slate built"
        );

        Ok(Slate {
            league,
            date,
            odds_feed,
            games,
            orphan_events,
        })
    }

    /// Join one game: resolve quote sides, aggregate, attach recent form.
    ///
    /// Never fails; everything that goes wrong inside one game is contained
    /// in that game's flags.
    async fn build_game(
        &self,
        league: League,
        stub: GameStub,
        event: Option<GameOdds>,
    ) -> GameRecord {
        let missing_odds = event.is_none();
        let mut unresolved: Vec<Unresolved> = Vec::new();
        let mut seen_unresolved: HashSet<String> = HashSet::new();
        let mut roster_failed = false;
        let mut markets = Vec::new();
        let mut player_props = Vec::new();

        if let Some(event) = event {
            let pair = [stub.home.clone(), stub.away.clone()];
            let mut game_quotes: Vec<OddsQuote> = Vec::new();
            let mut prop_quotes = Vec::new();

            for quote in event.quotes {
                match quote.side {
                    RawSide::Team { ref name } => {
                        match self.resolver.resolve(league, name, &pair) {
                            Resolution::Match(team) => {
                                let side = if team.team_id() == stub.home.team_id() {
                                    QuoteSide::Home
                                } else {
                                    QuoteSide::Away
                                };
                                game_quotes.push(OddsQuote {
                                    book: quote.book,
                                    market: quote.market,
                                    side,
                                    line: quote.line,
                                    price: quote.price,
                                });
                            }
                            Resolution::Unresolved(u) => {
                                if seen_unresolved.insert(u.input.clone()) {
                                    unresolved.push(u);
                                }
                            }
                        }
                    }
                    RawSide::Over => game_quotes.push(OddsQuote {
                        book: quote.book,
                        market: quote.market,
                        side: QuoteSide::Over,
                        line: quote.line,
                        price: quote.price,
                    }),
                    RawSide::Under => game_quotes.push(OddsQuote {
                        book: quote.book,
                        market: quote.market,
                        side: QuoteSide::Under,
                        line: quote.line,
                        price: quote.price,
                    }),
                    RawSide::PlayerOver { player } => {
                        prop_quotes.push((player, QuoteSide::Over, quote.book, quote.market, quote.line, quote.price));
                    }
                    RawSide::PlayerUnder { player } => {
                        prop_quotes.push((player, QuoteSide::Under, quote.book, quote.market, quote.line, quote.price));
                    }
                }
            }

            if !prop_quotes.is_empty() {
                match self.fetch_rosters(league, &stub).await {
                    Ok(roster) => {
                        let mut per_player: BTreeMap<PlayerId, (PlayerRef, Vec<OddsQuote>)> =
                            BTreeMap::new();
                        for (player, side, book, market, line, price) in prop_quotes {
                            // Candidate set is the union of both rosters of
                            // this game only; a name outside it is a gap,
                            // never a guess against the wrong player.
                            match self.resolver.resolve(league, &player, &roster) {
                                Resolution::Match(player_ref) => {
                                    per_player
                                        .entry(player_ref.player_id().clone())
                                        .or_insert_with(|| (player_ref.clone(), Vec::new()))
                                        .1
                                        .push(OddsQuote {
                                            book,
                                            market,
                                            side,
                                            line,
                                            price,
                                        });
                                }
                                Resolution::Unresolved(u) => {
                                    if seen_unresolved.insert(u.input.clone()) {
                                        unresolved.push(u);
                                    }
                                }
                            }
                        }

                        player_props = per_player
                            .into_values()
                            .map(|(player, quotes)| crate::domain::PlayerProps {
                                markets: best_markets(&quotes),
                                player,
                            })
                            .collect::<Vec<_>>();
                        player_props.sort_by(|a, b| {
                            a.player
                                .display_name()
                                .cmp(b.player.display_name())
                                .then_with(|| a.player.player_id().cmp(b.player.player_id()))
                        });
                    }
                    Err(e) => {
                        warn!(
                            game = %stub.game_id,
                            error = %e,
                            "roster fetch failed, props excluded"
                        );
                        roster_failed = true;
                    }
                }
            }

            markets = best_markets(&game_quotes);
        }

        let mut recent_form = BTreeMap::new();
        for team in [&stub.home, &stub.away] {
            match fetch_with_retry(|| self.stats.fetch_recent_form(league, team)).await {
                Ok(form) => {
                    recent_form.insert(team.team_id().clone(), form);
                }
                // The record is still useful without form; absence is not
                // an error state.
                Err(e) => {
                    warn!(team = %team.abbreviation(), error = %e, "recent form unavailable")
                }
            }
        }

        let partial = !unresolved.is_empty() || roster_failed;
        if partial {
            debug!(game = %stub.game_id, gaps = unresolved.len(), "record is partial");
        }

        GameRecord {
            game_id: stub.game_id,
            league,
            home: stub.home,
            away: stub.away,
            start_time: stub.start_time,
            markets,
            player_props,
            recent_form,
            unresolved,
            missing_odds,
            partial,
        }
    }

    async fn fetch_rosters(
        &self,
        league: League,
        stub: &GameStub,
    ) -> std::result::Result<Vec<PlayerRef>, SourceError> {
        let (home, away) = tokio::join!(
            self.stats.fetch_roster(league, &stub.home),
            self.stats.fetch_roster(league, &stub.away),
        );
        let mut roster = home?;
        roster.extend(away?);
        Ok(roster)
    }
}

/// Run a source call, retrying once immediately on a transient transport
/// error. Anything else surfaces as-is.
async fn fetch_with_retry<T, F, Fut>(mut op: F) -> std::result::Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, SourceError>>,
{
    match op().await {
        Err(e) if e.is_transient() => {
            debug!(error = %e, "transient source error, retrying once");
            op().await
        }
        other => other,
    }
}

fn team_matches(stub: &GameStub, filter: &str) -> bool {
    let needle = normalize(filter);
    [&stub.home, &stub.away].iter().any(|team| {
        normalize(team.canonical_name()) == needle || normalize(team.abbreviation()) == needle
    })
}
