//! Wire types for the stats provider's site API.
//!
//! Scoreboard payloads nest `events -> competitions -> competitors -> team`;
//! rosters group athletes by position for some sports and list them flat for
//! others. Conversion happens here so the rest of the crate only ever sees
//! [`GameStub`]/[`PlayerRef`] shapes, and a malformed event is skipped at
//! event granularity rather than failing the batch.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::domain::{GameId, League, PlayerId, PlayerRef, TeamId, TeamRef};
use crate::error::SourceError;
use crate::source::GameStub;

#[derive(Debug, Deserialize)]
pub struct ScoreboardDto {
    #[serde(default)]
    pub events: Vec<EventDto>,
}

#[derive(Debug, Deserialize)]
pub struct EventDto {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub competitions: Vec<CompetitionDto>,
}

#[derive(Debug, Deserialize)]
pub struct CompetitionDto {
    #[serde(default)]
    pub competitors: Vec<CompetitorDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorDto {
    pub home_away: String,
    pub team: TeamDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub abbreviation: String,
}

#[derive(Debug, Deserialize)]
pub struct RosterDto {
    #[serde(default)]
    pub athletes: Vec<AthleteGroupDto>,
}

/// Rosters arrive either grouped by position (`{"items": [...]}`) or as a
/// flat athlete list depending on the sport. `Single` must come first:
/// untagged deserialization tries variants in order, and `Group` with its
/// defaulted `items` would otherwise swallow flat athlete objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AthleteGroupDto {
    Single(AthleteDto),
    Group {
        #[serde(default)]
        items: Vec<AthleteDto>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteDto {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub position: Option<PositionDto>,
}

#[derive(Debug, Deserialize)]
pub struct PositionDto {
    #[serde(default)]
    pub abbreviation: String,
}

#[derive(Debug, Deserialize)]
pub struct TeamDetailDto {
    pub team: TeamSummaryDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummaryDto {
    #[serde(default)]
    pub record: serde_json::Value,
    #[serde(default)]
    pub standing_summary: Option<String>,
}

/// Convert one scoreboard event into a [`GameStub`].
pub fn convert_event(
    provider: &'static str,
    league: League,
    event: &EventDto,
) -> Result<GameStub, SourceError> {
    let malformed = |reason: String| SourceError::Malformed { provider, reason };

    let competition = event
        .competitions
        .first()
        .ok_or_else(|| malformed(format!("event {} has no competitions", event.id)))?;

    let mut home = None;
    let mut away = None;
    for competitor in &competition.competitors {
        let team = TeamRef::new(
            TeamId::new(&competitor.team.id),
            &competitor.team.display_name,
            &competitor.team.abbreviation,
            league,
        );
        match competitor.home_away.as_str() {
            "home" => home = Some(team),
            "away" => away = Some(team),
            other => {
                return Err(malformed(format!(
                    "event {}: unexpected homeAway value {other:?}",
                    event.id
                )))
            }
        }
    }

    let home =
        home.ok_or_else(|| malformed(format!("event {} has no home competitor", event.id)))?;
    let away =
        away.ok_or_else(|| malformed(format!("event {} has no away competitor", event.id)))?;

    let start_time = parse_start_time(&event.date)
        .ok_or_else(|| malformed(format!("event {}: unparseable date {:?}", event.id, event.date)))?;

    Ok(GameStub {
        game_id: GameId::new(&event.id),
        home,
        away,
        start_time,
    })
}

/// Convert a roster payload into player references for one team.
pub fn convert_roster(roster: &RosterDto, team_id: &TeamId) -> Vec<PlayerRef> {
    fn convert(athlete: &AthleteDto, team_id: &TeamId) -> PlayerRef {
        let position = athlete
            .position
            .as_ref()
            .map(|p| p.abbreviation.as_str())
            .unwrap_or_default();
        PlayerRef::new(
            PlayerId::new(&athlete.id),
            &athlete.display_name,
            team_id.clone(),
            position,
        )
    }

    let mut players = Vec::new();
    for group in &roster.athletes {
        match group {
            AthleteGroupDto::Group { items } => {
                players.extend(items.iter().map(|a| convert(a, team_id)));
            }
            AthleteGroupDto::Single(athlete) => players.push(convert(athlete, team_id)),
        }
    }
    players
}

/// The provider writes event dates as RFC 3339, sometimes without seconds
/// ("2026-08-06T23:05Z").
fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scoreboard_json() -> &'static str {
        r#"{
            "events": [
                {
                    "id": "401472100",
                    "date": "2026-08-06T23:05Z",
                    "competitions": [
                        {
                            "competitors": [
                                {
                                    "homeAway": "home",
                                    "team": {
                                        "id": "10",
                                        "displayName": "New York Yankees",
                                        "abbreviation": "NYY"
                                    }
                                },
                                {
                                    "homeAway": "away",
                                    "team": {
                                        "id": "2",
                                        "displayName": "Boston Red Sox",
                                        "abbreviation": "BOS"
                                    }
                                }
                            ]
                        }
                    ]
                }
            ]
        }"#
    }

    #[test]
    fn converts_scoreboard_event() {
        let scoreboard: ScoreboardDto = serde_json::from_str(scoreboard_json()).unwrap();
        let stub = convert_event("espn", League::Mlb, &scoreboard.events[0]).unwrap();

        assert_eq!(stub.game_id.as_str(), "401472100");
        assert_eq!(stub.home.canonical_name(), "New York Yankees");
        assert_eq!(stub.away.abbreviation(), "BOS");
        assert_eq!(
            stub.start_time,
            "2026-08-06T23:05:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn event_without_competitors_is_malformed() {
        let event = EventDto {
            id: "x".into(),
            date: "2026-08-06T23:05Z".into(),
            competitions: vec![CompetitionDto {
                competitors: vec![],
            }],
        };
        let err = convert_event("espn", League::Mlb, &event).unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[test]
    fn parses_full_rfc3339_dates_too() {
        assert!(parse_start_time("2026-08-06T23:05:00Z").is_some());
        assert!(parse_start_time("2026-08-06T23:05Z").is_some());
        assert!(parse_start_time("tonight").is_none());
    }

    #[test]
    fn converts_grouped_and_flat_rosters() {
        let grouped: RosterDto = serde_json::from_str(
            r#"{
                "athletes": [
                    {
                        "items": [
                            {
                                "id": "4066261",
                                "displayName": "Jayson Tatum",
                                "position": {"abbreviation": "SF"}
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let flat: RosterDto = serde_json::from_str(
            r#"{
                "athletes": [
                    {"id": "3917376", "displayName": "Jaylen Brown"}
                ]
            }"#,
        )
        .unwrap();

        let team = TeamId::new("2");
        let from_grouped = convert_roster(&grouped, &team);
        assert_eq!(from_grouped.len(), 1);
        assert_eq!(from_grouped[0].display_name(), "Jayson Tatum");
        assert_eq!(from_grouped[0].position(), "SF");

        let from_flat = convert_roster(&flat, &team);
        assert_eq!(from_flat.len(), 1);
        assert_eq!(from_flat[0].position(), "");
    }
}
