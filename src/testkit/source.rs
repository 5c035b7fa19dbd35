//! Scripted source implementations with failure injection.
//!
//! Each fetch pops the next scripted response; once the script runs dry the
//! fallback repeats. Call counters let tests assert the retry policy.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{League, PlayerRef, RecentForm, TeamId, TeamRef};
use crate::error::SourceError;
use crate::source::{GameOdds, GameStub, OddsSource, StatsSource};

type SourceResult<T> = std::result::Result<T, SourceError>;

/// Scripted stats source.
pub struct ScriptedStats {
    script: Mutex<VecDeque<SourceResult<Vec<GameStub>>>>,
    fallback: SourceResult<Vec<GameStub>>,
    rosters: HashMap<TeamId, Vec<PlayerRef>>,
    forms: HashMap<TeamId, RecentForm>,
    roster_error: Option<SourceError>,
    schedule_calls: AtomicUsize,
}

impl ScriptedStats {
    /// Always answer with this schedule.
    pub fn new(schedule: Vec<GameStub>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Ok(schedule),
            rosters: HashMap::new(),
            forms: HashMap::new(),
            roster_error: None,
            schedule_calls: AtomicUsize::new(0),
        }
    }

    /// Always fail the schedule fetch with this error.
    pub fn failing(error: SourceError) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(error),
            rosters: HashMap::new(),
            forms: HashMap::new(),
            roster_error: None,
            schedule_calls: AtomicUsize::new(0),
        }
    }

    /// Script the first schedule responses before falling back.
    #[must_use]
    pub fn with_schedule_script(self, responses: Vec<SourceResult<Vec<GameStub>>>) -> Self {
        *self.script.lock().unwrap_or_else(|e| e.into_inner()) = responses.into();
        self
    }

    /// Provide a roster for one team.
    #[must_use]
    pub fn with_roster(mut self, team: TeamId, players: Vec<PlayerRef>) -> Self {
        self.rosters.insert(team, players);
        self
    }

    /// Provide a recent-form blob for one team.
    #[must_use]
    pub fn with_form(mut self, team: TeamId, form: RecentForm) -> Self {
        self.forms.insert(team, form);
        self
    }

    /// Fail every roster fetch with this error.
    #[must_use]
    pub fn with_roster_error(mut self, error: SourceError) -> Self {
        self.roster_error = Some(error);
        self
    }

    /// How many times the schedule was fetched.
    pub fn schedule_calls(&self) -> usize {
        self.schedule_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsSource for ScriptedStats {
    async fn fetch_schedule(
        &self,
        _league: League,
        _date: NaiveDate,
    ) -> SourceResult<Vec<GameStub>> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    async fn fetch_roster(
        &self,
        _league: League,
        team: &TeamRef,
    ) -> SourceResult<Vec<PlayerRef>> {
        if let Some(error) = &self.roster_error {
            return Err(error.clone());
        }
        Ok(self.rosters.get(team.team_id()).cloned().unwrap_or_default())
    }

    async fn fetch_recent_form(
        &self,
        _league: League,
        team: &TeamRef,
    ) -> SourceResult<RecentForm> {
        self.forms
            .get(team.team_id())
            .cloned()
            .ok_or(SourceError::Status {
                provider: "scripted-stats",
                status: 404,
            })
    }

    fn source_name(&self) -> &'static str {
        "scripted-stats"
    }
}

/// Scripted odds source.
pub struct ScriptedOdds {
    script: Mutex<VecDeque<SourceResult<Vec<GameOdds>>>>,
    fallback: SourceResult<Vec<GameOdds>>,
    calls: AtomicUsize,
}

impl ScriptedOdds {
    /// Always answer with these events.
    pub fn new(events: Vec<GameOdds>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Ok(events),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with this error.
    pub fn failing(error: SourceError) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Script the first responses before falling back.
    #[must_use]
    pub fn with_script(self, responses: Vec<SourceResult<Vec<GameOdds>>>) -> Self {
        *self.script.lock().unwrap_or_else(|e| e.into_inner()) = responses.into();
        self
    }

    /// How many times odds were fetched.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OddsSource for ScriptedOdds {
    async fn fetch_odds(&self, _league: League, _date: NaiveDate) -> SourceResult<Vec<GameOdds>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn source_name(&self) -> &'static str {
        "scripted-odds"
    }
}
