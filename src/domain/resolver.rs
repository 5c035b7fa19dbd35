//! Deterministic name resolution.
//!
//! Odds payloads spell teams and players however each sportsbook feels like
//! ("LA Lakers", "L.A. Lakers", "Los Angeles Lakers"); the stats source has
//! exactly one canonical spelling. [`NameResolver`] maps the former onto the
//! latter: normalize, try an exact match, try the human-maintained alias
//! table, and only then fall back to fuzzy scoring gated by a high
//! confidence threshold.
//!
//! A resolution either matches or it doesn't. Anything below the threshold
//! comes back as an explicit [`Unresolved`] value carrying the best
//! candidate and its score, so callers can surface the gap instead of
//! joining data against the wrong entity.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use tracing::warn;

use crate::error::ConfigError;

use super::league::League;
use super::refs::{PlayerRef, TeamRef};

/// Inputs of three characters or fewer never reach fuzzy scoring; short
/// abbreviations must hit exactly or through the alias table.
const MIN_FUZZY_LEN: usize = 4;

/// A name that could not be confidently resolved.
///
/// Propagates into the enclosing record as a visible gap; it is a value,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unresolved {
    /// The name exactly as it appeared in the source payload.
    pub input: String,
    /// The closest candidate, if any candidates were offered.
    pub best_candidate: Option<String>,
    /// Similarity score of the closest candidate, 0.0-1.0.
    pub best_score: f64,
}

/// Outcome of resolving one name against a candidate set.
#[derive(Debug)]
pub enum Resolution<'a, C> {
    /// Confident match to a canonical reference.
    Match(&'a C),
    /// No candidate cleared the confidence threshold.
    Unresolved(Unresolved),
}

impl<'a, C> Resolution<'a, C> {
    /// The matched candidate, if resolution succeeded.
    pub fn matched(&self) -> Option<&'a C> {
        match self {
            Resolution::Match(c) => Some(*c),
            Resolution::Unresolved(_) => None,
        }
    }

    /// Whether resolution succeeded.
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Match(_))
    }
}

/// Anything the resolver can match against.
pub trait Named {
    /// The canonical full name.
    fn full_name(&self) -> &str;

    /// A short form (abbreviation) checked by exact match only.
    fn short_name(&self) -> Option<&str> {
        None
    }
}

impl Named for TeamRef {
    fn full_name(&self) -> &str {
        self.canonical_name()
    }

    fn short_name(&self) -> Option<&str> {
        Some(self.abbreviation())
    }
}

impl Named for PlayerRef {
    fn full_name(&self) -> &str {
        self.display_name()
    }
}

/// On-disk shape of one alias table entry.
#[derive(Debug, Deserialize)]
struct AliasEntry {
    aliases: Vec<String>,
}

/// Human-maintained table of known name variants per league.
///
/// Loaded once at startup from a plain TOML file so mismatches observed in
/// production can be fixed with a text edit:
///
/// ```toml
/// [nba."Los Angeles Lakers"]
/// aliases = ["LAL", "LA Lakers", "Lakers"]
/// ```
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    /// (league, normalized variant) -> canonical name.
    by_variant: HashMap<(League, String), String>,
    /// Canonical names per league, in file order.
    canonicals: HashMap<League, Vec<String>>,
}

impl AliasTable {
    /// Load the alias table from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse an alias table from TOML text.
    ///
    /// Unknown league keys are skipped with a warning rather than rejected;
    /// the file is hand-edited and one bad section should not take down the
    /// rest of the table.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: HashMap<String, HashMap<String, AliasEntry>> =
            toml::from_str(content).map_err(ConfigError::Parse)?;

        let mut table = Self::default();
        for (league_key, entries) in raw {
            let Ok(league) = league_key.parse::<League>() else {
                warn!(league = %league_key, "unknown league in alias table, skipping section");
                continue;
            };
            for (canonical, entry) in entries {
                for alias in &entry.aliases {
                    table
                        .by_variant
                        .insert((league, normalize(alias)), canonical.clone());
                }
                // The canonical spelling is also a valid variant of itself.
                table
                    .by_variant
                    .insert((league, normalize(&canonical)), canonical.clone());
                table.canonicals.entry(league).or_default().push(canonical);
            }
        }
        for names in table.canonicals.values_mut() {
            names.sort_unstable();
        }
        Ok(table)
    }

    /// Look up the canonical name for an already-normalized variant.
    pub fn canonical_for(&self, league: League, normalized: &str) -> Option<&str> {
        self.by_variant
            .get(&(league, normalized.to_string()))
            .map(String::as_str)
    }

    /// Canonical names known for a league, sorted.
    pub fn canonicals(&self, league: League) -> &[String] {
        self.canonicals
            .get(&league)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of known variants.
    pub fn len(&self) -> usize {
        self.by_variant.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.by_variant.is_empty()
    }
}

/// Maps free-text names onto canonical references.
#[derive(Debug, Clone)]
pub struct NameResolver {
    aliases: AliasTable,
    threshold: f64,
}

impl NameResolver {
    /// Create a resolver over an alias table with a fuzzy confidence
    /// threshold in (0.0, 1.0].
    pub fn new(aliases: AliasTable, threshold: f64) -> Self {
        Self { aliases, threshold }
    }

    /// The alias table backing this resolver.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Resolve `input` against `candidates`, scoped to one league.
    ///
    /// The pipeline is: normalize, exact full-name match, exact short-name
    /// match, alias-table lookup, then fuzzy scoring. Fuzzy is skipped for
    /// inputs shorter than four characters and only accepts the best
    /// candidate when its composite score clears the threshold.
    pub fn resolve<'a, C: Named>(
        &self,
        league: League,
        input: &str,
        candidates: &'a [C],
    ) -> Resolution<'a, C> {
        let needle = normalize(input);
        if needle.is_empty() {
            return Resolution::Unresolved(Unresolved {
                input: input.to_string(),
                best_candidate: None,
                best_score: 0.0,
            });
        }

        for candidate in candidates {
            if normalize(candidate.full_name()) == needle {
                return Resolution::Match(candidate);
            }
        }

        for candidate in candidates {
            if let Some(short) = candidate.short_name() {
                if normalize(short) == needle {
                    return Resolution::Match(candidate);
                }
            }
        }

        if let Some(canonical) = self.aliases.canonical_for(league, &needle) {
            let canonical = normalize(canonical);
            for candidate in candidates {
                if normalize(candidate.full_name()) == canonical {
                    return Resolution::Match(candidate);
                }
            }
        }

        let mut best: Option<(&'a C, f64)> = None;
        if needle.chars().count() >= MIN_FUZZY_LEN {
            for candidate in candidates {
                let score = composite_score(&needle, &normalize(candidate.full_name()));
                let replace = match best {
                    None => true,
                    Some((cur, cur_score)) => {
                        score > cur_score
                            || (score == cur_score && candidate.full_name() < cur.full_name())
                    }
                };
                if replace {
                    best = Some((candidate, score));
                }
            }
            if let Some((candidate, score)) = best {
                if score >= self.threshold {
                    return Resolution::Match(candidate);
                }
            }
        }

        Resolution::Unresolved(Unresolved {
            input: input.to_string(),
            best_candidate: best.map(|(c, _)| c.full_name().to_string()),
            best_score: best.map(|(_, s)| s).unwrap_or(0.0),
        })
    }
}

/// Normalize a name for comparison: lowercase, strip punctuation, collapse
/// whitespace.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Composite similarity: jaro-winkler on the string as given and on its
/// token-sorted form, whichever is higher. The token-sorted pass catches
/// reordered names ("Lakers Los Angeles" vs "Los Angeles Lakers").
fn composite_score(a: &str, b: &str) -> f64 {
    let direct = jaro_winkler(a, b);
    let sorted = jaro_winkler(&token_sort(a), &token_sort(b));
    direct.max(sorted)
}

fn token_sort(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::TeamId;

    fn nba_teams() -> Vec<TeamRef> {
        vec![
            TeamRef::new(TeamId::new("13"), "Los Angeles Lakers", "LAL", League::Nba),
            TeamRef::new(TeamId::new("2"), "Boston Celtics", "BOS", League::Nba),
            TeamRef::new(TeamId::new("17"), "Brooklyn Nets", "BKN", League::Nba),
        ]
    }

    fn table() -> AliasTable {
        AliasTable::parse(
            r#"
            [nba."Los Angeles Lakers"]
            aliases = ["LA Lakers", "Lakers"]

            [nba."Boston Celtics"]
            aliases = ["Celtics", "Boston"]
            "#,
        )
        .unwrap()
    }

    fn resolver() -> NameResolver {
        NameResolver::new(table(), 0.85)
    }

    #[test]
    fn exact_match_modulo_case_and_punctuation() {
        let teams = nba_teams();
        let res = resolver().resolve(League::Nba, "  los angeles LAKERS ", &teams);
        assert_eq!(res.matched().unwrap().team_id().as_str(), "13");
    }

    #[test]
    fn abbreviation_matches_exactly() {
        let teams = nba_teams();
        let res = resolver().resolve(League::Nba, "BKN", &teams);
        assert_eq!(res.matched().unwrap().team_id().as_str(), "17");
    }

    #[test]
    fn alias_table_hit_resolves_before_fuzzy() {
        let teams = nba_teams();
        let res = resolver().resolve(League::Nba, "LA Lakers", &teams);
        assert_eq!(res.matched().unwrap().team_id().as_str(), "13");
    }

    #[test]
    fn fuzzy_accepts_near_identical_spelling() {
        let teams = nba_teams();
        // Missing one letter; token-sorted jaro-winkler stays above 0.85.
        let res = resolver().resolve(League::Nba, "Los Angeles Lakerss", &teams);
        assert_eq!(res.matched().unwrap().team_id().as_str(), "13");
    }

    #[test]
    fn low_confidence_returns_unresolved_with_best_candidate() {
        let teams = nba_teams();
        let res = resolver().resolve(League::Nba, "Golden State Warriors", &teams);
        match res {
            Resolution::Unresolved(u) => {
                assert_eq!(u.input, "Golden State Warriors");
                assert!(u.best_candidate.is_some());
                assert!(u.best_score < 0.85);
            }
            Resolution::Match(team) => panic!("unexpected match: {}", team.canonical_name()),
        }
    }

    #[test]
    fn short_inputs_never_fuzzy_match() {
        let teams = nba_teams();
        // "BSO" is a plausible typo for "BOS" but three-character inputs
        // must hit exactly or through the alias table.
        let res = resolver().resolve(League::Nba, "BSO", &teams);
        assert!(!res.is_match());
    }

    #[test]
    fn alias_scope_is_per_league() {
        let teams = vec![TeamRef::new(
            TeamId::new("2"),
            "Boston Celtics",
            "BOS",
            League::Nba,
        )];
        // The alias exists under [nba], so an NFL-scoped lookup must not
        // see it, and "Celtics" scores below threshold on its own.
        let res = resolver().resolve(League::Nfl, "Celtics", &teams);
        assert!(!res.is_match());
    }

    #[test]
    fn empty_input_is_unresolved() {
        let teams = nba_teams();
        let res = resolver().resolve(League::Nba, "   ", &teams);
        match res {
            Resolution::Unresolved(u) => assert_eq!(u.best_score, 0.0),
            Resolution::Match(_) => panic!("empty input must not match"),
        }
    }

    #[test]
    fn empty_candidate_set_is_unresolved() {
        let teams: Vec<TeamRef> = vec![];
        let res = resolver().resolve(League::Nba, "Los Angeles Lakers", &teams);
        match res {
            Resolution::Unresolved(u) => assert!(u.best_candidate.is_none()),
            Resolution::Match(_) => panic!("no candidates to match"),
        }
    }

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize("St. Louis  Cardinals"), "st louis cardinals");
        assert_eq!(normalize("L.A. Lakers"), "l a lakers");
    }

    #[test]
    fn alias_table_skips_unknown_league_sections() {
        let table = AliasTable::parse(
            r#"
            [cricket."Mumbai Indians"]
            aliases = ["MI"]

            [nba."Boston Celtics"]
            aliases = ["Celtics"]
            "#,
        )
        .unwrap();
        assert_eq!(table.canonicals(League::Nba).len(), 1);
        assert!(table.canonical_for(League::Nba, "celtics").is_some());
    }

    #[test]
    fn canonical_spelling_is_its_own_variant() {
        let table = table();
        assert_eq!(
            table.canonical_for(League::Nba, "boston celtics"),
            Some("Boston Celtics")
        );
    }
}
