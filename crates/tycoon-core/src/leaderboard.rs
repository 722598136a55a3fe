// GOAT leaderboard entry model, submission coercion, and the store trait.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Position stored when a submission has none.
pub const DEFAULT_POSITION: &str = "PG";

/// GOAT label stored when a submission has none.
pub const DEFAULT_GOAT_RATING: &str = "Role Player";

/// A career is at least one season long.
pub const DEFAULT_SEASONS_PLAYED: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Missing required field: {field} cannot be empty")]
    MissingField { field: &'static str },

    #[error("leaderboard submission must be a JSON object")]
    NotAnObject,
}

/// A leaderboard row as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    #[serde(flatten)]
    pub entry: NewLeaderboardEntry,
    /// RFC 3339 UTC timestamp assigned on insert.
    pub created_at: String,
}

/// A leaderboard submission after coercion, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLeaderboardEntry {
    pub player_name: String,
    pub position: String,
    pub seasons_played: i64,
    pub total_points: i64,
    pub career_ppg: f64,
    pub championships: i64,
    pub mvps: i64,
    pub all_stars: i64,
    pub finals_mvps: i64,
    pub all_nba_first_teams: i64,
    pub all_nba_teams: i64,
    pub scoring_titles: i64,
    pub legacy_points: i64,
    pub goat_rating: String,
}

impl NewLeaderboardEntry {
    /// Coerce an untyped submission into an entry.
    ///
    /// `player_name` must be a non-empty string (numbers are accepted and
    /// stringified). Numeric fields accept numbers, numeric strings, and
    /// booleans; anything that coerces to zero or fails to parse takes the
    /// field's default (1 for `seasons_played`, 0 otherwise).
    pub fn from_json(value: &Value) -> Result<Self, EntryError> {
        let obj = value.as_object().ok_or(EntryError::NotAnObject)?;

        let player_name = match obj.get("player_name") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
            _ => {
                return Err(EntryError::MissingField {
                    field: "player_name",
                })
            }
        };

        let text_or = |key: &str, default: &str| match obj.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => default.to_string(),
        };
        let count = |key: &str| coerce_number(obj.get(key)).map_or(0, |n| n.round() as i64);

        Ok(NewLeaderboardEntry {
            player_name,
            position: text_or("position", DEFAULT_POSITION),
            seasons_played: coerce_number(obj.get("seasons_played"))
                .map_or(DEFAULT_SEASONS_PLAYED, |n| n.round() as i64),
            total_points: count("total_points"),
            career_ppg: coerce_number(obj.get("career_ppg")).unwrap_or(0.0),
            championships: count("championships"),
            mvps: count("mvps"),
            all_stars: count("all_stars"),
            finals_mvps: count("finals_mvps"),
            all_nba_first_teams: count("all_nba_first_teams"),
            all_nba_teams: count("all_nba_teams"),
            scoring_titles: count("scoring_titles"),
            legacy_points: count("legacy_points"),
            goat_rating: text_or("goat_rating", DEFAULT_GOAT_RATING),
        })
    }
}

/// Loose numeric coercion. `None` means "use the default": the value is
/// missing, null, non-numeric, non-finite, or zero.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Bool(true) => 1.0,
        _ => return None,
    };
    (n.is_finite() && n != 0.0).then_some(n)
}

/// Persistence for leaderboard entries.
pub trait LeaderboardStore: Send + Sync {
    /// Append an entry. Returns the stored row with its id and timestamp.
    fn add_entry(&self, entry: &NewLeaderboardEntry) -> Result<LeaderboardEntry>;

    /// Highest legacy points first; ties go to the earlier entry.
    fn top_entries(&self, limit: usize) -> Result<Vec<LeaderboardEntry>>;

    /// 1 + the number of entries with strictly more legacy points.
    fn rank_for_score(&self, legacy_points: i64) -> Result<u64>;

    fn total_count(&self) -> Result<u64>;
}
