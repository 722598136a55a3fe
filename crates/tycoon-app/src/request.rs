// Boundary conversions: loose JSON into players, and career summaries into
// leaderboard submissions.

use serde_json::{Map, Value};
use thiserror::Error;

use tycoon_basketball::{CareerSummary, Player, Position, DEFAULT_SEASON};
use tycoon_core::leaderboard::{coerce_number, NewLeaderboardEntry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Missing required field: player")]
    MissingPlayer,
}

/// A parsed `/api/simulate-season` body.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub player: Player,
    pub season: u32,
}

impl SimulationRequest {
    /// Parse `{ "player": {...}, "season": n? }`. A missing, zero, or
    /// non-numeric season means season 1.
    pub fn from_json(body: &Value) -> Result<Self, RequestError> {
        let player = body
            .get("player")
            .and_then(Value::as_object)
            .ok_or(RequestError::MissingPlayer)?;

        let season = coerce_number(body.get("season"))
            .map_or(DEFAULT_SEASON, |n| n.round().max(1.0) as u32);

        Ok(SimulationRequest {
            player: player_from_map(player),
            season,
        })
    }
}

/// Coerce a JSON player. Missing or non-numeric ratings become 0, a missing
/// or blank position becomes PG, a missing name becomes empty.
pub fn player_from_json(value: &Value) -> Result<Player, RequestError> {
    value
        .as_object()
        .map(player_from_map)
        .ok_or(RequestError::MissingPlayer)
}

fn player_from_map(obj: &Map<String, Value>) -> Player {
    let num = |key: &str| coerce_number(obj.get(key)).unwrap_or(0.0);

    let name = match obj.get("name") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let position = match obj.get("position") {
        Some(Value::String(s)) => Position::from_str_pos(s),
        _ => Position::PointGuard,
    };

    Player {
        name,
        position,
        shooting: num("shooting"),
        playmaking: num("playmaking"),
        defense: num("defense"),
        athleticism: num("athleticism"),
        basketball_iq: num("basketball_iq"),
        work_ethic: num("work_ethic"),
        injury_prone: num("injury_prone"),
        age: num("age").round() as i32,
    }
}

/// Build the leaderboard submission for a finished career.
pub fn leaderboard_entry(player: &Player, summary: &CareerSummary) -> NewLeaderboardEntry {
    NewLeaderboardEntry {
        player_name: player.name.clone(),
        position: player.position.to_string(),
        seasons_played: summary.seasons_played.into(),
        total_points: summary.total_points.into(),
        career_ppg: (summary.career_ppg() * 10.0).round() / 10.0,
        championships: summary.championships.into(),
        mvps: summary.mvps.into(),
        all_stars: summary.all_stars.into(),
        finals_mvps: summary.finals_mvps.into(),
        all_nba_first_teams: summary.all_nba_first_teams.into(),
        all_nba_teams: summary.all_nba_teams.into(),
        scoring_titles: summary.scoring_titles.into(),
        legacy_points: summary.legacy_points.into(),
        goat_rating: summary.goat_rating().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_player_rejected() {
        assert_eq!(
            SimulationRequest::from_json(&json!({"season": 3})).unwrap_err(),
            RequestError::MissingPlayer
        );
        assert!(SimulationRequest::from_json(&json!({"player": null})).is_err());
        assert!(SimulationRequest::from_json(&json!({"player": "Ace"})).is_err());
        assert_eq!(
            RequestError::MissingPlayer.to_string(),
            "Missing required field: player"
        );
    }

    #[test]
    fn season_defaults_to_one() {
        let req = SimulationRequest::from_json(&json!({"player": {}})).unwrap();
        assert_eq!(req.season, 1);
        let req = SimulationRequest::from_json(&json!({"player": {}, "season": 0})).unwrap();
        assert_eq!(req.season, 1);
        let req = SimulationRequest::from_json(&json!({"player": {}, "season": "7"})).unwrap();
        assert_eq!(req.season, 7);
    }

    #[test]
    fn player_fields_are_coerced() {
        let req = SimulationRequest::from_json(&json!({
            "player": {
                "name": "Ace",
                "position": "sf",
                "shooting": "88",
                "playmaking": 75,
                "defense": "tough",
                "athleticism": null,
                "basketball_iq": 80.5,
                "work_ethic": 90,
                "age": "26"
            }
        }))
        .unwrap();
        let p = req.player;
        assert_eq!(p.name, "Ace");
        assert_eq!(p.position, Position::SmallForward);
        assert_eq!(p.shooting, 88.0);
        assert_eq!(p.playmaking, 75.0);
        assert_eq!(p.defense, 0.0);
        assert_eq!(p.athleticism, 0.0);
        assert_eq!(p.basketball_iq, 80.5);
        assert_eq!(p.injury_prone, 0.0);
        assert_eq!(p.age, 26);
    }

    #[test]
    fn empty_player_gets_defaults() {
        let p = player_from_json(&json!({"position": ""})).unwrap();
        assert_eq!(p.name, "");
        assert_eq!(p.position, Position::PointGuard);
        assert_eq!(p.age, 0);
    }

    #[test]
    fn absurd_age_simulates_without_panicking() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;
        use tycoon_basketball::simulate_season;

        let req =
            SimulationRequest::from_json(&json!({"player": {"name": "Old", "age": 1e12}})).unwrap();
        assert_eq!(req.player.age, i32::MAX);

        let result =
            simulate_season(&req.player, req.season, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(result.age, i32::MAX);
        assert_eq!(result.new_ratings.age, i32::MAX);
    }

    #[test]
    fn summary_to_entry() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;
        use tycoon_basketball::simulate_career;

        let player = Player {
            name: "Ace".into(),
            position: Position::Center,
            shooting: 80.0,
            playmaking: 70.0,
            defense: 75.0,
            athleticism: 85.0,
            basketball_iq: 78.0,
            work_ethic: 88.0,
            injury_prone: 20.0,
            age: 22,
        };
        let seasons = simulate_career(&player, 4, 1, &mut ChaCha8Rng::seed_from_u64(9));
        let summary = CareerSummary::from_seasons(&seasons);
        let entry = leaderboard_entry(&player, &summary);

        assert_eq!(entry.player_name, "Ace");
        assert_eq!(entry.position, "C");
        assert_eq!(entry.seasons_played, 4);
        assert_eq!(entry.total_points, i64::from(summary.total_points));
        assert_eq!(entry.championships, i64::from(summary.championships));
        assert_eq!(entry.legacy_points, i64::from(summary.legacy_points));
        assert_eq!(entry.goat_rating, summary.goat_rating());
        assert!((entry.career_ppg - summary.career_ppg()).abs() <= 0.05 + 1e-9);
    }
}
