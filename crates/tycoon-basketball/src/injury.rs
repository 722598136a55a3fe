// Injury risk, major-injury roll, and games played.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Games in a regular season.
pub const SEASON_GAMES: u32 = 82;

/// Games played below this count as an injury-affected season.
const HEALTHY_SEASON_GAMES: u32 = 75;

/// Season-level injury label reported with each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryStatus {
    #[serde(rename = "Major injury")]
    MajorInjury,
    #[serde(rename = "Minor injuries")]
    MinorInjuries,
    #[serde(rename = "Healthy season")]
    Healthy,
}

impl InjuryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InjuryStatus::MajorInjury => "Major injury",
            InjuryStatus::MinorInjuries => "Minor injuries",
            InjuryStatus::Healthy => "Healthy season",
        }
    }
}

/// Outcome of the injury model for one season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InjuryOutcome {
    pub risk: f64,
    pub major_injury: bool,
    pub games_played: u32,
}

impl InjuryOutcome {
    pub fn status(&self) -> InjuryStatus {
        if self.major_injury {
            InjuryStatus::MajorInjury
        } else if self.games_played < HEALTHY_SEASON_GAMES {
            InjuryStatus::MinorInjuries
        } else {
            InjuryStatus::Healthy
        }
    }
}

/// `(injury_prone/100)`, scaled up by 1% per year past 30.
pub fn injury_risk(injury_prone: f64, age: i32) -> f64 {
    let age_penalty = if age > 30 {
        (age - 30) as f64 * 0.01
    } else {
        0.0
    };
    (injury_prone / 100.0) * (1.0 + age_penalty)
}

/// Roll the season's injuries. Consumes exactly two draws: the major-injury
/// roll, then the games-played roll.
pub fn roll_injuries(injury_prone: f64, age: i32, rng: &mut impl Rng) -> InjuryOutcome {
    let risk = injury_risk(injury_prone, age);
    let major_injury = rng.gen::<f64>() < risk * 0.1;

    let raw_games = if major_injury {
        // Uniform integer in [10, 50].
        (rng.gen::<f64>() * 41.0).floor() + 10.0
    } else {
        (SEASON_GAMES as f64 - rng.gen::<f64>() * risk * 20.0).floor()
    };

    InjuryOutcome {
        risk,
        major_injury,
        games_played: clamp_games(raw_games),
    }
}

fn clamp_games(raw: f64) -> u32 {
    let clamped = raw.clamp(0.0, SEASON_GAMES as f64);
    if clamped != raw {
        warn!("games played {raw} outside 0..={SEASON_GAMES}, clamped to {clamped}");
    }
    clamped as u32
}
