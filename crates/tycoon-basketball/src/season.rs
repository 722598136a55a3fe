// Single-season simulation: runs every model in order and assembles the
// result.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::accolades::{calculate_accolades, Accolade};
use crate::aging::AgingProfile;
use crate::injury::{roll_injuries, InjuryStatus};
use crate::legacy::legacy_points;
use crate::player::Player;
use crate::progression::progress_ratings;
use crate::stats::{generate_stats, PerGameStats};
use crate::team::{calculate_team_record, TeamRecord};

/// Season number used when the caller does not supply one.
pub const DEFAULT_SEASON: u32 = 1;

/// Per-game averages plus games played.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStats {
    #[serde(flatten)]
    pub per_game: PerGameStats,
    pub games_played: u32,
}

/// Everything produced by one simulated season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonResult {
    pub season: u32,
    /// The player's age during this season.
    pub age: i32,
    pub stats: SeasonStats,
    pub team_record: TeamRecord,
    pub accolades: Vec<Accolade>,
    pub injuries: InjuryStatus,
    pub legacy_points: u32,
    pub new_ratings: Player,
}

impl SeasonResult {
    pub fn has(&self, accolade: Accolade) -> bool {
        self.accolades.contains(&accolade)
    }

    pub fn count(&self, accolade: Accolade) -> usize {
        self.accolades.iter().filter(|a| **a == accolade).count()
    }
}

/// Simulate one season for `player`. The input is never modified; the next
/// season's ratings come back in `new_ratings`.
///
/// Draw order: injuries (2), stats (5), team record (2), playoff gates (as
/// reached), rating progression (4 or 5).
pub fn simulate_season(player: &Player, season: u32, rng: &mut impl Rng) -> SeasonResult {
    let aging = AgingProfile::new(player.age, player.work_ethic);
    let injury = roll_injuries(player.injury_prone, player.age, rng);

    let per_game = generate_stats(player, aging.age_factor, rng);
    let team_record = calculate_team_record(&per_game, player.basketball_iq, season, rng);
    let accolades = calculate_accolades(&per_game, &team_record, injury.games_played, rng);
    let new_ratings = progress_ratings(player, aging.skill_improvement, injury.major_injury, rng);
    let legacy_points = legacy_points(&per_game, &accolades, &team_record);

    debug!(
        "Season {season} for {} (age {}): {:.1} ppg in {} games, {}-{}, {} accolades, {} legacy points",
        player.name,
        player.age,
        per_game.ppg,
        injury.games_played,
        team_record.wins,
        team_record.losses,
        accolades.len(),
        legacy_points
    );

    SeasonResult {
        season,
        age: player.age,
        stats: SeasonStats {
            per_game,
            games_played: injury.games_played,
        },
        team_record,
        accolades,
        injuries: injury.status(),
        legacy_points,
        new_ratings,
    }
}
