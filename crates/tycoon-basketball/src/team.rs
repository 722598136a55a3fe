// Team win/loss record driven by the player's production.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::injury::SEASON_GAMES;
use crate::stats::{add_randomness, PerGameStats};

/// Cap on the share of the win percentage the player alone can produce.
const MAX_WIN_CONTRIBUTION: f64 = 0.75;
/// Teammates add up to this much win percentage.
const MAX_TEAM_FACTOR: f64 = 0.275;
const WIN_PCT_VARIANCE: f64 = 0.1;
const MIN_WIN_PCT: f64 = 0.1;
const MAX_WIN_PCT: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    /// Build a record from a win total; losses fill out the season.
    pub fn from_wins(wins: u32) -> Self {
        let wins = wins.min(SEASON_GAMES);
        TeamRecord {
            wins,
            losses: SEASON_GAMES - wins,
        }
    }
}

/// Share of the win percentage attributable to the player, capped at 0.75.
pub fn win_contribution(stats: &PerGameStats, basketball_iq: f64) -> f64 {
    let raw = (stats.ppg * 0.5
        + stats.rpg * 0.2
        + stats.apg * 0.3
        + stats.spg * 2.0
        + stats.bpg * 2.0
        + basketball_iq * 0.3)
        / 90.0;
    raw.min(MAX_WIN_CONTRIBUTION)
}

/// Compute the season record. `_season` is accepted for future
/// season-dependent team strength and does not affect the result.
/// Consumes two draws: team factor, then win-percentage jitter.
pub fn calculate_team_record(
    stats: &PerGameStats,
    basketball_iq: f64,
    _season: u32,
    rng: &mut impl Rng,
) -> TeamRecord {
    let contribution = win_contribution(stats, basketball_iq);
    let team_factor = rng.gen::<f64>() * MAX_TEAM_FACTOR;
    let win_pct = add_randomness(contribution + team_factor, WIN_PCT_VARIANCE, rng)
        .clamp(MIN_WIN_PCT, MAX_WIN_PCT);
    let wins = (win_pct * SEASON_GAMES as f64).floor() as u32;
    TeamRecord::from_wins(wins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn constant_rng(p: f64) -> StepRng {
        StepRng::new(((p * (1u64 << 53) as f64) as u64) << 11, 0)
    }

    fn stats(ppg: f64, rpg: f64, apg: f64, spg: f64, bpg: f64) -> PerGameStats {
        PerGameStats { ppg, rpg, apg, spg, bpg }
    }

    #[test]
    fn contribution_is_capped() {
        let monster = stats(60.0, 20.0, 20.0, 5.0, 5.0);
        assert_eq!(win_contribution(&monster, 99.0), 0.75);
    }

    #[test]
    fn contribution_formula() {
        let s = stats(20.0, 5.0, 5.0, 1.0, 0.5);
        // (10 + 1 + 1.5 + 2 + 1 + 15) / 90
        assert!((win_contribution(&s, 50.0) - 30.5 / 90.0).abs() < 1e-12);
    }

    #[test]
    fn record_always_sums_to_season_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for ppg in [0.0, 10.0, 25.0, 40.0] {
            for _ in 0..200 {
                let r = calculate_team_record(&stats(ppg, 6.0, 5.0, 1.0, 1.0), 70.0, 1, &mut rng);
                assert_eq!(r.wins + r.losses, 82);
                assert!((8..=69).contains(&r.wins), "wins out of range: {}", r.wins);
            }
        }
    }

    #[test]
    fn floor_and_ceiling_of_win_percentage() {
        let nothing = stats(0.0, 0.0, 0.0, 0.0, 0.0);
        let r = calculate_team_record(&nothing, 0.0, 1, &mut constant_rng(0.0));
        assert_eq!(r, TeamRecord { wins: 8, losses: 74 });

        let monster = stats(60.0, 20.0, 20.0, 5.0, 5.0);
        let r = calculate_team_record(&monster, 99.0, 1, &mut constant_rng(0.99));
        assert_eq!(r, TeamRecord { wins: 69, losses: 13 });
    }

    #[test]
    fn midpoint_draws() {
        // Contribution 30.5/90, team factor 0.1375, no jitter.
        let s = stats(20.0, 5.0, 5.0, 1.0, 0.5);
        let r = calculate_team_record(&s, 50.0, 3, &mut constant_rng(0.5));
        let expected = ((30.5 / 90.0 + 0.1375) * 82.0_f64).floor() as u32;
        assert_eq!(r.wins, expected);
        assert_eq!(r.wins, 39);
    }

    #[test]
    fn from_wins_clamps_to_season() {
        assert_eq!(TeamRecord::from_wins(90), TeamRecord { wins: 82, losses: 0 });
    }
}
