// Career aggregation: cumulative totals across seasons and the GOAT label.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::accolades::Accolade;
use crate::player::Player;
use crate::season::{simulate_season, SeasonResult};

/// GOAT rating tiers, highest first. A career earns the first label whose
/// threshold its cumulative legacy points meet.
pub const GOAT_TIERS: &[(u32, &str)] = &[
    (2500, "GOAT"),
    (1800, "All-Time Great"),
    (1200, "Hall of Famer"),
    (700, "All-Star Caliber"),
    (300, "Solid Starter"),
];

/// Label for careers below every tier.
pub const DEFAULT_GOAT_RATING: &str = "Role Player";

pub fn goat_rating(legacy_points: u32) -> &'static str {
    GOAT_TIERS
        .iter()
        .find(|(threshold, _)| legacy_points >= *threshold)
        .map_or(DEFAULT_GOAT_RATING, |(_, label)| label)
}

/// Initial allocation hint for `simulate_career`; longer runs grow the
/// vector as seasons are produced.
const CAREER_CAPACITY_HINT: u32 = 64;

/// Running career totals. Counters saturate rather than wrap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CareerSummary {
    pub seasons_played: u32,
    pub games_played: u32,
    /// Sum of `ppg * games_played` over every season, rounded.
    pub total_points: u32,
    pub championships: u32,
    pub mvps: u32,
    pub all_stars: u32,
    pub finals_mvps: u32,
    pub all_nba_first_teams: u32,
    pub all_nba_teams: u32,
    pub scoring_titles: u32,
    pub legacy_points: u32,
    /// Unrounded running point total, so rounding happens once.
    #[serde(skip)]
    raw_points: f64,
}

impl CareerSummary {
    pub fn from_seasons(seasons: &[SeasonResult]) -> Self {
        let mut summary = CareerSummary::default();
        for season in seasons {
            summary.record(season);
        }
        summary
    }

    /// Fold one season into the totals.
    pub fn record(&mut self, season: &SeasonResult) {
        let games = season.stats.games_played;
        self.seasons_played = self.seasons_played.saturating_add(1);
        self.games_played = self.games_played.saturating_add(games);
        self.raw_points += season.stats.per_game.ppg * games as f64;
        self.total_points = self.raw_points.round().max(0.0) as u32;

        for accolade in &season.accolades {
            match accolade {
                Accolade::NbaChampion => {
                    self.championships = self.championships.saturating_add(1)
                }
                Accolade::Mvp => self.mvps = self.mvps.saturating_add(1),
                Accolade::AllStar => self.all_stars = self.all_stars.saturating_add(1),
                Accolade::FinalsMvp => self.finals_mvps = self.finals_mvps.saturating_add(1),
                Accolade::ScoringChampion => {
                    self.scoring_titles = self.scoring_titles.saturating_add(1)
                }
                _ => {}
            }
            if *accolade == Accolade::AllNbaFirstTeam {
                self.all_nba_first_teams = self.all_nba_first_teams.saturating_add(1);
            }
            if accolade.is_all_nba() {
                self.all_nba_teams = self.all_nba_teams.saturating_add(1);
            }
        }

        self.legacy_points = self.legacy_points.saturating_add(season.legacy_points);
    }

    /// Career points per game; zero before any games are played.
    pub fn career_ppg(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.raw_points / self.games_played as f64
    }

    pub fn goat_rating(&self) -> &'static str {
        goat_rating(self.legacy_points)
    }
}

/// Simulate `seasons` consecutive seasons starting at `first_season`. Each
/// season starts from the previous season's `new_ratings`.
pub fn simulate_career(
    player: &Player,
    seasons: u32,
    first_season: u32,
    rng: &mut impl Rng,
) -> Vec<SeasonResult> {
    let mut results = Vec::with_capacity(seasons.min(CAREER_CAPACITY_HINT) as usize);
    let mut current = player.clone();

    for offset in 0..seasons {
        let result = simulate_season(&current, first_season.saturating_add(offset), rng);
        current = result.new_ratings.clone();
        results.push(result);
    }

    let total = results
        .iter()
        .fold(0u32, |acc, r| acc.saturating_add(r.legacy_points));
    info!(
        "Simulated {} seasons for {}: {} legacy points ({})",
        results.len(),
        player.name,
        total,
        goat_rating(total)
    );

    results
}
