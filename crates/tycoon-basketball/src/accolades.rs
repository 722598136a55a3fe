// Season honours: individual award thresholds and the playoff run.
//
// Individual awards are plain threshold checks. The playoff run is a table of
// win-range rules, each mapping to a chain of gated stages, walked by a small
// interpreter so every branch can be audited and tested on its own.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stats::PerGameStats;
use crate::team::TeamRecord;

/// Minimum games played (about 70% of the season) for individual awards.
pub const AWARD_ELIGIBILITY_GAMES: u32 = 58;

// ---------------------------------------------------------------------------
// Accolade
// ---------------------------------------------------------------------------

/// Every honour the engine can award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accolade {
    #[serde(rename = "All-Star")]
    AllStar,
    #[serde(rename = "All-NBA First Team")]
    AllNbaFirstTeam,
    #[serde(rename = "All-NBA Second Team")]
    AllNbaSecondTeam,
    #[serde(rename = "All-NBA Third Team")]
    AllNbaThirdTeam,
    #[serde(rename = "All-Defensive First Team")]
    AllDefensiveFirstTeam,
    #[serde(rename = "All-Defensive Second Team")]
    AllDefensiveSecondTeam,
    #[serde(rename = "MVP")]
    Mvp,
    #[serde(rename = "MVP Candidate")]
    MvpCandidate,
    #[serde(rename = "Scoring Champion")]
    ScoringChampion,
    #[serde(rename = "Missed Playoffs")]
    MissedPlayoffs,
    #[serde(rename = "First Round Exit")]
    FirstRoundExit,
    #[serde(rename = "Second Round Exit")]
    SecondRoundExit,
    #[serde(rename = "Conference Finals")]
    ConferenceFinals,
    #[serde(rename = "Finals Appearance")]
    FinalsAppearance,
    #[serde(rename = "NBA Champion")]
    NbaChampion,
    #[serde(rename = "Finals MVP")]
    FinalsMvp,
}

impl Accolade {
    pub const ALL: [Accolade; 16] = [
        Accolade::AllStar,
        Accolade::AllNbaFirstTeam,
        Accolade::AllNbaSecondTeam,
        Accolade::AllNbaThirdTeam,
        Accolade::AllDefensiveFirstTeam,
        Accolade::AllDefensiveSecondTeam,
        Accolade::Mvp,
        Accolade::MvpCandidate,
        Accolade::ScoringChampion,
        Accolade::MissedPlayoffs,
        Accolade::FirstRoundExit,
        Accolade::SecondRoundExit,
        Accolade::ConferenceFinals,
        Accolade::FinalsAppearance,
        Accolade::NbaChampion,
        Accolade::FinalsMvp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Accolade::AllStar => "All-Star",
            Accolade::AllNbaFirstTeam => "All-NBA First Team",
            Accolade::AllNbaSecondTeam => "All-NBA Second Team",
            Accolade::AllNbaThirdTeam => "All-NBA Third Team",
            Accolade::AllDefensiveFirstTeam => "All-Defensive First Team",
            Accolade::AllDefensiveSecondTeam => "All-Defensive Second Team",
            Accolade::Mvp => "MVP",
            Accolade::MvpCandidate => "MVP Candidate",
            Accolade::ScoringChampion => "Scoring Champion",
            Accolade::MissedPlayoffs => "Missed Playoffs",
            Accolade::FirstRoundExit => "First Round Exit",
            Accolade::SecondRoundExit => "Second Round Exit",
            Accolade::ConferenceFinals => "Conference Finals",
            Accolade::FinalsAppearance => "Finals Appearance",
            Accolade::NbaChampion => "NBA Champion",
            Accolade::FinalsMvp => "Finals MVP",
        }
    }

    /// Exact (case-sensitive) label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Accolade::ALL.into_iter().find(|a| a.label() == label)
    }

    /// Legacy points awarded per occurrence of this honour.
    pub fn legacy_bonus(&self) -> u32 {
        match self {
            Accolade::AllStar => 10,
            Accolade::AllNbaFirstTeam => 25,
            Accolade::AllNbaSecondTeam => 15,
            Accolade::AllNbaThirdTeam => 10,
            Accolade::AllDefensiveFirstTeam => 15,
            Accolade::AllDefensiveSecondTeam => 8,
            Accolade::Mvp => 50,
            Accolade::MvpCandidate => 20,
            Accolade::ScoringChampion => 20,
            Accolade::MissedPlayoffs => 0,
            Accolade::FirstRoundExit => 2,
            Accolade::SecondRoundExit => 5,
            Accolade::ConferenceFinals => 10,
            Accolade::FinalsAppearance => 20,
            Accolade::NbaChampion => 40,
            Accolade::FinalsMvp => 30,
        }
    }

    pub fn is_all_nba(&self) -> bool {
        matches!(
            self,
            Accolade::AllNbaFirstTeam | Accolade::AllNbaSecondTeam | Accolade::AllNbaThirdTeam
        )
    }
}

impl fmt::Display for Accolade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Individual honours
// ---------------------------------------------------------------------------

/// Threshold-based individual awards, in evaluation order. Returns nothing
/// when the player missed too many games.
pub fn individual_honors(stats: &PerGameStats, wins: u32, games_played: u32) -> Vec<Accolade> {
    let mut honors = Vec::new();
    if games_played < AWARD_ELIGIBILITY_GAMES {
        return honors;
    }

    let PerGameStats { ppg, rpg, apg, spg, bpg } = *stats;

    if ppg > 23.0 || (ppg > 18.0 && apg > 7.0) || (ppg > 15.0 && rpg > 10.0) {
        honors.push(Accolade::AllStar);
    }

    if ppg > 25.0 && wins > 45 {
        honors.push(Accolade::AllNbaFirstTeam);
    } else if ppg > 23.0 && wins > 40 {
        honors.push(Accolade::AllNbaSecondTeam);
    } else if ppg > 20.0 && wins > 35 {
        honors.push(Accolade::AllNbaThirdTeam);
    }

    if spg > 2.0 && bpg > 1.0 && wins > 42 {
        honors.push(Accolade::AllDefensiveFirstTeam);
    } else if spg > 1.5 && bpg > 0.8 && wins > 38 {
        honors.push(Accolade::AllDefensiveSecondTeam);
    }

    if ppg > 26.0 && wins > 55 && (rpg > 7.0 || apg > 7.0) {
        honors.push(Accolade::Mvp);
    } else if ppg > 25.0 && wins > 50 && (rpg > 6.0 || apg > 6.0) {
        honors.push(Accolade::MvpCandidate);
    }

    if ppg > 28.0 {
        honors.push(Accolade::ScoringChampion);
    }

    honors
}

// ---------------------------------------------------------------------------
// Playoff rule table
// ---------------------------------------------------------------------------

/// Condition for reaching a playoff stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Reached without a roll.
    Always,
    /// Reached when a uniform draw is strictly greater than the threshold,
    /// i.e. with probability `1 - threshold`. Consumes one draw.
    Above(f64),
}

impl Gate {
    fn passes(&self, rng: &mut impl Rng) -> bool {
        match *self {
            Gate::Always => true,
            Gate::Above(threshold) => rng.gen::<f64>() > threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub gate: Gate,
    pub accolade: Accolade,
}

const fn always(accolade: Accolade) -> Stage {
    Stage {
        gate: Gate::Always,
        accolade,
    }
}

const fn above(threshold: f64, accolade: Accolade) -> Stage {
    Stage {
        gate: Gate::Above(threshold),
        accolade,
    }
}

/// How a playoff run unfolds for one win range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayoffPath {
    /// Award stages in order, stopping at the first gate that fails.
    Chain(&'static [Stage]),
    /// Roll one gate, then run `hit` on success or `miss` otherwise.
    Branch {
        gate: Gate,
        hit: &'static [Stage],
        miss: &'static [Stage],
    },
}

/// A playoff rule applies to every win total up to and including `max_wins`
/// that no earlier rule claimed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayoffRule {
    pub max_wins: u32,
    pub path: PlayoffPath,
}

use Accolade::*;

pub const PLAYOFF_RULES: &[PlayoffRule] = &[
    PlayoffRule {
        max_wins: 40,
        path: PlayoffPath::Chain(&[always(MissedPlayoffs)]),
    },
    PlayoffRule {
        max_wins: 45,
        path: PlayoffPath::Chain(&[above(0.7, FirstRoundExit)]),
    },
    PlayoffRule {
        max_wins: 48,
        path: PlayoffPath::Branch {
            gate: Gate::Above(0.5),
            hit: &[always(FirstRoundExit)],
            miss: &[
                always(SecondRoundExit),
                above(0.7, ConferenceFinals),
                above(0.7, FinalsAppearance),
                above(0.6, NbaChampion),
                above(0.5, FinalsMvp),
            ],
        },
    },
    PlayoffRule {
        max_wins: 52,
        path: PlayoffPath::Branch {
            gate: Gate::Above(0.6),
            hit: &[
                always(ConferenceFinals),
                above(0.6, FinalsAppearance),
                above(0.5, NbaChampion),
                above(0.6, FinalsMvp),
            ],
            miss: &[always(SecondRoundExit)],
        },
    },
    PlayoffRule {
        max_wins: 60,
        path: PlayoffPath::Chain(&[
            always(FinalsAppearance),
            above(0.4, NbaChampion),
            above(0.7, FinalsMvp),
        ]),
    },
    PlayoffRule {
        max_wins: u32::MAX,
        path: PlayoffPath::Chain(&[always(NbaChampion), always(FinalsMvp)]),
    },
];

/// The rule governing a given win total.
pub fn playoff_rule_for(wins: u32) -> &'static PlayoffRule {
    PLAYOFF_RULES
        .iter()
        .find(|rule| wins <= rule.max_wins)
        .unwrap_or(&PLAYOFF_RULES[PLAYOFF_RULES.len() - 1])
}

fn run_chain(stages: &[Stage], rng: &mut impl Rng, out: &mut Vec<Accolade>) {
    for stage in stages {
        if !stage.gate.passes(rng) {
            break;
        }
        out.push(stage.accolade);
    }
}

/// Walk a playoff path, appending honours in the order they are earned.
pub fn run_playoff_path(path: &PlayoffPath, rng: &mut impl Rng, out: &mut Vec<Accolade>) {
    match path {
        PlayoffPath::Chain(stages) => run_chain(stages, rng, out),
        PlayoffPath::Branch { gate, hit, miss } => {
            let stages = if gate.passes(rng) { hit } else { miss };
            run_chain(stages, rng, out);
        }
    }
}

/// Playoff honours for a regular season with `wins` wins.
pub fn playoff_outcome(wins: u32, rng: &mut impl Rng) -> Vec<Accolade> {
    let mut out = Vec::new();
    run_playoff_path(&playoff_rule_for(wins).path, rng, &mut out);
    out
}

/// All honours for the season: individual awards first, then the playoff run.
pub fn calculate_accolades(
    stats: &PerGameStats,
    record: &TeamRecord,
    games_played: u32,
    rng: &mut impl Rng,
) -> Vec<Accolade> {
    let mut accolades = individual_honors(stats, record.wins, games_played);
    run_playoff_path(&playoff_rule_for(record.wins).path, rng, &mut accolades);
    accolades
}
