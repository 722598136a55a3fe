// Per-game stat generation from attributes and the age curve.

use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};

use crate::player::Player;

/// Jitter applied to points per game.
const PPG_VARIANCE: f64 = 0.3;
/// Jitter applied to every other per-game stat.
const SECONDARY_VARIANCE: f64 = 0.2;

/// Per-game averages for a season. Values keep full precision in memory and
/// are rounded to one decimal only when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerGameStats {
    #[serde(serialize_with = "round_one_decimal")]
    pub ppg: f64,
    #[serde(serialize_with = "round_one_decimal")]
    pub rpg: f64,
    #[serde(serialize_with = "round_one_decimal")]
    pub apg: f64,
    #[serde(serialize_with = "round_one_decimal")]
    pub spg: f64,
    #[serde(serialize_with = "round_one_decimal")]
    pub bpg: f64,
}

/// Round to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round_one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round1(*value))
}

/// Symmetric multiplicative jitter: `value * (1 + (u*2 - 1) * factor)` for a
/// uniform draw `u`, i.e. up to `factor` either way. Consumes one draw.
pub fn add_randomness(value: f64, factor: f64, rng: &mut impl Rng) -> f64 {
    let jitter = 1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * factor;
    value * jitter
}

/// Deterministic stat line before jitter.
pub fn base_stats(player: &Player, age_factor: f64) -> PerGameStats {
    let p = player;
    let stocks = (p.defense * 0.1 + p.athleticism * 0.1) * age_factor * 0.1;
    PerGameStats {
        ppg: (p.shooting * 0.2 + p.playmaking * 0.1 + p.athleticism * 0.1) * age_factor,
        rpg: (p.athleticism * 0.1 + p.defense * 0.1) * age_factor,
        apg: (p.playmaking * 0.1 + p.basketball_iq * 0.3) * age_factor,
        spg: stocks,
        bpg: stocks,
    }
}

/// Generate the season's per-game stats. Consumes five draws, in the order
/// ppg, rpg, apg, spg, bpg.
pub fn generate_stats(player: &Player, age_factor: f64, rng: &mut impl Rng) -> PerGameStats {
    let base = base_stats(player, age_factor);
    PerGameStats {
        ppg: add_randomness(base.ppg, PPG_VARIANCE, rng),
        rpg: add_randomness(base.rpg, SECONDARY_VARIANCE, rng),
        apg: add_randomness(base.apg, SECONDARY_VARIANCE, rng),
        spg: add_randomness(base.spg, SECONDARY_VARIANCE, rng),
        bpg: add_randomness(base.bpg, SECONDARY_VARIANCE, rng),
    }
}
