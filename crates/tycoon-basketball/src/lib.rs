// Basketball career simulation engine.
//
// Turns a player's latent ratings and age into a season: stat line, team
// record, honours, legacy points, and next season's ratings. Every random
// draw comes from a caller-supplied generator, so a seeded generator gives
// bit-identical results.

pub mod accolades;
pub mod aging;
pub mod career;
pub mod injury;
pub mod legacy;
pub mod player;
pub mod progression;
pub mod season;
pub mod stats;
pub mod team;

pub use accolades::Accolade;
pub use career::{goat_rating, simulate_career, CareerSummary};
pub use injury::{InjuryStatus, SEASON_GAMES};
pub use player::{Player, Position};
pub use season::{simulate_season, SeasonResult, SeasonStats, DEFAULT_SEASON};
pub use stats::PerGameStats;
pub use team::TeamRecord;
