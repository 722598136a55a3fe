// Player identity, positions, and latent attribute ratings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for every latent attribute rating.
pub const MAX_RATING: f64 = 99.0;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Basketball positions. Unrecognized labels are kept verbatim in `Other`
/// so free-form input survives a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    #[default]
    PointGuard,
    ShootingGuard,
    SmallForward,
    PowerForward,
    Center,
    Other(String),
}

impl Position {
    /// Parse a position label. Matching is case-insensitive and ignores
    /// surrounding whitespace; blank means point guard and anything unknown
    /// becomes `Other`.
    pub fn from_str_pos(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "PG" | "" => Position::PointGuard,
            "SG" => Position::ShootingGuard,
            "SF" => Position::SmallForward,
            "PF" => Position::PowerForward,
            "C" => Position::Center,
            _ => Position::Other(s.trim().to_string()),
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
            Position::Other(label) => label,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        Position::from_str_pos(&s)
    }
}

impl From<Position> for String {
    fn from(p: Position) -> Self {
        p.display_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player snapshot. The simulator never mutates one in place; each season
/// produces a fresh snapshot for the following year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub shooting: f64,
    pub playmaking: f64,
    pub defense: f64,
    pub athleticism: f64,
    pub basketball_iq: f64,
    pub work_ethic: f64,
    pub injury_prone: f64,
    /// Signed so that nonsensical input flows through the age curve rather
    /// than being rejected.
    pub age: i32,
}

/// Cap a rating at [`MAX_RATING`].
pub fn cap_rating(value: f64) -> f64 {
    value.min(MAX_RATING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_positions_parse_case_insensitively() {
        assert_eq!(Position::from_str_pos("pg"), Position::PointGuard);
        assert_eq!(Position::from_str_pos(" SF "), Position::SmallForward);
        assert_eq!(Position::from_str_pos("c"), Position::Center);
        assert_eq!(Position::from_str_pos("  "), Position::PointGuard);
    }

    #[test]
    fn free_form_position_round_trips() {
        let pos = Position::from_str_pos("Point Forward");
        assert_eq!(pos, Position::Other("Point Forward".into()));
        assert_eq!(pos.to_string(), "Point Forward");
    }

    #[test]
    fn player_deserializes_with_missing_fields() {
        let player: Player =
            serde_json::from_str(r#"{"name": "Rookie", "shooting": 70, "age": 19}"#).unwrap();
        assert_eq!(player.name, "Rookie");
        assert_eq!(player.position, Position::PointGuard);
        assert_eq!(player.shooting, 70.0);
        assert_eq!(player.defense, 0.0);
        assert_eq!(player.age, 19);
    }

    #[test]
    fn position_serializes_as_label() {
        let player = Player {
            position: Position::PowerForward,
            ..Player::default()
        };
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["position"], "PF");
    }
}
