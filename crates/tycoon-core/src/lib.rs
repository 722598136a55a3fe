// Library root: configuration, leaderboard model, and the SQLite store
// shared by the service and the CLI.

pub mod config;
pub mod db;
pub mod leaderboard;

pub use config::{load_config, Config, ConfigError};
pub use db::Database;
pub use leaderboard::{EntryError, LeaderboardEntry, LeaderboardStore, NewLeaderboardEntry};
