// SQLite persistence for the GOAT leaderboard.

use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::leaderboard::{LeaderboardEntry, LeaderboardStore, NewLeaderboardEntry};

const ENTRY_COLUMNS: &str = "id, player_name, position, seasons_played, total_points, career_ppg,
     championships, mvps, all_stars, finals_mvps, all_nba_first_teams, all_nba_teams,
     scoring_titles, legacy_points, goat_rating, created_at";

/// SQLite-backed leaderboard store.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure the schema
    /// exists. Pass `":memory:"` for an ephemeral in-memory database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS goat_players (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                player_name         TEXT NOT NULL,
                position            TEXT NOT NULL,
                seasons_played      INTEGER NOT NULL,
                total_points        INTEGER NOT NULL,
                career_ppg          REAL NOT NULL,
                championships       INTEGER NOT NULL,
                mvps                INTEGER NOT NULL,
                all_stars           INTEGER NOT NULL,
                finals_mvps         INTEGER NOT NULL,
                all_nba_first_teams INTEGER NOT NULL,
                all_nba_teams       INTEGER NOT NULL,
                scoring_titles      INTEGER NOT NULL,
                legacy_points       INTEGER NOT NULL,
                goat_rating         TEXT NOT NULL,
                created_at          TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_goat_players_legacy
                ON goat_players(legacy_points DESC, id);
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database mutex poisoned"))
    }

    fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<LeaderboardEntry> {
        Ok(LeaderboardEntry {
            id: row.get(0)?,
            entry: NewLeaderboardEntry {
                player_name: row.get(1)?,
                position: row.get(2)?,
                seasons_played: row.get(3)?,
                total_points: row.get(4)?,
                career_ppg: row.get(5)?,
                championships: row.get(6)?,
                mvps: row.get(7)?,
                all_stars: row.get(8)?,
                finals_mvps: row.get(9)?,
                all_nba_first_teams: row.get(10)?,
                all_nba_teams: row.get(11)?,
                scoring_titles: row.get(12)?,
                legacy_points: row.get(13)?,
                goat_rating: row.get(14)?,
            },
            created_at: row.get(15)?,
        })
    }
}

impl LeaderboardStore for Database {
    fn add_entry(&self, entry: &NewLeaderboardEntry) -> Result<LeaderboardEntry> {
        let conn = self.conn()?;
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        conn.execute(
            "INSERT INTO goat_players (
                player_name, position, seasons_played, total_points, career_ppg,
                championships, mvps, all_stars, finals_mvps, all_nba_first_teams,
                all_nba_teams, scoring_titles, legacy_points, goat_rating, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                entry.player_name,
                entry.position,
                entry.seasons_played,
                entry.total_points,
                entry.career_ppg,
                entry.championships,
                entry.mvps,
                entry.all_stars,
                entry.finals_mvps,
                entry.all_nba_first_teams,
                entry.all_nba_teams,
                entry.scoring_titles,
                entry.legacy_points,
                entry.goat_rating,
                created_at,
            ],
        )
        .context("failed to insert leaderboard entry")?;

        let id = conn.last_insert_rowid();
        debug!("Stored leaderboard entry {id} for {}", entry.player_name);

        Ok(LeaderboardEntry {
            id,
            entry: entry.clone(),
            created_at,
        })
    }

    fn top_entries(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM goat_players
                 ORDER BY legacy_points DESC, id ASC
                 LIMIT ?1"
            ))
            .context("failed to prepare top_entries query")?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let entries = stmt
            .query_map(params![limit], Self::entry_from_row)
            .context("failed to query leaderboard")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map leaderboard rows")?;

        Ok(entries)
    }

    fn rank_for_score(&self, legacy_points: i64) -> Result<u64> {
        let conn = self.conn()?;
        let above: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM goat_players WHERE legacy_points > ?1",
                params![legacy_points],
                |row| row.get(0),
            )
            .context("failed to count higher-ranked entries")?;
        Ok(above as u64 + 1)
    }

    fn total_count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM goat_players", [], |row| row.get(0))
            .context("failed to count leaderboard entries")?;
        Ok(count as u64)
    }
}
