// CSV export of a simulated career, one row per season.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use tycoon_basketball::stats::round1;
use tycoon_basketball::SeasonResult;

/// One CSV row. Accolades are joined with `"; "`.
#[derive(Debug, Serialize)]
struct SeasonRow<'a> {
    player: &'a str,
    season: u32,
    age: i32,
    games_played: u32,
    ppg: f64,
    rpg: f64,
    apg: f64,
    spg: f64,
    bpg: f64,
    wins: u32,
    losses: u32,
    injuries: &'static str,
    accolades: String,
    legacy_points: u32,
}

impl<'a> SeasonRow<'a> {
    fn new(result: &SeasonResult, player: &'a str) -> Self {
        let s = &result.stats.per_game;
        SeasonRow {
            player,
            season: result.season,
            age: result.age,
            games_played: result.stats.games_played,
            ppg: round1(s.ppg),
            rpg: round1(s.rpg),
            apg: round1(s.apg),
            spg: round1(s.spg),
            bpg: round1(s.bpg),
            wins: result.team_record.wins,
            losses: result.team_record.losses,
            injuries: result.injuries.label(),
            accolades: result
                .accolades
                .iter()
                .map(|a| a.label())
                .collect::<Vec<_>>()
                .join("; "),
            legacy_points: result.legacy_points,
        }
    }
}

/// Write every season to `writer` as CSV with a header row.
pub fn write_seasons<W: Write>(writer: W, player: &str, seasons: &[SeasonResult]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for result in seasons {
        csv.serialize(SeasonRow::new(result, player))
            .with_context(|| format!("failed to write season {}", result.season))?;
    }
    csv.flush().context("failed to flush CSV output")?;
    Ok(())
}

/// Write every season to a CSV file at `path`.
pub fn export_career(path: &Path, player: &str, seasons: &[SeasonResult]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_seasons(file, player, seasons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use tycoon_basketball::{simulate_career, Player};

    fn constant_rng(p: f64) -> StepRng {
        StepRng::new(((p * (1u64 << 53) as f64) as u64) << 11, 0)
    }

    fn franchise_player() -> Player {
        Player {
            name: "Franchise".into(),
            shooting: 90.0,
            playmaking: 85.0,
            defense: 80.0,
            athleticism: 88.0,
            basketball_iq: 92.0,
            work_ethic: 95.0,
            injury_prone: 10.0,
            age: 27,
            ..Player::default()
        }
    }

    #[test]
    fn header_and_one_row_per_season() {
        let seasons = simulate_career(&franchise_player(), 3, 1, &mut constant_rng(0.5));
        let mut out = Vec::new();
        write_seasons(&mut out, "Franchise", &seasons).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "player,season,age,games_played,ppg,rpg,apg,spg,bpg,wins,losses,injuries,accolades,legacy_points"
        );
        assert!(lines[1].starts_with("Franchise,1,27,81,35.3,16.8,36.1,1.7,1.7,69,13,Healthy season,"));
        assert!(lines[1].contains("All-Star; All-NBA First Team"));
        assert!(lines[1].ends_with(",293"));
        assert!(lines[3].starts_with("Franchise,3,29,"));
    }

    #[test]
    fn empty_career_writes_nothing() {
        let mut out = Vec::new();
        write_seasons(&mut out, "Nobody", &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn export_to_file() {
        let path = std::env::temp_dir().join(format!("tycoon-export-{}.csv", std::process::id()));
        let seasons = simulate_career(&franchise_player(), 2, 1, &mut constant_rng(0.5));
        export_career(&path, "Franchise", &seasons).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        let _ = std::fs::remove_file(&path);
    }
}
