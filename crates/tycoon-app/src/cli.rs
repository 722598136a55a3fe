// Command-line front end: serve the API, or simulate from a player file.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use tycoon_basketball::{
    simulate_career, simulate_season, CareerSummary, Player, SeasonResult, DEFAULT_SEASON,
};
use tycoon_core::{Config, Database, LeaderboardStore};

use crate::export::export_career;
use crate::request::{leaderboard_entry, player_from_json};

/// Seasons simulated by `career` when `--seasons` is omitted.
pub const DEFAULT_CAREER_SEASONS: u32 = 15;

#[derive(Parser, Debug)]
#[command(name = "tycoon")]
#[command(about = "Basketball Career Tycoon: simulate a player's career season by season")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the HTTP API and static file server (default)
    Serve {
        /// Listen port (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Simulate one season and print the result as JSON
    Simulate {
        /// Player JSON file
        #[arg(short, long)]
        player: PathBuf,

        /// Season number
        #[arg(long, default_value_t = DEFAULT_SEASON)]
        season: u32,

        /// Random seed (uses random seed if not specified)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Simulate consecutive seasons and print a career table
    Career {
        /// Player JSON file
        #[arg(short, long)]
        player: PathBuf,

        /// Number of seasons
        #[arg(long, default_value_t = DEFAULT_CAREER_SEASONS)]
        seasons: u32,

        /// Random seed (uses random seed if not specified)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write one CSV row per season to this file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Add the finished career to the GOAT leaderboard
        #[arg(long)]
        submit: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve { port: None }
    }
}

/// Read and coerce a player JSON file.
pub fn load_player(path: &Path) -> Result<Player> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read player file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse player file {}", path.display()))?;
    player_from_json(&value).with_context(|| format!("invalid player in {}", path.display()))
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    let seed = seed.unwrap_or_else(rand::random);
    info!("Using seed {seed}");
    ChaCha8Rng::seed_from_u64(seed)
}

/// `tycoon simulate`: one season as pretty JSON.
pub fn run_simulate(
    player: &Player,
    season: u32,
    seed: Option<u64>,
    out: &mut impl Write,
) -> Result<SeasonResult> {
    let result = simulate_season(player, season, &mut seeded_rng(seed));
    serde_json::to_writer_pretty(&mut *out, &result).context("failed to write season JSON")?;
    writeln!(out)?;
    Ok(result)
}

/// Options for `tycoon career` beyond the player itself.
#[derive(Debug, Clone, Default)]
pub struct CareerOptions {
    pub seasons: u32,
    pub seed: Option<u64>,
    pub csv: Option<PathBuf>,
    /// Store to submit the finished career to.
    pub submit_to: Option<String>,
}

/// `tycoon career`: a season table, the career summary, and optionally a
/// CSV export and leaderboard submission.
pub fn run_career(
    player: &Player,
    options: &CareerOptions,
    out: &mut impl Write,
) -> Result<CareerSummary> {
    let mut rng = seeded_rng(options.seed);
    let seasons = simulate_career(player, options.seasons, DEFAULT_SEASON, &mut rng);
    let summary = CareerSummary::from_seasons(&seasons);

    write_season_table(out, &seasons)?;
    write_summary(out, &summary)?;

    if let Some(path) = &options.csv {
        export_career(path, &player.name, &seasons)?;
        writeln!(out, "Wrote {} seasons to {}", seasons.len(), path.display())?;
    }

    if let Some(db_path) = &options.submit_to {
        let db = Database::open(db_path).context("failed to open leaderboard database")?;
        let entry = leaderboard_entry(player, &summary);
        db.add_entry(&entry)
            .context("failed to add career to leaderboard")?;
        info!("Submitted {} to the leaderboard", entry.player_name);
        let rank = db.rank_for_score(entry.legacy_points)?;
        let total = db.total_count()?;
        writeln!(out, "Leaderboard rank: #{rank} of {total}")?;
    }

    Ok(summary)
}

fn write_season_table(out: &mut impl Write, seasons: &[SeasonResult]) -> Result<()> {
    writeln!(
        out,
        "{:>3} {:>3} {:>3} {:>5} {:>5} {:>5} {:>4} {:>4} {:>5} {:>6}  {:<15} Accolades",
        "Yr", "Age", "GP", "PPG", "RPG", "APG", "SPG", "BPG", "W-L", "Legacy", "Health"
    )?;
    for r in seasons {
        let s = &r.stats.per_game;
        let accolades: Vec<&str> = r.accolades.iter().map(|a| a.label()).collect();
        writeln!(
            out,
            "{:>3} {:>3} {:>3} {:>5.1} {:>5.1} {:>5.1} {:>4.1} {:>4.1} {:>5} {:>6}  {:<15} {}",
            r.season,
            r.age,
            r.stats.games_played,
            s.ppg,
            s.rpg,
            s.apg,
            s.spg,
            s.bpg,
            format!("{}-{}", r.team_record.wins, r.team_record.losses),
            r.legacy_points,
            r.injuries.label(),
            accolades.join(", ")
        )?;
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &CareerSummary) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} seasons, {} games, {} points ({:.1} ppg)",
        summary.seasons_played,
        summary.games_played,
        summary.total_points,
        summary.career_ppg()
    )?;
    writeln!(
        out,
        "Titles {}  MVPs {}  Finals MVPs {}  All-Star {}  All-NBA {} ({} first team)  Scoring titles {}",
        summary.championships,
        summary.mvps,
        summary.finals_mvps,
        summary.all_stars,
        summary.all_nba_teams,
        summary.all_nba_first_teams,
        summary.scoring_titles
    )?;
    writeln!(
        out,
        "Legacy points: {}  GOAT rating: {}",
        summary.legacy_points,
        summary.goat_rating()
    )?;
    Ok(())
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli, mut config: Config) -> Result<()> {
    let mut stdout = std::io::stdout();
    match cli.command.unwrap_or_default() {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            crate::server::serve(&config).await
        }
        Command::Simulate {
            player,
            season,
            seed,
        } => {
            let player = load_player(&player)?;
            run_simulate(&player, season, seed, &mut stdout)?;
            Ok(())
        }
        Command::Career {
            player,
            seasons,
            seed,
            csv,
            submit,
        } => {
            let player = load_player(&player)?;
            let options = CareerOptions {
                seasons,
                seed,
                csv,
                submit_to: submit.then(|| config.database.path.clone()),
            };
            run_career(&player, &options, &mut stdout)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tycoon-cli-{name}-{}", std::process::id()))
    }

    fn write_player(name: &str) -> PathBuf {
        let path = scratch(name).with_extension("json");
        std::fs::write(
            &path,
            r#"{"name": "Ace", "position": "SG", "shooting": 85, "playmaking": 70,
                "defense": 65, "athleticism": 80, "basketball_iq": 75,
                "work_ethic": 90, "injury_prone": 25, "age": 21}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["tycoon"]);
        assert_eq!(cli.command.unwrap_or_default(), Command::Serve { port: None });
    }

    #[test]
    fn parses_career_flags() {
        let cli = Cli::parse_from([
            "tycoon", "career", "--player", "p.json", "--seasons", "5", "--seed", "7", "--csv",
            "out.csv", "--submit",
        ]);
        assert_eq!(
            cli.command,
            Some(Command::Career {
                player: "p.json".into(),
                seasons: 5,
                seed: Some(7),
                csv: Some("out.csv".into()),
                submit: true,
            })
        );
    }

    #[test]
    fn simulate_defaults() {
        let cli = Cli::parse_from(["tycoon", "simulate", "-p", "p.json"]);
        assert_eq!(
            cli.command,
            Some(Command::Simulate {
                player: "p.json".into(),
                season: 1,
                seed: None,
            })
        );
    }

    #[test]
    fn load_player_file() {
        let path = write_player("load");
        let player = load_player(&path).unwrap();
        assert_eq!(player.name, "Ace");
        assert_eq!(player.age, 21);
        assert_eq!(player.shooting, 85.0);
        assert!(load_player(&scratch("absent")).is_err());
    }

    #[test]
    fn simulate_prints_json_and_is_seeded() {
        let path = write_player("simulate");
        let player = load_player(&path).unwrap();

        let mut a = Vec::new();
        let result = run_simulate(&player, 2, Some(99), &mut a).unwrap();
        let mut b = Vec::new();
        run_simulate(&player, 2, Some(99), &mut b).unwrap();
        assert_eq!(a, b);

        let json: serde_json::Value = serde_json::from_slice(&a).unwrap();
        assert_eq!(json["season"], 2);
        assert_eq!(json["legacyPoints"], result.legacy_points);
    }

    #[test]
    fn career_with_csv_and_submit() {
        let path = write_player("career");
        let player = load_player(&path).unwrap();
        let csv = scratch("career").with_extension("csv");
        let db = scratch("career").with_extension("db");
        let _ = std::fs::remove_file(&db);

        let options = CareerOptions {
            seasons: 4,
            seed: Some(3),
            csv: Some(csv.clone()),
            submit_to: Some(db.to_string_lossy().into_owned()),
        };
        let mut out = Vec::new();
        let summary = run_career(&player, &options, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(summary.seasons_played, 4);
        assert!(text.contains("GOAT rating:"));
        assert!(text.contains("Leaderboard rank: #1 of 1"));
        assert_eq!(std::fs::read_to_string(&csv).unwrap().lines().count(), 5);

        let stored = Database::open(&db.to_string_lossy()).unwrap();
        let top = stored.top_entries(1).unwrap();
        assert_eq!(top[0].entry.player_name, "Ace");
        assert_eq!(top[0].entry.legacy_points, i64::from(summary.legacy_points));
    }
}
