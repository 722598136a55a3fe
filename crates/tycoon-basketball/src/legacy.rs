// Legacy points: a single-season value score used as the leaderboard key.

use crate::accolades::Accolade;
use crate::stats::PerGameStats;
use crate::team::TeamRecord;

/// Unrounded legacy value from the stat line and regular-season wins.
pub fn production_points(stats: &PerGameStats, record: &TeamRecord) -> f64 {
    stats.ppg + stats.rpg * 0.7 + stats.apg * 0.8 + record.wins as f64 * 0.5
}

/// Season legacy points: production plus a fixed bonus per honour, rounded
/// to the nearest integer. Negative production (possible only from a negative
/// age factor) floors the total at zero.
pub fn legacy_points(stats: &PerGameStats, accolades: &[Accolade], record: &TeamRecord) -> u32 {
    let bonus: u32 = accolades.iter().map(Accolade::legacy_bonus).sum();
    let total = production_points(stats, record) + bonus as f64;
    total.round().max(0.0) as u32
}

/// Bonus for an accolade given by label, e.g. from an imported career log.
/// Unknown labels are worth nothing.
pub fn bonus_for_label(label: &str) -> u32 {
    Accolade::from_label(label).map_or(0, |a| a.legacy_bonus())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(ppg: f64, rpg: f64, apg: f64) -> PerGameStats {
        PerGameStats {
            ppg,
            rpg,
            apg,
            spg: 1.0,
            bpg: 1.0,
        }
    }

    #[test]
    fn production_only() {
        // 20 + 3.5 + 4 + 20 = 47.5 -> 48
        let pts = legacy_points(&stats(20.0, 5.0, 5.0), &[], &TeamRecord::from_wins(40));
        assert_eq!(pts, 48);
    }

    #[test]
    fn star_season_with_honours() {
        let accolades = [
            Accolade::AllStar,
            Accolade::AllNbaFirstTeam,
            Accolade::AllDefensiveSecondTeam,
            Accolade::Mvp,
            Accolade::ScoringChampion,
            Accolade::NbaChampion,
            Accolade::FinalsMvp,
        ];
        let pts = legacy_points(
            &stats(35.3, 16.8, 36.1),
            &accolades,
            &TeamRecord::from_wins(69),
        );
        assert_eq!(pts, 293);
    }

    #[test]
    fn repeated_honours_count_each_time() {
        let record = TeamRecord::from_wins(0);
        let base = legacy_points(&stats(0.0, 0.0, 0.0), &[], &record);
        let twice = legacy_points(
            &stats(0.0, 0.0, 0.0),
            &[Accolade::NbaChampion, Accolade::NbaChampion],
            &record,
        );
        assert_eq!(base, 0);
        assert_eq!(twice, 80);
    }

    #[test]
    fn monotone_in_wins_and_stats() {
        let accolades = [Accolade::AllStar];
        let mut previous = 0;
        for wins in 0..=82 {
            let pts = legacy_points(&stats(20.0, 5.0, 5.0), &accolades, &TeamRecord::from_wins(wins));
            assert!(pts >= previous);
            previous = pts;
        }
        let mut previous = 0;
        for step in 0..100 {
            let v = step as f64 * 0.5;
            let pts = legacy_points(&stats(v, v, v), &accolades, &TeamRecord::from_wins(41));
            assert!(pts >= previous);
            previous = pts;
        }
    }

    #[test]
    fn negative_production_floors_at_zero() {
        let pts = legacy_points(&stats(-30.0, -10.0, -10.0), &[], &TeamRecord::from_wins(8));
        assert_eq!(pts, 0);
    }

    #[test]
    fn label_bonus_lookup() {
        assert_eq!(bonus_for_label("MVP"), 50);
        assert_eq!(bonus_for_label("First Round Exit"), 2);
        assert_eq!(bonus_for_label("Missed Playoffs"), 0);
        assert_eq!(bonus_for_label("Sixth Man of the Year"), 0);
    }
}
