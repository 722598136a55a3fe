// Offseason rating progression.

use rand::Rng;

use crate::player::{cap_rating, Player, MAX_RATING};

/// Athleticism lost each offseason once a player is past 30.
const VETERAN_ATHLETICISM_LOSS: f64 = 1.0;
/// Injury proneness added after a major injury.
const MAJOR_INJURY_PRONENESS: f64 = 5.0;

/// Build next season's snapshot from this season's.
///
/// Consumes one draw each for shooting, playmaking, defense, athleticism
/// (skipped for players over 30, who lose a flat point instead) and
/// basketball IQ, in that order.
pub fn progress_ratings(
    player: &Player,
    skill_improvement: f64,
    major_injury: bool,
    rng: &mut impl Rng,
) -> Player {
    let shooting = cap_rating(player.shooting + rng.gen::<f64>() * skill_improvement);
    let playmaking = cap_rating(player.playmaking + rng.gen::<f64>() * skill_improvement);
    let defense = cap_rating(player.defense + rng.gen::<f64>() * skill_improvement);

    let athleticism_delta = if player.age > 30 {
        -VETERAN_ATHLETICISM_LOSS
    } else {
        rng.gen::<f64>() * skill_improvement
    };
    let athleticism = (player.athleticism + athleticism_delta).clamp(0.0, MAX_RATING);

    let basketball_iq =
        cap_rating(player.basketball_iq + rng.gen::<f64>() * skill_improvement * 0.5);

    let injury_prone = if major_injury {
        cap_rating(player.injury_prone + MAJOR_INJURY_PRONENESS)
    } else {
        cap_rating(player.injury_prone)
    };

    Player {
        name: player.name.clone(),
        position: player.position.clone(),
        shooting,
        playmaking,
        defense,
        athleticism,
        basketball_iq,
        work_ethic: player.work_ethic,
        injury_prone,
        age: player.age.saturating_add(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Position;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn constant_rng(p: f64) -> StepRng {
        StepRng::new(((p * (1u64 << 53) as f64) as u64) << 11, 0)
    }

    fn player(age: i32) -> Player {
        Player {
            name: "Prospect".into(),
            position: Position::SmallForward,
            shooting: 70.0,
            playmaking: 60.0,
            defense: 65.0,
            athleticism: 80.0,
            basketball_iq: 55.0,
            work_ethic: 90.0,
            injury_prone: 20.0,
            age,
        }
    }

    #[test]
    fn midpoint_growth() {
        let next = progress_ratings(&player(22), 2.0, false, &mut constant_rng(0.5));
        assert_eq!(next.shooting, 71.0);
        assert_eq!(next.playmaking, 61.0);
        assert_eq!(next.defense, 66.0);
        assert_eq!(next.athleticism, 81.0);
        assert_eq!(next.basketball_iq, 55.5);
        assert_eq!(next.injury_prone, 20.0);
        assert_eq!(next.age, 23);
        assert_eq!(next.work_ethic, 90.0);
        assert_eq!(next.name, "Prospect");
        assert_eq!(next.position, Position::SmallForward);
    }

    #[test]
    fn veterans_lose_athleticism() {
        let next = progress_ratings(&player(31), 0.0, false, &mut constant_rng(0.5));
        assert_eq!(next.athleticism, 79.0);
        assert_eq!(next.age, 32);
    }

    #[test]
    fn veteran_skips_athleticism_draw() {
        // Four draws for a veteran, five for a young player.
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut reference = rng.clone();
        progress_ratings(&player(33), 1.0, false, &mut rng);
        for _ in 0..4 {
            let _: f64 = reference.gen();
        }
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn major_injury_raises_proneness() {
        let next = progress_ratings(&player(25), 0.0, true, &mut constant_rng(0.5));
        assert_eq!(next.injury_prone, 25.0);
    }

    #[test]
    fn nothing_exceeds_ninety_nine() {
        let maxed = Player {
            shooting: 98.5,
            playmaking: 99.0,
            defense: 150.0,
            athleticism: 99.0,
            basketball_iq: 98.9,
            injury_prone: 97.0,
            ..player(20)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..100 {
            let next = progress_ratings(&maxed, 1000.0, true, &mut rng);
            for v in [
                next.shooting,
                next.playmaking,
                next.defense,
                next.athleticism,
                next.basketball_iq,
                next.injury_prone,
            ] {
                assert!(v <= MAX_RATING);
            }
        }
    }

    #[test]
    fn athleticism_never_negative() {
        let frail = Player {
            athleticism: 0.5,
            ..player(36)
        };
        let next = progress_ratings(&frail, 0.0, false, &mut constant_rng(0.5));
        assert_eq!(next.athleticism, 0.0);
    }

    #[test]
    fn extreme_age_does_not_overflow() {
        let ancient = player(i32::MAX);
        let next = progress_ratings(&ancient, 0.0, false, &mut constant_rng(0.5));
        assert_eq!(next.age, i32::MAX);
        assert_eq!(next.athleticism, 79.0);
    }

    #[test]
    fn input_is_untouched() {
        let original = player(24);
        let copy = original.clone();
        let _ = progress_ratings(&original, 3.0, true, &mut constant_rng(0.9));
        assert_eq!(original, copy);
    }
}
