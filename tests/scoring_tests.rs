//! Scoring policy and opponent pacing integration tests.

use rice_tiles::core::{EngineConfig, GameRng};
use rice_tiles::scoring::{Difficulty, Opponent, ScoringPolicy, OPPONENT_NAMES};
use rice_tiles::stats::PlayerStatsRecord;

fn veteran(average: f32) -> PlayerStatsRecord {
    PlayerStatsRecord {
        average_task_time: average,
        total_games_played: 12,
        recent_task_times: std::iter::repeat(average).take(10).collect(),
    }
}

// =============================================================================
// Completion Score
// =============================================================================

#[test]
fn test_completion_score_curve() {
    let policy = ScoringPolicy::default();
    let scores: Vec<u32> = [0.0, 1.0, 2.0, 4.0, 6.0, 10.0]
        .iter()
        .map(|&t| policy.score_for_completion(t))
        .collect();
    assert_eq!(scores, vec![200, 175, 150, 100, 50, 30]);
}

/// Custom scoring configs flow through `from_config`.
#[test]
fn test_custom_scoring_config() {
    let mut config = EngineConfig::default();
    config.scoring.base_score = 100.0;
    config.scoring.per_second_decay = 10.0;
    config.scoring.min_score = 5;
    config.scoring.wrong_tap_penalty = 7;
    let policy = ScoringPolicy::from_config(&config);

    assert_eq!(policy.score_for_completion(3.0), 70);
    assert_eq!(policy.score_for_completion(50.0), 5);
    assert_eq!(policy.penalty_for_wrong_tap(10), 3);
}

/// The bonus is capped by the configured round length.
#[test]
fn test_time_bonus_follows_game_time() {
    let policy = ScoringPolicy::from_config(&EngineConfig::default().with_game_time(60.0));
    assert_eq!(policy.time_bonus_on_completion(45.0), 47.0);
    assert_eq!(policy.time_bonus_on_completion(59.0), 60.0);
}

// =============================================================================
// Opponent Pacing
// =============================================================================

/// Harder opponents are faster on average.
#[test]
fn test_harder_opponents_faster() {
    let policy = ScoringPolicy::default();
    let stats = veteran(4.0);
    let mut rng = GameRng::new(42);

    let mean = |difficulty: Difficulty, rng: &mut GameRng| {
        let total: f32 = (0..500)
            .map(|_| policy.sample_opponent_time(difficulty, &stats, rng))
            .sum();
        total / 500.0
    };

    let easy = mean(Difficulty::EASIEST, &mut rng);
    let hard = mean(Difficulty::HARDEST, &mut rng);
    assert!((easy - 4.0).abs() < 0.1, "{easy}");
    assert!((hard - 4.0 * 0.67).abs() < 0.1, "{hard}");
}

/// With history, every sample is within 15% of average times multiplier.
#[test]
fn test_samples_within_jitter_band() {
    let policy = ScoringPolicy::default();
    let stats = veteran(2.0);
    let mut rng = GameRng::new(7);

    for difficulty in Difficulty::all() {
        let target = 2.0 * difficulty.multiplier();
        for _ in 0..100 {
            let time = policy.sample_opponent_time(difficulty, &stats, &mut rng);
            assert!(time >= target * 0.85 - 1e-4 && time <= target * 1.15 + 1e-4);
        }
    }
}

/// A zero average counts as no history even after games were played.
#[test]
fn test_zero_average_uses_base_range() {
    let policy = ScoringPolicy::default();
    let stats = PlayerStatsRecord {
        total_games_played: 3,
        ..PlayerStatsRecord::default()
    };
    let mut rng = GameRng::new(8);

    for _ in 0..100 {
        let time = policy.sample_opponent_time(Difficulty::EASIEST, &stats, &mut rng);
        assert!((2.5..=5.2).contains(&time));
    }
}

#[test]
fn test_random_opponents_from_roster() {
    let mut rng = GameRng::new(3);
    for _ in 0..50 {
        let opponent = Opponent::random(&mut rng);
        assert!(OPPONENT_NAMES.contains(&opponent.name.as_str()));
        assert!((1..=5).contains(&opponent.difficulty.level()));
    }
}

/// Opponents serialize with a plain numeric difficulty.
#[test]
fn test_opponent_json() {
    let opponent: Opponent =
        serde_json::from_str(r#"{ "name": "Dewi", "difficulty": 3 }"#).unwrap();
    assert_eq!(opponent.difficulty, Difficulty::new(3).unwrap());
    assert!(serde_json::from_str::<Opponent>(r#"{ "name": "Dewi", "difficulty": 6 }"#).is_err());
}
