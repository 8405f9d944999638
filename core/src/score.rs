use serde::{Deserialize, Serialize};

use crate::*;

/// Seconds during which finishing faster still earns bonus points.
pub const TIME_BONUS_WINDOW: u32 = 300;
pub const POINTS_PER_PAIR: u32 = 100;
pub const POINTS_PER_EXTRA_MOVE: u32 = 5;

/// Score for a game on `difficulty` after `moves` turns and `time_elapsed` seconds.
///
/// Every pair is worth [`POINTS_PER_PAIR`], each second under [`TIME_BONUS_WINDOW`] adds a point, and every move beyond
/// the minimum (one per pair) costs [`POINTS_PER_EXTRA_MOVE`]. Never negative.
pub fn calculate_score(moves: PairCount, time_elapsed: u32, difficulty: Difficulty) -> u32 {
    let pairs = difficulty.pairs();
    let base = pairs.saturating_mul(POINTS_PER_PAIR);
    let time_bonus = TIME_BONUS_WINDOW.saturating_sub(time_elapsed);
    let moves_penalty = moves.saturating_sub(pairs).saturating_mul(POINTS_PER_EXTRA_MOVE);
    base.saturating_add(time_bonus).saturating_sub(moves_penalty)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub moves: PairCount,
    pub time_elapsed: u32,
    pub score: u32,
}

impl GameStats {
    pub fn new(moves: PairCount, time_elapsed: u32, difficulty: Difficulty) -> Self {
        Self {
            moves,
            time_elapsed,
            score: calculate_score(moves, time_elapsed, difficulty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_easy_game_in_fifty_seconds() {
        assert_eq!(calculate_score(8, 50, Difficulty::Easy), 1050);
    }

    #[test]
    fn extra_moves_cost_five_points_each() {
        assert_eq!(calculate_score(10, 300, Difficulty::Easy), 790);
        assert_eq!(calculate_score(18, 0, Difficulty::Hard), 2100);
        assert_eq!(calculate_score(20, 0, Difficulty::Hard), 2090);
    }

    #[test]
    fn score_bottoms_out_at_zero() {
        assert_eq!(calculate_score(1000, 10_000, Difficulty::Easy), 0);
        assert_eq!(calculate_score(u32::MAX, u32::MAX, Difficulty::Medium), 0);
    }

    #[test]
    fn score_never_increases_with_time_or_moves() {
        for difficulty in Difficulty::ALL {
            for moves in (0..200).step_by(7) {
                let mut prev = u32::MAX;
                for time in (0..600).step_by(13) {
                    let score = calculate_score(moves, time, difficulty);
                    assert!(score <= prev);
                    prev = score;
                }
            }
            for time in (0..600).step_by(29) {
                let mut prev = u32::MAX;
                for moves in 0..300 {
                    let score = calculate_score(moves, time, difficulty);
                    assert!(score <= prev);
                    prev = score;
                }
            }
        }
    }

    #[test]
    fn time_past_bonus_window_is_free() {
        let at_window = calculate_score(12, TIME_BONUS_WINDOW, Difficulty::Easy);
        assert_eq!(calculate_score(12, TIME_BONUS_WINDOW + 500, Difficulty::Easy), at_window);
    }

    #[test]
    fn stats_carry_live_score() {
        let stats = GameStats::new(9, 100, Difficulty::Easy);
        assert_eq!(stats.score, 800 + 200 - 5);
    }
}
