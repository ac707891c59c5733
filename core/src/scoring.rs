use serde::{Deserialize, Serialize};

use crate::types::round_half_up;
use crate::*;

/// At or below this density a win is not worth a real score.
pub const TOO_EASY_DENSITY: f64 = 0.02;

/// How a won game is judged once the time bonus is in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRating {
    /// Near-empty board, the final score is not meaningful.
    TooEasy,
    Easy,
    Neat,
    Awesome,
    /// Every cell was a mine.
    Goofy,
    /// Less than half the maximum score, but still positive.
    Poor,
    Bad,
}

impl WinRating {
    pub const fn sound(self) -> Option<Sound> {
        match self {
            Self::TooEasy | Self::Goofy => None,
            Self::Easy => Some(Sound::SolvedEasy),
            Self::Neat => Some(Sound::SolvedNeat),
            Self::Awesome => Some(Sound::SolvedAwesome),
            Self::Poor | Self::Bad => Some(Sound::SolvedSlow),
        }
    }

    /// Whether the host should show the fixed placeholder values instead of the score and time.
    pub const fn shows_sentinel(self) -> bool {
        matches!(self, Self::TooEasy)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    score: Score,
    multiplier: Score,
    max_score: Score,
}

impl ScoreBoard {
    /// Every revealed or flagged cell is worth `round(density * 100)` points.
    pub fn new(density: f64, total_cells: CellCount) -> Self {
        let multiplier = round_half_up(density * 100.0) as Score;
        Self {
            score: 0,
            multiplier,
            max_score: multiplier * Score::from(total_cells),
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn multiplier(&self) -> Score {
        self.multiplier
    }

    pub fn max_score(&self) -> Score {
        self.max_score
    }

    pub fn award(&mut self, cells: CellCount) {
        self.score += self.multiplier * Score::from(cells);
    }

    pub fn deduct(&mut self, cells: CellCount) {
        self.score -= self.multiplier * Score::from(cells);
    }

    /// Every cell is accounted for and no mine is left unflagged.
    pub fn is_complete(&self, hidden_mines: isize) -> bool {
        self.score == self.max_score && hidden_mines == 0
    }

    /// Applies the time bonus and rates the win.
    pub fn settle_win(&mut self, density: f64, elapsed_secs: u32) -> WinRating {
        use WinRating::*;

        if density <= TOO_EASY_DENSITY {
            return TooEasy;
        }

        let halves = Score::try_from(elapsed_secs / 2).unwrap_or(Score::MAX);
        let penalty = (100 - self.multiplier).saturating_mul(halves);
        self.score = self
            .score
            .saturating_add(self.max_score.saturating_sub(penalty));

        // the half-max comparison is done in floating point like the density bands
        if f64::from(self.score) >= f64::from(self.max_score) * 0.5 {
            if density <= DEFAULT_DENSITY * 0.5 {
                Easy
            } else if density < DEFAULT_DENSITY {
                Neat
            } else if density < 1.0 {
                Awesome
            } else {
                Goofy
            }
        } else if self.score > 0 {
            Poor
        } else {
            Bad
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_follows_density() {
        let board = ScoreBoard::new(0.21, 400);

        assert_eq!(board.multiplier(), 21);
        assert_eq!(board.max_score(), 8400);
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn award_and_deduct_are_symmetric() {
        let mut board = ScoreBoard::new(0.15, 144);
        board.award(3);
        board.deduct(1);

        assert_eq!(board.score(), 30);
    }

    #[test]
    fn completion_needs_every_mine_flagged() {
        let mut board = ScoreBoard::new(0.5, 4);
        board.award(4);

        assert!(board.is_complete(0));
        assert!(!board.is_complete(1));
        assert!(!ScoreBoard::new(0.5, 4).is_complete(0));
    }

    #[test]
    fn quick_win_gets_full_bonus() {
        let mut board = ScoreBoard::new(0.21, 400);
        board.award(400);

        assert_eq!(board.settle_win(0.21, 1), WinRating::Awesome);
        assert_eq!(board.score(), 16800);
    }

    #[test]
    fn slow_win_is_penalized() {
        let mut board = ScoreBoard::new(0.21, 400);
        board.award(400);

        // 8400 + 8400 - 79 * 300
        assert_eq!(board.settle_win(0.21, 600), WinRating::Bad);
        assert_eq!(board.score(), -6900);

        let mut board = ScoreBoard::new(0.21, 400);
        board.award(400);
        assert_eq!(board.settle_win(0.21, 400), WinRating::Poor);
        assert_eq!(board.score(), 1000);
        assert_eq!(WinRating::Poor.sound(), Some(Sound::SolvedSlow));
    }

    #[test]
    fn density_bands() {
        let rate = |density: f64| {
            let mut board = ScoreBoard::new(density, 100);
            board.award(100);
            board.settle_win(density, 0)
        };

        assert_eq!(rate(0.01), WinRating::TooEasy);
        assert_eq!(rate(0.1), WinRating::Easy);
        assert_eq!(rate(0.15), WinRating::Neat);
        assert_eq!(rate(0.5), WinRating::Awesome);
        assert_eq!(rate(1.0), WinRating::Goofy);
        assert!(WinRating::TooEasy.shows_sentinel());
        assert_eq!(WinRating::Goofy.sound(), None);
    }

    #[test]
    fn too_easy_keeps_score_untouched() {
        let mut board = ScoreBoard::new(0.01, 100);
        board.award(100);

        assert_eq!(board.settle_win(0.01, 30), WinRating::TooEasy);
        assert_eq!(board.score(), 100);
    }
}
