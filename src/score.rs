//! Area (chinese) and territory (japanese) scoring.
//!
//! Scoring assumes every stone on the board is alive; no dead-stone
//! inference is attempted.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Point};

/// Scoring rule set. Unrecognized method names are not an error; they
/// score as Chinese.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    Chinese,
    Japanese,
}

impl ScoringMethod {
    /// Case-insensitive, whitespace-trimmed; anything but "japanese"
    /// falls back to Chinese.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("japanese") {
            ScoringMethod::Japanese
        } else {
            ScoringMethod::Chinese
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMethod::Chinese => write!(f, "chinese"),
            ScoringMethod::Japanese => write!(f, "japanese"),
        }
    }
}

/// Final totals for each color. Komi may be fractional; no rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub black: f64,
    pub white: f64,
}

/// Score the position. White starts at `komi`, Black at zero.
///
/// Japanese (territory) scoring adds each side's captures up front and
/// never counts stones; Chinese (area) scoring counts stones plus
/// territory. Under both methods an enclosed empty region counts for
/// whichever single color borders it; regions touching both colors or
/// neither are dame and count for no one.
pub fn count_score(
    board: &Board,
    method: ScoringMethod,
    black_captures: u32,
    white_captures: u32,
    komi: f64,
) -> Score {
    let mut black = 0.0;
    let mut white = komi;

    if method == ScoringMethod::Japanese {
        black += black_captures as f64;
        white += white_captures as f64;
    }

    let mut visited: HashSet<Point> = HashSet::new();

    for y in 0..board.size() {
        for x in 0..board.size() {
            match board.at(x, y) {
                Color::Black if method == ScoringMethod::Chinese => black += 1.0,
                Color::White if method == ScoringMethod::Chinese => white += 1.0,
                Color::Empty if !visited.contains(&Point::new(x, y)) => {
                    let (points, owner) = flood_territory(board, x, y, &mut visited);
                    match owner {
                        Color::Black => black += points.len() as f64,
                        Color::White => white += points.len() as f64,
                        Color::Empty => {}
                    }
                }
                _ => {}
            }
        }
    }

    Score { black, white }
}

/// Breadth-first fill of one connected empty region. Marks every filled
/// point in `visited` so the caller's scan never reprocesses it, and
/// reports the region plus its owner: the single color it touches, or
/// `Empty` for dame (both or neither color touched).
fn flood_territory(
    board: &Board,
    start_x: i32,
    start_y: i32,
    visited: &mut HashSet<Point>,
) -> (Vec<Point>, Color) {
    let mut points = Vec::new();
    let mut touched_black = false;
    let mut touched_white = false;

    let start = Point::new(start_x, start_y);
    let mut queue = VecDeque::from([start]);
    visited.insert(start);

    while let Some(p) = queue.pop_front() {
        points.push(p);
        for n in p.neighbors() {
            if !board.is_on_board(n.x, n.y) {
                continue;
            }
            match board.at(n.x, n.y) {
                Color::Empty => {
                    if visited.insert(n) {
                        queue.push_back(n);
                    }
                }
                Color::Black => touched_black = true,
                Color::White => touched_white = true,
            }
        }
    }

    let owner = match (touched_black, touched_white) {
        (true, false) => Color::Black,
        (false, true) => Color::White,
        _ => Color::Empty,
    };

    (points, owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_position() -> Board {
        let mut board = Board::new(5);
        // Black encloses (0,0); White encloses (4,4).
        board.set(0, 1, Color::Black);
        board.set(1, 0, Color::Black);
        board.set(4, 3, Color::White);
        board.set(3, 4, Color::White);
        board
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(ScoringMethod::parse("japanese"), ScoringMethod::Japanese);
        assert_eq!(ScoringMethod::parse("  Japanese "), ScoringMethod::Japanese);
        assert_eq!(ScoringMethod::parse("chinese"), ScoringMethod::Chinese);
        assert_eq!(ScoringMethod::parse("area"), ScoringMethod::Chinese);
        assert_eq!(ScoringMethod::parse(""), ScoringMethod::Chinese);
    }

    #[test]
    fn test_chinese_counts_stones_and_territory() {
        let board = corner_position();
        let score = count_score(&board, ScoringMethod::Chinese, 0, 0, 7.5);
        // Black: 2 stones + 1 territory. White: 2 stones + 1 territory + komi.
        assert_eq!(score.black, 3.0);
        assert_eq!(score.white, 10.5);
    }

    #[test]
    fn test_japanese_counts_territory_and_captures() {
        let board = corner_position();
        let score = count_score(&board, ScoringMethod::Japanese, 2, 1, 6.5);
        // Black: 1 territory + 2 captures. White: 1 territory + 1 capture + komi.
        assert_eq!(score.black, 3.0);
        assert_eq!(score.white, 8.5);
    }

    #[test]
    fn test_unknown_method_matches_chinese() {
        let board = corner_position();
        let chinese = count_score(&board, ScoringMethod::parse("chinese"), 0, 0, 7.5);
        let fallback = count_score(&board, ScoringMethod::parse("counting?!"), 0, 0, 7.5);
        assert_eq!(chinese, fallback);
    }

    #[test]
    fn test_dame_counts_for_no_one() {
        let mut board = Board::new(3);
        // One empty region touching both colors.
        board.set(0, 1, Color::Black);
        board.set(2, 1, Color::White);
        let score = count_score(&board, ScoringMethod::Japanese, 0, 0, 0.0);
        assert_eq!(score.black, 0.0);
        assert_eq!(score.white, 0.0);
    }

    #[test]
    fn test_empty_board_is_all_dame() {
        let board = Board::new(9);
        let score = count_score(&board, ScoringMethod::Chinese, 0, 0, 5.5);
        assert_eq!(score.black, 0.0);
        assert_eq!(score.white, 5.5);
    }
}
