//! Game state machine: validated moves, capture tallies, ko, history, undo.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Color, Point};
use crate::rules;

/// Engine errors. Every variant is recoverable and leaves the game
/// state exactly as it was before the failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Target off-board, occupied, or suicide without capture.
    #[error("invalid move at ({x}, {y})")]
    InvalidMove { x: i32, y: i32 },
    /// The move would exactly recreate the position from one move ago.
    #[error("ko violation at ({x}, {y})")]
    KoViolation { x: i32, y: i32 },
    #[error("nothing to undo")]
    NothingToUndo,
    /// History and checkpoint stacks disagree. A bug, not a user error.
    #[error("undo state corrupted")]
    CorruptedUndo,
}

/// Everything needed to reverse one move, recorded before it applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Checkpoint {
    current_player: Color,
    black_captures: u32,
    white_captures: u32,
    last_move: Option<Point>,
    moves_len: usize,
}

/// One live game: a mutable board plus the bookkeeping to query, score,
/// and rewind it. Intended for exclusive use by a single session; there
/// is no internal synchronization.
///
/// `history` holds an independent snapshot of the board as it was before
/// each applied move (most recent last), which is what makes both the ko
/// comparison and undo safe against later mutation of the live board.
/// `history` and `undo_stack` always have equal length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub board: Board,
    pub current_player: Color,
    pub black_captures: u32,
    pub white_captures: u32,
    pub last_move: Option<Point>,
    /// Move records in transcript form: `B[dd]`, `W[aa]`, `B[]` for a pass.
    pub moves: Vec<String>,
    history: Vec<Board>,
    undo_stack: Vec<Checkpoint>,
}

impl Game {
    pub fn new(size: i32) -> Self {
        Self {
            board: Board::new(size),
            current_player: Color::Black,
            black_captures: 0,
            white_captures: 0,
            last_move: None,
            moves: Vec::new(),
            history: Vec::new(),
            undo_stack: Vec::new(),
        }
    }

    /// Number of applied moves that can still be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Place a stone for the player to move at (x, y).
    ///
    /// Rejections happen before any mutation: on `Err` the board,
    /// history, tallies, and move list are untouched.
    pub fn play(&mut self, x: i32, y: i32) -> Result<(), GameError> {
        let player = self.current_player;

        if !rules::is_move_valid(&self.board, x, y, player) {
            return Err(GameError::InvalidMove { x, y });
        }

        // Build the would-be resulting position on a scratch board.
        let mut next = self.board.clone();
        next.set(x, y, player);
        let captured = rules::find_captured_stones(&next, x, y, player);
        for p in &captured {
            next.set(p.x, p.y, Color::Empty);
        }

        // Single-step ko: recreating the position from one move ago is
        // rejected. Longer cycles (triple ko etc.) are deliberately not
        // detected; transcript replay relies on exactly this behavior.
        if let Some(prev) = self.history.last() {
            if next == *prev {
                return Err(GameError::KoViolation { x, y });
            }
        }

        // Commit: everything below is infallible.
        self.undo_stack.push(Checkpoint {
            current_player: player,
            black_captures: self.black_captures,
            white_captures: self.white_captures,
            last_move: self.last_move,
            moves_len: self.moves.len(),
        });
        self.history.push(self.board.clone());

        self.board.set(x, y, player);
        match player {
            Color::White => self.white_captures += captured.len() as u32,
            _ => self.black_captures += captured.len() as u32,
        }
        for p in &captured {
            self.board.set(p.x, p.y, Color::Empty);
        }

        self.last_move = Some(Point::new(x, y));
        self.moves.push(encode_record(player, x, y));
        self.current_player = player.opposite();

        Ok(())
    }

    /// Reverse the most recent move: the exact inverse of one `play`
    /// call, applicable repeatedly back to the initial empty board.
    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.history.is_empty() {
            return Err(GameError::NothingToUndo);
        }
        match self.undo_stack.last() {
            None => return Err(GameError::CorruptedUndo),
            Some(cp) if cp.moves_len > self.moves.len() => {
                return Err(GameError::CorruptedUndo)
            }
            Some(_) => {}
        }

        // Both stacks verified non-empty above.
        let (Some(board), Some(cp)) = (self.history.pop(), self.undo_stack.pop()) else {
            return Err(GameError::CorruptedUndo);
        };

        self.board = board;
        self.current_player = cp.current_player;
        self.black_captures = cp.black_captures;
        self.white_captures = cp.white_captures;
        self.last_move = cp.last_move;
        self.moves.truncate(cp.moves_len);
        Ok(())
    }
}

/// Transcript record for a placement, e.g. `B[dd]`. The two coordinate
/// letters are `'a'` offset by x and y.
fn encode_record(color: Color, x: i32, y: i32) -> String {
    let c = if color == Color::White { 'W' } else { 'B' };
    let cx = (b'a' + x as u8) as char;
    let cy = (b'a' + y as u8) as char;
    format!("{}[{}{}]", c, cx, cy)
}

/// Human display label for an intersection: columns run A..T skipping I
/// (the traditional goban convention), rows count up from the bottom.
pub fn coord_label(size: i32, x: i32, y: i32) -> String {
    let mut col = b'A' + x as u8;
    if x >= 8 {
        col += 1; // skip I
    }
    format!("{}{}", col as char, size - y)
}
