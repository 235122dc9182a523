//! SGF transcript codec: two-letter coordinates, move records, and a
//! minimal reader/writer that rebuilds games through the validated
//! move path.

use thiserror::Error;

use crate::board::{Color, Point};
use crate::game::{Game, GameError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SgfError {
    #[error("invalid SGF coordinate {0:?}")]
    BadCoord(String),
    /// A transcript record failed the engine's legality/ko checks.
    #[error("failed to replay move {record}: {source}")]
    Replay { record: String, source: GameError },
}

/// Board coordinates to SGF letters, e.g. (0, 0) -> "aa".
pub fn coord_to_sgf(x: i32, y: i32) -> String {
    if x < 0 || y < 0 {
        return String::new();
    }
    format!("{}{}", (b'a' + x as u8) as char, (b'a' + y as u8) as char)
}

/// SGF letters back to board coordinates, e.g. "pd" -> (15, 3).
pub fn coord_from_sgf(coord: &str) -> Result<Point, SgfError> {
    let bytes = coord.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(|b| b.is_ascii_lowercase()) {
        return Err(SgfError::BadCoord(coord.to_string()));
    }
    Ok(Point::new(
        (bytes[0] - b'a') as i32,
        (bytes[1] - b'a') as i32,
    ))
}

/// One move record; `None` encodes a pass ("B[]").
pub fn encode_move(color: Color, point: Option<Point>) -> String {
    let c = if color == Color::White { "W" } else { "B" };
    match point {
        Some(p) => format!("{}[{}]", c, coord_to_sgf(p.x, p.y)),
        None => format!("{}[]", c),
    }
}

/// Minimal SGF document from recorded move strings.
pub fn write_sgf(size: i32, moves: &[String]) -> String {
    let mut out = String::from("(;GM[1]FF[4]CA[UTF-8]");
    out.push_str(&format!("SZ[{}]", size));
    for m in moves {
        out.push(';');
        out.push_str(m);
    }
    out.push(')');
    out
}

/// Extract the board size and `B[..]`/`W[..]` records from an SGF
/// document. Only the properties this application writes are
/// understood; setup stones, comments, and other metadata are skipped.
/// Never fails: unparseable input simply yields no moves.
pub fn parse_sgf(content: &str) -> (i32, Vec<String>) {
    let mut size = 19;
    let mut moves = Vec::new();

    let mut in_value = false;
    let mut prop_key = String::new();
    let mut value = String::new();

    for ch in content.trim().chars() {
        if in_value {
            if ch == ']' {
                in_value = false;
                match prop_key.as_str() {
                    "SZ" => {
                        if let Ok(n) = value.trim().parse::<i32>() {
                            size = n;
                        }
                    }
                    "B" | "W" => moves.push(format!("{}[{}]", prop_key, value)),
                    _ => {}
                }
            } else {
                value.push(ch);
            }
            continue;
        }

        match ch {
            '[' => {
                in_value = true;
                value.clear();
            }
            '(' | ')' | ';' => prop_key.clear(),
            c if !c.is_whitespace() => prop_key.push(c),
            _ => {}
        }
    }

    (size, moves)
}

/// Rebuild a game by replaying transcript records through `Game::play`.
///
/// Pass records flip the turn without touching the board. Malformed
/// records (wrong shape, bad coordinate) are skipped before the engine
/// is consulted. A record the engine rejects aborts the replay with the
/// offending record identified; the caller discards the partial game.
pub fn replay(size: i32, moves: &[String]) -> Result<Game, SgfError> {
    let mut game = Game::new(size);

    for record in moves {
        let Some((color, value)) = split_record(record) else {
            continue;
        };

        if value.is_empty() {
            game.current_player = color.opposite();
            continue;
        }

        let point = match coord_from_sgf(value) {
            Ok(p) => p,
            Err(_) => continue,
        };

        // Trust the record's color over strict alternation so that
        // transcripts with passes or handicap-style gaps still replay.
        game.current_player = color;
        if let Err(err) = game.play(point.x, point.y) {
            return Err(SgfError::Replay {
                record: record.clone(),
                source: err,
            });
        }
    }

    Ok(game)
}

/// Split `B[dd]` into color and bracket value. `None` for records that
/// do not follow the `{B|W}[..]` shape.
fn split_record(record: &str) -> Option<(Color, &str)> {
    let rest = record.strip_suffix(']')?;
    let color = match rest.chars().next()? {
        'B' => Color::Black,
        'W' => Color::White,
        _ => return None,
    };
    let value = rest.get(1..)?.strip_prefix('[')?;
    Some((color, value))
}
