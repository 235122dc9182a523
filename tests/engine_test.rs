//! Integration tests: full games driven through the engine's public API.

use goban::board::{Board, Color};
use goban::game::{Game, GameError};
use goban::score::{count_score, ScoringMethod};

#[test]
fn test_corner_capture_flow() {
    let mut game = Game::new(9);
    game.play(0, 1).expect("B");
    game.play(0, 0).expect("W into the corner");
    game.play(1, 0).expect("B takes the last liberty");

    assert_eq!(game.board.at(0, 0), Color::Empty);
    assert_eq!(game.black_captures, 1);
    assert_eq!(game.white_captures, 0);
    assert_eq!(game.current_player, Color::White);
}

#[test]
fn test_move_undo_round_trip_back_to_empty() {
    let mut game = Game::new(9);

    // Includes the corner capture so the round trip covers tallies.
    let moves = [(0, 1), (0, 0), (1, 0), (5, 5), (4, 4), (3, 3)];
    let mut snapshots = Vec::new();
    for (x, y) in moves {
        snapshots.push(game.clone());
        game.play(x, y).expect("legal move");
    }

    for snapshot in snapshots.iter().rev() {
        game.undo().expect("undo");
        assert_eq!(game.board, snapshot.board);
        assert_eq!(game.current_player, snapshot.current_player);
        assert_eq!(game.black_captures, snapshot.black_captures);
        assert_eq!(game.white_captures, snapshot.white_captures);
        assert_eq!(game.last_move, snapshot.last_move);
        assert_eq!(game.moves, snapshot.moves);
        assert_eq!(game.history_len(), snapshot.history_len());
    }

    assert_eq!(game.board, Board::new(9));
    assert_eq!(game.undo(), Err(GameError::NothingToUndo));
}

#[test]
fn test_rejected_moves_mutate_nothing() {
    let mut game = Game::new(9);
    game.play(4, 4).expect("B");
    let before = game.clone();

    // Occupied.
    assert!(matches!(
        game.play(4, 4),
        Err(GameError::InvalidMove { .. })
    ));
    // Off board in every direction.
    for (x, y) in [(-1, 0), (0, -1), (9, 4), (4, 9)] {
        assert_eq!(game.play(x, y), Err(GameError::InvalidMove { x, y }));
    }

    assert_eq!(game.board, before.board);
    assert_eq!(game.moves, before.moves);
    assert_eq!(game.current_player, before.current_player);
    assert_eq!(game.history_len(), before.history_len());
}

#[test]
fn test_suicide_rejected_without_capture() {
    let mut game = Game::new(9);
    game.play(0, 1).expect("B");
    game.play(5, 5).expect("W elsewhere");
    game.play(1, 0).expect("B");

    // White at (0,0) would have no liberties and captures nothing.
    assert_eq!(
        game.play(0, 0),
        Err(GameError::InvalidMove { x: 0, y: 0 })
    );
}

#[test]
fn test_capture_before_suicide_ordering() {
    let mut game = Game::new(9);
    game.play(0, 2).expect("B");
    game.play(0, 1).expect("W");
    game.play(1, 1).expect("B");
    game.play(1, 0).expect("W");

    // Black at (0,0) has zero liberties of its own, but it removes the
    // White stone at (0,1) whose last liberty it fills.
    game.play(0, 0).expect("capturing placement is legal");
    assert_eq!(game.board.at(0, 1), Color::Empty);
    assert_eq!(game.board.at(0, 0), Color::Black);
    assert_eq!(game.black_captures, 1);
    // The White stone at (1,0) keeps its outside liberty and survives.
    assert_eq!(game.board.at(1, 0), Color::White);
}

#[test]
fn test_ko_clears_after_an_exchange_elsewhere() {
    let mut game = Game::new(9);
    // Ko shape around (1,1)/(2,1).
    game.play(1, 0).expect("B");
    game.play(2, 0).expect("W");
    game.play(0, 1).expect("B");
    game.play(3, 1).expect("W");
    game.play(1, 2).expect("B");
    game.play(2, 2).expect("W");
    game.play(5, 5).expect("B elsewhere");
    game.play(1, 1).expect("W ko stone");
    game.play(2, 1).expect("B captures the ko stone");

    // Immediate recapture is ko...
    assert_eq!(
        game.play(1, 1),
        Err(GameError::KoViolation { x: 1, y: 1 })
    );

    // ...but after an exchange elsewhere White may retake.
    game.play(7, 7).expect("W elsewhere");
    game.play(6, 6).expect("B answers");
    game.play(1, 1).expect("W retakes the ko");
    assert_eq!(game.board.at(2, 1), Color::Empty);
    assert_eq!(game.white_captures, 1);
}

#[test]
fn test_scoring_corner_territories() {
    let mut board = Board::new(5);
    board.set(0, 1, Color::Black);
    board.set(1, 0, Color::Black);
    board.set(4, 3, Color::White);
    board.set(3, 4, Color::White);

    let chinese = count_score(&board, ScoringMethod::Chinese, 0, 0, 7.5);
    assert_eq!(chinese.black, 3.0);
    assert_eq!(chinese.white, 10.5);

    let japanese = count_score(&board, ScoringMethod::Japanese, 2, 1, 6.5);
    assert_eq!(japanese.black, 3.0);
    assert_eq!(japanese.white, 8.5);

    let fallback = count_score(&board, ScoringMethod::parse("whatever"), 0, 0, 7.5);
    assert_eq!(fallback, chinese);
}

#[test]
fn test_scoring_a_played_game() {
    let mut game = Game::new(9);
    game.play(0, 1).expect("B");
    game.play(0, 0).expect("W");
    game.play(1, 0).expect("B captures");

    // Black's two stones wall off (0,0); the rest of the board touches
    // only Black too, so under area rules Black owns everything.
    let score = count_score(
        &game.board,
        ScoringMethod::Chinese,
        game.black_captures,
        game.white_captures,
        0.0,
    );
    assert_eq!(score.black, 81.0);
    assert_eq!(score.white, 0.0);

    // Territory rules: 79 empty points plus one capture.
    let score = count_score(
        &game.board,
        ScoringMethod::Japanese,
        game.black_captures,
        game.white_captures,
        0.0,
    );
    assert_eq!(score.black, 80.0);
    assert_eq!(score.white, 0.0);
}
