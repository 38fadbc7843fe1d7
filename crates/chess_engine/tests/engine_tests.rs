//! Integration tests for the chess engine public API
//!
//! Exercises move replay, search and game status through the crate's public surface only.

use chess_engine::api::{do_move, get_game_state, new_game, replay_moves, reply};
use chess_engine::constants::{E5, MATE_SCORE, W_KNIGHT};
use chess_engine::search::is_mate_score;
use chess_engine::types::DrawReason;
use chess_engine::{ChessEngineError, Color, GameStatus, Move, Position};

#[test]
fn test_replay_is_idempotent() {
    //! Replaying the same list twice from scratch gives identical positions
    //!
    //! The bot rebuilds its position from the full move list on every
    //! state update, so two rebuilds must agree field for field.

    let moves = "d2d4 d7d5 c2c4 e7e6 b1c3 g8f6 c1g5 f8e7";
    let first = replay_moves(moves);
    let second = replay_moves(moves);

    assert!(first.fault.is_none());
    assert_eq!(first.position, second.position);
    assert_eq!(first.position.to_fen(), second.position.to_fen());
}

#[test]
fn test_replay_matches_incremental_moves() {
    let mut incremental = new_game();
    for token in ["e2e4", "c7c5", "g1f3", "d7d6"] {
        do_move(&mut incremental, token).unwrap();
    }

    let replayed = replay_moves("e2e4 c7c5 g1f3 d7d6").position;
    assert_eq!(replayed, incremental);
}

#[test]
fn test_knight_capture_scenario() {
    //! The white knight takes on e5 and it becomes Black's turn

    let replay = replay_moves("e2e4 e7e5 g1f3 g8f6 f3e5");
    let position = replay.position;

    assert_eq!(position.piece_at(E5), W_KNIGHT);
    assert_eq!(position.side_to_move(), Color::Black);
    assert_eq!(position.halfmove_clock(), 0);
    assert_eq!(get_game_state(&position), GameStatus::Ongoing);
}

#[test]
fn test_reply_returns_legal_move_for_side_to_move() {
    for moves in ["", "e2e4", "e2e4 e7e5 g1f3"] {
        let position = replay_moves(moves).position;
        let result = reply(&position, 2);
        let mv = result.best_move.expect("ongoing game has a reply");
        assert!(position.legal_moves().contains(&mv), "{moves:?}: {mv}");
    }
}

#[test]
fn test_reply_finds_fools_mate() {
    let position = replay_moves("f2f3 e7e5 g2g4").position;
    let result = reply(&position, 4);

    assert_eq!(result.best_move, Some(Move::from_uci("d8h4").unwrap()));
    assert!(is_mate_score(result.score));
    assert!(result.score <= -MATE_SCORE);

    let mut after = position.clone();
    do_move(&mut after, "d8h4").unwrap();
    assert_eq!(get_game_state(&after), GameStatus::Checkmate);
    assert_eq!(reply(&after, 4).best_move, None);
}

#[test]
fn test_reply_takes_hanging_queen() {
    //! A free queen on d5 should be captured at any depth

    let position = Position::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    for depth in 1..=3 {
        let result = reply(&position, depth);
        assert_eq!(
            result.best_move,
            Some(Move::from_uci("d1d5").unwrap()),
            "depth {depth}"
        );
    }
}

#[test]
fn test_insufficient_material_is_drawn() {
    let position = Position::from_fen("8/8/4k3/8/8/3BK3/8/8 w - - 0 1").unwrap();
    assert_eq!(
        get_game_state(&position),
        GameStatus::Draw(DrawReason::InsufficientMaterial)
    );
    assert_eq!(reply(&position, 3).best_move, None);
}

#[test]
fn test_illegal_move_is_reported() {
    let mut game = new_game();
    let err = do_move(&mut game, "e2e5").unwrap_err();
    assert_eq!(
        err,
        ChessEngineError::InvalidMove {
            mv: "e2e5".to_string()
        }
    );
    assert_eq!(game, new_game());
}
