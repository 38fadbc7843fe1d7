//! Alpha-beta search over the legal move tree
//!
//! Scores are always from White's point of view: the maximizing side looks for the highest
//! score, the minimizing side for the lowest. Pruning stops the remaining moves of a ply as soon
//! as `beta <= alpha`, which cannot change the value found at the root.
//!
//! Leaf scores:
//! - ongoing positions use [`evaluate_position`]
//! - checkmate scores `MATE_SCORE + remaining_depth` against the mated side, so shorter mates
//!   are preferred
//! - stalemate and forced draws score 0

use std::time::Instant;

use tracing::debug;

use super::ordering::order_moves;
use crate::constants::*;
use crate::evaluation::evaluate_position;
use crate::position::Position;
use crate::types::*;

/// Score of a searched position paired with the move that achieves it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    /// `None` only when the position is terminal (or the search depth is 0)
    pub best_move: Option<Move>,
}

/// Node counters of one search call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Does this score come from a forced checkmate?
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE
}

/// Search `position` to `depth` plies.
///
/// `maximize` selects whether the side to move looks for the highest (White) or lowest (Black)
/// score. The position is restored before returning.
pub fn search(position: &mut Position, depth: u32, maximize: bool) -> SearchResult {
    let started = Instant::now();
    let mut stats = SearchStats::default();
    let result = alphabeta(position, depth, -AB_INF, AB_INF, maximize, &mut stats);

    debug!(
        depth,
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        score = result.score,
        best_move = ?result.best_move.map(|mv| mv.to_uci()),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search finished"
    );
    result
}

/// Search a copy of `position` for the side to move
pub fn best_move(position: &Position, depth: u32) -> SearchResult {
    let mut scratch = position.clone();
    let maximize = scratch.side_to_move() == Color::White;
    search(&mut scratch, depth, maximize)
}

fn alphabeta(
    position: &mut Position,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximize: bool,
    stats: &mut SearchStats,
) -> SearchResult {
    stats.nodes += 1;

    let moves = position.legal_moves();
    let status = position.status_given(!moves.is_empty());
    if depth == 0 || status.is_terminal() {
        return SearchResult {
            score: leaf_score(position, status, depth),
            best_move: None,
        };
    }

    let mut best = SearchResult {
        score: if maximize { -AB_INF } else { AB_INF },
        best_move: None,
    };

    for mv in order_moves(position, moves) {
        let undo = position.make_move(mv);
        let child = alphabeta(position, depth - 1, alpha, beta, !maximize, stats);
        position.unmake_move(mv, undo);

        if maximize {
            if child.score > best.score {
                best = SearchResult {
                    score: child.score,
                    best_move: Some(mv),
                };
            }
            alpha = alpha.max(child.score);
        } else {
            if child.score < best.score {
                best = SearchResult {
                    score: child.score,
                    best_move: Some(mv),
                };
            }
            beta = beta.min(child.score);
        }

        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }

    best
}

/// Plain minimax without pruning or ordering. Exponentially slower; used to check `search`.
pub fn minimax(position: &mut Position, depth: u32, maximize: bool) -> SearchResult {
    let moves = position.legal_moves();
    let status = position.status_given(!moves.is_empty());
    if depth == 0 || status.is_terminal() {
        return SearchResult {
            score: leaf_score(position, status, depth),
            best_move: None,
        };
    }

    let mut best = SearchResult {
        score: if maximize { -AB_INF } else { AB_INF },
        best_move: None,
    };
    for mv in moves {
        let undo = position.make_move(mv);
        let child = minimax(position, depth - 1, !maximize);
        position.unmake_move(mv, undo);

        let better = if maximize {
            child.score > best.score
        } else {
            child.score < best.score
        };
        if better {
            best = SearchResult {
                score: child.score,
                best_move: Some(mv),
            };
        }
    }
    best
}

fn leaf_score(position: &Position, status: GameStatus, depth: u32) -> i32 {
    match status {
        GameStatus::Ongoing => evaluate_position(position),
        GameStatus::Checkmate => {
            let mate = MATE_SCORE + depth as i32;
            match position.side_to_move() {
                Color::White => -mate,
                Color::Black => mate,
            }
        }
        GameStatus::Stalemate | GameStatus::Draw(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(moves: &str) -> Position {
        let mut position = Position::new();
        for text in moves.split_whitespace() {
            position.apply_uci(text).unwrap();
        }
        position
    }

    #[test]
    fn test_depth_zero_returns_static_score() {
        let mut position = after("e2e4");
        let result = search(&mut position, 0, false);
        assert_eq!(result.score, evaluate_position(&position));
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_start_position_depth_two_returns_legal_move() {
        let mut position = Position::new();
        let legal = position.legal_moves();
        assert_eq!(legal.len(), 20);
        let result = search(&mut position, 2, true);
        let mv = result.best_move.expect("a move from the start position");
        assert!(legal.contains(&mv));
    }

    #[test]
    fn test_fools_mate_is_found() {
        for depth in 1..=3 {
            let mut position = after("f2f3 e7e5 g2g4");
            let result = search(&mut position, depth, false);
            assert_eq!(result.best_move, Some(Move::from_uci("d8h4").unwrap()), "depth {depth}");
            assert!(is_mate_score(result.score), "depth {depth}: {}", result.score);
            assert!(result.score < 0);
        }
    }

    #[test]
    fn test_mate_in_one_for_white() {
        // back-rank mate: Re1-e8
        let mut position = Position::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1").unwrap();
        let result = search(&mut position, 2, true);
        assert_eq!(result.best_move, Some(Move::from_uci("e1e8").unwrap()));
        assert_eq!(result.score, MATE_SCORE + 1);
    }

    #[test]
    fn test_terminal_position_has_no_move() {
        let mut mated = after("f2f3 e7e5 g2g4 d8h4");
        let result = search(&mut mated, 3, true);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -(MATE_SCORE + 3));

        let mut stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let result = search(&mut stalemate, 2, false);
        assert_eq!(result, SearchResult { score: 0, best_move: None });
    }

    #[test]
    fn test_search_restores_position() {
        let mut position = after("e2e4 e7e5 g1f3 b8c6 f1c4");
        let before = position.clone();
        search(&mut position, 3, false);
        assert_eq!(position, before);
    }

    #[test]
    fn test_alphabeta_matches_minimax() {
        let fens = [
            START_FEN,
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
            "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1",
            "4k3/8/8/3q4/3pP3/4Q3/8/4K3 w - - 0 1",
        ];
        for fen in fens {
            for depth in 0..=3 {
                let mut position = Position::from_fen(fen).unwrap();
                let maximize = position.side_to_move() == Color::White;
                let pruned = search(&mut position, depth, maximize);
                let full = minimax(&mut position, depth, maximize);
                assert_eq!(pruned.score, full.score, "{fen} at depth {depth}");
            }
        }
    }

    #[test]
    fn test_best_move_leaves_caller_untouched() {
        let position = after("d2d4 d7d5");
        let result = best_move(&position, 2);
        assert!(result.best_move.is_some());
        assert_eq!(position, after("d2d4 d7d5"));
    }
}
