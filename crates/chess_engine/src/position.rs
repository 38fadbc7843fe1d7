//! # Position - board state with exact make/unmake
//!
//! A [`Position`] is the full rules state of a game: the signed mailbox board, side to move,
//! castling rights, en-passant target, halfmove clock, fullmove number, development flags and
//! the history of position keys used to detect repetitions.
//!
//! ## Make / Unmake
//!
//! The search explores a tree by applying a move, recursing and undoing it again on the same
//! position. [`Position::make_move`] returns an [`UndoInfo`] holding everything the move
//! destroyed, and [`Position::unmake_move`] restores it, so that after an unmake the position
//! compares equal (`==`) to the one before the make.
//!
//! [`Position::apply`] is the checked entry point used by callers outside the search: it only
//! accepts moves from [`Position::legal_moves`] and never mutates the position on failure.
//!
//! ## Development Flags
//!
//! Each color carries a four-bit set, one bit per minor piece (b-knight, g-knight, c-bishop,
//! f-bishop). A bit is raised the first time a move leaves the corresponding home square and is
//! never lowered by later moves, so a knight that returns home stays developed and a promoted
//! piece that lands on b1 does not undo anything.

use std::fmt;

use crate::board::*;
use crate::constants::*;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::hash::position_key;
use crate::move_gen;
use crate::types::*;

/// Information needed to undo a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoInfo {
    pub moved_piece: i8,
    pub captured_piece: i8,
    pub captured_square: Square,
    pub prev_castling: CastlingRights,
    pub prev_en_passant: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
    pub prev_developed: [u8; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    developed: [u8; 2],
    keys: Vec<u64>,
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl Position {
    /// Standard starting position
    pub fn new() -> Self {
        let mut position = Position {
            board: SETUP,
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            developed: [0, 0],
            keys: Vec::with_capacity(128),
        };
        position.keys.push(position.compute_key());
        position
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> i8 {
        self.board[square as usize]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Number of minor pieces of `color` that have left their starting square
    pub fn developed_minors(&self, color: Color) -> u32 {
        self.developed[color.index()].count_ones()
    }

    /// Key of the current position
    pub fn key(&self) -> u64 {
        self.keys.last().copied().unwrap_or_else(|| self.compute_key())
    }

    /// How often the current position occurred, counting the current occurrence
    pub fn repetition_count(&self) -> usize {
        let current = self.key();
        self.keys.iter().filter(|&&k| k == current).count()
    }

    pub fn is_in_check(&self) -> bool {
        move_gen::is_in_check(&self.board, self.side_to_move)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        move_gen::legal_moves(self)
    }

    pub fn is_capture(&self, mv: Move) -> bool {
        move_gen::is_capture(self, mv)
    }

    pub fn gives_check(&self, mv: Move) -> bool {
        move_gen::gives_check(self, mv)
    }

    /// Rules status of the position
    pub fn status(&self) -> GameStatus {
        self.status_given(!self.legal_moves().is_empty())
    }

    /// Rules status when the caller already knows whether legal moves exist
    pub fn status_given(&self, has_legal_moves: bool) -> GameStatus {
        if !has_legal_moves {
            return if self.is_in_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }
        if self.has_insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        if self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES {
            return GameStatus::Draw(DrawReason::SeventyFiveMoves);
        }
        if self.repetition_count() >= FIVEFOLD_REPETITION {
            return GameStatus::Draw(DrawReason::FivefoldRepetition);
        }
        GameStatus::Ongoing
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Neither side can ever deliver mate: K v K, K+minor v K, or bishops all on one color
    pub fn has_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_colors = [false; 2];

        for (square, &piece) in self.board.iter().enumerate() {
            match piece.abs() {
                VOID_ID | KING_ID => {}
                KNIGHT_ID => {
                    minors += 1;
                    knights += 1;
                }
                BISHOP_ID => {
                    minors += 1;
                    bishop_colors[is_light_square(square as Square) as usize] = true;
                }
                _ => return false,
            }
        }

        minors <= 1 || (knights == 0 && !(bishop_colors[0] && bishop_colors[1]))
    }

    /// Resolve `mv` against the legal moves of this position.
    ///
    /// A pawn move to the last rank without a promotion piece resolves to the queen promotion.
    pub fn resolve(&self, mv: Move) -> ChessEngineResult<Move> {
        self.legal_moves()
            .into_iter()
            .find(|m| {
                m.src == mv.src
                    && m.dst == mv.dst
                    && m.promotion == mv.promotion.or(m.promotion.map(|_| PieceKind::Queen))
            })
            .ok_or_else(|| ChessEngineError::InvalidMove { mv: mv.to_uci() })
    }

    /// Apply a legal move.
    ///
    /// # Errors
    ///
    /// Returns [`ChessEngineError::InvalidMove`] if the move is not legal here. The position
    /// is left untouched in that case.
    pub fn apply(&mut self, mv: Move) -> ChessEngineResult<UndoInfo> {
        let resolved = self.resolve(mv)?;
        Ok(self.make_move(resolved))
    }

    /// Parse coordinate notation and apply it, returning the move as played
    pub fn apply_uci(&mut self, text: &str) -> ChessEngineResult<Move> {
        let mv = self.resolve(Move::from_uci(text)?)?;
        self.make_move(mv);
        Ok(mv)
    }

    /// Undo a move previously returned by [`Position::apply`] or [`Position::make_move`]
    pub fn undo(&mut self, mv: Move, undo: UndoInfo) {
        self.unmake_move(mv, undo);
    }

    /// Make a pseudo-legal move without checking legality (returns undo information)
    pub(crate) fn make_move(&mut self, mv: Move) -> UndoInfo {
        let color = self.side_to_move;
        let piece = self.board[mv.src as usize];
        let is_pawn = piece.abs() == PAWN_ID;

        let captured_square = if is_pawn && Some(mv.dst) == self.en_passant && self.board[mv.dst as usize] == 0 {
            en_passant_victim(mv.dst, color)
        } else {
            mv.dst
        };

        let undo = UndoInfo {
            moved_piece: piece,
            captured_piece: self.board[captured_square as usize],
            captured_square,
            prev_castling: self.castling,
            prev_en_passant: self.en_passant,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            prev_developed: self.developed,
        };

        self.board[captured_square as usize] = 0;
        self.board[mv.src as usize] = 0;
        self.board[mv.dst as usize] = match promotion_for(piece, mv) {
            Some(kind) => kind.code(color),
            None => piece,
        };

        if piece.abs() == KING_ID {
            if let Some((rook_src, rook_dst)) = castling_rook_path(mv) {
                self.board[rook_dst as usize] = self.board[rook_src as usize];
                self.board[rook_src as usize] = 0;
            }
            self.castling.remove(CastlingRights::kingside(color));
            self.castling.remove(CastlingRights::queenside(color));
        }
        for square in [mv.src, mv.dst] {
            match square {
                A1 => self.castling.remove(CastlingRights::WHITE_QUEENSIDE),
                H1 => self.castling.remove(CastlingRights::WHITE_KINGSIDE),
                A8 => self.castling.remove(CastlingRights::BLACK_QUEENSIDE),
                H8 => self.castling.remove(CastlingRights::BLACK_KINGSIDE),
                _ => {}
            }
        }

        let homes = match color {
            Color::White => &WHITE_MINOR_HOMES,
            Color::Black => &BLACK_MINOR_HOMES,
        };
        if let Some(bit) = homes.iter().position(|&home| home == mv.src) {
            self.developed[color.index()] |= 1 << bit;
        }

        let (_, src_rank) = file_rank(mv.src);
        let (_, dst_rank) = file_rank(mv.dst);
        self.en_passant = if is_pawn && (src_rank - dst_rank).abs() == 2 {
            Some((mv.src + mv.dst) / 2)
        } else {
            None
        };

        if is_pawn || undo.captured_piece != 0 {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = color.opponent();
        let key = self.compute_key();
        self.keys.push(key);

        undo
    }

    /// Unmake a move on the board
    pub(crate) fn unmake_move(&mut self, mv: Move, undo: UndoInfo) {
        self.keys.pop();
        self.side_to_move = self.side_to_move.opponent();

        self.board[mv.dst as usize] = 0;
        self.board[mv.src as usize] = undo.moved_piece;
        self.board[undo.captured_square as usize] = undo.captured_piece;

        if undo.moved_piece.abs() == KING_ID {
            if let Some((rook_src, rook_dst)) = castling_rook_path(mv) {
                self.board[rook_src as usize] = self.board[rook_dst as usize];
                self.board[rook_dst as usize] = 0;
            }
        }

        self.castling = undo.prev_castling;
        self.en_passant = undo.prev_en_passant;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.developed = undo.prev_developed;
    }

    fn compute_key(&self) -> u64 {
        position_key(&self.board, self.side_to_move, self.castling, self.en_passant)
    }

    /// The same position with colors swapped and the board flipped vertically
    pub fn mirrored(&self) -> Position {
        let mut board = [0i8; 64];
        for (square, &piece) in self.board.iter().enumerate() {
            board[mirror_square(square as Square) as usize] = -piece;
        }
        let mut position = Position {
            board,
            side_to_move: self.side_to_move.opponent(),
            castling: self.castling.swapped(),
            en_passant: self.en_passant.map(mirror_square),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            developed: [self.developed[1], self.developed[0]],
            keys: Vec::with_capacity(128),
        };
        position.keys.push(position.compute_key());
        position
    }

    /// Parse a FEN string.
    ///
    /// FEN carries no history, so development flags are inferred: a minor piece counts as
    /// developed when its home square does not hold a piece of its kind and color.
    pub fn from_fen(fen: &str) -> ChessEngineResult<Position> {
        let invalid = |reason: &str| ChessEngineError::InvalidFen {
            fen: fen.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(invalid("expected at least 4 fields"));
        }

        let mut board = [0i8; 64];
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("expected 8 ranks"));
        }
        for (i, row) in ranks.iter().enumerate() {
            let rank = 7 - i as i8;
            let mut file = 0i8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as i8;
                    if file > 8 {
                        return Err(invalid("rank too long"));
                    }
                } else {
                    let kind = PieceKind::from_letter(c).ok_or_else(|| invalid("unknown piece"))?;
                    if file > 7 {
                        return Err(invalid("rank too long"));
                    }
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    board[square_at(file, rank) as usize] = kind.code(color);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(invalid("rank does not cover 8 files"));
            }
        }

        for color in [Color::White, Color::Black] {
            let kings = board
                .iter()
                .filter(|&&p| p == PieceKind::King.code(color))
                .count();
            if kings != 1 {
                return Err(invalid("each side needs exactly one king"));
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid("side to move must be w or b")),
        };

        let mut castling = CastlingRights::none();
        if fields[2] != "-" {
            for c in fields[2].chars() {
                let flag = match c {
                    'K' => CastlingRights::WHITE_KINGSIDE,
                    'Q' => CastlingRights::WHITE_QUEENSIDE,
                    'k' => CastlingRights::BLACK_KINGSIDE,
                    'q' => CastlingRights::BLACK_QUEENSIDE,
                    _ => return Err(invalid("bad castling field")),
                };
                castling.insert(flag);
            }
        }

        let en_passant = match fields[3] {
            "-" => None,
            name => Some(parse_square(name).ok_or_else(|| invalid("bad en-passant square"))?),
        };

        let halfmove_clock = match fields.get(4) {
            Some(text) => text.parse().map_err(|_| invalid("bad halfmove clock"))?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(text) => text.parse().map_err(|_| invalid("bad fullmove number"))?,
            None => 1,
        };

        let mut developed = [0u8; 2];
        let minors = [W_KNIGHT, W_KNIGHT, W_BISHOP, W_BISHOP];
        for (bit, (&home, &piece)) in WHITE_MINOR_HOMES.iter().zip(minors.iter()).enumerate() {
            if board[home as usize] != piece {
                developed[0] |= 1 << bit;
            }
        }
        for (bit, (&home, &piece)) in BLACK_MINOR_HOMES.iter().zip(minors.iter()).enumerate() {
            if board[home as usize] != -piece {
                developed[1] |= 1 << bit;
            }
        }

        let mut position = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            developed,
            keys: Vec::with_capacity(128),
        };
        position.keys.push(position.compute_key());
        Ok(position)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let piece = self.board[square_at(file, rank) as usize];
                match PieceKind::from_id(piece) {
                    None => empty += 1,
                    Some(kind) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        let letter = kind.letter();
                        fen.push(if piece > 0 {
                            letter.to_ascii_uppercase()
                        } else {
                            letter
                        });
                    }
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push_str(match self.side_to_move {
            Color::White => " w ",
            Color::Black => " b ",
        });

        let rights = [
            (CastlingRights::WHITE_KINGSIDE, 'K'),
            (CastlingRights::WHITE_QUEENSIDE, 'Q'),
            (CastlingRights::BLACK_KINGSIDE, 'k'),
            (CastlingRights::BLACK_QUEENSIDE, 'q'),
        ];
        let castling: String = rights
            .iter()
            .filter(|(flag, _)| self.castling.has(*flag))
            .map(|(_, c)| *c)
            .collect();
        fen.push_str(if castling.is_empty() { "-" } else { &castling });

        fen.push(' ');
        match self.en_passant {
            Some(square) => fen.push_str(&square_name(square)),
            None => fen.push('-'),
        }
        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

/// Square of the pawn removed by an en-passant capture landing on `dst`
fn en_passant_victim(dst: Square, mover: Color) -> Square {
    match mover {
        Color::White => dst - 8,
        Color::Black => dst + 8,
    }
}

fn promotion_for(piece: i8, mv: Move) -> Option<PieceKind> {
    let (_, rank) = file_rank(mv.dst);
    (piece.abs() == PAWN_ID && (rank == 0 || rank == 7))
        .then(|| mv.promotion.unwrap_or(PieceKind::Queen))
}

/// Rook squares for a king move that is a castle, `None` for ordinary king moves
pub(crate) fn castling_rook_path(mv: Move) -> Option<(Square, Square)> {
    match (mv.src, mv.dst) {
        (E1, G1) => Some((H1, F1)),
        (E1, C1) => Some((A1, D1)),
        (E8, G8) => Some((H8, F8)),
        (E8, C8) => Some((A8, D8)),
        _ => None,
    }
}
