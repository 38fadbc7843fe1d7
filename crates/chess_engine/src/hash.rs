//! Zobrist hashing
//!
//! Position keys are used for repetition detection only. The key tables are generated at
//! compile time from a fixed seed with splitmix64, so keys are stable across runs.

use crate::types::*;

const PIECE_KEYS: usize = 12 * 64;
const SIDE_KEY: usize = PIECE_KEYS;
const CASTLING_KEYS: usize = SIDE_KEY + 1;
const EP_KEYS: usize = CASTLING_KEYS + 16;
const KEY_COUNT: usize = EP_KEYS + 8;

const SEED: u64 = 0x2545_F491_4F6C_DD1D;

const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

const KEYS: [u64; KEY_COUNT] = {
    let mut keys = [0u64; KEY_COUNT];
    let mut state = SEED;
    let mut i = 0;
    while i < KEY_COUNT {
        let (next, key) = splitmix64(state);
        state = next;
        keys[i] = key;
        i += 1;
    }
    keys
};

#[inline]
fn piece_index(piece: i8) -> usize {
    let kind = piece.unsigned_abs() as usize - 1;
    if piece > 0 {
        kind
    } else {
        6 + kind
    }
}

/// Full key of a position, computed from scratch
pub fn position_key(
    board: &Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
) -> u64 {
    let mut key = 0u64;

    for (square, &piece) in board.iter().enumerate() {
        if piece != 0 {
            key ^= KEYS[piece_index(piece) * 64 + square];
        }
    }

    if side_to_move == Color::Black {
        key ^= KEYS[SIDE_KEY];
    }

    key ^= KEYS[CASTLING_KEYS + castling.bits() as usize];

    if let Some(ep) = en_passant {
        key ^= KEYS[EP_KEYS + (ep % 8) as usize];
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SETUP;

    #[test]
    fn test_keys_are_distinct() {
        let white = position_key(&SETUP, Color::White, CastlingRights::all(), None);
        let black = position_key(&SETUP, Color::Black, CastlingRights::all(), None);
        let no_castle = position_key(&SETUP, Color::White, CastlingRights::none(), None);
        assert_ne!(white, black);
        assert_ne!(white, no_castle);
        assert_eq!(
            white,
            position_key(&SETUP, Color::White, CastlingRights::all(), None)
        );
    }
}
