//! Static Exchange Evaluation (SEE).
//!
//! Decides whether the capture sequence initiated by a move on its
//! destination square gains at least a threshold number of centipawns,
//! assuming both sides recapture with their least valuable attacker.

use corvus_core::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks, Bitboard, Board,
    Color, Move, MoveKind, PieceKind, PromotionPiece, Square,
};

/// Material values for SEE, indexed by `PieceKind::index()`. Distinct from
/// evaluation values — the king is given a large finite value so that a
/// losing king "capture" still compares sanely to real pieces.
const SEE_VALUE: [i32; 6] = [100, 320, 330, 500, 900, 20_000];

/// True iff `mv` is tactical: its destination is occupied, or it is a
/// promotion or en-passant capture. Castling is not tactical by this
/// definition even though the king changes square.
pub fn is_tactical(board: &Board, mv: Move) -> bool {
    board.piece_on(mv.dest()).is_some()
        || mv.kind() == MoveKind::EnPassant
        || mv.kind() == MoveKind::Promotion
}

/// Value of the captured piece, plus promotion/en-passant bonuses, for `mv`.
///
/// Castling contributes 0 (the king lands on an empty square).
pub fn tactical_move_value(board: &Board, mv: Move) -> i32 {
    let captured = match mv.kind() {
        MoveKind::EnPassant => SEE_VALUE[PieceKind::Pawn.index()],
        MoveKind::Castling => 0,
        _ => board
            .piece_on(mv.dest())
            .map_or(0, |victim| SEE_VALUE[victim.index()]),
    };
    let promo_bonus = if mv.kind() == MoveKind::Promotion {
        let promo_kind = match mv.promotion_piece() {
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Queen => PieceKind::Queen,
        };
        SEE_VALUE[promo_kind.index()] - SEE_VALUE[PieceKind::Pawn.index()]
    } else {
        0
    };
    captured + promo_bonus
}

/// Every piece attacking `sq` given occupancy `occ`, of any color.
fn all_attackers_to(board: &Board, occ: Bitboard, sq: Square) -> Bitboard {
    let knights = knight_attacks(sq) & board.pieces(PieceKind::Knight);
    let kings = king_attacks(sq) & board.pieces(PieceKind::King);
    let rook_like =
        rook_attacks(sq, occ) & (board.pieces(PieceKind::Rook) | board.pieces(PieceKind::Queen));
    let bishop_like = bishop_attacks(sq, occ)
        & (board.pieces(PieceKind::Bishop) | board.pieces(PieceKind::Queen));
    let white_pawns =
        pawn_attacks(Color::Black, sq) & board.pieces(PieceKind::Pawn) & board.side(Color::White);
    let black_pawns =
        pawn_attacks(Color::White, sq) & board.pieces(PieceKind::Pawn) & board.side(Color::Black);
    knights | kings | rook_like | bishop_like | white_pawns | black_pawns
}

/// Returns true iff the exchange sequence starting with `mv` gains at least
/// `threshold` centipawns for the side to move, assuming both sides always
/// recapture with their least valuable attacker.
pub fn see(board: &Board, mv: Move, threshold: i32) -> bool {
    let src = mv.source();
    let dst = mv.dest();

    let moved_kind = board.piece_on(src).unwrap_or(PieceKind::Pawn);
    let mut next_victim = if mv.kind() == MoveKind::Promotion {
        match mv.promotion_piece() {
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    } else {
        moved_kind
    };

    let mut balance = tactical_move_value(board, mv) - threshold;
    if balance < 0 {
        return false;
    }

    balance -= SEE_VALUE[next_victim.index()];
    if balance >= 0 {
        return true;
    }

    let bishops = board.pieces(PieceKind::Bishop) | board.pieces(PieceKind::Queen);
    let rooks = board.pieces(PieceKind::Rook) | board.pieces(PieceKind::Queen);

    let mut occ = board.occupied().without(src).with(dst);
    if mv.kind() == MoveKind::EnPassant {
        if let Some(ep_sq) = board.en_passant() {
            occ = occ.without(ep_sq);
        }
    }

    let mut attackers = all_attackers_to(board, occ, dst) & occ;
    let mut side = !board.side_to_move();

    loop {
        let my_attackers = attackers & board.side(side);
        if my_attackers.is_empty() {
            break;
        }

        next_victim = PieceKind::ALL
            .into_iter()
            .find(|&k| (my_attackers & board.pieces(k)).is_nonempty())
            .expect("non-empty attacker set must contain a piece kind");

        let from_sq = (my_attackers & board.pieces(next_victim))
            .lsb()
            .expect("least valuable attacker square");
        occ = occ.without(from_sq);

        if next_victim == PieceKind::Pawn
            || next_victim == PieceKind::Bishop
            || next_victim == PieceKind::Queen
        {
            attackers |= bishop_attacks(dst, occ) & bishops;
        }
        if next_victim == PieceKind::Rook || next_victim == PieceKind::Queen {
            attackers |= rook_attacks(dst, occ) & rooks;
        }
        attackers &= occ;

        side = !side;

        balance = -balance - 1 - SEE_VALUE[next_victim.index()];
        if balance >= 0 {
            // If the last attacker used was a king and the opponent still has
            // attackers, that capture was illegal (moving into check) — the
            // side that "won" by capturing with the king actually loses.
            if next_victim == PieceKind::King && (attackers & board.side(side)).is_nonempty() {
                side = !side;
            }
            break;
        }
    }

    board.side_to_move() != side
}

/// Threshold SEE check — alias kept for call sites that read better as `see_ge`.
pub fn see_ge(board: &Board, mv: Move, threshold: i32) -> bool {
    see(board, mv, threshold)
}

/// Optimistic upper bound on the value of the best single tactical move
/// available to the side to move: the value of the strongest enemy piece
/// present, plus a queen-minus-pawn bonus if a pawn sits one step from
/// promotion.
pub fn best_tactical_move_value(board: &Board) -> i32 {
    let us = board.side_to_move();
    let enemy = board.side(!us);

    let mut value = SEE_VALUE[PieceKind::Pawn.index()];
    for piece in [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ] {
        if (board.pieces(piece) & enemy).is_nonempty() {
            value = SEE_VALUE[piece.index()];
            break;
        }
    }

    let seventh_rank = match us {
        Color::White => Bitboard::RANK_7,
        Color::Black => Bitboard::RANK_2,
    };
    if (board.pieces(PieceKind::Pawn) & board.side(us) & seventh_rank).is_nonempty() {
        value += SEE_VALUE[PieceKind::Queen.index()] - SEE_VALUE[PieceKind::Pawn.index()];
    }

    value
}

/// True iff `side` has any piece besides its king and pawns.
pub fn has_non_pawn_material(board: &Board, side: Color) -> bool {
    let pieces = board.side(side);
    (board.pieces(PieceKind::Knight) & pieces).is_nonempty()
        || (board.pieces(PieceKind::Bishop) & pieces).is_nonempty()
        || (board.pieces(PieceKind::Rook) & pieces).is_nonempty()
        || (board.pieces(PieceKind::Queen) & pieces).is_nonempty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvus_core::{generate_legal_moves, Board};

    fn find_move(board: &Board, from: &str, to: &str) -> Move {
        let moves = generate_legal_moves(board);
        let from_sq = Square::from_algebraic(from).unwrap();
        let to_sq = Square::from_algebraic(to).unwrap();
        moves
            .as_slice()
            .iter()
            .find(|m| m.source() == from_sq && m.dest() == to_sq && m.kind() != MoveKind::Promotion)
            .copied()
            .unwrap_or_else(|| {
                moves
                    .as_slice()
                    .iter()
                    .find(|m| m.source() == from_sq && m.dest() == to_sq)
                    .copied()
                    .expect("move not found")
            })
    }

    #[test]
    fn pawn_takes_undefended_knight() {
        let board: Board = "4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let mv = find_move(&board, "e4", "d5");
        assert!(see(&board, mv, 0));
        assert!(see(&board, mv, 320));
        assert!(!see(&board, mv, 321));
    }

    #[test]
    fn pawn_takes_defended_knight() {
        // PxN (gain 320), then pxP (they gain 100) -> net 220 for white.
        let board: Board = "4k3/8/4p3/3n4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let mv = find_move(&board, "e4", "d5");
        assert!(see(&board, mv, 220));
        assert!(!see(&board, mv, 221));
    }

    // Spec scenario S4: queen takes pawn defended by pawn.
    #[test]
    fn queen_takes_defended_pawn_loses() {
        let board: Board = "4k3/8/8/3p4/4Q3/5P2/8/4K3 w - - 0 1".parse().unwrap();
        let mv = find_move(&board, "e4", "d5");
        assert!(!see(&board, mv, 0));
        assert!(see(&board, mv, -800));
    }

    #[test]
    fn equal_trade() {
        let board: Board = "4k3/8/8/3n4/8/4N3/8/4K3 w - - 0 1".parse().unwrap();
        let mv = find_move(&board, "e3", "d5");
        assert!(see(&board, mv, 320));
        assert!(!see(&board, mv, 321));
    }

    #[test]
    fn see_ge_matches_see() {
        let board: Board = "4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let mv = find_move(&board, "e4", "d5");
        assert_eq!(see(&board, mv, 150), see_ge(&board, mv, 150));
    }

    #[test]
    fn illegal_king_recapture_does_not_flip_result() {
        // White rook takes a pawn defended only by the black king; black
        // cannot recapture (it would be moving into the rook's attack from
        // behind), so white should simply win the pawn.
        let board: Board = "4k3/8/8/8/8/8/4p3/4R1K1 w - - 0 1".parse().unwrap();
        let mv = find_move(&board, "e1", "e2");
        assert!(see(&board, mv, 100));
    }
}
