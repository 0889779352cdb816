//! Evaluation module for corvus engine.

pub mod king_safety;
pub mod material;
pub mod mobility;
#[cfg(feature = "nnue")]
pub mod nnue;
pub mod outposts;
pub mod pawns;
pub mod phase;
pub mod pst;
pub mod rooks;
pub mod score;

use corvus_core::{Board, Color, PieceKind};

use self::king_safety::evaluate_king_safety;
use self::material::material;
use self::mobility::evaluate_mobility;
use self::outposts::evaluate_outposts;
use self::pawns::evaluate_pawns;
use self::phase::{game_phase, MAX_PHASE};
use self::pst::pst_value;
use self::rooks::evaluate_rooks;
use self::score::Score;

/// Sum every handcrafted term into one packed middlegame/endgame score,
/// from White's perspective.
fn hce_score(board: &Board) -> Score {
    let mut score = material(board)
        + evaluate_king_safety(board)
        + evaluate_mobility(board)
        + evaluate_pawns(board)
        + evaluate_rooks(board)
        + evaluate_outposts(board);

    for color in Color::ALL {
        let side = board.side(color);
        for kind in PieceKind::ALL {
            for sq in board.pieces(kind) & side {
                let pst = pst_value(kind, color, sq);
                score = match color {
                    Color::White => score + pst,
                    Color::Black => score - pst,
                };
            }
        }
    }

    score
}

/// Blend a packed score's mg/eg halves by the current game phase.
fn taper(score: Score, phase: i32) -> i32 {
    let mg = score.mg() as i32;
    let eg = score.eg() as i32;
    (mg * phase + eg * (MAX_PHASE - phase)) / MAX_PHASE
}

/// Evaluate the board using the handcrafted evaluation (HCE), from the
/// side to move's perspective.
#[cfg(not(feature = "nnue"))]
pub fn evaluate(board: &Board) -> i32 {
    let phase = game_phase(board);
    let white_score = taper(hce_score(board), phase);
    match board.side_to_move() {
        Color::White => white_score,
        Color::Black => -white_score,
    }
}

#[cfg(feature = "nnue")]
pub use self::nnue::evaluate;

#[cfg(all(test, not(feature = "nnue")))]
mod tests {
    use corvus_core::Board;

    use super::evaluate;

    #[test]
    fn starting_position_is_near_zero() {
        let board = Board::starting_position();
        let score = evaluate(&board);
        assert!(score.abs() <= 50, "expected near-zero eval, got {score}");
    }

    #[test]
    fn missing_queen_is_clearly_worse() {
        let board: Board = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"
            .parse()
            .unwrap();
        // Black to move, missing their own queen: side-to-move score is very negative.
        let score = evaluate(&board);
        assert!(score < -500, "expected a large deficit for the side to move, got {score}");
    }

    #[test]
    fn side_to_move_perspective_flips() {
        let white_to_move: Board = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        let black_to_move: Board = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"
            .parse()
            .unwrap();
        assert_eq!(evaluate(&white_to_move), -evaluate(&black_to_move));
    }
}
