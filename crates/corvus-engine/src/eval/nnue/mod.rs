//! NNUE evaluation using a (768->1024)x2->1x8 SCReLU network.

mod accumulator;
mod features;
mod network;

use corvus_core::{Board, Color};

use self::accumulator::Accumulator;
use self::network::Network;
use self::network::NUM_BUCKETS;

/// Compute the output bucket index from material count.
///
/// Must match Bullet's `MaterialCount<8>`:
/// `bucket = (occupied_count - 2) / (32.div_ceil(8))` = `(occ - 2) / 4`.
#[inline]
fn output_bucket(board: &Board) -> usize {
    let piece_count = board.occupied().count() as usize;
    (piece_count.saturating_sub(2)) / 4
}

/// Evaluate the board using NNUE.
///
/// Returns a centipawn score from the side-to-move's perspective
/// (positive = good for the side to move).
pub fn evaluate(board: &Board) -> i32 {
    let net = Network::get();
    let bucket = output_bucket(board);

    let white_acc = Accumulator::refresh(board, Color::White, net);
    let black_acc = Accumulator::refresh(board, Color::Black, net);

    let (us, them) = match board.side_to_move() {
        Color::White => (&white_acc, &black_acc),
        Color::Black => (&black_acc, &white_acc),
    };

    net.evaluate(us, them, bucket)
}
