//! Negamax alpha-beta search with quiescence, PVS, LMR, and advanced pruning.

use corvus_core::{Board, Color, Move, MoveKind, PieceKind, generate_legal_moves};

use crate::evaluate;
use crate::search::control::SearchControl;
use crate::search::heuristics::{
    ContHistIndex, ContinuationHistory, CounterMoveTable, HistoryTable, KillerTable, StackEntry,
    prev_move_index, update_cont_history,
};
use crate::search::ordering::{MovePicker, lmr_reduction};
use crate::search::see::{best_tactical_move_value, has_non_pawn_material, is_tactical, see_ge};
use crate::search::tt::{Bound, TranspositionTable};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 30_000;

/// Base score for checkmate (adjusted by ply for mate distance).
pub const MATE_SCORE: i32 = 29_000;

/// Scores above this threshold indicate a forced mate.
pub const MATE_THRESHOLD: i32 = 28_000;

/// Maximum search depth (in plies) for array sizing and recursion limits.
pub const MAX_PLY: usize = 128;

/// Maximum depth for forward futility pruning.
const FUTILITY_DEPTH: u8 = 3;

/// Forward futility margins indexed by depth.
const FUTILITY_MARGIN: [i32; 4] = [0, 200, 450, 700];

/// Maximum depth for razoring.
const RAZOR_DEPTH: u8 = 3;

/// Razoring margins indexed by depth.
const RAZOR_MARGIN: [i32; 4] = [0, 300, 550, 900];

/// Maximum depth for reverse futility pruning.
const RFP_DEPTH: u8 = 8;

/// Centipawns of reverse-futility margin charged per ply of depth.
const RFP_MARGIN_PER_DEPTH: i32 = 85;

/// Minimum depth for null move pruning.
const NMP_DEPTH: u8 = 3;

/// Maximum depth for Late Move Pruning.
const LMP_MAX_DEPTH: u8 = 4;

/// Move count threshold for LMP by depth.
const LMP_THRESHOLD: [usize; 5] = [0, 4, 7, 12, 19];

/// Minimum depth for ProbCut.
const PROBCUT_DEPTH: u8 = 5;

/// ProbCut threshold margin above beta.
const PROBCUT_MARGIN: i32 = 200;

/// Minimum depth for singular extension verification.
const SE_DEPTH: u8 = 8;

/// SEE pruning margin per depth-squared for tactical moves.
const SEE_NOISY_MARGIN: i32 = 27;

/// SEE pruning margin per depth for quiet moves.
const SEE_QUIET_MARGIN: i32 = 59;

/// Delta pruning margin added to stand-pat in quiescence search.
const QSEARCH_FUTILITY_MARGIN: i32 = 150;

/// Floor for the noisy-move SEE threshold in quiescence search.
const QSEARCH_SEE_MARGIN: i32 = -100;

/// Parameters passed to each negamax call beyond alpha/beta.
#[derive(Clone, Copy)]
pub(super) struct NodeParams {
    pub depth: u8,
    pub ply: u8,
    pub do_null: bool,
    pub excluded: Move,
}

/// Negamax alpha-beta search with PVS, LMR, and pruning.
///
/// Returns the best score for the side to move. The principal
/// variation is collected into `ctx.pv`.
pub(super) fn negamax(
    board: &Board,
    mut alpha: i32,
    beta: i32,
    params: NodeParams,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    let NodeParams { depth, ply, do_null, excluded } = params;
    let is_pv = alpha + 1 < beta;
    let is_root = ply == 0;

    ctx.pv.clear_ply(ply as usize);
    ctx.nodes += 1;

    // Ply ceiling to prevent out-of-bounds access and runaway recursion
    if ply as usize >= MAX_PLY {
        return evaluate(board);
    }

    ctx.stack[ply as usize].cutoff_count = 0;

    // Check stop condition (time limit, node limit, etc.)
    if ctx.control.should_stop(ctx.nodes) {
        return 0;
    }

    if is_drawn(board, ctx, ply) {
        return ctx.draw_score(board);
    }

    // Mate Distance Pruning
    if !is_root {
        alpha = alpha.max(-MATE_SCORE + ply as i32);
        let new_beta = beta.min(MATE_SCORE - ply as i32 - 1);
        if alpha >= new_beta {
            return alpha;
        }
    }

    // Drop to qsearch at depth 0
    if depth == 0 {
        return qsearch(board, ply, alpha, beta, ctx);
    }

    // TT probe — skip if we have an excluded move (singular extension search)
    let mut tt_move = Move::NULL;
    let mut tt_score = 0i32;
    let mut tt_depth: u8 = 0;
    let mut tt_bound = Bound::None;
    let mut tt_is_pv = is_pv;
    let mut tt_eval: i32 = 0;
    let mut have_tt_eval = false;

    if excluded.is_null() {
        if let Some(tt_entry) = ctx.tt.probe(board.hash(), ply) {
            tt_move = tt_entry.best_move;
            tt_score = tt_entry.score;
            tt_depth = tt_entry.depth;
            tt_bound = tt_entry.bound;
            tt_is_pv = tt_is_pv || tt_entry.is_pv;
            tt_eval = tt_entry.eval;
            have_tt_eval = true;

            // TT cutoff (not at root, not in PV)
            if !is_root && tt_depth >= depth {
                let cutoff = match tt_bound {
                    Bound::Exact => true,
                    Bound::LowerBound => tt_score >= beta,
                    Bound::UpperBound => tt_score <= alpha,
                    Bound::None => false,
                };
                if cutoff {
                    return tt_score;
                }
            }
        }
    }

    let king_sq = board.king_square(board.side_to_move());
    let in_check = board.is_square_attacked(king_sq, !board.side_to_move());

    // Static eval: trust the TT's cached eval on a hit, else evaluate from scratch.
    let raw_eval = if have_tt_eval { tt_eval } else { evaluate(board) };
    let static_eval = raw_eval;

    ctx.stack[ply as usize].static_eval = static_eval;

    let improving = if ply >= 2 && !in_check {
        static_eval > ctx.stack[ply as usize - 2].static_eval
    } else {
        false
    };

    // Razoring — once the margin condition fires, trust the qsearch value.
    if !is_pv && !in_check && depth <= RAZOR_DEPTH && excluded.is_null()
        && static_eval + RAZOR_MARGIN[depth as usize] < alpha
    {
        return qsearch(board, ply, alpha, beta, ctx);
    }

    // Reverse Futility Pruning
    if !is_pv && !in_check && excluded.is_null()
        && depth <= RFP_DEPTH && beta.abs() < MATE_THRESHOLD
        && static_eval - RFP_MARGIN_PER_DEPTH * depth as i32 >= beta
    {
        return static_eval;
    }

    // Null Move Pruning
    if do_null && !is_pv && !in_check && excluded.is_null()
        && depth >= NMP_DEPTH && beta.abs() < MATE_THRESHOLD
        && has_non_pawn_material(board, board.side_to_move())
        && static_eval >= beta
    {
        let r = 4 + depth as i32 / 6 + ((static_eval - beta) / 200).min(3);
        let null_board = board.make_null_move();
        ctx.history.push(board.hash());

        ctx.stack[ply as usize].current_move = Move::NULL;
        ctx.stack[ply as usize].cont_hist_index = None;

        let null_depth = (depth as i32 - r).max(0) as u8;
        let null_score = -negamax(
            &null_board,
            -beta,
            -beta + 1,
            NodeParams {
                depth: null_depth,
                ply: ply + 1,
                do_null: false,
                excluded: Move::NULL,
            },
            ctx,
        );
        ctx.history.pop();

        if null_score >= beta {
            return beta;
        }
    }

    // ProbCut
    if !is_pv && !in_check && depth >= PROBCUT_DEPTH && beta.abs() < MATE_THRESHOLD {
        let rbeta = (beta + PROBCUT_MARGIN).min(MATE_SCORE - MAX_PLY as i32 - 1);
        let moves = generate_legal_moves(board);

        for i in 0..moves.len() {
            let mv = moves[i];
            if mv == excluded || !is_tactical(board, mv) || !see_ge(board, mv, rbeta - static_eval)
            {
                continue;
            }

            let child = board.make_move(mv);
            ctx.history.push(board.hash());

            let score = -negamax(
                &child,
                -rbeta,
                -rbeta + 1,
                NodeParams {
                    depth: depth - 4,
                    ply: ply + 1,
                    do_null: true,
                    excluded: Move::NULL,
                },
                ctx,
            );

            ctx.history.pop();

            if score >= rbeta {
                return score;
            }
        }
    }

    // Move generation
    let moves = generate_legal_moves(board);

    if moves.is_empty() {
        return if in_check {
            -(MATE_SCORE - ply as i32)
        } else {
            ctx.draw_score(board)
        };
    }

    let original_alpha = alpha;
    let mut best_score = -INF;
    let mut best_move = Move::NULL;
    let counter = prev_move_index(&ctx.stack, ply as usize)
        .map_or(Move::NULL, |(piece, to)| ctx.counter_moves.get(piece, to));
    let mut picker = MovePicker::new(
        &moves,
        board,
        tt_move,
        &ctx.killers,
        counter,
        &ctx.history_table,
        &ctx.cont_history,
        &ctx.stack,
        ply as usize,
    );
    let mut searched_quiets = [Move::NULL; 64];
    let mut quiet_count: usize = 0;
    let mut move_count: usize = 0;

    while let Some(mv) = picker.pick_next() {
        // Skip excluded move (singular extension search)
        if mv == excluded {
            continue;
        }

        let tactical = is_tactical(board, mv);
        let moved_piece = board.piece_on(mv.source()).unwrap_or(PieceKind::Pawn);

        // ── Pruning (skip non-first moves at non-root nodes) ────────────────

        if move_count > 0 && !is_root {
            // Forward Futility Pruning
            if !in_check && depth <= FUTILITY_DEPTH && !tactical && alpha.abs() < MATE_THRESHOLD
                && static_eval + FUTILITY_MARGIN[depth as usize] <= alpha
            {
                continue;
            }

            // SEE pruning
            if depth <= 5 && mv.kind() != MoveKind::Promotion {
                if tactical {
                    if !see_ge(board, mv, -(SEE_NOISY_MARGIN * depth as i32 * depth as i32)) {
                        continue;
                    }
                } else if !in_check && !see_ge(board, mv, -(SEE_QUIET_MARGIN * depth as i32)) {
                    continue;
                }
            }

            // Late Move Pruning
            let lmp_threshold = if improving {
                LMP_THRESHOLD[depth.min(LMP_MAX_DEPTH) as usize]
            } else {
                LMP_THRESHOLD[depth.min(LMP_MAX_DEPTH) as usize] / 2
            };
            if !in_check && depth <= LMP_MAX_DEPTH && move_count >= lmp_threshold && !tactical {
                continue;
            }
        }

        // Track quiet moves searched before cutoff (for history penalty)
        let is_quiet_move = mv.kind() == MoveKind::Normal && board.piece_on(mv.dest()).is_none();
        if is_quiet_move && quiet_count < 64 {
            searched_quiets[quiet_count] = mv;
            quiet_count += 1;
        }

        ctx.stack[ply as usize].current_move = mv;
        ctx.stack[ply as usize].moved_piece = moved_piece;
        ctx.stack[ply as usize].cont_hist_index = Some(ContHistIndex {
            side: board.side_to_move(),
            piece: moved_piece,
            to: mv.dest(),
        });

        // ── Extensions ──────────────────────────────────────────────────────
        // Search an additional ply when in check, or when the TT move beats
        // every alternative by a wide margin (singular).
        let mut extension = in_check;

        if !extension && mv == tt_move && !is_root && depth >= SE_DEPTH
            && tt_depth + 3 >= depth && tt_bound != Bound::UpperBound
            && excluded.is_null() && tt_score.abs() < MATE_THRESHOLD
        {
            extension = move_is_singular(board, mv, depth, tt_score, ply, ctx);
        }

        let child = board.make_move(mv);
        move_count += 1;
        ctx.history.push(board.hash());

        let new_depth = if extension && !is_root {
            depth
        } else {
            depth.saturating_sub(1)
        };

        // ── PVS + LMR ───────────────────────────────────────────────────────
        let score;
        if move_count == 1 {
            // First move: full window, full depth
            score = -negamax(
                &child,
                -beta,
                -alpha,
                NodeParams {
                    depth: new_depth,
                    ply: ply + 1,
                    do_null: true,
                    excluded: Move::NULL,
                },
                ctx,
            );
        } else {
            let do_lmr = depth >= 3 && move_count >= 4 && !tactical && !in_check;

            let mut searched_depth = new_depth;

            if do_lmr {
                let mut r = lmr_reduction(move_count, depth as usize);

                r += !is_pv as i32;
                r += !improving as i32;

                let is_killer1_or_2 = ctx.killers.is_killer(ply as usize, mv);
                let is_counter_move = !counter.is_null() && mv == counter;
                if is_killer1_or_2 || is_counter_move {
                    r -= 1;
                }

                let hist = ctx.history_table.score(moved_piece, mv.dest().index());
                r -= (hist / 5000).clamp(-2, 2);

                let r = r.max(0) as u8;
                searched_depth = new_depth.saturating_sub(r);
            }

            // Null-window search at (possibly reduced) depth
            let mut sc = -negamax(
                &child,
                -alpha - 1,
                -alpha,
                NodeParams {
                    depth: searched_depth,
                    ply: ply + 1,
                    do_null: true,
                    excluded: Move::NULL,
                },
                ctx,
            );

            // Re-search at full depth if LMR reduced and score beats alpha
            if do_lmr && sc > alpha && searched_depth < new_depth {
                sc = -negamax(
                    &child,
                    -alpha - 1,
                    -alpha,
                    NodeParams {
                        depth: new_depth,
                        ply: ply + 1,
                        do_null: true,
                        excluded: Move::NULL,
                    },
                    ctx,
                );
            }

            // Full window re-search for PV nodes
            if sc > alpha && is_pv {
                sc = -negamax(
                    &child,
                    -beta,
                    -alpha,
                    NodeParams {
                        depth: new_depth,
                        ply: ply + 1,
                        do_null: true,
                        excluded: Move::NULL,
                    },
                    ctx,
                );
            }

            score = sc;
        }

        ctx.history.pop();

        if score > best_score {
            best_score = score;
            best_move = mv;
            if score > alpha {
                alpha = score;
                ctx.pv.update(ply as usize, mv);
            }
        }

        if alpha >= beta {
            ctx.stack[ply as usize].cutoff_count += 1;

            if is_quiet_move {
                ctx.killers.store(ply as usize, mv);
                if let Some((piece, to)) = prev_move_index(&ctx.stack, ply as usize) {
                    ctx.counter_moves.store(piece, to, mv);
                }

                let bonus = (depth as i32) * (depth as i32);

                ctx.history_table.update(moved_piece, mv.dest().index(), bonus);
                update_cont_history(
                    &mut ctx.cont_history,
                    &ctx.stack,
                    ply as usize,
                    moved_piece,
                    mv.dest().index(),
                    bonus,
                );

                // Penalise all previously searched quiets
                for i in 0..quiet_count.saturating_sub(1) {
                    let bad_mv = searched_quiets[i];
                    if let Some(bad_piece) = board.piece_on(bad_mv.source()) {
                        ctx.history_table.update(bad_piece, bad_mv.dest().index(), -bonus);
                        update_cont_history(
                            &mut ctx.cont_history,
                            &ctx.stack,
                            ply as usize,
                            bad_piece,
                            bad_mv.dest().index(),
                            -bonus,
                        );
                    }
                }
            }
            break;
        }
    }

    // TT store — skip during singular extension search
    if excluded.is_null() {
        let bound = if best_score <= original_alpha {
            Bound::UpperBound
        } else if best_score >= beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        };

        let store_move = if bound == Bound::UpperBound && best_move.is_null() {
            tt_move
        } else {
            best_move
        };
        ctx.tt.store(
            board.hash(),
            depth,
            best_score,
            raw_eval,
            store_move,
            bound,
            ply,
            is_pv || tt_is_pv,
        );
    }

    best_score
}

/// Verify whether `tt_move` is singular at this node: search every other
/// legal move on a reduced, negated window built from the TT score.
///
/// Returns `true` if every other move fails to reach `rbeta`, meaning
/// `tt_move` is the only move keeping the score this high.
fn move_is_singular(
    board: &Board,
    tt_move: Move,
    depth: u8,
    tt_score: i32,
    ply: u8,
    ctx: &mut SearchContext<'_>,
) -> bool {
    let rbeta = (tt_score - depth as i32).max(-MATE_SCORE);
    let singular_depth = depth / 2 - 1;

    let moves = generate_legal_moves(board);
    for i in 0..moves.len() {
        let mv = moves[i];
        if mv == tt_move {
            continue;
        }

        let child = board.make_move(mv);
        ctx.history.push(board.hash());
        let score = -negamax(
            &child,
            -rbeta - 1,
            -rbeta,
            NodeParams {
                depth: singular_depth,
                ply: ply + 1,
                do_null: false,
                excluded: Move::NULL,
            },
            ctx,
        );
        ctx.history.pop();

        if score > rbeta {
            return false;
        }
    }

    true
}

/// True if the position is a draw by the fifty-move rule, threefold (in
/// practice twofold, since search stops exploring once found) repetition,
/// or insufficient mating material.
fn is_drawn(board: &Board, ctx: &SearchContext<'_>, ply: u8) -> bool {
    if board.halfmove_clock() >= 100 {
        return true;
    }

    if ply > 0 {
        let hash = board.hash();
        let hmc = board.halfmove_clock() as usize;
        let len = ctx.history.len();
        let lookback = hmc.min(len);
        for i in (len.saturating_sub(lookback)..len).rev() {
            if ctx.history[i] == hash {
                return true;
            }
        }
    }

    is_insufficient_material(board)
}

/// True if neither side has enough material to deliver checkmate.
fn is_insufficient_material(board: &Board) -> bool {
    if (board.pieces(PieceKind::Pawn) | board.pieces(PieceKind::Rook) | board.pieces(PieceKind::Queen))
        .is_nonempty()
    {
        return false;
    }

    let minor_count = (board.pieces(PieceKind::Knight) | board.pieces(PieceKind::Bishop)).count();
    minor_count <= 1
}

/// Aspiration window search — wraps [`negamax`] with a narrow window
/// that widens on fail-high/fail-low.
///
/// For depths 1-4 or near-mate scores, uses a full window.
/// For deeper searches, starts with `delta = 50` centered on `prev_score`.
pub(super) fn aspiration_search(
    board: &Board,
    depth: u8,
    prev_score: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    let base_params = NodeParams {
        depth,
        ply: 0,
        do_null: true,
        excluded: Move::NULL,
    };

    // Full window for shallow depths or near-mate scores
    if depth <= 4 || prev_score.abs() >= MATE_THRESHOLD {
        return negamax(board, -INF, INF, base_params, ctx);
    }

    let mut delta: i32 = 50;
    let mut alpha = (prev_score - delta).max(-INF);
    let mut beta = (prev_score + delta).min(INF);

    loop {
        let score = negamax(board, alpha, beta, base_params, ctx);

        // Abort immediately if the search was stopped
        if ctx.control.should_stop(ctx.nodes) {
            return score;
        }

        if score <= alpha {
            // Fail low — widen alpha and halve beta toward alpha
            beta = (alpha + beta) / 2;
            delta += delta / 2;
            alpha = (prev_score - delta).max(-INF);
            if delta > INF {
                alpha = -INF;
                beta = INF;
            }
        } else if score >= beta {
            // Fail high — widen beta
            delta += delta / 2;
            beta = (prev_score + delta).min(INF);
            if delta > INF {
                alpha = -INF;
                beta = INF;
            }
        } else {
            // Score is within the window — done
            return score;
        }
    }
}

/// Quiescence search — resolve tactical sequences before evaluating.
///
/// Only considers captures and promotions (via [`MovePicker::new_qsearch`])
/// to avoid the horizon effect.
fn qsearch(board: &Board, ply: u8, mut alpha: i32, beta: i32, ctx: &mut SearchContext<'_>) -> i32 {
    ctx.nodes += 1;

    // Check stop condition (time limit, node limit, etc.)
    if ctx.control.should_stop(ctx.nodes) {
        return 0;
    }

    // Ply ceiling to prevent runaway recursion
    if ply as usize >= MAX_PLY {
        return evaluate(board);
    }

    if is_drawn(board, ctx, ply) {
        return ctx.draw_score(board);
    }

    // TT probe — even a shallow-depth entry is useful here since qsearch
    // never deepens further.
    if let Some(tt_entry) = ctx.tt.probe(board.hash(), ply) {
        let cutoff = match tt_entry.bound {
            Bound::Exact => true,
            Bound::LowerBound => tt_entry.score >= beta,
            Bound::UpperBound => tt_entry.score <= alpha,
            Bound::None => false,
        };
        if cutoff {
            return tt_entry.score;
        }
    }

    // Stand-pat: the side to move can choose not to capture
    let stand_pat = evaluate(board);
    if stand_pat >= beta {
        return stand_pat;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    // Delta pruning: even winning the best tactical shot on the board
    // can't recover enough to reach alpha.
    let margin = alpha - stand_pat - QSEARCH_FUTILITY_MARGIN;
    if best_tactical_move_value(board) < margin {
        return stand_pat;
    }

    let see_threshold = QSEARCH_SEE_MARGIN.max(margin);

    let moves = generate_legal_moves(board);
    let mut picker = MovePicker::new_qsearch(&moves, board);

    let mut best_score = stand_pat;

    while let Some(mv) = picker.pick_next() {
        if mv.kind() != MoveKind::Promotion && !see_ge(board, mv, see_threshold) {
            continue;
        }

        let child = board.make_move(mv);
        let score = -qsearch(&child, ply + 1, -beta, -alpha, ctx);

        if score > best_score {
            best_score = score;
        }
        if score >= beta {
            return score;
        }
        if score > alpha {
            alpha = score;
        }
    }

    best_score
}

/// Triangular PV table for collecting principal variation lines.
///
/// Stored on the stack (~33 KB). Each row `ply` contains the PV
/// continuation from that ply onward.
pub struct PvTable {
    moves: [[Move; MAX_PLY]; MAX_PLY],
    len: [usize; MAX_PLY],
}

impl PvTable {
    /// Create a zeroed PV table.
    pub fn new() -> Self {
        Self {
            moves: [[Move::NULL; MAX_PLY]; MAX_PLY],
            len: [0; MAX_PLY],
        }
    }

    /// Clear the PV line at `ply` (called at the top of each node).
    pub fn clear_ply(&mut self, ply: usize) {
        if ply < MAX_PLY {
            self.len[ply] = 0;
        }
    }

    /// Update the PV at `ply`: set `mv` as the best move and copy
    /// the continuation from `ply + 1`.
    ///
    /// After this call, `self.moves[ply]` = `[mv, pv[ply+1]...]`.
    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }

        self.moves[ply][0] = mv;

        let child_ply = ply + 1;
        if child_ply < MAX_PLY {
            let child_len = self.len[child_ply];
            let copy_len = child_len.min(MAX_PLY - 1);

            // Use split_at_mut for safe simultaneous borrow of two rows
            if ply < child_ply {
                let (top, bottom) = self.moves.split_at_mut(child_ply);
                top[ply][1..1 + copy_len].copy_from_slice(&bottom[0][..copy_len]);
            }

            self.len[ply] = 1 + copy_len;
        } else {
            self.len[ply] = 1;
        }
    }

    /// Set a single move as the PV at `ply` (no continuation).
    ///
    /// Used for TT cutoffs at the root.
    pub fn set_single(&mut self, ply: usize, mv: Move) {
        if ply < MAX_PLY {
            self.moves[ply][0] = mv;
            self.len[ply] = 1;
        }
    }

    /// The principal variation from the root.
    pub fn root_pv(&self) -> &[Move] {
        &self.moves[0][..self.len[0]]
    }

    /// Length of the root PV line.
    pub fn root_len(&self) -> usize {
        self.len[0]
    }
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Search state threaded through negamax calls.
pub(super) struct SearchContext<'a> {
    /// Total nodes visited.
    pub nodes: u64,
    /// Transposition table (shared, lockless).
    pub tt: &'a TranspositionTable,
    /// Principal variation table.
    pub pv: PvTable,
    /// Search control (stop flag + time limits).
    pub control: &'a SearchControl,
    /// Killer move table.
    pub killers: KillerTable,
    /// Counter-move table.
    pub counter_moves: CounterMoveTable,
    /// History heuristic table.
    pub history_table: HistoryTable,
    /// Continuation history table.
    pub cont_history: Box<ContinuationHistory>,
    /// Per-ply search stack.
    pub stack: [StackEntry; MAX_PLY],
    /// Zobrist hashes of positions visited during this search (for repetition detection).
    pub history: Vec<u64>,
    /// Contempt factor in centipawns — biases draw evaluation.
    pub contempt: i32,
    /// The color the engine is playing (for contempt sign).
    pub engine_color: Color,
}

impl SearchContext<'_> {
    /// Contempt-aware draw score for negamax.
    ///
    /// When the engine is to move, a draw scores `-contempt` (bad when
    /// contempt > 0). When the opponent is to move, it scores `+contempt`.
    #[inline]
    fn draw_score(&self, board: &Board) -> i32 {
        if board.side_to_move() == self.engine_color {
            -self.contempt
        } else {
            self.contempt
        }
    }
}
