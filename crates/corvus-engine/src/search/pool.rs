//! Lazy SMP thread pool for parallel search.

use std::sync::atomic::{AtomicU64, Ordering};

use corvus_core::{Board, Move, generate_legal_moves};

use crate::evaluate;
use crate::search::control::SearchControl;
use crate::search::heuristics::{
    ContinuationHistory, CounterMoveTable, HistoryTable, KillerTable, StackEntry,
};
use crate::search::negamax::{INF, MAX_PLY, PvTable, SearchContext, aspiration_search};
use crate::search::tt::TranspositionTable;
use crate::search::SearchResult;
use crate::search::StabilityTracker;

/// Number of distinct helper-thread skip cycles.
const SMP_CYCLES: usize = 4;

/// How many extra depths a helper jumps when its cycle fires.
const SKIP_SIZE: [u8; SMP_CYCLES] = [1, 1, 2, 1];

/// Cycle length: a helper on cycle `c` fires every `SKIP_DEPTHS[c]` depths.
const SKIP_DEPTHS: [u8; SMP_CYCLES] = [1, 2, 1, 3];

/// Build a fresh per-worker search context rooted at `board`.
fn new_context<'a>(
    tt: &'a TranspositionTable,
    control: &'a SearchControl,
    board: &Board,
    history: &[u64],
) -> SearchContext<'a> {
    SearchContext {
        nodes: 0,
        tt,
        pv: PvTable::new(),
        control,
        killers: KillerTable::new(),
        counter_moves: CounterMoveTable::new(),
        history_table: HistoryTable::new(),
        cont_history: Box::new(ContinuationHistory::new()),
        stack: [StackEntry::EMPTY; MAX_PLY],
        history: history.to_vec(),
        contempt: 0,
        engine_color: board.side_to_move(),
    }
}

/// Lazy SMP thread pool — owns the shared transposition table.
pub struct ThreadPool {
    tt: TranspositionTable,
    num_threads: usize,
}

impl ThreadPool {
    /// Create a new thread pool with `hash_mb` MB transposition table.
    pub fn new(hash_mb: usize) -> Self {
        Self {
            tt: TranspositionTable::new(hash_mb),
            num_threads: 1,
        }
    }

    /// Set the number of search threads.
    pub fn set_num_threads(&mut self, n: usize) {
        self.num_threads = n.max(1);
    }

    /// Resize the transposition table.
    pub fn resize_tt(&mut self, mb: usize) {
        self.tt = TranspositionTable::new(mb);
    }

    /// Clear the transposition table.
    pub fn clear_tt(&self) {
        self.tt.clear();
    }

    /// Run a Lazy SMP search.
    ///
    /// Thread 0 runs full iterative deepening with the `on_iter` callback for UCI output.
    /// Threads 1..N-1 run silent iterative deepening, contributing only to the shared TT.
    /// Uses `std::thread::scope` — no `Arc` needed on the TT.
    pub fn search<F>(
        &self,
        board: &Board,
        max_depth: u8,
        control: &SearchControl,
        history: &[u64],
        mut on_iter: F,
    ) -> SearchResult
    where
        F: FnMut(u8, i32, u64, &[Move]),
    {
        self.tt.new_generation();

        // Forced move at the root: no alternatives to weigh, so searching
        // would only burn time without changing the decision.
        let root_moves = generate_legal_moves(board);
        if root_moves.len() == 1 {
            let mv = root_moves[0];
            return SearchResult {
                best_move: mv,
                ponder_move: None,
                pv: vec![mv],
                score: evaluate(board),
                nodes: 0,
                depth: 0,
            };
        }

        if self.num_threads <= 1 {
            // Single-thread fast path — no scope overhead
            return self.search_single(board, max_depth, control, history, on_iter);
        }

        // Shared node counters — one AtomicU64 per thread to avoid contention
        let node_counters: Vec<AtomicU64> = (0..self.num_threads)
            .map(|_| AtomicU64::new(0))
            .collect();

        let mut result = SearchResult {
            best_move: Move::NULL,
            ponder_move: None,
            pv: vec![Move::NULL],
            score: -INF,
            nodes: 0,
            depth: 0,
        };

        std::thread::scope(|s| {
            // Spawn N-1 helper threads (thread_id 1..num_threads)
            for (thread_id, node_counter) in node_counters.iter().enumerate().skip(1) {
                let tt = &self.tt;
                s.spawn(move || {
                    run_helper(thread_id, tt, board, max_depth, control, node_counter, history);
                });
            }

            // Thread 0 runs on this thread (the coordinator)
            result = self.search_main(board, max_depth, control, history, &mut on_iter, &node_counters[0]);
        });
        // scope auto-joins all helpers here

        // Sum node counts from all threads
        let total_nodes: u64 = node_counters
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .sum();
        result.nodes = total_nodes;

        result
    }

    /// Single-thread fast path — no scope overhead.
    fn search_single<F>(
        &self,
        board: &Board,
        max_depth: u8,
        control: &SearchControl,
        history: &[u64],
        mut on_iter: F,
    ) -> SearchResult
    where
        F: FnMut(u8, i32, u64, &[Move]),
    {
        let mut ctx = new_context(&self.tt, control, board, history);

        let mut completed_move = Move::NULL;
        let mut completed_score = -INF;
        let mut completed_depth: u8 = 0;
        let mut completed_pv: Vec<Move> = Vec::new();
        let mut prev_score: i32 = 0;
        let mut stability = StabilityTracker::new();

        for depth in 1..=max_depth {
            if control.should_stop_iterating() {
                break;
            }

            let score = aspiration_search(board, depth, prev_score, &mut ctx);

            if control.should_stop(ctx.nodes) {
                break;
            }

            prev_score = score;

            let pv = ctx.pv.root_pv();
            if !pv.is_empty() && !pv[0].is_null() {
                completed_move = pv[0];
            }
            completed_score = score;
            completed_depth = depth;
            completed_pv = pv.iter().copied().filter(|m| !m.is_null()).collect();

            on_iter(depth, score, ctx.nodes, &completed_pv);

            let scale = stability.update(completed_move, score);
            control.update_soft_scale(scale);
        }

        let ponder_move = if completed_pv.len() > 1 {
            Some(completed_pv[1])
        } else {
            None
        };

        SearchResult {
            best_move: completed_move,
            ponder_move,
            pv: if completed_pv.is_empty() {
                vec![completed_move]
            } else {
                completed_pv
            },
            score: completed_score,
            nodes: ctx.nodes,
            depth: completed_depth,
        }
    }

    /// Thread 0 search — same as single, but stores final node count to an atomic counter.
    fn search_main<F>(
        &self,
        board: &Board,
        max_depth: u8,
        control: &SearchControl,
        history: &[u64],
        on_iter: &mut F,
        node_counter: &AtomicU64,
    ) -> SearchResult
    where
        F: FnMut(u8, i32, u64, &[Move]),
    {
        let mut ctx = new_context(&self.tt, control, board, history);

        let mut completed_move = Move::NULL;
        let mut completed_score = -INF;
        let mut completed_depth: u8 = 0;
        let mut completed_pv: Vec<Move> = Vec::new();
        let mut prev_score: i32 = 0;
        let mut stability = StabilityTracker::new();

        for depth in 1..=max_depth {
            if control.should_stop_iterating() {
                break;
            }

            let score = aspiration_search(board, depth, prev_score, &mut ctx);

            if control.should_stop(ctx.nodes) {
                break;
            }

            prev_score = score;

            let pv = ctx.pv.root_pv();
            if !pv.is_empty() && !pv[0].is_null() {
                completed_move = pv[0];
            }
            completed_score = score;
            completed_depth = depth;
            completed_pv = pv.iter().copied().filter(|m| !m.is_null()).collect();

            on_iter(depth, score, ctx.nodes, &completed_pv);

            let scale = stability.update(completed_move, score);
            control.update_soft_scale(scale);
        }

        node_counter.store(ctx.nodes, Ordering::Relaxed);

        let ponder_move = if completed_pv.len() > 1 {
            Some(completed_pv[1])
        } else {
            None
        };

        SearchResult {
            best_move: completed_move,
            ponder_move,
            pv: if completed_pv.is_empty() {
                vec![completed_move]
            } else {
                completed_pv
            },
            score: completed_score,
            nodes: ctx.nodes,
            depth: completed_depth,
        }
    }
}

/// Silent helper thread for Lazy SMP — writes to TT only, no UCI output.
fn run_helper(
    thread_id: usize,
    tt: &TranspositionTable,
    board: &Board,
    max_depth: u8,
    control: &SearchControl,
    node_counter: &AtomicU64,
    history: &[u64],
) {
    let mut ctx = new_context(tt, control, board, history);

    // Helper skip schedule: workers on different cycles explore staggered
    // depths so the pool diversifies the tree instead of duplicating work.
    let cycle = thread_id % SMP_CYCLES;
    let mut prev_score: i32 = 0;
    let mut depth: u8 = 1;

    while depth <= max_depth {
        if control.should_stop_iterating() {
            break;
        }

        let score = aspiration_search(board, depth, prev_score, &mut ctx);

        if control.should_stop(ctx.nodes) {
            break;
        }

        prev_score = score;

        depth += 1;
        if (depth as usize + cycle) as u8 % SKIP_DEPTHS[cycle] == 0 {
            depth += SKIP_SIZE[cycle];
        }
    }

    node_counter.store(ctx.nodes, Ordering::Relaxed);
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("tt", &self.tt)
            .field("num_threads", &self.num_threads)
            .finish()
    }
}

impl Default for ThreadPool {
    fn default() -> Self {
        Self::new(16)
    }
}
