//! Lock-step engine: a fixed pool of OS worker threads advancing the board
//! one synchronized generation at a time.
//!
//! Each worker computes the rows it owns under the partition policy, then
//! enters the generation barrier. The elected worker swaps the buffers,
//! decrements the remaining-generation counter, and rearms the claim
//! counter; the second barrier phase releases everyone into the next
//! generation. The remaining counter only changes inside that serial
//! section, so the loop-top check reads the same value in every worker and
//! the barrier's party count never changes mid-run.

use std::ops::Range;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use log::debug;

use crate::error::{LifeError, Result};
use crate::lockstep::board::Board;
use crate::lockstep::partition::{ClaimCounter, PartitionPolicy, static_range};
use crate::lockstep::rules;
use crate::lockstep::sync::GenerationBarrier;

static PHYSICAL_CORES: OnceLock<usize> = OnceLock::new();

fn physical_core_count() -> usize {
    *PHYSICAL_CORES.get_or_init(num_cpus::get_physical)
}

/// Tuning knobs for [`LockstepLife`].
#[derive(Clone, Debug, Default)]
pub struct LockstepLifeConfig {
    /// Exact number of worker threads. `None` picks one per physical core,
    /// capped at the board size. `Some(0)` is rejected with
    /// [`LifeError::Deadlock`]: a zero-party barrier can never release.
    pub worker_count: Option<usize>,
    /// Hard upper bound on the resolved worker count.
    pub max_workers: Option<usize>,
    /// Row ownership policy.
    pub policy: PartitionPolicy,
}

impl LockstepLifeConfig {
    pub fn worker_count(mut self, workers: usize) -> Self {
        self.worker_count = Some(workers);
        self
    }

    pub fn max_workers(mut self, cap: usize) -> Self {
        self.max_workers = Some(cap);
        self
    }

    pub fn policy(mut self, policy: PartitionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

fn resolve_worker_count(config: &LockstepLifeConfig, board_size: usize) -> Result<usize> {
    if config.worker_count == Some(0) {
        return Err(LifeError::Deadlock {
            message: "worker_count is 0; the generation barrier would never release".into(),
        });
    }
    if config.max_workers == Some(0) {
        return Err(LifeError::Deadlock {
            message: "max_workers is 0; the generation barrier would never release".into(),
        });
    }
    let mut workers = config
        .worker_count
        .unwrap_or_else(|| physical_core_count().clamp(1, board_size.max(1)));
    if let Some(cap) = config.max_workers {
        workers = workers.min(cap);
    }
    Ok(workers)
}

/// Lock-step Life engine owning the board and its worker configuration.
pub struct LockstepLife {
    board: Board,
    workers: usize,
    policy: PartitionPolicy,
    generation: u64,
}

impl LockstepLife {
    /// Engine with auto-detected worker count and the default policy.
    pub fn new(board: Board) -> Self {
        Self::with_config(board, LockstepLifeConfig::default())
            .expect("default configuration is always valid")
    }

    /// Engine with explicit configuration. Configuration errors surface
    /// here, before any worker thread exists.
    pub fn with_config(board: Board, config: LockstepLifeConfig) -> Result<Self> {
        let workers = resolve_worker_count(&config, board.size())?;
        Ok(Self {
            board,
            workers,
            policy: config.policy,
            generation: 0,
        })
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Total generations completed across all `run` calls.
    #[inline(always)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline(always)]
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    #[inline(always)]
    pub fn policy(&self) -> PartitionPolicy {
        self.policy
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Advances the board `steps` generations in lock-step.
    ///
    /// Spawns one OS thread per worker for the duration of the call and
    /// joins them all before returning; the final grid is always exposed as
    /// `current`, whichever physical buffer holds it. On error the board
    /// keeps the last fully computed generation and the failing worker's
    /// error is returned; a partially written generation is never exposed.
    pub fn run(&mut self, steps: u64) -> Result<()> {
        if steps == 0 {
            return Ok(());
        }
        debug!(
            "running {steps} generations: {}x{} board, {} workers, {:?} partition",
            self.board.size(),
            self.board.size(),
            self.workers,
            self.policy,
        );
        let shared = RunShared {
            board: &self.board,
            barrier: GenerationBarrier::new(self.workers),
            remaining: AtomicU64::new(steps),
            claim: ClaimCounter::new(self.board.size()),
            policy: self.policy,
            failure: OnceLock::new(),
        };
        let panicked = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.workers)
                .map(|worker| {
                    let shared = &shared;
                    let owned_rows = static_range(worker, self.workers, shared.board.size());
                    scope.spawn(move || worker_loop(owned_rows, shared))
                })
                .collect();
            let mut first_panic = None;
            for (worker, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() && first_panic.is_none() {
                    first_panic = Some(worker);
                }
            }
            first_panic
        });
        if let Some(worker) = panicked {
            return Err(LifeError::WorkerPanicked { worker });
        }
        if let Some(err) = shared.failure.into_inner() {
            return Err(err);
        }
        self.generation += steps;
        debug!("run complete: generation {}", self.generation);
        Ok(())
    }
}

/// Per-run state shared by every worker, owned by `run`'s stack frame and
/// borrowed through the thread scope.
struct RunShared<'a> {
    board: &'a Board,
    barrier: GenerationBarrier,
    remaining: AtomicU64,
    claim: ClaimCounter,
    policy: PartitionPolicy,
    failure: OnceLock<LifeError>,
}

fn worker_loop(owned_rows: Range<usize>, shared: &RunShared<'_>) {
    // The remaining counter only moves inside the serial section, so every
    // worker reads the same value here and all loop or all exit together.
    while shared.remaining.load(Ordering::Relaxed) > 0 {
        let outcome = match shared.policy {
            PartitionPolicy::StaticRange => compute_rows(shared.board, owned_rows.clone()),
            PartitionPolicy::DynamicClaim => compute_claimed(shared.board, &shared.claim),
        };
        if let Err(err) = outcome {
            let _ = shared.failure.set(err);
        }
        shared.barrier.lockstep(|| {
            if shared.failure.get().is_some() {
                // Abort without swapping: `current` keeps the last fully
                // computed generation and every worker observes 0 above.
                shared.remaining.store(0, Ordering::Relaxed);
            } else {
                shared.board.swap();
                shared.remaining.fetch_sub(1, Ordering::Relaxed);
                if shared.policy == PartitionPolicy::DynamicClaim {
                    shared.claim.reset();
                }
            }
        });
    }
}

fn compute_rows(board: &Board, rows: Range<usize>) -> Result<()> {
    for row in rows {
        compute_row(board, row)?;
    }
    Ok(())
}

fn compute_claimed(board: &Board, claim: &ClaimCounter) -> Result<()> {
    while let Some(row) = claim.claim() {
        compute_row(board, row)?;
    }
    Ok(())
}

fn compute_row(board: &Board, row: usize) -> Result<()> {
    for col in 0..board.size() {
        let alive = board.get(row, col)?;
        let neighbors = rules::count_live_neighbors(board, row, col)?;
        board.set_next(row, col, rules::next_state(alive, neighbors))?;
    }
    Ok(())
}
