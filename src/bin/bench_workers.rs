//! Worker scaling benchmark for both partition policies.
//!
//! Seeds one random board per measurement, then times `run` across worker
//! counts. Build with `--release`; debug timings are meaningless.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lockstep_life::{Board, LockstepLife, LockstepLifeConfig, PartitionPolicy};

const SIZE: usize = 512;
const DENSITY: f64 = 0.42;
const STEPS: u64 = 200;
const SEED: u64 = 0x5EED_CAFE;

fn seeded_board() -> Board {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut board = Board::allocate(SIZE).expect("bench board allocates");
    for row in 0..SIZE {
        for col in 0..SIZE {
            if rng.random::<f64>() < DENSITY {
                board
                    .set_cell(row, col, true)
                    .expect("bench cell is in bounds");
            }
        }
    }
    board
}

fn bench(policy: PartitionPolicy, workers: usize) -> (f64, u64) {
    let config = LockstepLifeConfig::default()
        .policy(policy)
        .worker_count(workers);
    let mut engine =
        LockstepLife::with_config(seeded_board(), config).expect("bench config is valid");
    let start = Instant::now();
    engine.run(STEPS).expect("bench run completes");
    let elapsed = start.elapsed().as_secs_f64();
    let updates = (SIZE * SIZE) as u64 * STEPS;
    std::hint::black_box(engine.board().population());
    (elapsed * 1e3, (updates as f64 / elapsed) as u64)
}

fn label(policy: PartitionPolicy) -> &'static str {
    match policy {
        PartitionPolicy::StaticRange => "static",
        PartitionPolicy::DynamicClaim => "dynamic",
    }
}

fn main() {
    env_logger::init();
    println!("lockstep-life worker scaling: {SIZE}x{SIZE} board, {STEPS} steps, density {DENSITY}");
    println!(
        "{:<10} {:>8} {:>12} {:>16}",
        "policy", "workers", "ms", "cells/s"
    );
    for policy in [PartitionPolicy::StaticRange, PartitionPolicy::DynamicClaim] {
        for workers in [1, 2, 4, 8] {
            let (ms, rate) = bench(policy, workers);
            println!("{:<10} {:>8} {:>12.1} {:>16}", label(policy), workers, ms, rate);
        }
    }
}
