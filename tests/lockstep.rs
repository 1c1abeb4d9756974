use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;

use lockstep_life::{Board, LifeError, LockstepLife, LockstepLifeConfig, PartitionPolicy};

const POLICIES: [PartitionPolicy; 2] = [PartitionPolicy::StaticRange, PartitionPolicy::DynamicClaim];
const BLINKER: [(usize, usize); 3] = [(2, 1), (2, 2), (2, 3)];

fn board_with(size: usize, cells: &[(usize, usize)]) -> Board {
    let mut board = Board::allocate(size).expect("test board allocates");
    for &(row, col) in cells {
        board.set_cell(row, col, true).expect("test cell in bounds");
    }
    board
}

fn random_board(size: usize, density: f64, seed: u64) -> Board {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut board = Board::allocate(size).expect("test board allocates");
    for row in 0..size {
        for col in 0..size {
            if rng.random::<f64>() < density {
                board.set_cell(row, col, true).expect("test cell in bounds");
            }
        }
    }
    board
}

fn collect_live(board: &Board) -> HashSet<(usize, usize)> {
    let mut out = HashSet::new();
    board.for_each_live(|row, col| {
        out.insert((row, col));
    });
    out
}

fn assert_alive(board: &Board, cells: &[(usize, usize)]) {
    for &(row, col) in cells {
        assert!(
            board.get(row, col).unwrap(),
            "expected alive at ({row},{col})"
        );
    }
}

fn assert_dead(board: &Board, cells: &[(usize, usize)]) {
    for &(row, col) in cells {
        assert!(
            !board.get(row, col).unwrap(),
            "expected dead at ({row},{col})"
        );
    }
}

fn run_steps(board: Board, steps: u64, workers: usize, policy: PartitionPolicy) -> Board {
    let config = LockstepLifeConfig::default()
        .worker_count(workers)
        .policy(policy);
    let mut engine = LockstepLife::with_config(board, config).expect("test config is valid");
    engine.run(steps).expect("test run completes");
    engine.into_board()
}

/// Single-threaded reference stepper with the same clamped bounded grid.
fn step_naive(size: usize, cells: &HashSet<(usize, usize)>) -> HashSet<(usize, usize)> {
    let mut next = HashSet::new();
    for row in 0..size {
        for col in 0..size {
            let mut neighbors = 0;
            for r in row.saturating_sub(1)..=(row + 1).min(size - 1) {
                for c in col.saturating_sub(1)..=(col + 1).min(size - 1) {
                    if (r, c) != (row, col) && cells.contains(&(r, c)) {
                        neighbors += 1;
                    }
                }
            }
            let alive = cells.contains(&(row, col));
            if neighbors == 3 || (alive && neighbors == 2) {
                next.insert((row, col));
            }
        }
    }
    next
}

#[test]
fn blinker_oscillates_for_every_worker_count() {
    let horizontal: HashSet<_> = BLINKER.into_iter().collect();
    let vertical: HashSet<_> = [(1, 2), (2, 2), (3, 2)].into_iter().collect();
    for policy in POLICIES {
        for workers in 1..=5 {
            let stepped = run_steps(board_with(5, &BLINKER), 1, workers, policy);
            assert_eq!(
                collect_live(&stepped),
                vertical,
                "one step, {workers} workers, {policy:?}"
            );
            let returned = run_steps(board_with(5, &BLINKER), 2, workers, policy);
            assert_eq!(
                collect_live(&returned),
                horizontal,
                "two steps, {workers} workers, {policy:?}"
            );
        }
    }
}

#[test]
fn block_is_stable() {
    let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
    for policy in POLICIES {
        let board = run_steps(board_with(4, &block), 6, 2, policy);
        assert_alive(&board, &block);
        assert_dead(&board, &[(0, 0), (0, 3), (3, 0), (3, 3)]);
        assert_eq!(board.population(), 4, "{policy:?}");
    }
}

#[test]
fn zero_steps_leaves_the_board_untouched() {
    for policy in POLICIES {
        let board = random_board(16, 0.5, 7);
        let before = collect_live(&board);
        let config = LockstepLifeConfig::default().worker_count(4).policy(policy);
        let mut engine = LockstepLife::with_config(board, config).unwrap();
        engine.run(0).unwrap();
        assert_eq!(engine.generation(), 0);
        assert_eq!(collect_live(engine.board()), before, "{policy:?}");
    }
}

#[test]
fn single_worker_matches_one_worker_per_row() {
    let size = 32;
    for policy in POLICIES {
        let narrow = run_steps(random_board(size, 0.42, 11), 24, 1, policy);
        let wide = run_steps(random_board(size, 0.42, 11), 24, size, policy);
        assert_eq!(collect_live(&narrow), collect_live(&wide), "{policy:?}");
    }
}

#[test]
fn matches_naive_on_small_random_seed() {
    let size = 20;
    for policy in POLICIES {
        let board = random_board(size, 0.35, 0xBADC_0FFE);
        let mut naive = collect_live(&board);
        let config = LockstepLifeConfig::default().worker_count(3).policy(policy);
        let mut engine = LockstepLife::with_config(board, config).unwrap();
        for step in 0..12 {
            assert_eq!(collect_live(engine.board()), naive, "step {step}, {policy:?}");
            engine.run(1).unwrap();
            naive = step_naive(size, &naive);
        }
        assert_eq!(collect_live(engine.board()), naive, "{policy:?}");
    }
}

#[test]
fn edge_patterns_clamp_instead_of_wrapping() {
    // A vertical triple against the left edge collapses in two steps under
    // clamped boundaries; a wrapping grid would seed births on the far
    // column and keep it alive.
    let bar = [(1, 0), (2, 0), (3, 0)];
    for policy in POLICIES {
        let one = run_steps(board_with(5, &bar), 1, 2, policy);
        assert_eq!(
            collect_live(&one),
            [(2, 0), (2, 1)].into_iter().collect(),
            "{policy:?}"
        );
        let two = run_steps(board_with(5, &bar), 2, 2, policy);
        assert!(collect_live(&two).is_empty(), "{policy:?}");
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    for policy in POLICIES {
        let reference = collect_live(&run_steps(random_board(64, 0.42, 0xD37E_A515), 50, 8, policy));
        for attempt in 0..20 {
            let repeat = collect_live(&run_steps(random_board(64, 0.42, 0xD37E_A515), 50, 8, policy));
            assert_eq!(repeat, reference, "attempt {attempt}, {policy:?}");
        }
    }
}

#[test]
fn zero_workers_fails_fast_with_deadlock() {
    let config = LockstepLifeConfig::default().worker_count(0);
    let err = LockstepLife::with_config(board_with(4, &[]), config)
        .err()
        .expect("zero workers must be rejected");
    assert!(matches!(err, LifeError::Deadlock { .. }), "got {err}");
}

#[test]
fn more_workers_than_rows_is_legal() {
    for policy in POLICIES {
        let crowded = run_steps(board_with(5, &BLINKER), 3, 9, policy);
        let reference = run_steps(board_with(5, &BLINKER), 3, 1, policy);
        assert_eq!(
            collect_live(&crowded),
            collect_live(&reference),
            "{policy:?}"
        );
    }
}

#[test]
fn generation_counter_accumulates_across_runs() {
    let config = LockstepLifeConfig::default().worker_count(2);
    let mut engine = LockstepLife::with_config(board_with(8, &[(4, 4)]), config).unwrap();
    engine.run(3).unwrap();
    engine.run(2).unwrap();
    assert_eq!(engine.generation(), 5);
}

#[test]
fn single_cell_dies_of_isolation() {
    for policy in POLICIES {
        let board = run_steps(board_with(3, &[(1, 1)]), 1, 3, policy);
        assert_eq!(board.population(), 0, "{policy:?}");
    }
}

#[test]
fn one_by_one_board_runs() {
    for policy in POLICIES {
        let board = run_steps(board_with(1, &[(0, 0)]), 4, 1, policy);
        assert_eq!(board.population(), 0, "{policy:?}");
    }
}
