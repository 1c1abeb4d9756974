#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::io::{self, BufWriter, Write};
use std::process;

use lockstep_life::io::{read_board, write_board};
use lockstep_life::{LifeError, LockstepLife, LockstepLifeConfig, PartitionPolicy};

/// What lands on stdout.
#[derive(Clone, Copy, PartialEq, Eq)]
enum PrintMode {
    /// Nothing.
    Quiet,
    /// `Final:` and the last generation.
    Result,
    /// The initial board, every generation as it completes, and the final
    /// board.
    Debug,
}

struct MainArgs {
    workers: Option<usize>,
    policy: PartitionPolicy,
    print: PrintMode,
}

fn parse_args() -> MainArgs {
    let mut args = MainArgs {
        workers: None,
        policy: PartitionPolicy::StaticRange,
        print: PrintMode::Result,
    };
    let mut raw = std::env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--policy" => {
                args.policy = match raw.next().as_deref() {
                    Some("static") => PartitionPolicy::StaticRange,
                    Some("dynamic") => PartitionPolicy::DynamicClaim,
                    other => usage(&format!("--policy takes static|dynamic, got {other:?}")),
                }
            }
            "--print" => {
                args.print = match raw.next().as_deref() {
                    Some("quiet") => PrintMode::Quiet,
                    Some("result") => PrintMode::Result,
                    Some("debug") => PrintMode::Debug,
                    other => usage(&format!("--print takes quiet|result|debug, got {other:?}")),
                }
            }
            "--help" | "-h" => usage(""),
            positional => match positional.parse() {
                Ok(workers) => args.workers = Some(workers),
                Err(_) => usage(&format!("unknown argument `{positional}`")),
            },
        }
    }
    args
}

fn usage(problem: &str) -> ! {
    if !problem.is_empty() {
        eprintln!("lockstep-life: {problem}");
    }
    eprintln!(
        "usage: lockstep-life [WORKERS] [--policy static|dynamic] [--print quiet|result|debug] < board.txt"
    );
    eprintln!("reads a `size steps` header and a size x size grid ('x' = alive) from stdin");
    process::exit(2);
}

fn run(args: &MainArgs) -> Result<(), LifeError> {
    let stdin = io::stdin();
    let (board, steps) = read_board(stdin.lock())?;

    let mut config = LockstepLifeConfig::default().policy(args.policy);
    if let Some(workers) = args.workers {
        config = config.worker_count(workers);
    }
    let mut engine = LockstepLife::with_config(board, config)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match args.print {
        PrintMode::Quiet => engine.run(steps)?,
        PrintMode::Result => {
            engine.run(steps)?;
            writeln!(out, "Final:")?;
            write_board(&mut out, engine.board())?;
        }
        PrintMode::Debug => {
            writeln!(out, "Initial:")?;
            write_board(&mut out, engine.board())?;
            for generation in 1..=steps {
                engine.run(1)?;
                writeln!(out, "{generation} ----------")?;
                write_board(&mut out, engine.board())?;
            }
            writeln!(out, "Final:")?;
            write_board(&mut out, engine.board())?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();
    let args = parse_args();
    if let Err(err) = run(&args) {
        eprintln!("lockstep-life: {err}");
        process::exit(1);
    }
}
