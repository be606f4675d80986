//! Solve 7^t ≡ 19 (mod 30) on the local simulator
//!
//! Run with `RUST_LOG=qdlog=debug` to see each circuit and subproblem.
//! Optional arguments: `a b n [seed]`.

use qdlog::{DiscreteLogSolver, SolverConfig};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qdlog=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<u64> = std::env::args()
        .skip(1)
        .map(|arg| arg.parse())
        .collect::<Result<_, _>>()?;
    let (a, b, n) = match args.as_slice() {
        [a, b, n, ..] => (*a, *b, *n),
        _ => (7, 19, 30),
    };

    let mut config = SolverConfig::new();
    if let Some(&seed) = args.get(3) {
        config = config.with_seed(seed);
    }

    println!("qdlog discrete logarithm demo");
    println!("=============================");
    println!("{}^t = {} (mod {})", a, b, n);

    let start = Instant::now();
    let outcome = DiscreteLogSolver::local(config).solve(a, b, n)?;
    let elapsed = start.elapsed();

    match outcome.exponent {
        Some(t) => println!("t = {} after {} trials ({:?})", t, outcome.trials, elapsed),
        None => println!("no logarithm found after {} trials ({:?})", outcome.trials, elapsed),
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
