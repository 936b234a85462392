use std::time::{Duration, Instant};

use mazestep::{
    config::MazeConfig,
    maze::{Coord, Maze, get_rng},
    solvers::{Search, Solver},
};

/// Side length of the profiled mazes
const MAZE_SIZE: u8 = MazeConfig::MAX_DIMENSION;
const DEFAULT_ITERATIONS: u64 = 100;

#[derive(Debug, Default)]
struct Stats {
    solved: usize,
    unsolved: usize,
    steps: usize,
    path_length: usize,
    elapsed: Duration,
}

/// Seeds of the profiled mazes. Stops at `u64::MAX` instead of overflowing.
fn seed_range(first_seed: u64, iterations: u64) -> std::ops::Range<u64> {
    first_seed..first_seed.saturating_add(iterations)
}

/// Solves `iterations` seeded random mazes headless with every solver and prints totals.
/// Usage: profile [iterations] [first seed]
fn main() -> std::io::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let iterations = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_ITERATIONS);
    let first_seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);
    let floor_likelihood = MazeConfig::default().floor_likelihood;
    let seeds = seed_range(first_seed, iterations);

    println!(
        "Solving {} random {}x{} mazes (seeds {}..{})",
        seeds.end - seeds.start,
        MAZE_SIZE,
        MAZE_SIZE,
        seeds.start,
        seeds.end
    );

    for solver in Solver::ALL {
        let mut stats = Stats::default();
        for seed in seeds.clone() {
            let mut rng = get_rng(Some(seed));
            let mut maze = Maze::generate(MAZE_SIZE, MAZE_SIZE, floor_likelihood, &mut rng, None);

            let started = Instant::now();
            let mut search = Search::new(&maze, solver);
            let path = search.run_to_end(&mut maze, &mut |_: Coord| {});
            stats.elapsed += started.elapsed();
            stats.steps += search.steps();

            match path {
                Some(path) => {
                    stats.solved += 1;
                    stats.path_length += path.len().saturating_sub(1);
                }
                None => stats.unsolved += 1,
            }
        }

        let runs = (stats.solved + stats.unsolved).max(1);
        println!(
            "{:<32} solved {:>4} / {:<4} avg steps {:>8.1}  avg path {:>6.1}  avg time {:?}",
            solver.to_string(),
            stats.solved,
            runs,
            stats.steps as f64 / runs as f64,
            stats.path_length as f64 / stats.solved.max(1) as f64,
            stats.elapsed.div_f64(runs as f64),
        );
    }
    Ok(())
}
