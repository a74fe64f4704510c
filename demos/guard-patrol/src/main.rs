//! guard-patrol — run the patrol simulator over a map file.
//!
//! Prints two lines: the number of distinct cells the guard visits before
//! leaving the map, then the number of single-obstacle placements that trap
//! it in a loop.  With no map argument the built-in 10×10 example is used,
//! which prints 41 and 6.

mod logging;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use patrol_core::{PatrolConfig, load_map_file, parse_map};
use patrol_sim::PatrolBuilder;

use logging::LoggingObserver;

// ── Built-in map ──────────────────────────────────────────────────────────────

const EXAMPLE_MAP: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Simulate a patrolling guard and count trapping obstacles")]
struct Args {
    /// Map file: `.` empty, `#` obstacle, one of `^ > v <` for the guard.
    map: Option<PathBuf>,

    /// Worker threads for the obstacle search (needs the `parallel` feature).
    #[arg(long)]
    threads: Option<usize>,

    /// Log a grid snapshot at debug level when the guard leaves the map.
    #[arg(long)]
    snapshot: bool,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let map = match &args.map {
        Some(path) => load_map_file(path)
            .with_context(|| format!("loading map {}", path.display()))?,
        None => parse_map(EXAMPLE_MAP)?,
    };
    tracing::debug!(
        height = map.grid.height(),
        width = map.grid.width(),
        start = %map.start,
        "map loaded"
    );

    let config = PatrolConfig { num_threads: args.threads, snapshots: args.snapshot };
    let mut sim = PatrolBuilder::new(map.grid, map.start).config(config).build()?;

    let mut obs = LoggingObserver::default();
    let t0 = Instant::now();
    let report = sim.run(&mut obs)?;
    tracing::info!(elapsed_ms = t0.elapsed().as_millis() as u64, "simulation complete");

    println!("{}", report.visited_cells);
    println!("{}", report.loop_obstacles);
    Ok(())
}
