//! Diagnostic tracing for the patrol binary.
//!
//! Results go to stdout; everything here goes to stderr and is controlled by
//! `RUST_LOG`, so piping the counts elsewhere is unaffected.

use patrol_core::{AgentState, Grid, Position};
use patrol_sim::PatrolObserver;
use tracing::{debug, info, trace};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`.  Defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=patrol_sim=trace,guard_patrol=debug cargo run -- map.txt --snapshot
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

/// Forwards simulator callbacks to `tracing` and tallies trials.
#[derive(Default)]
pub struct LoggingObserver {
    pub trials: usize,
}

impl PatrolObserver for LoggingObserver {
    fn on_baseline_end(&mut self, visited: usize, last: AgentState) {
        info!(visited, exit_from = %last, "guard left the grid");
    }

    fn on_snapshot(&mut self, grid: &Grid, agent: AgentState) {
        debug!("grid at exit:\n{}", grid.render(Some(agent)));
    }

    fn on_trial_end(&mut self, candidate: Position, looped: bool) {
        self.trials += 1;
        if looped {
            trace!(%candidate, "obstacle traps the guard");
        }
    }

    fn on_search_end(&mut self, found: usize) {
        info!(found, trials = self.trials, "obstacle search complete");
    }
}
