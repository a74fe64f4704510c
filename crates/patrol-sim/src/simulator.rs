//! The `PatrolSimulator` struct: baseline walk and obstacle search.

use patrol_core::{AgentState, Grid, PatrolConfig, PatrolMap, Position};
use tracing::{debug, trace};

use crate::{
    NoopObserver, ObstaclePlacement, PatrolBuilder, PatrolObserver, SimError, SimResult,
    VisitedSet, WalkOutcome, Walker,
};

/// Both answers for one map.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct PatrolReport {
    /// Distinct cells the guard occupies before leaving the grid.
    pub visited_cells:  usize,
    /// Single-cell obstacle placements that trap the guard in a cycle.
    pub loop_obstacles: usize,
}

// ── PatrolSimulator ───────────────────────────────────────────────────────────

/// Owns the grid and the guard for one map.
///
/// Every public operation starts by resetting the guard to the parsed start
/// state, so calls are independent and repeatable.  After an operation the
/// guard is left where its last walk ended (see [`agent`][Self::agent]).
///
/// Create via [`PatrolBuilder`] or [`PatrolSimulator::from_map`].
#[derive(Debug)]
pub struct PatrolSimulator {
    /// Scheduling and snapshot options.
    pub config: PatrolConfig,

    grid:  Grid,
    start: AgentState,
    agent: AgentState,
}

impl PatrolSimulator {
    pub(crate) fn from_parts(grid: Grid, start: AgentState, config: PatrolConfig) -> Self {
        Self { config, grid, start, agent: start }
    }

    /// Build a simulator with default config from a parsed map.
    pub fn from_map(map: PatrolMap) -> SimResult<Self> {
        PatrolBuilder::new(map.grid, map.start).build()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> AgentState {
        self.start
    }

    /// The guard's current state.
    #[inline]
    pub fn agent(&self) -> AgentState {
        self.agent
    }

    /// Put the guard back on its start cell with its start facing.
    pub fn reset(&mut self) {
        self.agent = self.start;
    }

    /// Debug rendering of the grid with the guard drawn at its current state.
    pub fn snapshot(&self) -> String {
        self.grid.render(Some(self.agent))
    }

    // ── Part 1: visited cells ─────────────────────────────────────────────

    /// Distinct cells visited from the start until the guard leaves the grid,
    /// the start cell included.
    pub fn count_visited_cells(&mut self) -> SimResult<usize> {
        self.count_visited_cells_observed(&mut NoopObserver)
    }

    pub fn count_visited_cells_observed<O: PatrolObserver>(
        &mut self,
        observer: &mut O,
    ) -> SimResult<usize> {
        Ok(self.baseline(observer)?.len())
    }

    /// The baseline path's cells with their first-visit facings.
    pub fn visited_positions(&mut self) -> SimResult<VisitedSet> {
        self.baseline(&mut NoopObserver)
    }

    // ── Part 2: loop-inducing obstacles ───────────────────────────────────

    /// Number of baseline cells (start excluded) that trap the guard in a
    /// cycle when turned into an obstacle.
    pub fn count_loop_inducing_obstacles(&mut self) -> SimResult<usize> {
        self.count_loop_inducing_obstacles_observed(&mut NoopObserver)
    }

    pub fn count_loop_inducing_obstacles_observed<O: PatrolObserver>(
        &mut self,
        observer: &mut O,
    ) -> SimResult<usize> {
        Ok(self.loop_inducing_obstacles(observer)?.len())
    }

    /// The trapping positions themselves, in ascending order.
    pub fn loop_inducing_obstacles<O: PatrolObserver>(
        &mut self,
        observer: &mut O,
    ) -> SimResult<Vec<Position>> {
        let visited = self.baseline(observer)?;
        self.search(&visited, observer)
    }

    /// Run both parts, sharing a single baseline walk.
    pub fn run<O: PatrolObserver>(&mut self, observer: &mut O) -> SimResult<PatrolReport> {
        let visited = self.baseline(observer)?;
        let found = self.search(&visited, observer)?;
        Ok(PatrolReport { visited_cells: visited.len(), loop_obstacles: found.len() })
    }

    // ── Loop checks ───────────────────────────────────────────────────────

    /// Does the guard cycle forever on the grid as it stands?
    pub fn detects_loop(&mut self) -> SimResult<bool> {
        self.reset();
        let outcome = Walker::new(&self.grid, self.start).detect_loop()?;
        self.settle(outcome);
        Ok(outcome.is_loop())
    }

    /// Single trial: would an extra obstacle at `candidate` trap the guard?
    ///
    /// The grid is identical before and after the call.
    pub fn loops_with_obstacle_at(&mut self, candidate: Position) -> SimResult<bool> {
        if candidate == self.start.position {
            return Err(SimError::CandidateIsStart(candidate));
        }
        if !self.grid.contains(candidate) {
            return Err(SimError::CandidateOutOfBounds(candidate));
        }
        self.reset();
        let outcome = trial(&mut self.grid, self.start, candidate)?;
        self.settle(outcome);
        Ok(outcome.is_loop())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn settle(&mut self, outcome: WalkOutcome) {
        self.agent = match outcome {
            WalkOutcome::Exited { last, .. }     => last,
            WalkOutcome::Looped { repeated, .. } => repeated,
        };
    }

    fn baseline<O: PatrolObserver>(&mut self, observer: &mut O) -> SimResult<VisitedSet> {
        self.reset();
        let mut visited = VisitedSet::new();
        let mut walker = Walker::new(&self.grid, self.start);
        let last = walker.trace(&mut visited)?;
        let steps = walker.steps();
        self.agent = last;

        debug!(visited = visited.len(), steps, last = %last, "baseline walk left the grid");
        observer.on_baseline_end(visited.len(), last);
        if self.config.snapshots {
            observer.on_snapshot(&self.grid, last);
        }
        Ok(visited)
    }

    /// Try every baseline cell except the start.  Only cells on the baseline
    /// path can change it, so no other placement needs a trial.
    fn search<O: PatrolObserver>(
        &mut self,
        visited:  &VisitedSet,
        observer: &mut O,
    ) -> SimResult<Vec<Position>> {
        let start = self.start;
        let candidates: Vec<Position> = visited
            .positions()
            .into_iter()
            .filter(|&p| p != start.position)
            .collect();
        debug!(candidates = candidates.len(), "starting obstacle search");

        let mut found = Vec::new();

        #[cfg(not(feature = "parallel"))]
        {
            for &candidate in &candidates {
                self.reset();
                observer.on_trial_start(candidate);
                let outcome = trial(&mut self.grid, start, candidate)?;
                self.settle(outcome);
                trace!(%candidate, looped = outcome.is_loop(), steps = outcome.steps(), "trial");
                observer.on_trial_end(candidate, outcome.is_loop());
                if outcome.is_loop() {
                    found.push(candidate);
                }
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.num_threads.unwrap_or(0))
                .build()
                .map_err(|e| SimError::ThreadPool(e.to_string()))?;

            // Each trial mutates its own copy; the shared grid is only read.
            let grid = &self.grid;
            let outcomes: Vec<WalkOutcome> = pool.install(|| {
                candidates
                    .par_iter()
                    .map(|&candidate| {
                        let mut private = grid.clone();
                        trial(&mut private, start, candidate)
                    })
                    .collect::<SimResult<Vec<_>>>()
            })?;

            // Replay in ascending candidate order so observers see the same
            // sequence as a sequential run.
            for (&candidate, outcome) in candidates.iter().zip(outcomes) {
                observer.on_trial_start(candidate);
                trace!(%candidate, looped = outcome.is_loop(), steps = outcome.steps(), "trial");
                observer.on_trial_end(candidate, outcome.is_loop());
                if outcome.is_loop() {
                    found.push(candidate);
                }
            }
            self.reset();
        }

        debug!(found = found.len(), tried = candidates.len(), "obstacle search finished");
        observer.on_search_end(found.len());
        Ok(found)
    }
}

/// Place an obstacle at `candidate`, walk from `start`, and restore the cell.
fn trial(grid: &mut Grid, start: AgentState, candidate: Position) -> SimResult<WalkOutcome> {
    let placed = ObstaclePlacement::new(grid, candidate);
    Walker::new(&placed, start).detect_loop()
}
