//! Observer trait for progress reporting and debug snapshots.

use patrol_core::{AgentState, Grid, Position};

/// Callbacks invoked by [`PatrolSimulator`][crate::PatrolSimulator] at key
/// points of the baseline walk and the obstacle search.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// With the `parallel` feature, trial callbacks are replayed after all trials
/// finish, still once per candidate and in ascending position order.
///
/// # Example — trial counter
///
/// ```rust,ignore
/// struct LoopPrinter;
///
/// impl PatrolObserver for LoopPrinter {
///     fn on_trial_end(&mut self, candidate: Position, looped: bool) {
///         if looped {
///             println!("obstacle at {candidate} traps the guard");
///         }
///     }
/// }
/// ```
pub trait PatrolObserver {
    /// Called once the baseline walk has left the grid.
    ///
    /// `visited` is the distinct-cell count; `last` the final in-bounds state.
    fn on_baseline_end(&mut self, _visited: usize, _last: AgentState) {}

    /// Called right after `on_baseline_end` when `PatrolConfig::snapshots` is
    /// set.  `agent` is drawn on top of `grid`.
    fn on_snapshot(&mut self, _grid: &Grid, _agent: AgentState) {}

    /// Called before each obstacle trial.
    fn on_trial_start(&mut self, _candidate: Position) {}

    /// Called after each obstacle trial with its verdict.
    fn on_trial_end(&mut self, _candidate: Position, _looped: bool) {}

    /// Called once after every candidate has been tried.
    fn on_search_end(&mut self, _found: usize) {}
}

/// A [`PatrolObserver`] that does nothing.  Use when you need to call an
/// observed method but don't want callbacks.
pub struct NoopObserver;

impl PatrolObserver for NoopObserver {}
