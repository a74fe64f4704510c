//! The patrol state machine.
//!
//! A [`Walker`] borrows a grid read-only and owns the guard's current
//! [`AgentState`].  Each call to [`Walker::step`] applies exactly one
//! transition.  The two drivers, [`Walker::trace`] and
//! [`Walker::detect_loop`], differ only in what they record and when they
//! stop.

use patrol_core::{AgentState, Grid};

use crate::visited::StateSet;
use crate::{SimError, SimResult, VisitedSet};

/// One application of the walk rule.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Transition {
    /// The cell ahead was free; the guard moved into it.
    Advance,
    /// The cell ahead was an obstacle; the guard turned clockwise in place.
    Rotate,
    /// The cell ahead is outside the grid.  The guard leaves; state unchanged.
    Exit,
}

/// How a loop-detecting walk ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WalkOutcome {
    /// The guard stepped off the grid from `last`.
    Exited { last: AgentState, steps: u64 },
    /// The guard reached `repeated` a second time.
    Looped { repeated: AgentState, steps: u64 },
}

impl WalkOutcome {
    #[inline]
    pub fn is_loop(&self) -> bool {
        matches!(self, WalkOutcome::Looped { .. })
    }

    /// Advance + rotate transitions taken before the walk ended.
    pub fn steps(&self) -> u64 {
        match *self {
            WalkOutcome::Exited { steps, .. } | WalkOutcome::Looped { steps, .. } => steps,
        }
    }
}

/// Stepper over a borrowed grid.
pub struct Walker<'g> {
    grid:  &'g Grid,
    state: AgentState,
    steps: u64,
    limit: u64,
}

impl<'g> Walker<'g> {
    pub fn new(grid: &'g Grid, start: AgentState) -> Self {
        Self { grid, state: start, steps: 0, limit: Self::step_limit(grid) }
    }

    /// Number of distinct agent states on `grid`, `4 × height × width`.
    ///
    /// A walk that has taken this many transitions without exiting has
    /// visited more states than exist, so it must have repeated one.
    #[inline]
    pub fn step_limit(grid: &Grid) -> u64 {
        4 * grid.area() as u64
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Advance + rotate transitions taken so far.  `Exit` is not counted.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Apply one transition.
    pub fn step(&mut self) -> Transition {
        let Some(next) = self.grid.neighbor(self.state.position, self.state.facing) else {
            return Transition::Exit;
        };
        self.steps += 1;
        if self.grid.is_obstacle(next) {
            self.state.facing = self.state.facing.rotate();
            Transition::Rotate
        } else {
            self.state.position = next;
            Transition::Advance
        }
    }

    /// Walk until the guard leaves the grid, recording every occupied cell
    /// (the start included) into `visited`.
    ///
    /// Returns the last in-bounds state.  Fails with
    /// [`SimError::BaselineLoops`] if the step limit is reached, which means
    /// the guard is trapped and would never exit.
    pub fn trace(&mut self, visited: &mut VisitedSet) -> SimResult<AgentState> {
        visited.record(self.state);
        loop {
            match self.step() {
                Transition::Exit    => return Ok(self.state),
                Transition::Advance => {
                    visited.record(self.state);
                }
                Transition::Rotate  => {}
            }
            if self.steps >= self.limit {
                return Err(SimError::BaselineLoops { limit: self.limit });
            }
        }
    }

    /// Walk until the guard leaves the grid or repeats a full
    /// `(position, facing)` state.
    ///
    /// Re-entering a cell with a different facing is not a repeat.  The state
    /// set is local to this call.
    pub fn detect_loop(&mut self) -> SimResult<WalkOutcome> {
        let mut seen = StateSet::default();
        seen.insert(self.state);
        loop {
            if self.step() == Transition::Exit {
                return Ok(WalkOutcome::Exited { last: self.state, steps: self.steps });
            }
            if !seen.insert(self.state) {
                return Ok(WalkOutcome::Looped { repeated: self.state, steps: self.steps });
            }
            // Unreachable: some state repeats by the time steps == limit.
            if self.steps >= self.limit {
                return Err(SimError::StepLimitExceeded { limit: self.limit });
            }
        }
    }
}
