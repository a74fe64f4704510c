//! Scoped single-cell obstacle placement.

use std::ops::Deref;

use patrol_core::{CellKind, Grid, Position};

/// Turns one cell into an obstacle for as long as the placement is alive.
///
/// Dropping the placement writes the cell's previous kind back, so the grid is
/// restored exactly on every exit path of a trial, `?` and panics included.
/// While the placement is alive the grid is only reachable read-only through
/// `Deref`.
pub struct ObstaclePlacement<'g> {
    grid:     &'g mut Grid,
    at:       Position,
    previous: CellKind,
}

impl<'g> ObstaclePlacement<'g> {
    /// Place an obstacle at `at`.
    ///
    /// # Panics
    /// Panics if `at` is outside the grid.  Callers validate candidates first.
    pub fn new(grid: &'g mut Grid, at: Position) -> Self {
        let previous = grid.set(at, CellKind::Obstacle);
        Self { grid, at, previous }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.at
    }
}

impl Deref for ObstaclePlacement<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        &*self.grid
    }
}

impl Drop for ObstaclePlacement<'_> {
    fn drop(&mut self) {
        self.grid.set(self.at, self.previous);
    }
}
