//! Fluent builder for constructing a [`PatrolSimulator`].

use patrol_core::{AgentState, Grid, PatrolConfig};

use crate::{PatrolSimulator, SimError, SimResult};

/// Fluent builder for [`PatrolSimulator`].
///
/// # Required inputs
///
/// - [`Grid`] — the patrol area, guard cell left `Empty`
/// - [`AgentState`] — the guard's start position and facing
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                     |
/// |----------------|-----------------------------|
/// | `.config(c)`   | `PatrolConfig::default()`   |
///
/// # Example
///
/// ```rust,ignore
/// let map = patrol_core::parse_map(text)?;
/// let mut sim = PatrolBuilder::new(map.grid, map.start)
///     .config(PatrolConfig { num_threads: Some(4), ..Default::default() })
///     .build()?;
/// ```
pub struct PatrolBuilder {
    grid:   Grid,
    start:  AgentState,
    config: Option<PatrolConfig>,
}

impl PatrolBuilder {
    /// Create a builder with all required inputs.
    pub fn new(grid: Grid, start: AgentState) -> Self {
        Self { grid, start, config: None }
    }

    pub fn config(mut self, config: PatrolConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validate the start state and return a ready-to-run simulator.
    pub fn build(self) -> SimResult<PatrolSimulator> {
        let pos = self.start.position;
        if !self.grid.contains(pos) {
            return Err(SimError::StartOutOfBounds(pos));
        }
        if self.grid.is_obstacle(pos) {
            return Err(SimError::StartOnObstacle(pos));
        }

        Ok(PatrolSimulator::from_parts(
            self.grid,
            self.start,
            self.config.unwrap_or_default(),
        ))
    }
}
