//! Simulator configuration.

/// Run-time knobs for the patrol simulator.
///
/// None of these affect the counts produced; they only control how the work
/// is scheduled and what the observer is shown.  Typically built from CLI
/// flags by the application crate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatrolConfig {
    /// Worker thread count for the obstacle search when `patrol-sim` is built
    /// with the `parallel` feature.  `None` uses all logical cores.  Ignored
    /// otherwise.
    pub num_threads: Option<usize>,

    /// Hand a rendered grid snapshot to the observer when the baseline walk
    /// leaves the grid.
    pub snapshots: bool,
}

impl PatrolConfig {
    /// Sequential-friendly defaults with snapshots enabled.
    pub fn with_snapshots() -> Self {
        Self { snapshots: true, ..Self::default() }
    }
}
