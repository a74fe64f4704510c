//! `patrol-sim` — guard patrol walker and loop-inducing obstacle search.
//!
//! # Walk rule
//!
//! ```text
//! loop:
//!   next = current + offset(facing)
//!   next outside grid  → Exit    (walk ends normally)
//!   next is obstacle   → Rotate  (facing turns 90° clockwise, position kept)
//!   otherwise          → Advance (current = next)
//! ```
//!
//! # Operations
//!
//! | Method                                              | Result                              |
//! |-----------------------------------------------------|-------------------------------------|
//! | [`PatrolSimulator::count_visited_cells`]            | distinct cells on the baseline path |
//! | [`PatrolSimulator::count_loop_inducing_obstacles`]  | single obstacles that trap the guard|
//! | [`PatrolSimulator::detects_loop`]                   | does the current grid trap the guard|
//!
//! Every walk is bounded by `4 × height × width` transitions: that is the
//! number of distinct [`AgentState`][patrol_core::AgentState]s, so a walk that
//! has not exited by then has repeated a state.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Runs obstacle trials on Rayon's thread pool.             |
//! | `fx-hash`  | FxHash instead of SipHash for visited/state sets.        |
//! | `serde`    | Propagates serde derives to `patrol-core` types.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use patrol_core::parse_map;
//! use patrol_sim::{NoopObserver, PatrolSimulator};
//!
//! let mut sim = PatrolSimulator::from_map(parse_map(text)?)?;
//! let report = sim.run(&mut NoopObserver)?;
//! println!("{} {}", report.visited_cells, report.loop_obstacles);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod placement;
pub mod simulator;
pub mod visited;
pub mod walk;

#[cfg(test)]
mod tests;

pub use builder::PatrolBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, PatrolObserver};
pub use placement::ObstaclePlacement;
pub use simulator::{PatrolReport, PatrolSimulator};
pub use visited::VisitedSet;
pub use walk::{Transition, WalkOutcome, Walker};
