//! Hash containers for walk bookkeeping.
//!
//! With the `fx-hash` feature the map/set aliases switch from SipHash to
//! FxHash.  Keys are small integer tuples, so FxHash is safe and much cheaper
//! on the per-step insert path.

use patrol_core::{AgentState, Facing, Position};

#[cfg(not(feature = "fx-hash"))]
pub(crate) type PositionMap<V> = std::collections::HashMap<Position, V>;
#[cfg(feature = "fx-hash")]
pub(crate) type PositionMap<V> = rustc_hash::FxHashMap<Position, V>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type StateSet = std::collections::HashSet<AgentState>;
#[cfg(feature = "fx-hash")]
pub(crate) type StateSet = rustc_hash::FxHashSet<AgentState>;

/// Distinct cells occupied by the guard, each with the facing it held when
/// it first arrived there.
#[derive(Clone, Debug, Default)]
pub struct VisitedSet {
    first_facing: PositionMap<Facing>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occupation.  Later visits never overwrite the first facing.
    /// Returns `true` if `state.position` had not been visited before.
    #[inline]
    pub fn record(&mut self, state: AgentState) -> bool {
        let mut fresh = false;
        self.first_facing.entry(state.position).or_insert_with(|| {
            fresh = true;
            state.facing
        });
        fresh
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.first_facing.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first_facing.is_empty()
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.first_facing.contains_key(&pos)
    }

    /// The facing held on first arrival at `pos`.
    pub fn first_facing(&self, pos: Position) -> Option<Facing> {
        self.first_facing.get(&pos).copied()
    }

    /// All visited positions in ascending (row-major) order.
    pub fn positions(&self) -> Vec<Position> {
        let mut out: Vec<Position> = self.first_facing.keys().copied().collect();
        out.sort_unstable();
        out
    }
}
