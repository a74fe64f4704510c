//! Grid coordinates, compass facings, and the `(Position, Facing)` pair that
//! is the unit of cycle detection.
//!
//! All three types are `Copy + Eq + Hash` so they can be used as set and map
//! keys without ceremony.

use std::fmt;

// ── Position ──────────────────────────────────────────────────────────────────

/// A cell coordinate.  `row` grows downwards, `col` grows to the right.
///
/// Ordering is row-major, which gives candidate enumeration a stable order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell one step along `facing`, or `None` if that would underflow
    /// row or column zero.  Upper bounds are checked by the grid.
    #[inline]
    pub fn offset(self, facing: Facing) -> Option<Position> {
        let (dr, dc) = facing.offset();
        Some(Position {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// One of the four compass directions, in clockwise order.
///
/// The discriminant doubles as an index into [`Facing::OFFSETS`], so rotation
/// is `(facing + 1) mod 4`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Facing {
    #[default]
    Up    = 0,
    Right = 1,
    Down  = 2,
    Left  = 3,
}

impl Facing {
    /// All facings in rotation order.
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Right, Facing::Down, Facing::Left];

    /// `(d_row, d_col)` unit vectors, indexed by discriminant.
    pub const OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn offset(self) -> (isize, isize) {
        Self::OFFSETS[self.index()]
    }

    /// Turn 90° clockwise.
    #[inline]
    pub fn rotate(self) -> Facing {
        Self::ALL[(self.index() + 1) & 3]
    }

    /// Parse a guard symbol.  Returns `None` for anything that is not one of
    /// `^ > v <`.
    pub fn from_symbol(symbol: char) -> Option<Facing> {
        match symbol {
            '^' => Some(Facing::Up),
            '>' => Some(Facing::Right),
            'v' => Some(Facing::Down),
            '<' => Some(Facing::Left),
            _   => None,
        }
    }

    /// The guard symbol drawn for this facing.
    pub fn symbol(self) -> char {
        match self {
            Facing::Up    => '^',
            Facing::Right => '>',
            Facing::Down  => 'v',
            Facing::Left  => '<',
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facing::Up    => "up",
            Facing::Right => "right",
            Facing::Down  => "down",
            Facing::Left  => "left",
        };
        f.write_str(name)
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// Where the guard stands and which way it faces.
///
/// The walk is deterministic, so two runs that reach the same `AgentState`
/// repeat identically from then on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub position: Position,
    pub facing:   Facing,
}

impl AgentState {
    #[inline]
    pub fn new(position: Position, facing: Facing) -> Self {
        Self { position, facing }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.position, self.facing)
    }
}
