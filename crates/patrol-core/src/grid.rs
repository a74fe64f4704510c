//! The patrol grid.
//!
//! # Data layout
//!
//! Cells are stored row-major in a single `Vec<CellKind>`:
//!
//! ```text
//! cells[ row * width + col ]
//! ```
//!
//! Dimensions are fixed at construction.  The only mutation the simulator
//! performs is a temporary single-cell obstacle placement per loop trial,
//! which is always reverted before the next trial starts.

use std::fmt;

use crate::{AgentState, Facing, Position};

/// What occupies a cell.  The guard is not a cell kind; it stands on an
/// `Empty` cell and is tracked separately.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Obstacle,
}

impl CellKind {
    pub fn symbol(self) -> char {
        match self {
            CellKind::Empty    => '.',
            CellKind::Obstacle => '#',
        }
    }
}

/// A rectangular `height × width` grid of [`CellKind`]s.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    height: usize,
    width:  usize,
    cells:  Vec<CellKind>,
}

impl Grid {
    /// An all-empty grid.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(height: usize, width: usize) -> Self {
        assert!(height > 0 && width > 0, "grid dimensions must be non-zero");
        Self { height, width, cells: vec![CellKind::Empty; height * width] }
    }

    /// Build from row-major cells.  `cells.len()` must equal `height * width`;
    /// the parser guarantees this.
    pub(crate) fn from_cells(height: usize, width: usize, cells: Vec<CellKind>) -> Self {
        debug_assert_eq!(cells.len(), height * width);
        Self { height, width, cells }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells, `height × width`.
    #[inline]
    pub fn area(&self) -> usize {
        self.height * self.width
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    /// Cell kind at `pos`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<CellKind> {
        if self.contains(pos) { Some(self.cells[self.index(pos)]) } else { None }
    }

    /// `true` only for in-bounds obstacle cells.
    #[inline]
    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.get(pos) == Some(CellKind::Obstacle)
    }

    /// Overwrite a cell and return its previous kind.
    ///
    /// # Panics
    /// Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, kind: CellKind) -> CellKind {
        assert!(self.contains(pos), "position {pos} outside {}x{} grid", self.height, self.width);
        let i = self.index(pos);
        std::mem::replace(&mut self.cells[i], kind)
    }

    /// The in-bounds cell one step from `pos` along `facing`, or `None` if
    /// the step leaves the grid.
    #[inline]
    pub fn neighbor(&self, pos: Position, facing: Facing) -> Option<Position> {
        pos.offset(facing).filter(|&next| self.contains(next))
    }

    /// Positions of every obstacle, row-major.
    pub fn obstacles(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == CellKind::Obstacle)
            .map(|(i, _)| Position::new(i / self.width, i % self.width))
    }

    /// Debug snapshot in map syntax: one line per row, the guard drawn with
    /// its facing symbol.
    pub fn render(&self, agent: Option<AgentState>) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = Position::new(row, col);
                let symbol = match agent {
                    Some(a) if a.position == pos => a.facing.symbol(),
                    _ => self.cells[self.index(pos)].symbol(),
                };
                out.push(symbol);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}
