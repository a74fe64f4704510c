//! Map text parser and loader.
//!
//! # Format
//!
//! One line per grid row.  Every line has the same length and contains only:
//!
//! | Symbol        | Meaning                                      |
//! |---------------|----------------------------------------------|
//! | `.`           | empty cell                                   |
//! | `#`           | obstacle                                     |
//! | `^ > v <`     | the guard's start cell, facing up/right/down/left |
//!
//! Exactly one guard symbol must appear.  Trailing newlines are ignored and
//! `\r\n` line endings are accepted.
//!
//! ```text
//! ....#.....
//! .........#
//! ..........
//! ..#.......
//! .......#..
//! ..........
//! .#..^.....
//! ........#.
//! #.........
//! ......#...
//! ```

use std::io::Read;
use std::path::Path;

use crate::{AgentState, CellKind, Facing, Grid, Malformed, PatrolError, PatrolResult, Position};

/// A parsed map: the grid with the guard's cell left `Empty`, plus the
/// guard's start state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatrolMap {
    pub grid:  Grid,
    pub start: AgentState,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse map text.
///
/// Stops at the first bad cell.  A second guard symbol is reported as
/// [`Malformed::ExtraAgent`]; a map with no guard at all as
/// [`PatrolError::NoStartingAgent`].
pub fn parse_map(input: &str) -> PatrolResult<PatrolMap> {
    let body = input.trim_end_matches(['\n', '\r']);
    if body.is_empty() {
        return Err(PatrolError::MalformedInput { row: 0, col: 0, kind: Malformed::Empty });
    }

    let mut width: Option<usize> = None;
    let mut height = 0;
    let mut cells = Vec::with_capacity(body.len());
    let mut start: Option<AgentState> = None;

    for (row, line) in body.lines().enumerate() {
        let mut len = 0;
        for (col, symbol) in line.chars().enumerate() {
            let kind = match symbol {
                '.' => CellKind::Empty,
                '#' => CellKind::Obstacle,
                _ => {
                    let Some(facing) = Facing::from_symbol(symbol) else {
                        return Err(PatrolError::MalformedInput {
                            row,
                            col,
                            kind: Malformed::UnexpectedSymbol(symbol),
                        });
                    };
                    if let Some(first) = start {
                        return Err(PatrolError::MalformedInput {
                            row,
                            col,
                            kind: Malformed::ExtraAgent { first: first.position },
                        });
                    }
                    start = Some(AgentState::new(Position::new(row, col), facing));
                    CellKind::Empty
                }
            };
            cells.push(kind);
            len += 1;
        }

        match width {
            None => {
                if len == 0 {
                    return Err(PatrolError::MalformedInput { row, col: 0, kind: Malformed::Empty });
                }
                width = Some(len);
            }
            Some(expected) if expected != len => {
                return Err(PatrolError::MalformedInput {
                    row,
                    col: len.min(expected),
                    kind: Malformed::RaggedRow { expected, got: len },
                });
            }
            Some(_) => {}
        }
        height += 1;
    }

    let start = start.ok_or(PatrolError::NoStartingAgent)?;
    let width = width.unwrap_or_default();
    Ok(PatrolMap { grid: Grid::from_cells(height, width, cells), start })
}

/// Like [`parse_map`] but reads the whole text from any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or piping a map on stdin.
pub fn load_map_reader<R: Read>(mut reader: R) -> PatrolResult<PatrolMap> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_map(&text)
}

/// Load and parse a map file.
pub fn load_map_file(path: &Path) -> PatrolResult<PatrolMap> {
    let file = std::fs::File::open(path)?;
    load_map_reader(file)
}
