//! `patrol-core` — foundational types for the guard patrol simulator.
//!
//! This crate is a dependency of every other `patrol-*` crate.  It has no
//! `patrol-*` dependencies and a single external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`geom`]        | `Position`, `Facing`, `AgentState`                    |
//! | [`grid`]        | `CellKind`, `Grid`, snapshot rendering                |
//! | [`parse`]       | `PatrolMap`, `parse_map`, `load_map_file`             |
//! | [`config`]      | `PatrolConfig`                                        |
//! | [`error`]       | `PatrolError`, `Malformed`, `PatrolResult`            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod parse;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::PatrolConfig;
pub use error::{Malformed, PatrolError, PatrolResult};
pub use geom::{AgentState, Facing, Position};
pub use grid::{CellKind, Grid};
pub use parse::{PatrolMap, load_map_file, load_map_reader, parse_map};
