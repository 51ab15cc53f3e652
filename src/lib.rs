//! # ca-cell
//!
//! The computational unit of a multi-state cellular automaton: a generalized
//! Game-of-Life cell whose states each carry their own glyph and color.
//!
//! ## Design Principles
//!
//! 1. **States are values, cells are entities**: a [`State`] is validated
//!    once, never changes, and is shared as `Arc<State>` by every cell that
//!    may take it. A [`Cell`] is the only mutable piece.
//!
//! 2. **Identity over equality for registries**: `==` on states compares
//!    ordinal values, while a cell's registry only accepts the exact
//!    instances registered into it.
//!
//! 3. **One transition per tick**: a cell moves `Clear -> Updated` on
//!    `update` and back on `close_tick`. Calling either out of turn is an
//!    error, never a silent no-op.
//!
//! ## Tick Protocol
//!
//! A grid owning many cells must, every tick:
//! - read `current()` of every cell,
//! - compute all next states from those reads alone,
//! - `update` every cell once, then `close_tick` every cell.
//!
//! [`Ticker`] implements exactly this over a slice of cells.
//!
//! ## Modules
//!
//! - `core`: colors, states, cells, configuration
//! - `tick`: double-buffered tick driver
//! - `error`: error types

pub mod core;
pub mod error;
pub mod tick;

// Re-export commonly used types
pub use crate::core::{
    AutomatonConfig, Cell, Color, Palette, State, StateSpec, TickPhase, DEAD,
};

pub use crate::error::{CellError, ConfigError, TickError, ValidationError};

pub use crate::tick::{render_line, TickSummary, Ticker};
