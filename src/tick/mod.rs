//! Tick driving.
//!
//! Cells enforce one transition per tick on their own, but a grid also has to
//! keep its rule evaluation away from half-updated neighbours. [`Ticker`]
//! does that for a slice of cells: snapshot, compute, update, close.
//!
//! Topology stays with the caller. The rule closure receives the cell index
//! and the full snapshot and decides for itself which indices are neighbours.
//!
//! ## Threads
//!
//! `Cell` is `Send`, so a caller can split a grid across workers. Each cell
//! must be mutated by one worker at a time, and the three phases must be
//! separated by a barrier over the whole grid; `Ticker` only covers the
//! single-threaded case.

mod ticker;

pub use ticker::{render_line, TickSummary, Ticker};
