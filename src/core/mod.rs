//! Core automaton types: colors, states, cells, configuration.
//!
//! States are immutable and shared; cells are the only mutable part and own
//! their registries exclusively.

pub mod color;
pub mod state;
pub mod cell;
pub mod config;

pub use color::Color;
pub use state::{State, StateSpec, DEAD};
pub use cell::{Cell, TickPhase};
pub use config::{AutomatonConfig, Palette};
