//! Error types.
//!
//! Every failure in this crate is a synchronous domain error:
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | [`ValidationError`] | `State` construction |
//! | [`CellError`] | `Cell::register`, `Cell::update`, `Cell::close_tick` |
//! | [`ConfigError`] | `AutomatonConfig::build` / `from_json` |
//! | [`TickError`] | `Ticker::step` |
//!
//! None of them is recoverable internally. A `CellError` from `update` or
//! `close_tick` means the caller broke the tick protocol; retrying the same
//! call will fail the same way.

use thiserror::Error;

/// State construction failed. No `State` was produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The value has a fractional part (or is not a finite number).
    #[error("state value must be an integer, got {0}")]
    NonIntegerValue(String),

    /// The value is below zero.
    #[error("state value must not be negative, got {0}")]
    NegativeValue(i64),

    /// The value does not fit the ordinal range.
    #[error("state value {0} exceeds the maximum of {max}", max = u64::MAX)]
    ValueOutOfRange(String),

    /// The glyph is empty or longer than one character.
    #[error("state glyph must be a single character, got {len} characters")]
    GlyphLength { len: usize },

    /// The glyph is a control character.
    #[error("state glyph must be printable, got {0:?}")]
    NonPrintableGlyph(char),

    /// The color is not a member of the palette.
    #[error("unknown color: {0:?}")]
    UnknownColor(String),
}

/// A cell rejected a registration or a tick-protocol call.
///
/// Values carried here are state ordinals, for diagnostics only: registry
/// membership is decided by instance identity, not by value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CellError {
    /// This exact state instance is already registered.
    #[error("state {value} is already registered in this cell")]
    DuplicateState { value: u64 },

    /// `update` was already called in the current tick.
    #[error("cell already updated this tick (current state {current})")]
    AlreadyUpdated { current: u64 },

    /// The target state instance was never registered in this cell.
    #[error("state {value} is not registered in this cell")]
    UnregisteredState { value: u64 },

    /// `close_tick` was called without a preceding `update`.
    #[error("cell has not been updated this tick")]
    NotUpdated,
}

/// Building a palette from configuration failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or wrong shape.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// One of the listed states failed validation.
    #[error("state #{index} is invalid: {source}")]
    InvalidState {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Two listed states share an ordinal value.
    #[error("state value {0} is defined more than once")]
    DuplicateValue(u64),

    /// The configured default value names no state in the palette.
    #[error("default state value {0} is not in the palette")]
    UnknownDefault(u64),
}

/// A tick was rejected before any cell was mutated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cell #{index} rejected the tick: {source}")]
pub struct TickError {
    /// Position of the offending cell in the slice.
    pub index: usize,
    #[source]
    pub source: CellError,
}
