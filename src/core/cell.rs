//! The cell state machine.
//!
//! A [`Cell`] holds a registry of the states it may become, its current state,
//! the default state it returns to on reset, and a per-tick guard.
//!
//! ## Tick Protocol
//!
//! ```text
//!            update(registered)
//!   Clear ─────────────────────────► Updated
//!     ▲                                 │
//!     └──────────── close_tick() ───────┘
//!
//!   any ── reset() ──► Clear   (current := default)
//! ```
//!
//! `update` in `Updated` and `close_tick` in `Clear` are protocol violations
//! and fail without touching the cell. `reset` bypasses every guard.
//!
//! ## Registry Identity
//!
//! Registration is by instance: the registry compares `Arc` pointers, not
//! state values. Two distinct `Arc<State>` carrying the same value are two
//! separate registrations, and a state that merely *equals* a registered one
//! is still unregistered.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::trace;

use super::state::State;
use crate::error::CellError;

/// Which half of the tick protocol a cell is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickPhase {
    /// No transition yet this tick; `update` is allowed.
    #[default]
    Clear,
    /// Transitioned this tick; only `close_tick` (or `reset`) is allowed.
    Updated,
}

/// A single automaton cell.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use ca_cell::{Cell, CellError, Color, State};
///
/// let alive = Arc::new(State::new(1, "•", Color::Black).unwrap());
///
/// let mut cell = Cell::new();
/// cell.register(Arc::clone(&alive)).unwrap();
///
/// cell.update(&alive).unwrap();
/// assert_eq!(cell.render(), "\x1b[30m•\x1b[0m");
///
/// // One transition per tick.
/// assert!(matches!(cell.update(&alive), Err(CellError::AlreadyUpdated { .. })));
///
/// cell.close_tick().unwrap();
/// cell.update(&alive).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Cell {
    /// Permitted targets, in registration order.
    registry: SmallVec<[Arc<State>; 4]>,
    current: Arc<State>,
    default: Arc<State>,
    phase: TickPhase,
}

impl Default for Cell {
    fn default() -> Self {
        let dead = State::dead();
        Self {
            registry: SmallVec::new(),
            current: Arc::clone(&dead),
            default: dead,
            phase: TickPhase::Clear,
        }
    }
}

impl Cell {
    /// Create an empty cell: no registered states, current and default both
    /// [`DEAD`](super::DEAD), phase `Clear`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with `states` registered in order.
    ///
    /// Fails if the same instance appears twice.
    pub fn with_states<I>(states: I) -> Result<Self, CellError>
    where
        I: IntoIterator<Item = Arc<State>>,
    {
        let mut cell = Self::new();
        for state in states {
            cell.register(state)?;
        }
        Ok(cell)
    }

    /// Build a cell whose registry is `states`, already known to be distinct
    /// instances, sitting in `default`.
    pub(crate) fn from_distinct<I>(states: I, default: Arc<State>) -> Self
    where
        I: IntoIterator<Item = Arc<State>>,
    {
        let registry: SmallVec<[Arc<State>; 4]> = states.into_iter().collect();
        debug_assert!(registry
            .iter()
            .enumerate()
            .all(|(i, a)| registry[..i].iter().all(|b| !Arc::ptr_eq(a, b))));
        Self {
            registry,
            current: Arc::clone(&default),
            default,
            phase: TickPhase::Clear,
        }
    }

    /// Permit `state` as an update target.
    pub fn register(&mut self, state: Arc<State>) -> Result<(), CellError> {
        if self.is_registered(&state) {
            return Err(CellError::DuplicateState {
                value: state.value(),
            });
        }
        trace!(value = state.value(), "registering state");
        self.registry.push(state);
        Ok(())
    }

    /// Is this exact instance registered?
    #[must_use]
    pub fn is_registered(&self, state: &Arc<State>) -> bool {
        self.registry.iter().any(|s| Arc::ptr_eq(s, state))
    }

    /// Replace the state installed by [`reset`](Self::reset).
    ///
    /// Does not change the current state, and `state` need not be registered.
    pub fn set_default(&mut self, state: Arc<State>) {
        self.default = state;
    }

    /// Transition to `target` for this tick.
    ///
    /// Fails with `AlreadyUpdated` if the cell already transitioned this tick,
    /// or `UnregisteredState` if `target` is not a registered instance. The
    /// cell is unchanged on failure.
    pub fn update(&mut self, target: &Arc<State>) -> Result<(), CellError> {
        match self.phase {
            TickPhase::Updated => Err(CellError::AlreadyUpdated {
                current: self.current.value(),
            }),
            TickPhase::Clear => {
                if !self.is_registered(target) {
                    return Err(CellError::UnregisteredState {
                        value: target.value(),
                    });
                }
                trace!(from = self.current.value(), to = target.value(), "cell update");
                self.current = Arc::clone(target);
                self.phase = TickPhase::Updated;
                Ok(())
            }
        }
    }

    /// End the tick, allowing the next `update`.
    ///
    /// Fails with `NotUpdated` if no `update` happened this tick.
    pub fn close_tick(&mut self) -> Result<(), CellError> {
        match self.phase {
            TickPhase::Clear => Err(CellError::NotUpdated),
            TickPhase::Updated => {
                self.phase = TickPhase::Clear;
                Ok(())
            }
        }
    }

    /// Return to the default state and phase `Clear`, from any phase.
    pub fn reset(&mut self) {
        self.current = Arc::clone(&self.default);
        self.phase = TickPhase::Clear;
    }

    /// The current state.
    #[must_use]
    pub fn current(&self) -> &Arc<State> {
        &self.current
    }

    /// The state `reset` will install.
    #[must_use]
    pub fn default_state(&self) -> &Arc<State> {
        &self.default
    }

    #[must_use]
    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    /// Has the cell transitioned during the open tick?
    #[must_use]
    pub fn is_updated(&self) -> bool {
        self.phase == TickPhase::Updated
    }

    /// Registered states, in registration order.
    #[must_use]
    pub fn registry(&self) -> &[Arc<State>] {
        &self.registry
    }

    #[must_use]
    pub fn registered_len(&self) -> usize {
        self.registry.len()
    }

    /// Rendered current state.
    #[must_use]
    pub fn render(&self) -> String {
        self.current.render()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&*self.current, f)
    }
}
