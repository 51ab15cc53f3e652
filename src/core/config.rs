//! Automaton configuration.
//!
//! Automata configure their states at startup by providing an
//! [`AutomatonConfig`]: the list of states, which one cells reset to, and
//! whether the shared [`DEAD`] state belongs to the palette.
//!
//! Building the config validates every state once and yields a [`Palette`]
//! of shared instances. Cells created from the palette register exactly those
//! instances, so rule code can look targets up by value and hand them straight
//! to [`Cell::update`].

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cell::Cell;
use super::state::{State, StateSpec, DEAD};
use crate::error::ConfigError;

fn default_include_dead() -> bool {
    true
}

/// Complete automaton configuration.
///
/// ## Example
///
/// ```
/// use ca_cell::AutomatonConfig;
///
/// let palette = AutomatonConfig::from_json(r#"{
///     "states": [
///         {"value": 1, "glyph": "•", "color": "Green"},
///         {"value": 2, "glyph": "o", "color": "BrightBlack"}
///     ]
/// }"#)
/// .unwrap()
/// .build()
/// .unwrap();
///
/// // DEAD is added automatically.
/// assert_eq!(palette.len(), 3);
///
/// let cell = palette.new_cell();
/// assert_eq!(cell.current().value(), 0);
/// assert_eq!(cell.registered_len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutomatonConfig {
    /// State descriptions, in palette order.
    #[serde(default)]
    pub states: Vec<StateSpec>,

    /// Value of the state cells reset to. `None` means value 0.
    #[serde(default)]
    pub default: Option<u64>,

    /// Add the shared `DEAD` state when no value-0 state is listed.
    #[serde(default = "default_include_dead")]
    pub include_dead: bool,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            default: None,
            include_dead: true,
        }
    }
}

impl AutomatonConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a state description.
    #[must_use]
    pub fn with_state(mut self, spec: StateSpec) -> Self {
        self.states.push(spec);
        self
    }

    /// Set the reset state by value.
    #[must_use]
    pub fn with_default(mut self, value: u64) -> Self {
        self.default = Some(value);
        self
    }

    /// Do not add `DEAD` implicitly.
    #[must_use]
    pub fn without_dead(mut self) -> Self {
        self.include_dead = false;
        self
    }

    /// Validate every state and build the shared palette.
    pub fn build(&self) -> Result<Palette, ConfigError> {
        let mut states: Vec<Arc<State>> = Vec::with_capacity(self.states.len() + 1);
        for (index, spec) in self.states.iter().enumerate() {
            let state = State::try_from(spec.clone())
                .map_err(|source| ConfigError::InvalidState { index, source })?;
            states.push(Arc::new(state));
        }

        if self.include_dead && !states.iter().any(|s| s.value() == 0) {
            states.insert(0, State::dead());
        }

        let mut index = FxHashMap::default();
        for (i, state) in states.iter().enumerate() {
            if index.insert(state.value(), i).is_some() {
                return Err(ConfigError::DuplicateValue(state.value()));
            }
        }

        let default = match self.default {
            Some(value) => {
                let i = index
                    .get(&value)
                    .ok_or(ConfigError::UnknownDefault(value))?;
                Arc::clone(&states[*i])
            }
            None => index
                .get(&0)
                .map_or_else(State::dead, |i| Arc::clone(&states[*i])),
        };

        debug!(
            states = states.len(),
            default = default.value(),
            "palette built"
        );

        Ok(Palette {
            states,
            index,
            default,
        })
    }
}

/// Validated, shared states of one automaton, indexed by value.
#[derive(Clone, Debug)]
pub struct Palette {
    states: Vec<Arc<State>>,
    index: FxHashMap<u64, usize>,
    default: Arc<State>,
}

impl Palette {
    /// The shared instance with this value.
    #[must_use]
    pub fn get(&self, value: u64) -> Option<&Arc<State>> {
        self.index.get(&value).map(|&i| &self.states[i])
    }

    /// All states, in palette order.
    #[must_use]
    pub fn states(&self) -> &[Arc<State>] {
        &self.states
    }

    /// The state new cells reset to.
    #[must_use]
    pub fn default_state(&self) -> &Arc<State> {
        &self.default
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Does the palette contain the `DEAD` singleton itself?
    #[must_use]
    pub fn contains_dead(&self) -> bool {
        self.states.iter().any(|s| Arc::ptr_eq(s, &DEAD))
    }

    /// A cell with every palette state registered and sitting in the default.
    #[must_use]
    pub fn new_cell(&self) -> Cell {
        // Values are unique within a palette, so the instances are too.
        Cell::from_distinct(self.states.iter().cloned(), Arc::clone(&self.default))
    }

    /// `count` fresh cells, see [`new_cell`](Self::new_cell).
    #[must_use]
    pub fn new_cells(&self, count: usize) -> Vec<Cell> {
        (0..count).map(|_| self.new_cell()).collect()
    }
}
