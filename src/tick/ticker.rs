//! Double-buffered tick driver over a slice of cells.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{Cell, State, TickPhase};
use crate::error::{CellError, TickError};

/// Result of one successful tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSummary {
    /// Generation reached by this tick (the first tick yields 1).
    pub generation: u64,
    /// Cells whose new state has a different value than before.
    pub changed: usize,
}

/// Drives cells through the tick protocol and counts generations.
///
/// Each [`step`](Self::step) runs the three phases over the whole slice:
///
/// 1. snapshot every cell's current state,
/// 2. compute every target from the snapshot alone,
/// 3. `update` every cell, then `close_tick` every cell.
///
/// Because rules only ever see the snapshot, results do not depend on the
/// order in which cells are visited.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use ca_cell::{AutomatonConfig, StateSpec, Ticker};
///
/// let palette = AutomatonConfig::new()
///     .with_state(StateSpec::new(1, "#"))
///     .build()
///     .unwrap();
/// let alive = Arc::clone(palette.get(1).unwrap());
///
/// let mut cells = palette.new_cells(3);
/// let mut ticker = Ticker::new();
///
/// let summary = ticker.step(&mut cells, |_, _| Arc::clone(&alive)).unwrap();
/// assert_eq!(summary.generation, 1);
/// assert_eq!(summary.changed, 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Ticker {
    generation: u64,
}

impl Ticker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed ticks since creation or the last `reset_all`.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance every cell by one tick.
    ///
    /// `rule(index, snapshot)` returns the next state of cell `index`. It must
    /// return an instance registered in that cell; returning
    /// `Arc::clone(&snapshot[index])` keeps the cell as it is.
    ///
    /// Every cell is checked before any is touched: if a cell is mid-tick or a
    /// target is not registered, the error names that cell and the whole slice
    /// is left unchanged.
    pub fn step<F>(&mut self, cells: &mut [Cell], mut rule: F) -> Result<TickSummary, TickError>
    where
        F: FnMut(usize, &[Arc<State>]) -> Arc<State>,
    {
        let snapshot: Vec<Arc<State>> = cells.iter().map(|c| Arc::clone(c.current())).collect();
        let targets: Vec<Arc<State>> = (0..cells.len()).map(|i| rule(i, &snapshot)).collect();

        for (index, (cell, target)) in cells.iter().zip(&targets).enumerate() {
            if let Err(source) = preflight(cell, target) {
                warn!(index, %source, "tick rejected");
                return Err(TickError { index, source });
            }
        }

        let mut changed = 0;
        for (index, (cell, target)) in cells.iter_mut().zip(&targets).enumerate() {
            cell.update(target)
                .map_err(|source| TickError { index, source })?;
            if snapshot[index] != *target {
                changed += 1;
            }
        }
        for (index, cell) in cells.iter_mut().enumerate() {
            cell.close_tick()
                .map_err(|source| TickError { index, source })?;
        }

        self.generation += 1;
        debug!(generation = self.generation, cells = cells.len(), changed, "tick complete");

        Ok(TickSummary {
            generation: self.generation,
            changed,
        })
    }

    /// Reset every cell to its default and restart the generation count.
    pub fn reset_all(&mut self, cells: &mut [Cell]) {
        for cell in cells.iter_mut() {
            cell.reset();
        }
        self.generation = 0;
    }
}

/// The checks `Cell::update` would make, without mutating.
fn preflight(cell: &Cell, target: &Arc<State>) -> Result<(), CellError> {
    match cell.phase() {
        TickPhase::Updated => Err(CellError::AlreadyUpdated {
            current: cell.current().value(),
        }),
        TickPhase::Clear if !cell.is_registered(target) => Err(CellError::UnregisteredState {
            value: target.value(),
        }),
        TickPhase::Clear => Ok(()),
    }
}

/// Concatenate the rendered glyphs of `cells` into one display row.
#[must_use]
pub fn render_line(cells: &[Cell]) -> String {
    cells.iter().map(Cell::render).collect()
}
