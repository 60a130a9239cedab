use std::fmt;

use crate::config::STAGNATION_WINDOW;
use crate::simulation::grid::Grid;
use crate::simulation::history::HistoryStack;

/// Why an auto-run came to a halt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stagnation {
    /// No cell is alive
    Empty,
    /// The grid matches one of the recent snapshots
    Cycling,
}

impl fmt::Display for Stagnation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stagnation::Empty => write!(f, "grid empty"),
            Stagnation::Cycling => write!(f, "grid repeating"),
        }
    }
}

/// Check `current` against the last [`STAGNATION_WINDOW`] snapshots.
///
/// Emptiness wins over cycling. Only cell values are compared, so a
/// snapshot from an earlier generation with the same pattern counts as a
/// repeat.
pub fn detect(current: &Grid, history: &HistoryStack) -> Option<Stagnation> {
    if current.count_alive() == 0 {
        return Some(Stagnation::Empty);
    }

    history
        .recent(STAGNATION_WINDOW)
        .iter()
        .any(|past| past.same_cells(current))
        .then_some(Stagnation::Cycling)
}
