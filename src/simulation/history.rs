use thiserror::Error;

use crate::simulation::grid::Grid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// Nothing has been recorded since the last reset.
    #[error("history is empty")]
    Empty,
}

/// Snapshots of earlier generations, most recent last.
///
/// One snapshot is pushed before every forward step, so the depth of the
/// stack matches the generation of the grid it was built from.
#[derive(Clone, Debug, Default)]
pub struct HistoryStack {
    snapshots: Vec<Grid>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state about to be replaced by a forward step
    pub fn push(&mut self, grid: Grid) {
        self.snapshots.push(grid);
    }

    /// Remove and return the most recent snapshot
    pub fn pop(&mut self) -> Result<Grid, HistoryError> {
        self.snapshots.pop().ok_or(HistoryError::Empty)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The last `n` snapshots (fewer if less were recorded), oldest first
    pub fn recent(&self, n: usize) -> &[Grid] {
        let start = self.snapshots.len().saturating_sub(n);
        &self.snapshots[start..]
    }
}
