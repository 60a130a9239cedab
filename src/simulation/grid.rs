use crate::simulation::cell::{Cell, GpuCell};

/// Square grid of cells plus the generation counter.
///
/// Cells are stored row-major: `(x, y)` lives at index `y * size + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    generation: u64,
}

impl Grid {
    /// Create an all-dead grid at generation 0
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be positive");
        Self {
            size,
            cells: vec![Cell::Dead; size * size],
            generation: 0,
        }
    }

    /// Build the successor of `self` from already computed cells.
    pub(crate) fn successor(&self, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len());
        Self {
            size: self.size,
            cells,
            generation: self.generation + 1,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Flip the cell at `(x, y)`. Out-of-bounds coordinates leave the grid
    /// untouched; returns whether a cell changed.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = self.cells[i].toggled();
                true
            }
            None => false,
        }
    }

    /// Replace every cell with `f(x, y)`. Generation is left alone.
    pub fn set_all<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, usize) -> Cell,
    {
        let size = self.size;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(i % size, i / size);
        }
    }

    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Value equality of the cells alone, ignoring the generation counter
    pub fn same_cells(&self, other: &Grid) -> bool {
        self.size == other.size && self.cells == other.cells
    }

    /// Coordinates of every alive cell, row by row
    #[cfg(test)]
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(move |(i, _)| (i % size, i / size))
    }

    /// Cells in the layout expected by the render shader
    pub fn to_gpu_cells(&self) -> Vec<GpuCell> {
        self.cells.iter().copied().map(GpuCell::from).collect()
    }

    /// Grid with the given cells alive, for tests
    #[cfg(test)]
    pub fn with_alive(size: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(size);
        for &(x, y) in alive {
            grid.toggle(x, y);
        }
        grid
    }
}
