//! Conway's B3/S23 transition on a bounded grid.

use crate::simulation::cell::Cell;
use crate::simulation::grid::Grid;

/// Compute the next generation. `grid` is not modified; cells outside the
/// boundary count as dead (no wrap-around).
pub fn step(grid: &Grid) -> Grid {
    let size = grid.size();
    let cells = grid
        .cells()
        .iter()
        .enumerate()
        .map(|(i, &cell)| next_state(cell, live_neighbors(grid, i % size, i / size)))
        .collect();

    grid.successor(cells)
}

/// Alive cells in the Moore neighborhood of `(x, y)`
pub fn live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let mut count = 0;

    for dy in -1isize..=1 {
        for dx in -1isize..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }

            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };

            if grid.get(nx, ny).is_some_and(Cell::is_alive) {
                count += 1;
            }
        }
    }

    count
}

/// Apply the birth/survival rule to one cell
pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
    match (cell, neighbors) {
        // Survival
        (Cell::Alive, 2 | 3) => Cell::Alive,
        // Birth
        (Cell::Dead, 3) => Cell::Alive,
        // Under/overpopulation, or stays dead
        _ => Cell::Dead,
    }
}
