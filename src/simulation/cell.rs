/// State of a single grid position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// The opposite state
    pub fn toggled(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// GPU-compatible cell as read by the render shader.
///
/// Layout: 4 bytes, one `u32` per cell in a row-major storage buffer.
/// - state: 1 = alive, 0 = dead
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuCell {
    pub state: u32,
}

impl From<Cell> for GpuCell {
    fn from(cell: Cell) -> Self {
        Self {
            state: cell.is_alive() as u32,
        }
    }
}
