mod cell;
mod controller;
mod grid;
mod history;
mod rules;
mod stagnation;

pub use cell::GpuCell;
pub use controller::{Command, RunState, SimulationController};
pub use grid::Grid;
