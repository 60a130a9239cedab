use rand::Rng;

use crate::simulation::cell::Cell;
use crate::simulation::grid::Grid;
use crate::simulation::history::HistoryStack;
use crate::simulation::rules;
use crate::simulation::stagnation::{self, Stagnation};

/// Whether generations advance on their own
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// Manual stepping
    #[default]
    Idle,
    /// Auto-run, one generation per tick
    Running,
}

/// Discrete user commands, as produced by the input layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Toggle { x: usize, y: usize },
    StepForward,
    StepBackward,
    Reset,
    Randomize,
    /// Start auto-run when idle, stop it when running
    ToggleRun,
}

/// Owns the grid and its history and applies every state transition.
pub struct SimulationController {
    grid: Grid,
    history: HistoryStack,
    state: RunState,
}

impl SimulationController {
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            history: HistoryStack::new(),
            state: RunState::Idle,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Apply a command. While running only `ToggleRun` is accepted.
    /// Returns whether anything changed.
    pub fn handle(&mut self, command: Command) -> bool {
        if self.is_running() {
            return match command {
                Command::ToggleRun => {
                    self.stop();
                    true
                }
                other => {
                    log::debug!("Ignoring {:?} during auto-run", other);
                    false
                }
            };
        }

        match command {
            Command::Toggle { x, y } => self.toggle(x, y),
            Command::StepForward => {
                self.step_forward();
                true
            }
            Command::StepBackward => self.step_backward(),
            Command::Reset => {
                self.reset();
                true
            }
            Command::Randomize => {
                self.randomize();
                true
            }
            Command::ToggleRun => {
                self.run();
                true
            }
        }
    }

    /// Flip one cell; generation and history are unaffected
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        self.grid.toggle(x, y)
    }

    pub fn step_forward(&mut self) {
        let next = rules::step(&self.grid);
        self.history.push(std::mem::replace(&mut self.grid, next));
    }

    /// Restore the previous generation. No-op at generation 0.
    pub fn step_backward(&mut self) -> bool {
        if self.grid.generation() == 0 {
            return false;
        }

        match self.history.pop() {
            Ok(previous) => {
                self.grid = previous;
                true
            }
            Err(e) => {
                log::warn!("Cannot rewind generation {}: {}", self.grid.generation(), e);
                false
            }
        }
    }

    /// All cells dead, generation 0, history cleared
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.grid.size());
        self.history.clear();
    }

    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Fair coin per cell; generation and history are kept
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid.set_all(|_, _| Cell::from(rng.gen_bool(0.5)));
    }

    pub fn run(&mut self) {
        if !self.is_running() {
            log::info!("Auto-run started at generation {}", self.generation());
            self.state = RunState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            log::info!("Auto-run stopped at generation {}", self.generation());
            self.state = RunState::Idle;
        }
    }

    /// Advance one auto-run generation. Returns the reason when the run
    /// halted on its own; does nothing while idle.
    pub fn tick(&mut self) -> Option<Stagnation> {
        if !self.is_running() {
            return None;
        }

        self.step_forward();

        let halt = stagnation::detect(&self.grid, &self.history)?;
        log::info!(
            "Simulation complete at generation {}: {}, stopping",
            self.generation(),
            halt
        );
        self.state = RunState::Idle;
        Some(halt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn with_alive(size: usize, alive: &[(usize, usize)]) -> SimulationController {
        let mut controller = SimulationController::new(size);
        for &(x, y) in alive {
            controller.toggle(x, y);
        }
        controller
    }

    fn assert_history_matches_generation(controller: &SimulationController) {
        assert_eq!(controller.history().len() as u64, controller.generation());
    }

    #[test]
    fn test_initial_state() {
        let controller = SimulationController::new(10);
        assert_eq!(controller.state(), RunState::Idle);
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.grid().count_alive(), 0);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_toggle_leaves_generation_and_history() {
        let mut controller = SimulationController::new(5);
        controller.step_forward();
        assert!(controller.handle(Command::Toggle { x: 1, y: 4 }));
        assert_eq!(controller.grid().get(1, 4), Some(Cell::Alive));
        assert_eq!(controller.generation(), 1);
        assert_history_matches_generation(&controller);

        assert!(!controller.handle(Command::Toggle { x: 5, y: 0 }));
    }

    #[test]
    fn test_step_forward_then_back_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut controller = SimulationController::new(8);
        controller.randomize_with(&mut rng);

        for _ in 0..5 {
            controller.step_forward();
            assert_history_matches_generation(&controller);

            let before = controller.grid().clone();
            controller.step_forward();
            assert!(controller.step_backward());
            assert_eq!(controller.grid(), &before);
            assert_history_matches_generation(&controller);
        }
        assert_eq!(controller.generation(), 5);
    }

    #[test]
    fn test_step_backward_at_zero_is_noop() {
        let mut controller = with_alive(5, &[(1, 1), (2, 2)]);
        let before = controller.grid().clone();
        assert!(!controller.handle(Command::StepBackward));
        assert_eq!(controller.grid(), &before);
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn test_step_backward_discards_later_edits() {
        let mut controller = with_alive(5, &[(1, 2), (2, 2), (3, 2)]);
        let start = controller.grid().clone();
        controller.step_forward();
        controller.toggle(0, 0);
        controller.step_backward();
        assert_eq!(controller.grid(), &start);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut controller = SimulationController::new(10);
        controller.randomize_with(&mut rng);
        for _ in 0..4 {
            controller.step_forward();
        }

        assert!(controller.handle(Command::Reset));
        assert_eq!(controller.generation(), 0);
        assert!(controller.history().is_empty());
        assert_eq!(controller.grid().count_alive(), 0);
        assert_eq!(controller.grid().size(), 10);
    }

    #[test]
    fn test_randomize_keeps_generation_and_history() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut controller = SimulationController::new(20);
        controller.step_forward();
        controller.step_forward();
        controller.randomize_with(&mut rng);

        assert_eq!(controller.generation(), 2);
        assert_history_matches_generation(&controller);
        // A fair coin over 400 cells lands far from both extremes
        let alive = controller.grid().count_alive();
        assert!(alive > 100 && alive < 300, "alive = {}", alive);
    }

    #[test]
    fn test_run_only_accepts_stop() {
        let mut controller = with_alive(5, &[(1, 1)]);
        assert!(controller.handle(Command::ToggleRun));
        assert!(controller.is_running());

        let before = controller.grid().clone();
        assert!(!controller.handle(Command::StepForward));
        assert!(!controller.handle(Command::Toggle { x: 0, y: 0 }));
        assert!(!controller.handle(Command::Reset));
        assert!(!controller.handle(Command::Randomize));
        assert_eq!(controller.grid(), &before);

        assert!(controller.handle(Command::ToggleRun));
        assert_eq!(controller.state(), RunState::Idle);
    }

    #[test]
    fn test_tick_while_idle_does_nothing() {
        let mut controller = with_alive(5, &[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn test_auto_run_halts_on_empty() {
        let mut controller = with_alive(5, &[(2, 2)]);
        controller.run();
        assert_eq!(controller.tick(), Some(Stagnation::Empty));
        assert_eq!(controller.state(), RunState::Idle);
        assert_eq!(controller.generation(), 1);
        assert_history_matches_generation(&controller);
    }

    #[test]
    fn test_auto_run_halts_on_blinker() {
        let mut controller = with_alive(5, &[(1, 2), (2, 2), (3, 2)]);
        controller.run();
        assert_eq!(controller.tick(), None);
        assert!(controller.is_running());
        assert_eq!(controller.tick(), Some(Stagnation::Cycling));
        assert!(!controller.is_running());
        assert_eq!(controller.generation(), 2);
    }

    #[test]
    fn test_auto_run_continues_on_glider() {
        let mut controller = with_alive(20, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
        controller.run();
        for _ in 0..20 {
            assert_eq!(controller.tick(), None);
        }
        assert!(controller.is_running());
        assert_eq!(controller.generation(), 20);
        assert_history_matches_generation(&controller);

        controller.stop();
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.generation(), 20);
    }
}
