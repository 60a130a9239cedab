//! Translation of raw window input into simulation commands.

use winit::keyboard::KeyCode;

use crate::simulation::Command;

/// Map a logical pixel position to grid coordinates by integer division
/// with the cell size. Positions left of or above the window yield `None`;
/// positions past the last cell map to out-of-range coordinates, which the
/// grid ignores.
pub fn pixel_to_cell(x: f64, y: f64, cell_width: u32, cell_height: u32) -> Option<(usize, usize)> {
    if x < 0.0 || y < 0.0 || !x.is_finite() || !y.is_finite() {
        return None;
    }

    let cell_x = x as usize / cell_width.max(1) as usize;
    let cell_y = y as usize / cell_height.max(1) as usize;
    Some((cell_x, cell_y))
}

/// Keyboard bindings
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::ArrowRight => Some(Command::StepForward),
        KeyCode::ArrowLeft => Some(Command::StepBackward),
        KeyCode::KeyR => Some(Command::Reset),
        KeyCode::KeyE => Some(Command::Randomize),
        KeyCode::KeyS => Some(Command::ToggleRun),
        _ => None,
    }
}

/// Log the controls the way they are bound above
pub fn log_controls() {
    log::info!("Controls:");
    log::info!("  Left click: Toggle cell");
    log::info!("  Right arrow: Next generation");
    log::info!("  Left arrow: Previous generation");
    log::info!("  S: Start/stop auto-run");
    log::info!("  E: Randomize grid");
    log::info!("  R: Reset grid");
    log::info!("  Escape: Quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_cell() {
        assert_eq!(pixel_to_cell(0.0, 0.0, 50, 50), Some((0, 0)));
        assert_eq!(pixel_to_cell(49.9, 50.0, 50, 50), Some((0, 1)));
        assert_eq!(pixel_to_cell(499.0, 250.0, 50, 50), Some((9, 5)));
    }

    #[test]
    fn test_pixel_past_last_cell() {
        // 500px / 30 cells = 16px cells, so the last 20px fall outside the grid
        assert_eq!(pixel_to_cell(490.0, 10.0, 16, 16), Some((30, 0)));
    }

    #[test]
    fn test_pixel_outside_window() {
        assert_eq!(pixel_to_cell(-1.0, 10.0, 50, 50), None);
        assert_eq!(pixel_to_cell(10.0, f64::NAN, 50, 50), None);
    }

    #[test]
    fn test_zero_cell_size() {
        assert_eq!(pixel_to_cell(7.0, 3.0, 0, 0), Some((7, 3)));
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(command_for_key(KeyCode::ArrowRight), Some(Command::StepForward));
        assert_eq!(command_for_key(KeyCode::ArrowLeft), Some(Command::StepBackward));
        assert_eq!(command_for_key(KeyCode::KeyR), Some(Command::Reset));
        assert_eq!(command_for_key(KeyCode::KeyE), Some(Command::Randomize));
        assert_eq!(command_for_key(KeyCode::KeyS), Some(Command::ToggleRun));
        assert_eq!(command_for_key(KeyCode::Space), None);
    }
}
