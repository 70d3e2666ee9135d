//! Translates "current mode + clicked cell" into grid mutations.

use crate::error::GridError;
use crate::grid_model::{CellState, GridModel};
use log::debug;

/// Which placement a cell click performs. Starts as [EditMode::None] and stays
/// on the last selected mode until another one is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    None,
    PlacingHazard,
    PlacingObstacle,
}

/// Result of a single cell click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The cell now holds the given state.
    Placed(CellState),
    /// The placement was refused and the grid is unchanged.
    Rejected,
    /// No mode is selected yet; the click did nothing.
    Ignored,
}

impl EditOutcome {
    /// Whether the grid changed, which invalidates any displayed path.
    pub fn mutated(self) -> bool {
        matches!(self, EditOutcome::Placed(_))
    }
}

#[derive(Clone, Debug, Default)]
pub struct EditController {
    mode: EditMode,
}

impl EditController {
    pub fn new() -> EditController {
        EditController::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn select_hazard_mode(&mut self) {
        self.mode = EditMode::PlacingHazard;
    }

    pub fn select_obstacle_mode(&mut self) {
        self.mode = EditMode::PlacingObstacle;
    }

    /// Applies a click on `(row, col)` according to the current mode.
    ///
    /// A hazard is never placed on an obstacle, while an obstacle overwrites
    /// whatever the cell held, including the hazard and vehicle markers.
    pub fn on_cell_clicked(
        &self,
        grid: &mut GridModel,
        row: usize,
        col: usize,
    ) -> Result<EditOutcome, GridError> {
        match self.mode {
            EditMode::None => Ok(EditOutcome::Ignored),
            EditMode::PlacingHazard => {
                if grid.get(row, col)?.is_blocked() {
                    debug!("Refusing hazard on obstacle at ({}, {})", row, col);
                    return Ok(EditOutcome::Rejected);
                }
                grid.set(row, col, CellState::Hazard)?;
                Ok(EditOutcome::Placed(CellState::Hazard))
            }
            EditMode::PlacingObstacle => {
                grid.set(row, col, CellState::Obstacle)?;
                Ok(EditOutcome::Placed(CellState::Obstacle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_without_a_mode_are_ignored() {
        let mut grid = GridModel::new(3);
        let editor = EditController::new();
        assert_eq!(editor.mode(), EditMode::None);
        assert_eq!(
            editor.on_cell_clicked(&mut grid, 1, 1),
            Ok(EditOutcome::Ignored)
        );
        assert_eq!(
            editor.on_cell_clicked(&mut grid, 7, 7),
            Ok(EditOutcome::Ignored)
        );
        assert_eq!(grid.find(CellState::Hazard), None);
        assert_eq!(grid.find(CellState::Obstacle), None);
    }

    #[test]
    fn hazard_mode_places_hazards() {
        let mut grid = GridModel::new(3);
        let mut editor = EditController::new();
        editor.select_hazard_mode();
        let outcome = editor.on_cell_clicked(&mut grid, 2, 1).unwrap();
        assert_eq!(outcome, EditOutcome::Placed(CellState::Hazard));
        assert!(outcome.mutated());
        assert_eq!(grid.get(2, 1), Ok(CellState::Hazard));
    }

    #[test]
    fn hazard_on_obstacle_is_rejected() {
        let mut grid = GridModel::new(3);
        grid.set(0, 1, CellState::Obstacle).unwrap();
        let before = grid.snapshot();
        let mut editor = EditController::new();
        editor.select_hazard_mode();
        let outcome = editor.on_cell_clicked(&mut grid, 0, 1).unwrap();
        assert_eq!(outcome, EditOutcome::Rejected);
        assert!(!outcome.mutated());
        assert_eq!(grid.snapshot(), before);
    }

    #[test]
    fn obstacle_overwrites_hazard_and_vehicle() {
        let mut grid = GridModel::new(3);
        grid.set(1, 1, CellState::Hazard).unwrap();
        grid.set(2, 2, CellState::Vehicle).unwrap();
        let mut editor = EditController::new();
        editor.select_obstacle_mode();
        for (row, col) in [(1, 1), (2, 2)] {
            assert_eq!(
                editor.on_cell_clicked(&mut grid, row, col),
                Ok(EditOutcome::Placed(CellState::Obstacle))
            );
            assert_eq!(grid.get(row, col), Ok(CellState::Obstacle));
        }
        assert_eq!(grid.find(CellState::Hazard), None);
    }

    #[test]
    fn mode_is_sticky_until_changed() {
        let mut grid = GridModel::new(4);
        let mut editor = EditController::new();
        editor.select_obstacle_mode();
        for col in 0..4 {
            editor.on_cell_clicked(&mut grid, 2, col).unwrap();
        }
        assert_eq!(editor.mode(), EditMode::PlacingObstacle);
        assert_eq!(grid.find_all(CellState::Obstacle).len(), 4);

        editor.select_hazard_mode();
        editor.on_cell_clicked(&mut grid, 3, 3).unwrap();
        editor.on_cell_clicked(&mut grid, 0, 3).unwrap();
        assert_eq!(editor.mode(), EditMode::PlacingHazard);
        assert_eq!(grid.find_all(CellState::Hazard).len(), 2);
    }

    #[test]
    fn out_of_bounds_click_is_an_error_in_a_placing_mode() {
        let mut grid = GridModel::new(3);
        let mut editor = EditController::new();
        editor.select_hazard_mode();
        assert!(matches!(
            editor.on_cell_clicked(&mut grid, 3, 0),
            Err(GridError::OutOfBounds { .. })
        ));
        editor.select_obstacle_mode();
        assert!(editor.on_cell_clicked(&mut grid, 0, 3).is_err());
    }
}
