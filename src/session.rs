use crate::edit::{EditController, EditMode, EditOutcome};
use crate::error::GridError;
use crate::grid_model::{CellState, GridModel};
use crate::replay::ReplayDriver;
use crate::solver::{find_path, Path};
use crate::{origin, DEFAULT_GRID_SIZE};
use grid_util::Point;
use log::{info, warn};

/// One interactive design session: the grid being edited, the edit mode, and
/// the path currently on display.
#[derive(Clone, Debug)]
pub struct Session {
    grid: GridModel,
    editor: EditController,
    displayed_path: Option<Path>,
}

impl Default for Session {
    fn default() -> Session {
        Session::new(DEFAULT_GRID_SIZE)
    }
}

impl Session {
    pub fn new(size: usize) -> Session {
        Session {
            grid: GridModel::new(size),
            editor: EditController::new(),
            displayed_path: None,
        }
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn mode(&self) -> EditMode {
        self.editor.mode()
    }

    /// Row-major copy of every cell, for rendering.
    pub fn snapshot(&self) -> Vec<Vec<CellState>> {
        self.grid.snapshot()
    }

    /// The last path found by [run_search](Self::run_search), until the grid is
    /// edited.
    pub fn displayed_path(&self) -> Option<&[Point]> {
        self.displayed_path.as_deref()
    }

    pub fn select_hazard_mode(&mut self) {
        self.editor.select_hazard_mode();
    }

    pub fn select_obstacle_mode(&mut self) {
        self.editor.select_obstacle_mode();
    }

    /// Applies a click with the current edit mode. A successful placement drops
    /// the displayed path, since it may no longer match the grid.
    pub fn on_cell_clicked(&mut self, row: usize, col: usize) -> Result<EditOutcome, GridError> {
        let outcome = self.editor.on_cell_clicked(&mut self.grid, row, col)?;
        if outcome.mutated() {
            self.displayed_path = None;
        }
        Ok(outcome)
    }

    /// Searches a shortest path from the origin to the hazard. Fails with
    /// [GridError::NoHazardSet] if no hazard is placed; an empty path means the
    /// hazard can't be reached. With several hazards on the grid the first in
    /// row-major order is used.
    pub fn run_search(&mut self) -> Result<Path, GridError> {
        let hazards = self.grid.find_all(CellState::Hazard);
        let Some(&goal) = hazards.first() else {
            info!("Search requested without a hazard");
            return Err(GridError::NoHazardSet);
        };
        if hazards.len() > 1 {
            warn!(
                "{} hazards on the grid, routing to the first one at {}",
                hazards.len(),
                goal
            );
        }
        self.grid.update();
        let start = origin();
        info!("Computing path from {} to {}", start, goal);
        let path = find_path(&self.grid, start, goal);
        if path.is_empty() {
            info!("No path from {} to {}", start, goal);
            self.displayed_path = None;
        } else {
            info!("Found path of {} cells", path.len());
            self.displayed_path = Some(path.clone());
        }
        Ok(path)
    }

    /// Starts replaying `path` over the session's grid.
    pub fn replay(&mut self, path: &[Point]) -> Result<ReplayDriver<'_>, GridError> {
        ReplayDriver::new(&mut self.grid, path)
    }
}
