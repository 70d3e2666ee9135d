use crate::error::GridError;
use crate::grid_model::{CellState, GridModel};
use crate::solver::Path;
use grid_util::Point;
use log::debug;
use std::iter::FusedIterator;

/// Emitted after the vehicle has been moved onto `coordinate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepEvent {
    pub coordinate: Point,
    /// Zero-based position of `coordinate` in the replayed path.
    pub index: usize,
    /// Length of the replayed path.
    pub total: usize,
}

impl StepEvent {
    pub fn row(&self) -> usize {
        self.coordinate.y as usize
    }

    pub fn col(&self) -> usize {
        self.coordinate.x as usize
    }

    /// Whether this step reached the end of the path.
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// [ReplayDriver] moves the vehicle along a path one pull at a time. Every call
/// to [next](Iterator::next) permanently marks the next path cell as
/// [CellState::Vehicle] and reports it, so the trail of visited cells stays on
/// the grid and the hazard cell is overwritten on the final step.
///
/// The driver never waits between steps; whoever iterates it decides the pace
/// and can stop early without any cleanup.
#[derive(Debug)]
pub struct ReplayDriver<'a> {
    grid: &'a mut GridModel,
    path: Path,
    next: usize,
}

impl<'a> ReplayDriver<'a> {
    /// Prepares a replay of `path` over `grid`. Fails if any cell of the path
    /// lies outside the grid, before anything is written.
    pub fn new(grid: &'a mut GridModel, path: &[Point]) -> Result<ReplayDriver<'a>, GridError> {
        for p in path {
            grid.get_point(*p)?;
        }
        debug!("Replaying a path of {} cells", path.len());
        Ok(ReplayDriver {
            grid,
            path: path.to_vec(),
            next: 0,
        })
    }

    /// Number of steps not yet taken.
    pub fn remaining(&self) -> usize {
        self.path.len() - self.next
    }

    /// The grid as it stands after the steps taken so far.
    pub fn grid(&self) -> &GridModel {
        &*self.grid
    }
}

impl Iterator for ReplayDriver<'_> {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        let coordinate = *self.path.get(self.next)?;
        self.grid.write(coordinate, CellState::Vehicle);
        let event = StepEvent {
            coordinate,
            index: self.next,
            total: self.path.len(),
        };
        self.next += 1;
        Some(event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for ReplayDriver<'_> {}

impl FusedIterator for ReplayDriver<'_> {}

/// Starts replaying `path` over `grid`; see [ReplayDriver].
pub fn replay<'a>(grid: &'a mut GridModel, path: &[Point]) -> Result<ReplayDriver<'a>, GridError> {
    ReplayDriver::new(grid, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::find_path;
    use crate::{cell, origin};

    fn hazard_grid() -> (GridModel, Path) {
        let mut grid = GridModel::new(4);
        grid.set(1, 0, CellState::Obstacle).unwrap();
        grid.set(2, 2, CellState::Hazard).unwrap();
        let path = find_path(&grid, origin(), cell(2, 2));
        (grid, path)
    }

    #[test]
    fn emits_one_event_per_cell_in_order() {
        let (mut grid, path) = hazard_grid();
        let events = replay(&mut grid, &path).unwrap().collect::<Vec<_>>();
        assert_eq!(events.len(), path.len());
        for (i, (event, p)) in events.iter().zip(&path).enumerate() {
            assert_eq!(event.coordinate, *p);
            assert_eq!(event.index, i);
            assert_eq!(event.total, path.len());
        }
        assert!(events.last().unwrap().is_last());
        assert!(!events[0].is_last());
    }

    #[test]
    fn marks_exactly_the_path_including_the_hazard() {
        let (mut grid, path) = hazard_grid();
        replay(&mut grid, &path).unwrap().for_each(drop);
        let mut marked = grid.find_all(CellState::Vehicle);
        let mut expected = path.clone();
        marked.sort_by_key(|p| (p.y, p.x));
        expected.sort_by_key(|p| (p.y, p.x));
        assert_eq!(marked, expected);
        assert_eq!(grid.find(CellState::Hazard), None);
        assert_eq!(grid.get(1, 0), Ok(CellState::Obstacle));
    }

    #[test]
    fn each_step_is_visible_before_the_next() {
        let (mut grid, path) = hazard_grid();
        let mut driver = replay(&mut grid, &path).unwrap();
        assert_eq!(driver.len(), path.len());
        let first = driver.next().unwrap();
        assert_eq!((first.row(), first.col()), (0, 0));
        assert_eq!(driver.grid().get(0, 0), Ok(CellState::Vehicle));
        assert_eq!(driver.grid().get_point(path[1]), Ok(CellState::Open));
        assert_eq!(driver.remaining(), path.len() - 1);
    }

    #[test]
    fn abandoned_replay_keeps_applied_steps() {
        let (mut grid, path) = hazard_grid();
        {
            let mut driver = replay(&mut grid, &path).unwrap();
            driver.next();
            driver.next();
        }
        assert_eq!(grid.find_all(CellState::Vehicle), path[..2].to_vec());
        assert_eq!(grid.find(CellState::Hazard), Some(cell(2, 2)));
    }

    #[test]
    fn replaying_twice_gives_the_same_grid() {
        let (mut grid, path) = hazard_grid();
        let first = replay(&mut grid, &path).unwrap().collect::<Vec<_>>();
        let after_first = grid.snapshot();
        let second = replay(&mut grid, &path).unwrap().collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(grid.snapshot(), after_first);
    }

    #[test]
    fn empty_path_yields_nothing() {
        let mut grid = GridModel::new(3);
        let mut driver = replay(&mut grid, &[]).unwrap();
        assert_eq!(driver.next(), None);
        assert_eq!(driver.next(), None);
        assert_eq!(grid.find(CellState::Vehicle), None);
    }

    #[test]
    fn out_of_bounds_path_is_rejected_before_writing() {
        let mut grid = GridModel::new(3);
        let path = vec![cell(0, 0), cell(0, 1), cell(0, 3)];
        assert!(matches!(
            replay(&mut grid, &path),
            Err(GridError::OutOfBounds { row: 0, col: 3, .. })
        ));
        assert_eq!(grid.find(CellState::Vehicle), None);
    }
}
