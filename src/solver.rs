use crate::bfs::bfs;
use crate::grid_model::GridModel;
use crate::N_SMALLVEC_SIZE;
use fxhash::FxHashSet;
use grid_util::Point;
use itertools::Itertools;
use log::{debug, info};
use smallvec::SmallVec;

/// Ordered cells from start to goal, both included. Empty when no path exists.
pub type Path = Vec<Point>;

pub trait GridSolver {
    type Successors: IntoIterator<Item = Point>;

    /// Cells reachable in one move from `node`, in exploration order.
    fn successors(&self, grid: &GridModel, node: &Point) -> Self::Successors;

    /// Computes a shortest path from `start` to `goal`, or an empty path if the
    /// goal can't be reached. Uses the grid's connected components to skip the
    /// search when they are up to date and already rule the goal out.
    fn get_path_single_goal(&self, grid: &GridModel, start: Point, goal: Point) -> Path {
        if !grid.point_in_bounds(start) || !grid.point_in_bounds(goal) {
            debug!("{} or {} lies outside the grid", start, goal);
            return Vec::new();
        }
        if !grid.components_dirty() && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Vec::new();
        }
        bfs(
            &start,
            |node| self.successors(grid, node),
            |node| *node == goal,
        )
        .unwrap_or_default()
    }
}

/// Breadth-first solver over the 4-neighbourhood, exploring up, down, left,
/// right. Only obstacles block; hazard and vehicle cells are passable.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    type Successors = SmallVec<[Point; N_SMALLVEC_SIZE]>;

    fn successors(&self, grid: &GridModel, node: &Point) -> Self::Successors {
        grid.passable_neighbours(node)
    }
}

/// Shortest path from `start` to `goal` on `grid`, empty if there is none.
/// Never mutates the grid.
pub fn find_path(grid: &GridModel, start: Point, goal: Point) -> Path {
    BfsSolver.get_path_single_goal(grid, start, goal)
}

/// Checks that a path stays on the grid, avoids obstacles, moves one cell
/// along one axis per step and never revisits a cell. The first cell is
/// exempt from the obstacle check, matching where the search may start.
pub fn is_valid_path(grid: &GridModel, path: &[Point]) -> bool {
    let mut seen = FxHashSet::default();
    path.iter().enumerate().all(|(i, p)| {
        seen.insert(*p)
            && match grid.get_point(*p) {
                Ok(state) => i == 0 || !state.is_blocked(),
                Err(_) => false,
            }
    }) && path
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.manhattan_distance(b) == 1)
}

/// Renders a path as `[(row, col), ...]`.
pub fn describe_path(path: &[Point]) -> String {
    format!(
        "[{}]",
        path.iter()
            .map(|p| format!("({}, {})", p.y, p.x))
            .join(", ")
    )
}
