use crate::error::GridError;
use crate::{cell, DEFAULT_GRID_SIZE, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::{Grid, Point, SimpleGrid};
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Row and column offsets of the cardinal neighbours, in exploration order:
/// up, down, left, right.
const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// What occupies a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Open,
    Obstacle,
    Hazard,
    Vehicle,
}

impl CellState {
    /// Only obstacles block movement; hazards and vehicle markers are passable.
    pub fn is_blocked(self) -> bool {
        self == CellState::Obstacle
    }

    /// Single character used by the text rendering of a [GridModel].
    pub fn glyph(self) -> char {
        match self {
            CellState::Open => '.',
            CellState::Obstacle => '#',
            CellState::Hazard => 'H',
            CellState::Vehicle => 'V',
        }
    }
}

/// [GridModel] is the single source of truth for cell states. Next to the raw
/// [CellState] values it maintains a [UnionFind] over passable cells so callers
/// can tell whether the hazard is reachable before flood-filling the grid.
#[derive(Clone, Debug)]
pub struct GridModel {
    cells: SimpleGrid<CellState>,
    size: usize,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Default for GridModel {
    fn default() -> GridModel {
        GridModel::new(DEFAULT_GRID_SIZE)
    }
}

impl GridModel {
    /// Creates a `size` by `size` grid of [CellState::Open] cells.
    pub fn new(size: usize) -> GridModel {
        let mut grid = GridModel {
            cells: SimpleGrid::new(size, size, CellState::Open),
            size,
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn point_in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.size
            && (point.y as usize) < self.size
    }

    fn check_bounds(&self, point: Point) -> Result<(), GridError> {
        if self.point_in_bounds(point) {
            Ok(())
        } else {
            Err(GridError::out_of_bounds(
                point.y as i64,
                point.x as i64,
                self.size,
            ))
        }
    }

    fn get_ix_point(&self, point: &Point) -> usize {
        point.y as usize * self.size + point.x as usize
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState, GridError> {
        if row >= self.size || col >= self.size {
            return Err(GridError::out_of_bounds(row as i64, col as i64, self.size));
        }
        Ok(self.cells.get_point(cell(row, col)))
    }

    pub fn get_point(&self, point: Point) -> Result<CellState, GridError> {
        self.check_bounds(point)?;
        Ok(self.cells.get_point(point))
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), GridError> {
        if row >= self.size || col >= self.size {
            return Err(GridError::out_of_bounds(row as i64, col as i64, self.size));
        }
        self.write(cell(row, col), state);
        Ok(())
    }

    pub fn set_point(&mut self, point: Point, state: CellState) -> Result<(), GridError> {
        self.check_bounds(point)?;
        self.write(point, state);
        Ok(())
    }

    /// Writes a cell the caller has already bounds-checked. Joins newly connected
    /// components and flags the components as dirty if they may have split.
    pub(crate) fn write(&mut self, point: Point, state: CellState) {
        let was_blocked = self.cells.get_point(point).is_blocked();
        if state.is_blocked() {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            let p_ix = self.get_ix_point(&point);
            for n in self.neighbours(&point) {
                if !self.cells.get_point(n).is_blocked() {
                    let n_ix = self.get_ix_point(&n);
                    self.components.union(p_ix, n_ix);
                }
            }
        }
        self.cells.set_point(point, state);
    }

    /// In-bounds cardinal neighbours of `point` in the order up, down, left, right.
    pub fn neighbours(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(d_row, d_col)| Point::new(point.x + d_col, point.y + d_row))
            .filter(|&p| self.point_in_bounds(p))
            .collect()
    }

    /// Neighbours a vehicle standing on `point` may move to.
    pub fn passable_neighbours(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let mut neighbours = self.neighbours(point);
        neighbours.retain(|p| !self.cells.get_point(*p).is_blocked());
        neighbours
    }

    /// First cell in row-major order holding `state`.
    pub fn find(&self, state: CellState) -> Option<Point> {
        self.points().find(|&p| self.cells.get_point(p) == state)
    }

    /// Every cell holding `state`, in row-major order.
    pub fn find_all(&self, state: CellState) -> Vec<Point> {
        self.points()
            .filter(|&p| self.cells.get_point(p) == state)
            .collect()
    }

    fn points(&self) -> impl Iterator<Item = Point> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| cell(row, col)))
    }

    /// Row-major copy of every cell, for rendering.
    pub fn snapshot(&self) -> Vec<Vec<CellState>> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.cells.get_point(cell(row, col)))
                    .collect()
            })
            .collect()
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Result<usize, GridError> {
        self.check_bounds(*point)?;
        Ok(self.components.find(self.get_ix_point(point)))
    }

    /// Checks whether a search from `start` can reach `goal`. The start cell is
    /// never tested for passability by the search, so a blocked start reaches
    /// whatever its passable neighbours reach. Only meaningful when the
    /// components are not dirty; see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if !self.point_in_bounds(*start) || !self.point_in_bounds(*goal) {
            return false;
        }
        if start == goal {
            return true;
        }
        if self.cells.get_point(*goal).is_blocked() {
            return false;
        }
        let goal_ix = self.get_ix_point(goal);
        if self.cells.get_point(*start).is_blocked() {
            self.passable_neighbours(start)
                .iter()
                .any(|p| self.components.equiv(self.get_ix_point(p), goal_ix))
        } else {
            self.components.equiv(self.get_ix_point(start), goal_ix)
        }
    }

    /// Checks whether a search from `start` can not reach `goal`.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours to
    /// the same components. Looking right and down from every cell covers each
    /// 4-connected edge once.
    pub fn generate_components(&mut self) {
        let size = self.size;
        self.components = UnionFind::new(size * size);
        self.components_dirty = false;
        for point in self.points().collect::<Vec<_>>() {
            if self.cells.get_point(point).is_blocked() {
                continue;
            }
            let parent_ix = self.get_ix_point(&point);
            let joined = [
                Point::new(point.x + 1, point.y),
                Point::new(point.x, point.y + 1),
            ]
            .into_iter()
            .filter(|&p| self.point_in_bounds(p) && !self.cells.get_point(p).is_blocked())
            .map(|p| self.get_ix_point(&p))
            .collect::<SmallVec<[usize; 2]>>();
            for ix in joined {
                self.components.union(parent_ix, ix);
            }
        }
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.snapshot() {
            let line = row.iter().map(|state| state.glyph()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
