//! # terrain_pathfinding
//!
//! Least-cost routing on rectangular terrain grids. Every cell carries a
//! [Terrain] kind with its own traversal cost; paths are computed with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over the four
//! cardinal directions under a
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry)
//! heuristic. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! over the passable cells to avoid flood-filling behaviour if no path
//! exists.
mod astar;
pub mod error;

use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::astar::astar;
use crate::error::{GridError, SearchError};
use core::fmt;

/// The kind of terrain occupying a single grid cell.
///
/// Entering a cell costs [Terrain::cost]: [Free](Terrain::Free) cells cost 1,
/// [Water](Terrain::Water) 3 and [TemporarilyBlocked](Terrain::TemporarilyBlocked)
/// 5, while [Obstacle](Terrain::Obstacle) cells can never be entered. All
/// costs are at least 1, which keeps the Manhattan distance heuristic a
/// lower bound on the true remaining cost; a terrain kind cheaper than 1
/// would require a different heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Terrain {
    #[default]
    Free = 0,
    Obstacle = 1,
    Water = 2,
    TemporarilyBlocked = 3,
}

impl Terrain {
    /// The cost of entering a cell of this kind, or [None] if it is
    /// impassable.
    pub fn cost(self) -> Option<i32> {
        match self {
            Terrain::Free => Some(1),
            Terrain::Water => Some(3),
            Terrain::TemporarilyBlocked => Some(5),
            Terrain::Obstacle => None,
        }
    }

    pub fn passable(self) -> bool {
        !matches!(self, Terrain::Obstacle)
    }

    /// Single-character rendering used by the [fmt::Display] impl of
    /// [TerrainGrid].
    pub fn glyph(self) -> char {
        match self {
            Terrain::Free => '.',
            Terrain::Obstacle => '#',
            Terrain::Water => '~',
            Terrain::TemporarilyBlocked => 'x',
        }
    }

    fn from_raw(raw: u8) -> Terrain {
        match raw {
            0 => Terrain::Free,
            1 => Terrain::Obstacle,
            2 => Terrain::Water,
            3 => Terrain::TemporarilyBlocked,
            _ => unreachable!("invalid terrain encoding: {raw}"),
        }
    }
}

fn manhattan_distance(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// The four axis-aligned neighbours of `pos`, without bounds filtering.
fn axis_neighbours(pos: Point) -> [Point; 4] {
    [
        Point::new(pos.x, pos.y - 1),
        Point::new(pos.x, pos.y + 1),
        Point::new(pos.x - 1, pos.y),
        Point::new(pos.x + 1, pos.y),
    ]
}

/// [TerrainGrid] stores a [Terrain] kind for every cell of a fixed-size
/// rectangular grid (packed as raw values in a [SimpleGrid]) and answers
/// least-cost path queries over it. Passable cells are additionally tracked
/// in a [UnionFind] structure so that queries between disconnected regions
/// can be rejected without running a search. Implements [Grid] for cell
/// access; `x` indexes columns and `y` rows.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    pub terrain: SimpleGrid<u8>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for TerrainGrid {
    fn default() -> TerrainGrid {
        TerrainGrid {
            terrain: SimpleGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl TerrainGrid {
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.terrain.index_in_bounds(x as usize, y as usize)
    }

    /// The terrain kind at `coord`, or [GridError::OutOfBounds] if `coord`
    /// does not exist on the grid.
    pub fn terrain_at(&self, coord: Point) -> Result<Terrain, GridError> {
        if !self.in_bounds(coord.x, coord.y) {
            return Err(GridError::OutOfBounds {
                coord,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(self.get(coord.x as usize, coord.y as usize))
    }

    /// The cost of entering `coord`, or [None] if the terrain there is an
    /// [Obstacle](Terrain::Obstacle) or `coord` lies outside the grid. This
    /// is the single source of truth for movement costs during a search.
    pub fn cost_of(&self, coord: Point) -> Option<i32> {
        self.terrain_at(coord).ok().and_then(Terrain::cost)
    }

    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && self.get(pos.x as usize, pos.y as usize).passable()
    }

    /// The enterable axis-aligned neighbours of `pos` with their entry costs.
    fn passable_neighbours(&self, pos: &Point) -> Vec<(Point, i32)> {
        axis_neighbours(*pos)
            .into_iter()
            .filter_map(|p| self.cost_of(p).map(|cost| (p, cost)))
            .collect::<Vec<_>>()
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable grid
    /// neighbours to the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let w = self.terrain.width;
        let h = self.terrain.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                if self.get(x, y).passable() {
                    let parent_ix = self.terrain.get_ix(x, y);
                    let point = Point::new(x as i32, y as i32);
                    let neighbours = [
                        Point::new(point.x, point.y + 1),
                        Point::new(point.x + 1, point.y),
                    ]
                    .into_iter()
                    .filter(|p| self.can_move_to(*p))
                    .map(|p| self.terrain.get_ix(p.x as usize, p.y as usize))
                    .collect::<Vec<usize>>();
                    for ix in neighbours {
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Computes a least-cost path from `start` to `goal` using A* with the
    /// Manhattan distance as heuristic, moving in the four cardinal
    /// directions only.
    ///
    /// Returns the full path from `start` to `goal` inclusive, or `Ok(None)`
    /// if the goal cannot be reached; an unreachable goal is an expected
    /// outcome, not an error. Out-of-bounds endpoints fail with a
    /// [SearchError] instead. The start cell is entered without a cost
    /// check, so a search may leave an [Obstacle](Terrain::Obstacle) start,
    /// and `start == goal` trivially succeeds with a single-cell path.
    pub fn find_path(&self, start: Point, goal: Point) -> Result<Option<Vec<Point>>, SearchError> {
        let start_terrain = self.terrain_at(start).map_err(SearchError::InvalidStart)?;
        let goal_terrain = self.terrain_at(goal).map_err(SearchError::InvalidGoal)?;
        if start == goal {
            return Ok(Some(vec![start]));
        }
        if !goal_terrain.passable() {
            info!("goal {} is impassable", goal);
            return Ok(None);
        }
        // The component index is exact for 4-connectivity while clean, so a
        // negative answer needs no search. A dirty index is never consulted.
        if !self.components_dirty && start_terrain.passable() && self.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(None);
        }
        let result = astar(
            &start,
            |node| self.passable_neighbours(node),
            |node| manhattan_distance(*node, goal),
            |node| *node == goal,
        );
        Ok(result.map(|(path, _cost)| path))
    }

    /// Total cost of entering every cell on `path` after the first, or
    /// [None] if any of those cells is impassable or out of bounds.
    pub fn path_cost(&self, path: &[Point]) -> Option<i32> {
        path.iter().skip(1).map(|p| self.cost_of(*p)).sum()
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.terrain.height {
            for x in 0..self.terrain.width {
                write!(f, "{}", self.get(x, y).glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid<Terrain> for TerrainGrid {
    fn new(width: usize, height: usize, default_value: Terrain) -> Self {
        let mut base_grid = TerrainGrid {
            terrain: SimpleGrid::new(width, height, default_value as u8),
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        // A fresh grid starts with valid components so searches are correct
        // without any explicit generate_components call.
        base_grid.generate_components();
        base_grid
    }
    fn get(&self, x: usize, y: usize) -> Terrain {
        Terrain::from_raw(self.terrain.get(x, y))
    }
    /// Updates a cell on the grid. Joins newly passable cells to the
    /// components of their neighbours and flags the components as dirty if
    /// a region is (potentially) broken apart.
    fn set(&mut self, x: usize, y: usize, value: Terrain) {
        let was_passable = self.get(x, y).passable();
        self.terrain.set(x, y, value as u8);
        if value.passable() {
            let p = Point::new(x as i32, y as i32);
            let p_ix = self.terrain.get_ix(x, y);
            for n in axis_neighbours(p) {
                if self.can_move_to(n) {
                    let n_ix = self.terrain.get_ix(n.x as usize, n.y as usize);
                    self.components.union(p_ix, n_ix);
                }
            }
        } else if was_passable {
            self.components_dirty = true;
        }
    }
    fn width(&self) -> usize {
        self.terrain.width
    }
    fn height(&self) -> usize {
        self.terrain.height
    }
}
