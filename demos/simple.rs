use grid_util::grid::Grid;
use grid_util::point::Point;
use terrain_pathfinding::{Terrain, TerrainGrid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Moves are restricted to the four cardinal directions.

fn main() {
    let mut grid: TerrainGrid = TerrainGrid::new(3, 3, Terrain::Free);
    grid.set(1, 1, Terrain::Obstacle);
    grid.update();
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = grid.find_path(start, end).unwrap().unwrap();
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
