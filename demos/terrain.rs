use grid_util::grid::Grid;
use grid_util::point::Point;
use terrain_pathfinding::{Terrain, TerrainGrid};

// A column of temporarily blocked cells (entry cost 5) bars the middle of
// the map, with a single free gap in the top row. Crossing the barrier
// directly would cost more than walking the detour through the gap, so the
// returned route bends over the top:
//  _______
// |...X...|
// |S..x..E|
// |...x...|
//  _______
// where x marks a temporarily blocked cell and X the gap.

fn main() {
    let mut grid: TerrainGrid = TerrainGrid::new(7, 3, Terrain::Free);
    for y in 1..3 {
        grid.set(3, y, Terrain::TemporarilyBlocked);
    }
    println!("{}", grid);
    let start = Point::new(0, 1);
    let end = Point::new(6, 1);
    let path = grid.find_path(start, end).unwrap().unwrap();
    println!("Path with cost {:?}:", grid.path_cost(&path));
    for p in &path {
        println!("{:?}", p);
    }
}
