//! Fuzzes the pathfinding system by checking for many random terrain grids
//! that the search outcome agrees with a brute-force reference: a path is
//! found exactly when the goal is reachable, the path is connected, and its
//! cost is optimal.
use grid_util::grid::Grid;
use grid_util::point::Point;
use rand::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use terrain_pathfinding::{Terrain, TerrainGrid};

fn random_terrain(rng: &mut StdRng) -> Terrain {
    match rng.gen_range(0..10) {
        0..=2 => Terrain::Obstacle,
        3..=4 => Terrain::Water,
        5 => Terrain::TemporarilyBlocked,
        _ => Terrain::Free,
    }
}

fn random_grid(n: usize, rng: &mut StdRng) -> TerrainGrid {
    let mut grid: TerrainGrid = TerrainGrid::new(n, n, Terrain::Free);
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            grid.set(x, y, random_terrain(rng));
        }
    }
    grid.generate_components();
    grid
}

fn visualize_grid(grid: &TerrainGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else {
                print!("{}", grid.get(x as usize, y as usize).glyph());
            }
        }
        println!();
    }
}

/// Reference implementation: uniform-cost search without a heuristic or
/// early pruning. Slow but obviously correct on small grids.
fn brute_force_cost(grid: &TerrainGrid, start: Point, goal: Point) -> Option<i32> {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let ix = |p: Point| (p.y * w + p.x) as usize;
    let mut dist: Vec<Option<i32>> = vec![None; (w * h) as usize];
    let mut heap = BinaryHeap::new();
    dist[ix(start)] = Some(0);
    heap.push(Reverse((0, start.x, start.y)));
    while let Some(Reverse((d, x, y))) = heap.pop() {
        let p = Point::new(x, y);
        if p == goal {
            return Some(d);
        }
        if dist[ix(p)] != Some(d) {
            continue;
        }
        for n in [
            Point::new(x, y - 1),
            Point::new(x, y + 1),
            Point::new(x - 1, y),
            Point::new(x + 1, y),
        ] {
            if let Some(cost) = grid.cost_of(n) {
                let nd = d + cost;
                if dist[ix(n)].map_or(true, |old| nd < old) {
                    dist[ix(n)] = Some(nd);
                    heap.push(Reverse((nd, n.x, n.y)));
                }
            }
        }
    }
    None
}

fn check_against_brute_force(grid: &TerrainGrid, start: Point, end: Point) {
    let expected = brute_force_cost(grid, start, end);
    let path = grid.find_path(start, end).unwrap();
    // Show the grid if the outcomes disagree
    if path.is_some() != expected.is_some() {
        visualize_grid(grid, &start, &end);
    }
    assert_eq!(path.is_some(), expected.is_some());
    if let Some(path) = path {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for w in path.windows(2) {
            assert_eq!((w[0].x - w[1].x).abs() + (w[0].y - w[1].y).abs(), 1);
        }
        assert_eq!(grid.path_cost(&path), expected);
    }
}

#[test]
fn fuzz() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        grid.set(0, 0, Terrain::Free);
        grid.set(N - 1, N - 1, Terrain::Free);
        grid.generate_components();
        check_against_brute_force(&grid, start, end);

        // Incremental edits must stay consistent without a rebuild: passable
        // edits join components in place, obstacle edits flag them dirty.
        let x = rng.gen_range(0..N);
        let y = rng.gen_range(0..N);
        grid.set(x, y, random_terrain(&mut rng));
        grid.set(0, 0, Terrain::Free);
        grid.set(N - 1, N - 1, Terrain::Free);
        check_against_brute_force(&grid, start, end);
    }
}
