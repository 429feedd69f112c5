use grid_visualizer::{Algorithm, Computation, PathingGrid, Step, Terrain};

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
// Nodes have a 4-neighborhood. The grid is printed after every step, with
// - o marking the frontier
// - x marking settled nodes
// - * marking the path

fn main() {
    let mut grid = PathingGrid::with_size(3);
    grid.set_node_terrain(grid.node_at_cell(0, 0), Terrain::Start);
    grid.set_node_terrain(grid.node_at_cell(1, 1), Terrain::Wall);
    grid.set_node_terrain(grid.node_at_cell(2, 2), Terrain::End);
    let mut search = Algorithm::Astar.start(&grid);
    loop {
        let step = search.advance(&mut grid);
        println!("{}", grid);
        match step {
            Step::Running => continue,
            Step::PathFound(cost) => println!("Path cost: {}", cost),
            Step::Done => println!("No path"),
        }
        break;
    }
}
