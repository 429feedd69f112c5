use grid_visualizer::{Algorithm, Computation, MazeGenerator, PathingGrid, Step, Terrain};

// Generates a maze and solves it between two opposite corners with every algorithm, or only the
// one given as first argument (astar, dijkstra, bfs or dfs). A second argument seeds the maze.

fn main() {
    let mut args = std::env::args().skip(1);
    let algorithms = match args.next().map(|a| a.parse::<Algorithm>()) {
        Some(Ok(algorithm)) => vec![algorithm],
        Some(Err(e)) => {
            eprintln!("{}", e);
            return;
        }
        None => Algorithm::ALL.to_vec(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);

    let size = 21;
    let mut grid = PathingGrid::with_size(size);
    let mut maze = MazeGenerator::seeded(seed);
    let mut maze_steps = 0;
    while maze.advance(&mut grid) == Step::Running {
        maze_steps += 1;
    }
    println!("Maze generated in {} steps", maze_steps);
    grid.set_node_terrain(grid.node_at_cell(1, 1), Terrain::Start);
    grid.set_node_terrain(grid.node_at_cell(size - 2, size - 2), Terrain::End);

    for algorithm in algorithms {
        grid.reset_path();
        let mut search = algorithm.start(&grid);
        let mut steps = 0;
        let result = loop {
            match search.advance(&mut grid) {
                Step::Running => steps += 1,
                Step::PathFound(cost) => break Some(cost),
                Step::Done => break None,
            }
        };
        println!("{}", grid);
        match result {
            Some(cost) => println!("{}: path cost {} after {} steps\n", algorithm, cost, steps),
            None => println!("{}: no path after {} steps\n", algorithm, steps),
        }
    }
}
