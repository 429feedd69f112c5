//! # grid_visualizer
//!
//! The model behind an interactive pathfinding visualizer: a square grid of weighted terrain with
//! a start and an end, and step-wise versions of
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm),
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm), breadth-first and
//! depth-first search, plus a
//! [recursive backtracking](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Randomized_depth-first_search)
//! maze generator. Every algorithm is a [Computation](solver::Computation) that does one unit of
//! work per [advance](solver::Computation::advance) and leaves marks on the grid for a renderer to
//! draw in between.
//!
//! Movement is 4-directional. Entering a node costs the weight of its terrain; walls cannot be
//! entered at all.
pub mod error;
pub mod frontier;
pub mod layout;
pub mod maze;
pub mod node;
pub mod pathing_grid;
pub mod solver;
pub mod terrain;
pub mod visualizer;

pub use error::VisualizerError;
pub use maze::MazeGenerator;
pub use pathing_grid::PathingGrid;
pub use solver::{Algorithm, Computation, Step};
pub use terrain::Terrain;
pub use visualizer::Visualizer;

/// Index of a node in its [PathingGrid].
pub type NodeId = usize;

/// Path and terrain cost.
pub type Cost = u32;

/// Cost of a node that has not been reached.
pub const INFINITE_COST: Cost = Cost::MAX;
