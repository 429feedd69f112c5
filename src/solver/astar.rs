use crate::frontier::PriorityFrontier;
use crate::node::Node;
use crate::solver::{GridSolver, Search};
use crate::Cost;

/// A* with the Manhattan distance as heuristic. Since every passable node costs at least 1 to
/// enter, the heuristic never overestimates and found paths are optimal.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

pub type AstarSearch = Search<AstarSolver>;

impl GridSolver for AstarSolver {
    type Frontier = PriorityFrontier;

    const NAME: &'static str = "A*";
    const RELAXES: bool = true;

    fn heuristic(&self, node: &Node, goal: &Node) -> Cost {
        node.distance(goal)
    }

    fn priority(&self, node: &Node) -> Cost {
        node.estimate
    }
}
