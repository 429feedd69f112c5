use crate::frontier::PriorityFrontier;
use crate::node::Node;
use crate::solver::{GridSolver, Search};
use crate::Cost;

#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

pub type DijkstraSearch = Search<DijkstraSolver>;

impl GridSolver for DijkstraSolver {
    type Frontier = PriorityFrontier;

    const NAME: &'static str = "Dijkstra";
    const RELAXES: bool = true;

    fn priority(&self, node: &Node) -> Cost {
        node.cost_so_far
    }
}
