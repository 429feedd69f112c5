use crate::frontier::LifoFrontier;
use crate::node::Node;
use crate::solver::{GridSolver, Search};
use crate::Cost;

/// Depth-first search. Finds some path, usually not a short one.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

pub type DfsSearch = Search<DfsSolver>;

impl GridSolver for DfsSolver {
    type Frontier = LifoFrontier;

    const NAME: &'static str = "DFS";
    const RELAXES: bool = false;
    const REVERSE_NEIGHBOURS: bool = true;

    fn priority(&self, _: &Node) -> Cost {
        0
    }
}
