use crate::frontier::FifoFrontier;
use crate::node::Node;
use crate::solver::{GridSolver, Search};
use crate::Cost;

/// Breadth-first search. Finds the path with the fewest steps; terrain weights only enter the
/// reported cost, never the choice of path.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

pub type BfsSearch = Search<BfsSolver>;

impl GridSolver for BfsSolver {
    type Frontier = FifoFrontier;

    const NAME: &'static str = "BFS";
    const RELAXES: bool = false;

    fn priority(&self, _: &Node) -> Cost {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Visual;
    use crate::solver::tests::{grid_from_rows, path_of, run_checked};
    use crate::solver::{Computation, Step};

    /// With unit weights and nothing in the way the path has as many nodes as the Manhattan
    /// distance.
    #[test]
    fn shortest_hops() {
        let mut grid = grid_from_rows(&[
            "......", //
            ".S....", //
            "......", //
            "......", //
            "....E.", //
            "......",
        ]);
        let path = path_of(BfsSolver, &mut grid).unwrap();
        assert_eq!(path.len(), 3 + 3);
        assert_eq!(path.last(), Some(&(4, 4)));
    }

    #[test]
    fn maze_like_corridor() {
        let mut grid = grid_from_rows(&[
            "S#...", //
            ".#.#.", //
            ".#.#.", //
            ".#.#.", //
            "...#E",
        ]);
        // Down 4, right 2, up 4, right 2, down 4
        assert_eq!(run_checked(BfsSolver, &mut grid), Some(16));
    }

    /// The first step expands the start and marks its passable neighbours as frontier.
    #[test]
    fn first_step_marks_frontier() {
        let mut grid = grid_from_rows(&[
            "...", //
            "#S.", //
            "..E",
        ]);
        let mut search = BfsSearch::new(BfsSolver, &grid);
        assert_eq!(search.advance(&mut grid), Step::Running);
        let marks: Vec<Visual> = grid.nodes().map(|(_, n)| n.visual).collect();
        use Visual::*;
        assert_eq!(
            marks,
            vec![
                Terrain, Frontier, Terrain, //
                Terrain, Terrain, Frontier, //
                Terrain, Frontier, Terrain,
            ]
        );
        assert_eq!(search.expanded(), 1);
        // Next pop is the upper neighbour, which becomes settled.
        assert_eq!(search.advance(&mut grid), Step::Running);
        assert_eq!(grid.node(grid.node_at_cell(0, 1).unwrap()).visual, Settled);
    }

    /// BFS never revisits a node to lower its cost, so with weights it can report more than the
    /// cheapest path.
    #[test]
    fn ignores_weights() {
        let mut grid = grid_from_rows(&[
            "S..", //
            "t..", //
            "E..",
        ]);
        assert_eq!(run_checked(BfsSolver, &mut grid), Some(11));
    }
}
