use core::fmt;
use std::str::FromStr;

use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::IndexMap;
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::error::VisualizerError;
use crate::frontier::Frontier;
use crate::node::{Node, Visual};
use crate::pathing_grid::PathingGrid;
use crate::{Cost, NodeId};

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;

use astar::AstarSolver;
use bfs::BfsSolver;
use dfs::DfsSolver;
use dijkstra::DijkstraSolver;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Outcome of advancing a [Computation] by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Work remains; the grid may have new marks to draw.
    Running,
    /// The goal was reached and the path fully revealed, with its total cost.
    PathFound(Cost),
    /// Finished without a result: no path exists, an endpoint is missing, or a maze is complete.
    Done,
}

/// A resumable unit of work on a [PathingGrid]. Each call to [advance](Self::advance) performs a
/// bounded amount of work and returns. Computations keep no reference to the grid, so the caller
/// must keep passing the same one.
pub trait Computation {
    fn advance(&mut self, grid: &mut PathingGrid) -> Step;
    fn is_finished(&self) -> bool;
    fn name(&self) -> &'static str;

    /// Advances until the computation stops running and returns the path cost, if any.
    fn run(&mut self, grid: &mut PathingGrid) -> Option<Cost> {
        loop {
            match self.advance(grid) {
                Step::Running => continue,
                Step::PathFound(cost) => return Some(cost),
                Step::Done => return None,
            }
        }
    }
}

/// The parts in which the search algorithms differ. The shared stepping logic lives in [Search].
pub trait GridSolver {
    type Frontier: Frontier;

    const NAME: &'static str;
    /// Whether a cheaper route to an already discovered node updates it. Solvers that do not
    /// relax only ever record the first discovery of a node.
    const RELAXES: bool;
    /// Pushes neighbours in reverse so a LIFO frontier pops them in neighbour order.
    const REVERSE_NEIGHBOURS: bool = false;

    /// Estimated remaining cost from `node` to `goal`.
    fn heuristic(&self, _node: &Node, _goal: &Node) -> Cost {
        0
    }

    /// Key under which a freshly updated node enters the frontier.
    fn priority(&self, node: &Node) -> Cost;
}

enum Phase {
    Pending,
    Searching { goal: NodeId },
    /// Reveals the found path one node per step before reporting the cost.
    Tracing { next: usize, cost: Cost },
    Finished,
}

/// A step-wise search from the grid's start to its end. All search state besides the per-node
/// scratch fields is owned here and dropped with the search.
pub struct Search<S: GridSolver> {
    solver: S,
    start: Option<NodeId>,
    goal: Option<NodeId>,
    frontier: S::Frontier,
    came_from: FxIndexMap<NodeId, NodeId>,
    visited: FxHashSet<NodeId>,
    path: Option<Vec<NodeId>>,
    phase: Phase,
    expanded: usize,
}

/// Walks the predecessor map back from `goal`, stopping before the node without a predecessor.
fn reverse_path(parents: &FxIndexMap<NodeId, NodeId>, goal: NodeId) -> Vec<NodeId> {
    let mut path: Vec<NodeId> =
        std::iter::successors(Some(goal), |node| parents.get(node).copied())
            .take_while(|node| parents.contains_key(node))
            .collect();
    path.reverse();
    path
}

impl<S: GridSolver> Search<S> {
    /// Binds a new search to the start and end currently designated on `grid`.
    pub fn new(solver: S, grid: &PathingGrid) -> Search<S> {
        Search {
            solver,
            start: grid.start(),
            goal: grid.end(),
            frontier: S::Frontier::default(),
            came_from: FxIndexMap::default(),
            visited: FxHashSet::default(),
            path: None,
            phase: Phase::Pending,
            expanded: 0,
        }
    }

    /// Predecessor of every node discovered so far.
    pub fn came_from(&self) -> &FxIndexMap<NodeId, NodeId> {
        &self.came_from
    }

    /// The path from the node after the start up to and including the goal, once found.
    pub fn path(&self) -> Option<&[NodeId]> {
        self.path.as_deref()
    }

    /// Number of nodes expanded so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn initialize(&mut self, grid: &mut PathingGrid, start: NodeId, goal: NodeId) {
        info!(
            "{}: searching from {} to {}",
            S::NAME,
            grid.node(start).pos(),
            grid.node(goal).pos()
        );
        grid.reset_search_state();
        let h = self.solver.heuristic(grid.node(start), grid.node(goal));
        let node = grid.node_mut(start);
        node.cost_so_far = 0;
        node.estimate = h;
        let priority = self.solver.priority(grid.node(start));
        self.frontier.push(start, priority);
        self.visited.insert(start);
        self.phase = Phase::Searching { goal };
    }

    /// Pops the next live frontier entry, discarding entries made stale by a later relaxation.
    fn pop_live(&mut self, grid: &PathingGrid) -> Option<NodeId> {
        while let Some((node, priority)) = self.frontier.pop() {
            if S::RELAXES && priority > self.solver.priority(grid.node(node)) {
                continue;
            }
            return Some(node);
        }
        None
    }

    fn expand(&mut self, grid: &mut PathingGrid, goal: NodeId) -> Step {
        let Some(current) = self.pop_live(grid) else {
            self.phase = Phase::Finished;
            grid.update();
            match self.start {
                Some(start) if grid.reachable(start, goal) => {
                    warn!("{}: reachable goal could not be pathed to", S::NAME)
                }
                _ => info!(
                    "{}: no path exists, {} nodes expanded",
                    S::NAME,
                    self.expanded
                ),
            }
            return Step::Done;
        };
        if current == goal {
            let path = reverse_path(&self.came_from, goal);
            let cost: Cost = path.iter().map(|&n| grid.node(n).weight()).sum();
            info!(
                "{}: found path of {} nodes with cost {} after {} expansions",
                S::NAME,
                path.len(),
                cost,
                self.expanded
            );
            self.path = Some(path);
            self.phase = Phase::Tracing { next: 0, cost };
            return self.trace(grid);
        }

        let mut neighbours: SmallVec<[NodeId; 4]> =
            grid.node(current).neighbors().iter().copied().collect();
        if S::REVERSE_NEIGHBOURS {
            neighbours.reverse();
        }
        let current_cost = grid.node(current).cost_so_far;
        for n in neighbours {
            if grid.node(n).is_wall() {
                continue;
            }
            let candidate = current_cost.saturating_add(grid.node(n).weight());
            if S::RELAXES {
                if candidate >= grid.node(n).cost_so_far {
                    continue;
                }
            } else if !self.visited.insert(n) {
                continue;
            }
            let h = self.solver.heuristic(grid.node(n), grid.node(goal));
            let node = grid.node_mut(n);
            node.cost_so_far = candidate;
            node.estimate = candidate.saturating_add(h);
            node.predecessor = Some(current);
            self.came_from.insert(n, current);
            let priority = self.solver.priority(grid.node(n));
            self.frontier.push(n, priority);
            grid.mark(n, Visual::Frontier);
        }
        grid.mark(current, Visual::Settled);
        self.expanded += 1;
        Step::Running
    }

    fn trace(&mut self, grid: &mut PathingGrid) -> Step {
        let Phase::Tracing { next, cost } = self.phase else {
            return Step::Done;
        };
        match self.path.as_ref().and_then(|path| path.get(next)) {
            Some(&node) => {
                grid.mark(node, Visual::Path);
                self.phase = Phase::Tracing {
                    next: next + 1,
                    cost,
                };
                Step::Running
            }
            None => {
                self.phase = Phase::Finished;
                Step::PathFound(cost)
            }
        }
    }
}

impl<S: GridSolver> Computation for Search<S> {
    fn advance(&mut self, grid: &mut PathingGrid) -> Step {
        match self.phase {
            Phase::Pending => match (self.start, self.goal) {
                (Some(start), Some(goal)) => {
                    self.initialize(grid, start, goal);
                    self.expand(grid, goal)
                }
                _ => {
                    debug!("{}: start or end missing, nothing to search", S::NAME);
                    self.phase = Phase::Finished;
                    Step::Done
                }
            },
            Phase::Searching { goal } => self.expand(grid, goal),
            Phase::Tracing { .. } => self.trace(grid),
            Phase::Finished => Step::Done,
        }
    }

    fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    fn name(&self) -> &'static str {
        S::NAME
    }
}

/// The search algorithms a user can pick from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Astar,
    Dijkstra,
    Bfs,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Astar,
        Algorithm::Dijkstra,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// Creates a search between the grid's current start and end.
    pub fn start(self, grid: &PathingGrid) -> Box<dyn Computation> {
        match self {
            Algorithm::Astar => Box::new(Search::new(AstarSolver, grid)),
            Algorithm::Dijkstra => Box::new(Search::new(DijkstraSolver, grid)),
            Algorithm::Bfs => Box::new(Search::new(BfsSolver, grid)),
            Algorithm::Dfs => Box::new(Search::new(DfsSolver, grid)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Astar => AstarSolver::NAME,
            Algorithm::Dijkstra => DijkstraSolver::NAME,
            Algorithm::Bfs => BfsSolver::NAME,
            Algorithm::Dfs => DfsSolver::NAME,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a*" | "astar" => Ok(Algorithm::Astar),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            _ => Err(VisualizerError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::terrain::Terrain;

    /// Builds a grid from rows of terrain glyphs as printed by the grid's [Display](fmt::Display).
    pub(crate) fn grid_from_rows(rows: &[&str]) -> PathingGrid {
        let mut grid = PathingGrid::with_size(rows.len());
        for (row, line) in rows.iter().enumerate() {
            for (col, glyph) in line.chars().enumerate() {
                let terrain = Terrain::ALL
                    .into_iter()
                    .find(|t| t.glyph() == glyph)
                    .unwrap();
                grid.set_node_terrain(grid.node_at_cell(row, col), terrain);
            }
        }
        grid.update();
        grid
    }

    /// Runs a search to completion, checking the shared invariants along the way.
    pub(crate) fn run_checked<S: GridSolver>(solver: S, grid: &mut PathingGrid) -> Option<Cost> {
        let mut search = Search::new(solver, grid);
        let mut found = None;
        loop {
            match search.advance(grid) {
                Step::Running => {}
                Step::PathFound(cost) => {
                    found = Some(cost);
                    break;
                }
                Step::Done => break,
            }
        }
        assert!(search.is_finished());
        assert_eq!(search.advance(grid), Step::Done);
        for node in search.came_from().keys() {
            assert!(!grid.node(*node).is_wall());
        }
        if let Some(cost) = found {
            let goal = grid.end().unwrap();
            let path = reverse_path(search.came_from(), goal);
            let sum: Cost = path.iter().map(|&n| grid.node(n).weight()).sum();
            assert_eq!(cost, sum);
            for &n in path.iter().filter(|&&n| n != goal) {
                assert_eq!(grid.node(n).visual, Visual::Path);
            }
        }
        found
    }

    pub(crate) fn path_of<S: GridSolver>(
        solver: S,
        grid: &mut PathingGrid,
    ) -> Option<Vec<(usize, usize)>> {
        let mut search = Search::new(solver, grid);
        search.run(grid)?;
        let goal = grid.end()?;
        Some(
            reverse_path(search.came_from(), goal)
                .into_iter()
                .map(|n| (grid.node(n).row(), grid.node(n).col()))
                .collect(),
        )
    }

    #[test]
    fn reverse_path_excludes_start() {
        let mut parents = FxIndexMap::default();
        parents.insert(1, 0);
        parents.insert(2, 1);
        parents.insert(5, 2);
        assert_eq!(reverse_path(&parents, 5), vec![1, 2, 5]);
        assert_eq!(reverse_path(&parents, 0), Vec::<NodeId>::new());
    }

    #[test]
    fn missing_endpoints_finish_immediately() {
        for algorithm in Algorithm::ALL {
            let mut grid = PathingGrid::with_size(4);
            grid.set_node_terrain(grid.node_at_cell(0, 0), Terrain::Start);
            let mut search = algorithm.start(&grid);
            assert_eq!(search.advance(&mut grid), Step::Done);
            assert!(search.is_finished());
            assert!(grid.nodes().all(|(_, n)| n.visual == Visual::Terrain));
        }
    }

    #[test]
    fn algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::Astar));
        assert!("greedy".parse::<Algorithm>().is_err());
    }

    /// The 5x5 scenario: every algorithm walks straight along the top row.
    #[test]
    fn open_row_scenario() {
        let rows = [
            "S...E", //
            ".....", //
            ".....", //
            ".....", //
            ".....",
        ];
        for algorithm in [Algorithm::Astar, Algorithm::Dijkstra, Algorithm::Bfs] {
            let mut grid = grid_from_rows(&rows);
            let mut search = algorithm.start(&grid);
            assert_eq!(search.run(&mut grid), Some(4), "{algorithm}");
        }
        let mut grid = grid_from_rows(&rows);
        assert_eq!(
            path_of(BfsSolver, &mut grid),
            Some(vec![(0, 1), (0, 2), (0, 3), (0, 4)])
        );
    }

    /// Same grid with (0, 2) walled off: the detour through row 1 costs two more hops.
    #[test]
    fn walled_row_scenario() {
        let rows = [
            "S.#.E", //
            ".....", //
            ".....", //
            ".....", //
            ".....",
        ];
        let mut grid = grid_from_rows(&rows);
        let path = path_of(BfsSolver, &mut grid).unwrap();
        assert_eq!(path.len(), 6);
        assert!(path.contains(&(1, 2)));
        for algorithm in [Algorithm::Astar, Algorithm::Dijkstra, Algorithm::Bfs] {
            let mut grid = grid_from_rows(&rows);
            assert_eq!(algorithm.start(&grid).run(&mut grid), Some(6), "{algorithm}");
        }
    }

    #[test]
    fn enclosed_goal_has_no_path() {
        let rows = [
            "S....", //
            ".....", //
            "...##", //
            "...#E", //
            "...#.",
        ];
        for algorithm in Algorithm::ALL {
            let mut grid = grid_from_rows(&rows);
            let mut search = algorithm.start(&grid);
            let mut steps = 0;
            while search.advance(&mut grid) == Step::Running {
                steps += 1;
            }
            assert!(search.is_finished());
            assert!(steps > 0);
            assert!(grid.nodes().any(|(_, n)| n.visual == Visual::Settled));
            assert!(grid.nodes().all(|(_, n)| n.visual != Visual::Path));
        }
    }

    #[test]
    fn path_is_revealed_one_node_per_step() {
        let mut grid = grid_from_rows(&["S..E", "....", "....", "...."]);
        let mut search = Search::new(BfsSolver, &grid);
        let mut steps = Vec::new();
        loop {
            let step = search.advance(&mut grid);
            steps.push(step);
            if step != Step::Running {
                break;
            }
        }
        assert_eq!(steps.last(), Some(&Step::PathFound(3)));
        // The path has three nodes, the last being the goal, so three reveal steps precede the cost.
        let path_marks = grid.nodes().filter(|(_, n)| n.visual == Visual::Path).count();
        assert_eq!(path_marks, 2);
        assert_eq!(steps[steps.len() - 4..steps.len() - 1], [Step::Running; 3]);
        assert_eq!(search.path().map(|p| p.len()), Some(3));
    }

    #[test]
    fn endpoints_keep_their_look() {
        for algorithm in Algorithm::ALL {
            let mut grid = grid_from_rows(&["S....", ".....", "..E..", ".....", "....."]);
            algorithm.start(&grid).run(&mut grid);
            let start = grid.start().unwrap();
            let end = grid.end().unwrap();
            assert_eq!(grid.node(start).visual, Visual::Terrain);
            assert_eq!(grid.node(end).visual, Visual::Terrain);
            assert_eq!(grid.node(start).terrain(), Terrain::Start);
        }
    }

    #[test]
    fn stale_search_state_is_cleared() {
        let mut grid = grid_from_rows(&["S..E", "....", "....", "...."]);
        assert_eq!(Search::new(DijkstraSolver, &grid).run(&mut grid), Some(3));
        // A second run without resetting the path still finds the same cost.
        assert_eq!(Search::new(DijkstraSolver, &grid).run(&mut grid), Some(3));
    }
}
