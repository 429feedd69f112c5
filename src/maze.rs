//! Step-wise maze generation by recursive backtracking.
//!
//! Cells sit on odd `(row, col)` coordinates and the nodes between them act as walls that get
//! carved away, so a grid with an odd size ends up with a solid border. With an even size the last
//! row and column hold cells themselves and can be open at the edge.
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::node::Visual;
use crate::pathing_grid::PathingGrid;
use crate::solver::{Computation, Step};
use crate::terrain::Terrain;
use crate::NodeId;

enum Phase {
    Fill,
    Seed,
    Carve,
    Recolor,
    Finished,
}

pub struct MazeGenerator<R: Rng = StdRng> {
    rng: R,
    stack: Vec<NodeId>,
    phase: Phase,
    carved: usize,
}

impl MazeGenerator<StdRng> {
    pub fn new() -> MazeGenerator<StdRng> {
        MazeGenerator::from_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> MazeGenerator<StdRng> {
        MazeGenerator::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for MazeGenerator<StdRng> {
    fn default() -> Self {
        MazeGenerator::new()
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn from_rng(rng: R) -> MazeGenerator<R> {
        MazeGenerator {
            rng,
            stack: Vec::new(),
            phase: Phase::Fill,
            carved: 0,
        }
    }

    /// Cells two steps away in each direction that have not been carved yet.
    fn uncarved_cells(grid: &PathingGrid, current: NodeId) -> SmallVec<[NodeId; 4]> {
        let node = grid.node(current);
        let (r, c) = (node.row() as i32, node.col() as i32);
        let last = grid.size() as i32 - 2;
        [
            (r > 1, r - 2, c),
            (r < last, r + 2, c),
            (c > 1, r, c - 2),
            (c < last, r, c + 2),
        ]
        .into_iter()
        .filter(|&(inside, _, _)| inside)
        .filter_map(|(_, row, col)| grid.get_ix(row, col))
        .filter(|&ix| grid.node(ix).is_wall())
        .collect()
    }

    fn carve(&mut self, grid: &mut PathingGrid, ix: NodeId) {
        grid.set_node_terrain(Some(ix), Terrain::Air);
        self.carved += 1;
    }

    fn seed(&mut self, grid: &mut PathingGrid) -> Step {
        let cells = grid.size() / 2;
        if cells == 0 {
            debug!("Grid of size {} has no room for maze cells", grid.size());
            return self.recolor(grid);
        }
        let row = 2 * self.rng.gen_range(0..cells) + 1;
        let col = 2 * self.rng.gen_range(0..cells) + 1;
        debug!("Carving maze from ({}, {})", row, col);
        if let Some(ix) = grid.node_at_cell(row, col) {
            self.carve(grid, ix);
            self.stack.push(ix);
            grid.mark(ix, Visual::Active);
        }
        self.phase = Phase::Carve;
        Step::Running
    }

    fn step(&mut self, grid: &mut PathingGrid) -> Step {
        let Some(&current) = self.stack.last() else {
            return self.recolor(grid);
        };
        let candidates = Self::uncarved_cells(grid, current);
        match candidates.choose(&mut self.rng) {
            Some(&next) => {
                let (a, b) = (grid.node(current), grid.node(next));
                let between = grid.node_at_cell((a.row() + b.row()) / 2, (a.col() + b.col()) / 2);
                if let Some(between) = between {
                    self.carve(grid, between);
                }
                self.carve(grid, next);
                self.stack.push(next);
            }
            None => {
                self.stack.pop();
            }
        }
        grid.mark(current, Visual::Terrain);
        match self.stack.last() {
            Some(&top) => {
                grid.mark(top, Visual::Active);
                Step::Running
            }
            None => self.recolor(grid),
        }
    }

    /// Clears every leftover mark on passable nodes.
    fn recolor(&mut self, grid: &mut PathingGrid) -> Step {
        let open: Vec<NodeId> = grid
            .nodes()
            .filter(|(_, node)| !node.is_wall())
            .map(|(ix, _)| ix)
            .collect();
        for ix in open {
            grid.mark(ix, Visual::Terrain);
        }
        grid.update();
        info!("Maze finished with {} carved nodes", self.carved);
        self.phase = Phase::Recolor;
        Step::Running
    }
}

impl<R: Rng> Computation for MazeGenerator<R> {
    fn advance(&mut self, grid: &mut PathingGrid) -> Step {
        match self.phase {
            Phase::Fill => {
                grid.fill(Terrain::Wall);
                self.phase = Phase::Seed;
                Step::Running
            }
            Phase::Seed => self.seed(grid),
            Phase::Carve => self.step(grid),
            Phase::Recolor | Phase::Finished => {
                self.phase = Phase::Finished;
                Step::Done
            }
        }
    }

    fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    fn name(&self) -> &'static str {
        "maze"
    }
}
