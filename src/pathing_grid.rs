use core::fmt;
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::layout::{CellRect, GridLayout};
use crate::node::{Node, Visual};
use crate::terrain::Terrain;
use crate::NodeId;

/// [PathingGrid] owns the square array of [Node]s in row-major order together with the start and
/// end designations. Neighbour lists are computed once on construction since the topology never
/// changes; only terrain and search state do. Connected components of passable nodes are kept in
/// a [UnionFind] structure which is regenerated lazily after edits.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub layout: GridLayout,
    nodes: Vec<Node>,
    start: Option<NodeId>,
    end: Option<NodeId>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(GridLayout::default())
    }
}

impl PathingGrid {
    pub fn new(layout: GridLayout) -> PathingGrid {
        let size = layout.size;
        let mut grid = PathingGrid {
            layout,
            nodes: iproduct!(0..size, 0..size)
                .map(|(row, col)| Node::new(row, col))
                .collect(),
            start: None,
            end: None,
            components: UnionFind::new(size * size),
            components_dirty: true,
        };
        grid.update_all_neighbours();
        grid.generate_components();
        grid
    }

    pub fn with_size(size: usize) -> PathingGrid {
        PathingGrid::new(GridLayout::with_size(size))
    }

    fn update_all_neighbours(&mut self) {
        for ix in 0..self.nodes.len() {
            let (row, col) = (self.nodes[ix].row() as i32, self.nodes[ix].col() as i32);
            let neighbours: SmallVec<[NodeId; 4]> = [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .into_iter()
                .filter_map(|(dr, dc)| self.get_ix(row + dr, col + dc))
                .collect();
            self.nodes[ix].neighbors = neighbours;
        }
    }

    pub fn size(&self) -> usize {
        self.layout.size
    }

    fn in_bounds(&self, row: i32, col: i32) -> bool {
        let size = self.size() as i32;
        row >= 0 && col >= 0 && row < size && col < size
    }

    /// Index of the node at `(row, col)` if it lies on the grid.
    pub fn get_ix(&self, row: i32, col: i32) -> Option<NodeId> {
        self.in_bounds(row, col)
            .then(|| row as usize * self.size() + col as usize)
    }

    pub fn node_at_cell(&self, row: usize, col: usize) -> Option<NodeId> {
        self.get_ix(row as i32, col as i32)
    }

    /// Maps a pixel position to the node drawn there.
    pub fn node_at(&self, pixel: Point) -> Option<NodeId> {
        self.layout
            .cell_at(pixel)
            .and_then(|(row, col)| self.node_at_cell(row, col))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }
    pub fn end(&self) -> Option<NodeId> {
        self.end
    }
    pub fn is_endpoint(&self, id: NodeId) -> bool {
        self.start == Some(id) || self.end == Some(id)
    }

    pub fn cell_rect(&self, id: NodeId) -> CellRect {
        let node = &self.nodes[id];
        self.layout.cell_rect(node.row(), node.col())
    }
    pub fn grid_lines(&self) -> Vec<(Point, Point)> {
        self.layout.grid_lines()
    }

    /// Paints `terrain` onto a node. Painting a start or end moves the designation, turning the
    /// previous holder back into air; painting anything else over a start or end removes it.
    pub fn set_node_terrain(&mut self, node: Option<NodeId>, terrain: Terrain) {
        let Some(id) = node else {
            return;
        };
        if self.start == Some(id) && terrain != Terrain::Start {
            self.start = None;
        }
        if self.end == Some(id) && terrain != Terrain::End {
            self.end = None;
        }
        let designation = match terrain {
            Terrain::Start => Some(&mut self.start),
            Terrain::End => Some(&mut self.end),
            _ => None,
        };
        if let Some(slot) = designation {
            if let Some(previous) = slot.replace(id).filter(|&p| p != id) {
                self.nodes[previous].set_terrain(Terrain::Air);
            }
        }
        if self.nodes[id].is_wall() != terrain.info().impassable {
            self.components_dirty = true;
        }
        self.nodes[id].set_terrain(terrain);
    }

    /// Sets every node to `terrain` without designating a start or end.
    pub fn fill(&mut self, terrain: Terrain) {
        self.start = None;
        self.end = None;
        for node in self.nodes.iter_mut() {
            node.set_terrain(terrain);
        }
        self.components_dirty = true;
    }

    /// Clears search state and visualization marks while keeping painted terrain.
    pub fn reset_path(&mut self) {
        for node in self.nodes.iter_mut() {
            node.reset_search_state();
            let terrain = if node.terrain().is_painted() {
                node.terrain()
            } else {
                Terrain::Air
            };
            node.set_terrain(terrain);
        }
    }

    /// Turns the whole grid back into air with no start or end.
    pub fn full_reset(&mut self) {
        self.fill(Terrain::Air);
        self.reset_search_state();
    }

    /// Resets the search scratch fields of every node, leaving terrain and marks alone.
    pub fn reset_search_state(&mut self) {
        for node in self.nodes.iter_mut() {
            node.reset_search_state();
        }
    }

    /// Sets the visualization mark of a node unless it is the start or end, which always keep
    /// showing their designation.
    pub fn mark(&mut self, id: NodeId, visual: Visual) {
        if !self.is_endpoint(id) {
            self.nodes[id].visual = visual;
        }
    }

    /// Retrieves the component id a given node belongs to.
    pub fn get_component(&self, id: NodeId) -> usize {
        self.components.find(id)
    }

    /// Checks if both nodes are passable and on the same component.
    pub fn reachable(&self, a: NodeId, b: NodeId) -> bool {
        !self.nodes[a].is_wall() && !self.nodes[b].is_wall() && self.components.equiv(a, b)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable grid neighbours to the same
    /// components. Walls end up as singleton components.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components");
        self.components = UnionFind::new(self.nodes.len());
        self.components_dirty = false;
        for (ix, node) in self.nodes.iter().enumerate() {
            if node.is_wall() {
                continue;
            }
            // Linking downwards and rightwards covers every edge once.
            for &n in node.neighbors().iter().filter(|&&n| n > ix) {
                if !self.nodes[n].is_wall() {
                    self.components.union(ix, n);
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.nodes.chunks(self.size().max(1)) {
            let line = row
                .iter()
                .map(|node| match node.visual {
                    Visual::Terrain => node.terrain().glyph(),
                    Visual::Frontier => 'o',
                    Visual::Settled => 'x',
                    Visual::Path => '*',
                    Visual::Active => '@',
                })
                .join("");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
