use grid_util::point::Point;
use smallvec::SmallVec;

use crate::terrain::{Rgb, Terrain};
use crate::{Cost, NodeId, INFINITE_COST};

/// Transient visualization state written by running computations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Visual {
    /// Shows the color of the underlying terrain.
    #[default]
    Terrain,
    Frontier,
    Settled,
    Path,
    /// Top of the maze generator's carving stack.
    Active,
}

impl Visual {
    /// Color of the mark, [None] for [Visual::Terrain].
    pub fn color(self) -> Option<Rgb> {
        match self {
            Visual::Terrain => None,
            Visual::Frontier => Some(Rgb(60, 200, 90)),
            Visual::Settled => Some(Rgb(220, 80, 80)),
            Visual::Path => Some(Rgb(160, 32, 240)),
            Visual::Active => Some(Rgb(60, 140, 230)),
        }
    }
}

/// A single grid cell. The position is stored as a [Point] with `x` the column and `y` the row.
#[derive(Clone, Debug)]
pub struct Node {
    pos: Point,
    terrain: Terrain,
    weight: Cost,
    is_wall: bool,
    pub visual: Visual,
    pub cost_so_far: Cost,
    /// `cost_so_far` plus the heuristic, only maintained by A*.
    pub estimate: Cost,
    pub predecessor: Option<NodeId>,
    pub(crate) neighbors: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn new(row: usize, col: usize) -> Node {
        let info = Terrain::Air.info();
        Node {
            pos: Point::new(col as i32, row as i32),
            terrain: Terrain::Air,
            weight: info.weight,
            is_wall: info.impassable,
            visual: Visual::Terrain,
            cost_so_far: INFINITE_COST,
            estimate: INFINITE_COST,
            predecessor: None,
            neighbors: SmallVec::new(),
        }
    }

    pub fn row(&self) -> usize {
        self.pos.y as usize
    }
    pub fn col(&self) -> usize {
        self.pos.x as usize
    }
    pub fn pos(&self) -> Point {
        self.pos
    }
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }
    pub fn weight(&self) -> Cost {
        self.weight
    }
    pub fn is_wall(&self) -> bool {
        self.is_wall
    }
    /// Adjacent nodes in the order up, down, left, right, skipping those outside the grid.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Applies the terrain lookup table. Also drops any visualization mark, like repainting would.
    pub fn set_terrain(&mut self, terrain: Terrain) {
        let info = terrain.info();
        self.terrain = terrain;
        self.weight = info.weight;
        self.is_wall = info.impassable;
        self.visual = Visual::Terrain;
    }

    pub fn reset_search_state(&mut self) {
        self.cost_so_far = INFINITE_COST;
        self.estimate = INFINITE_COST;
        self.predecessor = None;
    }

    /// The color a renderer should fill this cell with.
    pub fn color(&self) -> Rgb {
        self.visual
            .color()
            .unwrap_or_else(|| self.terrain.info().color)
    }

    /// Manhattan distance in cells.
    pub fn distance(&self, other: &Node) -> Cost {
        ((self.pos.x - other.pos.x).abs() + (self.pos.y - other.pos.y).abs()) as Cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_terrain_applies_table() {
        let mut node = Node::new(2, 3);
        assert_eq!((node.row(), node.col()), (2, 3));
        assert_eq!(node.terrain(), Terrain::Air);
        assert_eq!(node.weight(), 1);

        node.set_terrain(Terrain::Tar);
        assert_eq!(node.weight(), Terrain::Tar.info().weight);
        assert!(!node.is_wall());

        node.visual = Visual::Settled;
        node.set_terrain(Terrain::Wall);
        assert!(node.is_wall());
        assert_eq!(node.visual, Visual::Terrain);
        assert_eq!(node.color(), Terrain::Wall.info().color);
    }

    #[test]
    fn reset_clears_scratch_only() {
        let mut node = Node::new(0, 0);
        node.set_terrain(Terrain::Mud);
        node.cost_so_far = 4;
        node.estimate = 9;
        node.predecessor = Some(7);
        node.reset_search_state();
        assert_eq!(node.cost_so_far, INFINITE_COST);
        assert_eq!(node.estimate, INFINITE_COST);
        assert_eq!(node.predecessor, None);
        assert_eq!(node.terrain(), Terrain::Mud);
    }

    #[test]
    fn mark_overrides_terrain_color() {
        let mut node = Node::new(0, 0);
        node.set_terrain(Terrain::Dirt);
        node.visual = Visual::Path;
        assert_eq!(node.color(), Visual::Path.color().unwrap());
    }

    #[test]
    fn manhattan_distance() {
        let a = Node::new(1, 4);
        let b = Node::new(3, 0);
        assert_eq!(a.distance(&b), 6);
        assert_eq!(b.distance(&a), 6);
        assert_eq!(a.distance(&a), 0);
    }
}
