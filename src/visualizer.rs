use grid_util::point::Point;
use log::{debug, info};

use crate::error::VisualizerError;
use crate::layout::GridLayout;
use crate::maze::MazeGenerator;
use crate::pathing_grid::PathingGrid;
use crate::solver::{Algorithm, Computation, Step};
use crate::terrain::Terrain;
use crate::Cost;

/// Owns the grid and at most one running computation. Edits and new computations are refused
/// while one is running; the frontend calls [tick](Self::tick) once per frame to advance it.
pub struct Visualizer {
    pub grid: PathingGrid,
    active: Option<Box<dyn Computation>>,
    brush: Terrain,
    path_cost: Option<Cost>,
}

impl Default for Visualizer {
    fn default() -> Visualizer {
        Visualizer::new(GridLayout::default())
    }
}

impl Visualizer {
    pub fn new(layout: GridLayout) -> Visualizer {
        Visualizer {
            grid: PathingGrid::new(layout),
            active: None,
            brush: Terrain::Wall,
            path_cost: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Cost of the last path found, cleared by resets and new searches.
    pub fn path_cost(&self) -> Option<Cost> {
        self.path_cost
    }

    pub fn brush(&self) -> Terrain {
        self.brush
    }

    pub fn set_brush(&mut self, brush: Terrain) {
        self.brush = brush;
    }

    /// Selects a brush by name, e.g. from a key binding or command line.
    pub fn set_brush_named(&mut self, name: &str) -> Result<(), VisualizerError> {
        self.brush = name.parse()?;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), VisualizerError> {
        if let Some(active) = &self.active {
            debug!("Rejected request while {} is running", active.name());
            return Err(VisualizerError::Busy);
        }
        Ok(())
    }

    /// Clears the previous search and starts `algorithm` between the current start and end.
    pub fn start_algorithm(&mut self, algorithm: Algorithm) -> Result<(), VisualizerError> {
        self.ensure_idle()?;
        self.grid.reset_path();
        self.path_cost = None;
        self.active = Some(algorithm.start(&self.grid));
        Ok(())
    }

    /// Wipes the grid and starts carving a maze into it.
    pub fn generate_maze(&mut self) -> Result<(), VisualizerError> {
        self.generate_maze_with(MazeGenerator::new())
    }

    pub fn generate_maze_with(
        &mut self,
        generator: MazeGenerator,
    ) -> Result<(), VisualizerError> {
        self.clear_all()?;
        self.active = Some(Box::new(generator));
        Ok(())
    }

    /// Paints the selected brush at a pixel position. Positions outside the grid are ignored.
    pub fn paint(&mut self, pixel: Point) -> Result<(), VisualizerError> {
        self.ensure_idle()?;
        let node = self.grid.node_at(pixel);
        self.grid.set_node_terrain(node, self.brush);
        Ok(())
    }

    /// Erases whatever is painted at a pixel position back to air.
    pub fn erase(&mut self, pixel: Point) -> Result<(), VisualizerError> {
        self.ensure_idle()?;
        let node = self.grid.node_at(pixel);
        self.grid.set_node_terrain(node, Terrain::Air);
        Ok(())
    }

    pub fn reset_path(&mut self) -> Result<(), VisualizerError> {
        self.ensure_idle()?;
        self.grid.reset_path();
        self.path_cost = None;
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<(), VisualizerError> {
        self.ensure_idle()?;
        self.grid.full_reset();
        self.path_cost = None;
        Ok(())
    }

    /// Advances the running computation by one step. Without one this is a no-op returning
    /// [Step::Done].
    pub fn tick(&mut self) -> Step {
        let Some(active) = self.active.as_mut() else {
            return Step::Done;
        };
        let step = active.advance(&mut self.grid);
        match step {
            Step::Running => {}
            Step::PathFound(cost) => {
                info!("{} finished with path cost {}", active.name(), cost);
                self.path_cost = Some(cost);
                self.active = None;
            }
            Step::Done => {
                info!("{} finished", active.name());
                self.active = None;
            }
        }
        step
    }

    /// Drops the running computation. Its marks stay on the grid until the next reset.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            info!("Cancelled {}", active.name());
        }
    }
}
