use core::fmt;

/// Reasons the [Visualizer](crate::visualizer::Visualizer) refuses a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisualizerError {
    /// A search or maze generation is still running; edits and new computations must wait.
    Busy,
    /// A brush name that does not correspond to any [Terrain](crate::terrain::Terrain).
    UnknownTerrain(String),
    UnknownAlgorithm(String),
}

impl fmt::Display for VisualizerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VisualizerError::Busy => write!(f, "a computation is already running"),
            VisualizerError::UnknownTerrain(name) => write!(f, "unknown terrain '{name}'"),
            VisualizerError::UnknownAlgorithm(name) => write!(f, "unknown algorithm '{name}'"),
        }
    }
}

impl std::error::Error for VisualizerError {}
