use core::fmt;
use std::str::FromStr;

use crate::error::VisualizerError;
use crate::Cost;

/// A display color as red, green and blue components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The kind of ground a node is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Terrain {
    #[default]
    Air,
    Wall,
    Start,
    End,
    Dirt,
    Mud,
    Tar,
}

/// Static behaviour of a [Terrain], cached on the node whenever its terrain changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainInfo {
    /// Cost of entering a node of this terrain. Meaningless if `impassable`.
    pub weight: Cost,
    pub impassable: bool,
    pub color: Rgb,
}

const fn passable(weight: Cost, color: Rgb) -> TerrainInfo {
    TerrainInfo {
        weight,
        impassable: false,
        color,
    }
}

const AIR: TerrainInfo = passable(1, Rgb(255, 255, 255));
const WALL: TerrainInfo = TerrainInfo {
    weight: 1,
    impassable: true,
    color: Rgb(40, 40, 40),
};
const START: TerrainInfo = passable(1, Rgb(255, 165, 0));
const END: TerrainInfo = passable(1, Rgb(64, 224, 208));
const DIRT: TerrainInfo = passable(2, Rgb(155, 118, 83));
const MUD: TerrainInfo = passable(5, Rgb(101, 67, 33));
const TAR: TerrainInfo = passable(10, Rgb(70, 60, 90));

impl Terrain {
    pub const ALL: [Terrain; 7] = [
        Terrain::Air,
        Terrain::Wall,
        Terrain::Start,
        Terrain::End,
        Terrain::Dirt,
        Terrain::Mud,
        Terrain::Tar,
    ];

    pub const fn info(self) -> TerrainInfo {
        match self {
            Terrain::Air => AIR,
            Terrain::Wall => WALL,
            Terrain::Start => START,
            Terrain::End => END,
            Terrain::Dirt => DIRT,
            Terrain::Mud => MUD,
            Terrain::Tar => TAR,
        }
    }

    /// Terrain that survives a path reset. Everything else is turned back into air.
    pub fn is_painted(self) -> bool {
        !matches!(self, Terrain::Air)
    }

    pub fn name(self) -> &'static str {
        match self {
            Terrain::Air => "air",
            Terrain::Wall => "wall",
            Terrain::Start => "start",
            Terrain::End => "end",
            Terrain::Dirt => "dirt",
            Terrain::Mud => "mud",
            Terrain::Tar => "tar",
        }
    }

    /// Single character used by the text rendering of a grid.
    pub fn glyph(self) -> char {
        match self {
            Terrain::Air => '.',
            Terrain::Wall => '#',
            Terrain::Start => 'S',
            Terrain::End => 'E',
            Terrain::Dirt => 'd',
            Terrain::Mud => 'm',
            Terrain::Tar => 't',
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Terrain {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Terrain::ALL
            .into_iter()
            .find(|t| t.name() == lowered)
            .ok_or_else(|| VisualizerError::UnknownTerrain(s.to_owned()))
    }
}
