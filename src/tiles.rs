//! Ground tile vocabulary.
//!
//! A generated island is a table of tile descriptors; the renderer that
//! turns a descriptor into a sprite lives outside this crate. The numeric
//! ground ids, the `shape_id` strings and the +45 degree rotation offset are
//! part of the persisted format and must not change.

use serde::{Deserialize, Serialize};

use crate::grid::Coord;

/// The four elevation bands, ordered driest to wettest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroundKind {
    Grass,
    Sand,
    Shallow,
    Water,
}

impl GroundKind {
    /// Numeric ground id used in the persisted table.
    pub fn id(self) -> u16 {
        match self {
            GroundKind::Water => 0,
            GroundKind::Shallow => 1,
            GroundKind::Grass => 3,
            GroundKind::Sand => 6,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GroundKind::Grass => "grass",
            GroundKind::Sand => "sand",
            GroundKind::Shallow => "shallow water",
            GroundKind::Water => "deep water",
        }
    }
}

/// Tile shape. `Flat` is the full band tile used for interior cells; the
/// other three select coastline transition sprites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileShape {
    Flat,
    Straight,
    CurveIn,
    CurveOut,
}

impl TileShape {
    /// The `shape_id` text stored in the ground table.
    pub fn as_str(self) -> &'static str {
        match self {
            TileShape::Flat => "flat",
            TileShape::Straight => "straight",
            TileShape::CurveIn => "curve_in",
            TileShape::CurveOut => "curve_out",
        }
    }
}

/// Tile rotation. Internally a quarter turn; the persisted format stores the
/// historical 45/135/225/315 values (internal rotation plus 45 degrees).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Rotation value as written to the persisted table.
    pub fn persisted(self) -> u16 {
        match self {
            Rotation::R0 => 45,
            Rotation::R90 => 135,
            Rotation::R180 => 225,
            Rotation::R270 => 315,
        }
    }
}

/// A fully specified tile: which band, which sprite shape, which rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub ground: GroundKind,
    pub shape: TileShape,
    pub rotation: Rotation,
}

impl Tile {
    pub const fn new(ground: GroundKind, shape: TileShape, rotation: Rotation) -> Self {
        Self { ground, shape, rotation }
    }

    /// The plain full tile of a band.
    pub const fn flat(ground: GroundKind) -> Self {
        Self::new(ground, TileShape::Flat, Rotation::R0)
    }

    /// Convert to a persisted ground table row at the given coordinate.
    pub fn to_row(self, (x, y): Coord) -> GroundTile {
        GroundTile {
            x,
            y,
            ground_id: self.ground.id(),
            shape_id: self.shape,
            rotation: self.rotation.persisted(),
        }
    }
}

/// One row of the persisted ground table:
/// `(x int, y int, ground_id int, shape_id text, rotation int)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTile {
    pub x: i32,
    pub y: i32,
    pub ground_id: u16,
    pub shape_id: TileShape,
    pub rotation: u16,
}

/// A complete island as persisted rows, ordered by coordinate.
pub type GroundTileTable = Vec<GroundTile>;
