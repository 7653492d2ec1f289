//! Map-level entry points.
//!
//! Bundles the composed layout with the island placement table and offers
//! the two operations callers use: generate a whole map from a seed, and
//! regenerate a single island from its identifier string.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::island::{self, IslandSpec};
use crate::layout::{self, MapSpec, PlacedIsland};
use crate::tiles::GroundTileTable;

/// One row of the island placement table: `(x int, y int, file text)`.
/// For random islands `file` holds the island identifier string instead of
/// a path to a stored ground table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRow {
    pub x: i32,
    pub y: i32,
    pub file: String,
}

/// A composed random map: the parameters it was generated from and the
/// placed islands. Tile tables are not stored; they are regenerated on
/// demand from the island specs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomMap {
    pub spec: MapSpec,
    pub islands: Vec<PlacedIsland>,
}

impl RandomMap {
    /// The island placement table for this map.
    pub fn placement_rows(&self) -> Vec<PlacementRow> {
        self.islands
            .iter()
            .map(|island| PlacementRow {
                x: island.origin.0,
                y: island.origin.1,
                file: island.spec.to_string(),
            })
            .collect()
    }
}

/// Compose a random map from the given parameters.
pub fn generate_map(spec: &MapSpec) -> Result<RandomMap> {
    let islands = layout::compose(spec)?;
    Ok(RandomMap { spec: spec.clone(), islands })
}

/// Regenerate one island's ground table from its identifier string.
pub fn create_random_island(id: &str) -> Result<GroundTileTable> {
    let spec = IslandSpec::parse(id)?;
    island::build(&spec)
}

/// Build the ground tables for every island of a map. Island builds are
/// independent once their sub-seeds are fixed, so they run in parallel;
/// the result order matches the placement table.
pub fn build_all(map: &RandomMap) -> Result<Vec<(PlacedIsland, GroundTileTable)>> {
    map.islands
        .par_iter()
        .map(|placed| island::build(&placed.spec).map(|table| (placed.clone(), table)))
        .collect()
}
