//! Map and island table persistence.
//!
//! Saves the placement table and the per-island ground tables as versioned
//! JSON files. Writes go through a temporary file followed by a rename, so
//! a reader never observes a half-written table.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::MapSpec;
use crate::tiles::GroundTileTable;
use crate::world::{PlacementRow, RandomMap};

const SAVE_VERSION: u32 = 1;

/// Save file for one composed map. Includes the generation parameters so
/// the map can be replayed without the original command line.
#[derive(Serialize, Deserialize)]
struct MapSaveFile {
    version: u32,
    spec: MapSpec,
    islands: Vec<PlacementRow>,
}

/// Save file for one island's ground table.
#[derive(Serialize, Deserialize)]
struct IslandSaveFile {
    version: u32,
    island: String,
    tiles: GroundTileTable,
}

/// Write the placement table of a map. Returns the path of the written
/// file, which doubles as the map identifier handed back to callers.
pub fn save_map(map: &RandomMap, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let save = MapSaveFile {
        version: SAVE_VERSION,
        spec: map.spec.clone(),
        islands: map.placement_rows(),
    };
    let path = dir.join(format!("map_{}.json", map.spec.seed));
    write_atomic(&path, &serde_json::to_vec_pretty(&save)?)?;
    Ok(path)
}

/// Load a map save file: its parameters and placement table.
pub fn load_map(path: &Path) -> Result<(MapSpec, Vec<PlacementRow>)> {
    let bytes = fs::read(path)?;
    let save: MapSaveFile = serde_json::from_slice(&bytes)?;
    check_version(save.version)?;
    Ok((save.spec, save.islands))
}

/// Write one island's ground table next to its map. The file name is
/// derived from the identifier string (':' is not filename-safe).
pub fn save_island_table(island: &str, tiles: &GroundTileTable, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let save = IslandSaveFile {
        version: SAVE_VERSION,
        island: island.to_string(),
        tiles: tiles.clone(),
    };
    let path = dir.join(format!("island_{}.json", island.replace(':', "_")));
    write_atomic(&path, &serde_json::to_vec(&save)?)?;
    Ok(path)
}

/// Load one island's ground table.
pub fn load_island_table(path: &Path) -> Result<GroundTileTable> {
    let bytes = fs::read(path)?;
    let save: IslandSaveFile = serde_json::from_slice(&bytes)?;
    check_version(save.version)?;
    Ok(save.tiles)
}

fn check_version(version: u32) -> Result<()> {
    if version > SAVE_VERSION {
        return Err(Error::InvalidSpec(format!(
            "save file version {} is newer than supported version {}",
            version, SAVE_VERSION
        )));
    }
    Ok(())
}

/// Write to a temporary sibling file, then rename over the destination.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.to_path_buf();
    tmp.set_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
