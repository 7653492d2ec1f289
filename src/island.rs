//! Single island generation.
//!
//! An island is fully described by its identifier string
//! `random:<creation_method>:<width>:<height>:<seed>`; building the same
//! spec twice yields byte-identical tile tables. The build pipeline walks
//! the four elevation bands outward from the raw land shape: close the
//! mask, classify the next transition ring, union the ring in, repeat.

use std::collections::BTreeMap;
use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::coastline;
use crate::error::{Error, Result};
use crate::gapfill;
use crate::grid::{Coord, LandMask};
use crate::shapes::{self, CreationMethod};
use crate::tiles::{GroundKind, GroundTileTable, Tile};

const ID_PREFIX: &str = "random";

/// Everything needed to regenerate one island deterministically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IslandSpec {
    pub creation_method: CreationMethod,
    pub width: i32,
    pub height: i32,
    pub seed: i64,
}

impl IslandSpec {
    pub fn new(creation_method: CreationMethod, width: i32, height: i32, seed: i64) -> Self {
        Self { creation_method, width, height, seed }
    }

    /// Strict identifier validator. Anything that is not exactly
    /// `random:<int>:<int>:<int>:<int>` is reported as not a random island
    /// (callers then treat the string as a map file path).
    pub fn parse(id: &str) -> Result<Self> {
        let not_random = || Error::NotARandomIsland(id.to_string());

        let mut parts = id.split(':');
        if parts.next() != Some(ID_PREFIX) {
            return Err(not_random());
        }
        let mut fields = [0i64; 4];
        for slot in &mut fields {
            let part = parts.next().ok_or_else(not_random)?;
            // `-?[0-9]+` only; i64 parsing alone would also accept a '+'
            if part.strip_prefix('-').unwrap_or(part).is_empty()
                || part.strip_prefix('-').unwrap_or(part).bytes().any(|b| !b.is_ascii_digit())
            {
                return Err(not_random());
            }
            *slot = part.parse::<i64>().map_err(|_| not_random())?;
        }
        if parts.next().is_some() {
            return Err(not_random());
        }
        let [method, width, height, seed] = fields;

        let creation_method = CreationMethod::from_id(method)?;
        if width <= 0 || height <= 0 || width > i32::MAX as i64 || height > i32::MAX as i64 {
            return Err(Error::InvalidSpec(format!(
                "island dimensions {}x{} out of range",
                width, height
            )));
        }

        Ok(Self::new(creation_method, width as i32, height as i32, seed))
    }
}

impl fmt::Display for IslandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            ID_PREFIX,
            self.creation_method.id(),
            self.width,
            self.height,
            self.seed
        )
    }
}

/// Build the complete tile table for one island.
///
/// Fails if the shape budget produced no land at all; the caller may retry
/// with another seed. Panics if classification meets a pattern the gap
/// filler should have removed (an internal consistency breach).
pub fn build(spec: &IslandSpec) -> Result<GroundTileTable> {
    // The i64 identifier seed maps onto the rng through its two's-complement
    // bit pattern; this is the documented, platform-independent seeding.
    let mut rng = ChaCha8Rng::seed_from_u64(spec.seed as u64);

    let mut mask = shapes::generate(&mut rng, spec.width, spec.height, spec.creation_method);
    if mask.is_empty() {
        return Err(Error::EmptyIsland {
            width: spec.width,
            height: spec.height,
            seed: spec.seed,
        });
    }

    let mut tiles: BTreeMap<Coord, Tile> = BTreeMap::new();

    // Grass core: close the raw shape, then every mask cell is plain land.
    gapfill::close(&mut mask, Tile::flat(GroundKind::Grass), |c, t| {
        tiles.insert(c, t);
    });
    for coord in mask.cells() {
        tiles.insert(coord, Tile::flat(GroundKind::Grass));
    }

    // Three transition bands outward: sand, shallow water, deep water.
    // After each ring the mask is re-closed so the next, wider outline is
    // classifiable again.
    grow_band(&mut mask, &mut tiles, GroundKind::Sand);
    grow_band(&mut mask, &mut tiles, GroundKind::Shallow);

    for (coord, tile) in coastline::classify(&mask, GroundKind::Water) {
        tiles.insert(coord, tile);
        mask.insert(coord);
    }

    Ok(tiles.into_iter().map(|(c, t)| t.to_row(c)).collect())
}

/// Classify one transition ring, union it into the mask and close the
/// grown mask with the band's flat tile.
fn grow_band(mask: &mut LandMask, tiles: &mut BTreeMap<Coord, Tile>, ground: GroundKind) {
    for (coord, tile) in coastline::classify(mask, ground) {
        tiles.insert(coord, tile);
        mask.insert(coord);
    }
    gapfill::close(mask, Tile::flat(ground), |c, t| {
        tiles.insert(c, t);
    });
}
