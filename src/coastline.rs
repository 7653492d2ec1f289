//! Coastline extraction and transition tile classification.
//!
//! Each elevation band transition (grass to sand, sand to shallow water,
//! shallow to deep water) is produced the same way: take the outline of the
//! current mask and pick a transition tile for every outline cell from the
//! pattern of its land neighbors. The dispatch table below is exhaustive for
//! gap-filled masks; any pattern it cannot name means the mask never went
//! through the gap filler, which is an unrecoverable upstream defect.

use crate::grid::{Coord, DIR_OFFSETS, LandMask};
use crate::tiles::{GroundKind, Rotation, Tile, TileShape};

// Direction bits, `DIR_OFFSETS` order.
const N: u8 = 1 << 0;
const NE: u8 = 1 << 1;
const E: u8 = 1 << 2;
const SE: u8 = 1 << 3;
const S: u8 = 1 << 4;
const SW: u8 = 1 << 5;
const W: u8 = 1 << 6;
const NW: u8 = 1 << 7;

/// The four canonical corner clusters for mostly-dry (curve_in) corners,
/// with the quadrant rotation each one selects.
const CORNER_CLUSTERS: [(u8, Rotation); 4] = [
    (N | NE | E, Rotation::R90),  // land in the northeast quadrant
    (E | SE | S, Rotation::R180), // southeast
    (S | SW | W, Rotation::R270), // southwest
    (W | NW | N, Rotation::R0),   // northwest
];

/// All cells 8-adjacent to the mask but not in it, in canonical order.
pub fn outline(mask: &LandMask) -> Vec<Coord> {
    let mut out = Vec::new();
    for (x, y) in mask.cells() {
        for (dx, dy) in DIR_OFFSETS {
            let coord = (x + dx, y + dy);
            if !mask.contains(coord) {
                out.push(coord);
            }
        }
    }
    out.sort_unstable();
    out.dedup();
    out
}

/// Assign a transition tile of the given band to every outline cell of
/// `mask`. Panics on a neighbor pattern the tile set cannot express; that
/// only happens when `mask` skipped the gap filler.
pub fn classify(mask: &LandMask, ground: GroundKind) -> Vec<(Coord, Tile)> {
    outline(mask)
        .into_iter()
        .map(|coord| {
            let pattern = filled_directions(mask, coord);
            let (shape, rotation) = classify_pattern(pattern).unwrap_or_else(|| {
                panic!(
                    "unclassifiable coastline pattern {:#010b} at {:?} ({} band): \
                     mask was not gap-filled",
                    pattern,
                    coord,
                    ground.display_name()
                )
            });
            (coord, Tile::new(ground, shape, rotation))
        })
        .collect()
}

/// Bitmask of the 8 directions whose neighbor is in the mask.
fn filled_directions(mask: &LandMask, (x, y): Coord) -> u8 {
    let mut filled = 0u8;
    for (i, (dx, dy)) in DIR_OFFSETS.into_iter().enumerate() {
        if mask.contains((x + dx, y + dy)) {
            filled |= 1 << i;
        }
    }
    filled
}

/// The neighbor pattern dispatch table.
///
/// Straight edges face away from their land: land to the south selects the
/// north coast tile (rotation 0, persisted 45) and so on clockwise. A lone
/// filled diagonal is a mostly-wet corner (curve_out) of the opposite
/// quadrant; a corner cluster is a mostly-dry corner (curve_in) of its own
/// quadrant. Returns None for anything else, including a pattern that
/// matches two clusters at once.
fn classify_pattern(f: u8) -> Option<(TileShape, Rotation)> {
    use TileShape::{CurveIn, CurveOut, Straight};

    // Straight coast: a lone cardinal, optionally with one or both
    // flanking diagonals (the single-flank case is the "slight turn").
    let straight = |card: u8, left: u8, right: u8| {
        f == card || f == card | left | right || f == card | left || f == card | right
    };
    if straight(S, SE, SW) {
        return Some((Straight, Rotation::R0)); // north coast
    }
    if straight(W, NW, SW) {
        return Some((Straight, Rotation::R90)); // east coast
    }
    if straight(N, NE, NW) {
        return Some((Straight, Rotation::R180)); // south coast
    }
    if straight(E, NE, SE) {
        return Some((Straight, Rotation::R270)); // west coast
    }

    // Mostly-wet corner: a single filled diagonal.
    if f == SE {
        return Some((CurveOut, Rotation::R0)); // northwest corner
    }
    if f == SW {
        return Some((CurveOut, Rotation::R90)); // northeast corner
    }
    if f == NW {
        return Some((CurveOut, Rotation::R180)); // southeast corner
    }
    if f == NE {
        return Some((CurveOut, Rotation::R270)); // southwest corner
    }

    // Mostly-dry corner: 3 to 5 filled directions containing exactly one
    // canonical cluster. Two clusters at once cannot survive the gap filler
    // and are rejected as ambiguous.
    if (3..=5).contains(&f.count_ones()) {
        let mut hit = None;
        for (cluster, rotation) in CORNER_CLUSTERS {
            if f & cluster == cluster {
                if hit.is_some() {
                    return None;
                }
                hit = Some((CurveIn, rotation));
            }
        }
        if hit.is_some() {
            return hit;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gapfill;
    use crate::shapes::{self, CreationMethod};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_outline_of_single_cell() {
        let mask: LandMask = [(0, 0)].into_iter().collect();
        let ring = outline(&mask);
        assert_eq!(ring.len(), 8);
        assert!(ring.contains(&(-1, -1)));
        assert!(ring.contains(&(1, 1)));
        assert!(!ring.contains(&(0, 0)));
    }

    #[test]
    fn test_single_cell_island_classifies() {
        // four straight edges and four mostly-wet corners
        let mask: LandMask = [(0, 0)].into_iter().collect();
        let tiles = classify(&mask, GroundKind::Sand);
        assert_eq!(tiles.len(), 8);

        let lookup = |c: Coord| tiles.iter().find(|(tc, _)| *tc == c).unwrap().1;
        assert_eq!(lookup((0, -1)).shape, TileShape::Straight);
        assert_eq!(lookup((0, -1)).rotation, Rotation::R0);
        assert_eq!(lookup((1, 0)).shape, TileShape::Straight);
        assert_eq!(lookup((1, 0)).rotation, Rotation::R90);
        assert_eq!(lookup((0, 1)).rotation, Rotation::R180);
        assert_eq!(lookup((-1, 0)).rotation, Rotation::R270);

        assert_eq!(lookup((-1, -1)).shape, TileShape::CurveOut);
        assert_eq!(lookup((-1, -1)).rotation, Rotation::R0);
        assert_eq!(lookup((1, 1)).shape, TileShape::CurveOut);
        assert_eq!(lookup((1, 1)).rotation, Rotation::R180);
    }

    #[test]
    fn test_square_island_edges_and_corners() {
        let mut cells = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                cells.push((x, y));
            }
        }
        let mask: LandMask = cells.into_iter().collect();
        let tiles = classify(&mask, GroundKind::Sand);

        let lookup = |c: Coord| tiles.iter().find(|(tc, _)| *tc == c).unwrap().1;
        // edge midpoints are straight, facing away from the land
        assert_eq!(lookup((2, -1)).shape, TileShape::Straight);
        assert_eq!(lookup((2, -1)).rotation, Rotation::R0);
        assert_eq!(lookup((4, 2)).rotation, Rotation::R90);
        assert_eq!(lookup((2, 4)).rotation, Rotation::R180);
        assert_eq!(lookup((-1, 2)).rotation, Rotation::R270);
        // convex corners see a lone diagonal: mostly-wet curve_out
        assert_eq!(lookup((-1, -1)).shape, TileShape::CurveOut);
        assert_eq!(lookup((-1, -1)).rotation, Rotation::R0);
        assert_eq!(lookup((4, 4)).shape, TileShape::CurveOut);
        assert_eq!(lookup((4, 4)).rotation, Rotation::R180);
    }

    #[test]
    fn test_l_shape_inner_corner_curves_in() {
        // an L-shaped island: the concave corner gets the mostly-dry tile
        let mut cells = Vec::new();
        for y in 0..6 {
            for x in 0..6 {
                if y <= 2 || x <= 2 {
                    cells.push((x, y));
                }
            }
        }
        let mask: LandMask = cells.into_iter().collect();
        let tiles = classify(&mask, GroundKind::Sand);

        let tile = tiles.iter().find(|(c, _)| *c == (3, 3)).unwrap().1;
        assert_eq!(tile.shape, TileShape::CurveIn);
        assert_eq!(tile.rotation, Rotation::R0); // land in the northwest quadrant
    }

    #[test]
    fn test_slight_turn_reuses_straight_tile() {
        assert_eq!(
            classify_pattern(S | SE),
            Some((TileShape::Straight, Rotation::R0))
        );
        assert_eq!(
            classify_pattern(S | SW),
            Some((TileShape::Straight, Rotation::R0))
        );
    }

    #[test]
    fn test_stray_diagonal_next_to_cluster_is_accepted() {
        // a corner cluster plus an unrelated diagonal still names one corner
        assert_eq!(
            classify_pattern(E | SE | S | NW),
            Some((TileShape::CurveIn, Rotation::R180))
        );
    }

    #[test]
    fn test_unfillable_patterns_are_rejected() {
        assert_eq!(classify_pattern(0), None);
        assert_eq!(classify_pattern(N | S), None); // opposite cardinals
        assert_eq!(classify_pattern(N | E), None); // bare perpendicular pair
        assert_eq!(classify_pattern(NE | SW), None); // opposite diagonals
        // two clusters at once
        assert_eq!(classify_pattern(N | NE | E | SE | S), None);
    }

    #[test]
    fn test_totality_on_gap_filled_masks() {
        // every outline cell of a gap-filled mask must classify
        for seed in 0..30u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut mask = shapes::generate(&mut rng, 45, 35, CreationMethod::Scattered);
            if mask.is_empty() {
                continue;
            }
            gapfill::close(&mut mask, Tile::flat(GroundKind::Grass), |_, _| {});
            let tiles = classify(&mask, GroundKind::Sand);
            assert_eq!(tiles.len(), outline(&mask).len());
        }
    }
}
