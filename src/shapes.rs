//! Raw island shape synthesis.
//!
//! Stamps a budgeted number of randomly sized circles and rectangles into a
//! land mask. The output is intentionally rough: 1-wide straits and gulfs are
//! allowed here and removed later by the gap filler.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::grid::LandMask;

/// How shapes are drawn and combined. The integer coding is part of the
/// island identifier format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreationMethod {
    /// Small shapes, additive only.
    Compact,
    /// Larger shapes, additive only.
    Broad,
    /// Large shapes, each one independently additive or subtractive.
    /// Subtractive shapes may land just off the canvas and erode the edges.
    Scattered,
}

impl CreationMethod {
    pub fn from_id(id: i64) -> Result<Self> {
        match id {
            0 => Ok(CreationMethod::Compact),
            1 => Ok(CreationMethod::Broad),
            2 => Ok(CreationMethod::Scattered),
            other => Err(Error::InvalidCreationMethod(other)),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            CreationMethod::Compact => 0,
            CreationMethod::Broad => 1,
            CreationMethod::Scattered => 2,
        }
    }

    /// Shape id range; the drawn value is also the circle radius.
    fn shape_id_range(self) -> RangeInclusive<i32> {
        match self {
            CreationMethod::Compact => 3..=5,
            CreationMethod::Broad => 5..=8,
            CreationMethod::Scattered => 8..=12,
        }
    }

    /// Side length range for rectangle stamps.
    fn rect_side_range(self) -> RangeInclusive<i32> {
        match self {
            CreationMethod::Compact | CreationMethod::Broad => 2..=8,
            CreationMethod::Scattered => 5..=20,
        }
    }
}

/// One rectangle stamp in `RECT_CHANCE` shapes; the rest are circles.
const RECT_CHANCE: i32 = 4;

/// One shape in `CARVE_CHANCE` is subtractive (scattered method only).
const CARVE_CHANCE: i32 = 4;

/// Additive shape centers keep this distance from the island rectangle edge
/// (clamped for tiny islands).
const EDGE_MARGIN: i32 = 8;

/// Stamp the shape budget for a `width` x `height` island into a fresh mask.
///
/// Reproducibility contract: for every shape the draws happen in this exact
/// order on the provided rng -
///   1. shape id,
///   2. additive/subtractive roll (scattered method only),
///   3. center x, 4. center y (ranges depend on the roll),
///   5. rectangle roll,
///   6. rectangle width, 7. rectangle height (rectangles only).
/// Changing the order, the ranges or the rng type changes every map.
pub fn generate(
    rng: &mut ChaCha8Rng,
    width: i32,
    height: i32,
    method: CreationMethod,
) -> LandMask {
    let mut mask = LandMask::with_window((-4, -4), width + 8, height + 8);
    let budget = 15 + width * height / 45;

    for _ in 0..budget {
        let shape_id = rng.gen_range(method.shape_id_range());
        let carve = method == CreationMethod::Scattered && rng.gen_range(0..CARVE_CHANCE) == 0;

        let (cx, cy) = if carve {
            // anywhere on the canvas, up to one eighth of a side off it
            (
                rng.gen_range(-width / 8..=width + width / 8),
                rng.gen_range(-height / 8..=height + height / 8),
            )
        } else {
            let mx = EDGE_MARGIN.min(width / 3);
            let my = EDGE_MARGIN.min(height / 3);
            (rng.gen_range(mx..width - mx), rng.gen_range(my..height - my))
        };

        if rng.gen_range(0..RECT_CHANCE) == 0 {
            let rw = rng.gen_range(method.rect_side_range());
            let rh = rng.gen_range(method.rect_side_range());
            stamp_rect(&mut mask, cx - rw / 2, cy - rh / 2, rw, rh, carve);
        } else {
            stamp_circle(&mut mask, cx, cy, shape_id, carve);
        }
    }

    mask
}

/// Every integer coordinate with `dx*dx + dy*dy <= r*r`.
fn stamp_circle(mask: &mut LandMask, cx: i32, cy: i32, radius: i32, carve: bool) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                apply(mask, (cx + dx, cy + dy), carve);
            }
        }
    }
}

fn stamp_rect(mask: &mut LandMask, x: i32, y: i32, w: i32, h: i32, carve: bool) {
    for dy in 0..h {
        for dx in 0..w {
            apply(mask, (x + dx, y + dy), carve);
        }
    }
}

fn apply(mask: &mut LandMask, coord: (i32, i32), carve: bool) {
    if carve {
        mask.remove(coord);
    } else {
        mask.insert(coord);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn mask_for(seed: u64, w: i32, h: i32, method: CreationMethod) -> LandMask {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate(&mut rng, w, h, method)
    }

    #[test]
    fn test_same_seed_same_mask() {
        for method in [
            CreationMethod::Compact,
            CreationMethod::Broad,
            CreationMethod::Scattered,
        ] {
            let a = mask_for(99, 50, 40, method);
            let b = mask_for(99, 50, 40, method);
            assert_eq!(a.cells(), b.cells());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = mask_for(1, 50, 40, CreationMethod::Scattered);
        let b = mask_for(2, 50, 40, CreationMethod::Scattered);
        assert_ne!(a.cells(), b.cells());
    }

    #[test]
    fn test_typical_sizes_produce_land() {
        for seed in 0..20 {
            let mask = mask_for(seed, 40, 40, CreationMethod::Scattered);
            assert!(!mask.is_empty(), "seed {} produced an empty mask", seed);
        }
    }

    #[test]
    fn test_shapes_stay_near_the_island_rectangle() {
        // Circles may overhang the rectangle by at most their radius and
        // carving happens at most one eighth of a side off the canvas.
        let (w, h) = (60, 45);
        let mask = mask_for(7, w, h, CreationMethod::Scattered);
        let ((min_x, min_y), (max_x, max_y)) = mask.bounds().unwrap();
        assert!(min_x >= -12 && min_y >= -12);
        assert!(max_x <= w + 12 && max_y <= h + 12);
    }

    #[test]
    fn test_method_ids_round_trip() {
        for id in 0..3 {
            assert_eq!(CreationMethod::from_id(id).unwrap().id() as i64, id);
        }
        assert!(CreationMethod::from_id(3).is_err());
        assert!(CreationMethod::from_id(-1).is_err());
    }
}
