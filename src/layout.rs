//! Island layout on the map canvas.
//!
//! Draws island bounding boxes from the configured size distribution,
//! places them with rejection sampling while honoring the minimum
//! separation, then stretches the layout so the outermost islands touch the
//! canvas edges. Placement is inherently sequential (every decision depends
//! on all previous ones) and must not be parallelized; only the later
//! per-island builds are independent.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::Coord;
use crate::island::IslandSpec;
use crate::shapes::CreationMethod;

/// Smallest island side the composer will place.
pub const MIN_ISLAND_SIZE: i32 = 20;

/// Longest side divided by shortest side never exceeds this.
const MAX_SIDE_COEFFICIENT: f64 = 4.0;

/// Consecutive failed trials before the composer stops adding islands.
const MAX_FAILED_TRIALS: u32 = 100;

/// Random positions tried for each drawn island size.
const POSITION_ATTEMPTS: u32 = 13;

/// Parameters for one composed map. Serialized alongside the placement
/// table so a map can be replayed from its save file alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSpec {
    pub seed: i64,
    pub canvas_size: i32,
    pub water_percent: i32,
    pub max_island_size: i32,
    pub preferred_island_size: i32,
    pub island_size_deviation: i32,
}

impl MapSpec {
    fn validate(&self) -> Result<()> {
        if self.canvas_size < MIN_ISLAND_SIZE {
            return Err(Error::InvalidSpec(format!(
                "canvas size {} cannot fit the minimum island size {}",
                self.canvas_size, MIN_ISLAND_SIZE
            )));
        }
        if !(0..=100).contains(&self.water_percent) {
            return Err(Error::InvalidSpec(format!(
                "water percent {} outside 0-100",
                self.water_percent
            )));
        }
        if self.max_island_size < MIN_ISLAND_SIZE {
            return Err(Error::InvalidSpec(format!(
                "max island size {} below the minimum island size {}",
                self.max_island_size, MIN_ISLAND_SIZE
            )));
        }
        if self.island_size_deviation < 0 {
            return Err(Error::InvalidSpec(format!(
                "island size deviation {} is negative",
                self.island_size_deviation
            )));
        }
        Ok(())
    }

    /// Minimum distance between two island bounding rectangles.
    pub fn min_island_separation(&self) -> i32 {
        3 + self.canvas_size / 100
    }

    /// Total island area allowed by the water percentage.
    pub fn max_land_amount(&self) -> i64 {
        let canvas = self.canvas_size as i64;
        canvas * canvas * (100 - self.water_percent as i64) / 100
    }
}

/// An island spec positioned on the canvas. Immutable once composed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedIsland {
    pub origin: Coord,
    pub spec: IslandSpec,
}

impl PlacedIsland {
    pub fn width(&self) -> i32 {
        self.spec.width
    }

    pub fn height(&self) -> i32 {
        self.spec.height
    }
}

/// An axis-aligned bounding box during placement.
#[derive(Clone, Copy, Debug)]
struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Rect {
    /// Euclidean distance between two rectangles (0 when they touch or
    /// overlap): the per-axis gaps combined.
    fn distance(&self, other: &Rect) -> f64 {
        let gap = |a0: i32, a1: i32, b0: i32, b1: i32| -> i32 {
            if b0 > a1 {
                b0 - a1
            } else if a0 > b1 {
                a0 - b1
            } else {
                0
            }
        };
        let dx = gap(self.x, self.x + self.w - 1, other.x, other.x + other.w - 1) as f64;
        let dy = gap(self.y, self.y + self.h - 1, other.y, other.y + other.h - 1) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Compose a map: place non-overlapping island boxes, stretch the layout to
/// the canvas edges and derive a fresh sub-seed per island so island-internal
/// generation is decoupled from the layout rng.
pub fn compose(spec: &MapSpec) -> Result<Vec<PlacedIsland>> {
    spec.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(spec.seed as u64);
    let canvas = spec.canvas_size;
    let min_size = MIN_ISLAND_SIZE as f64;
    let max_size = spec.max_island_size.min(canvas) as f64;
    let separation = spec.min_island_separation() as f64;
    let max_land = spec.max_land_amount();

    let size_dist = Normal::new(
        spec.preferred_island_size as f64,
        spec.island_size_deviation as f64,
    )
    .map_err(|e| Error::InvalidSpec(format!("island size distribution: {}", e)))?;
    // aspect coefficient: normal around square, capped at the side limit
    let coef_dist = Normal::<f64>::new(1.0, 0.2)
        .map_err(|e| Error::InvalidSpec(format!("side coefficient distribution: {}", e)))?;

    let mut rects: Vec<Rect> = Vec::new();
    let mut placed_area = 0i64;
    let mut failures = 0u32;

    while failures < MAX_FAILED_TRIALS {
        let width = rng.sample(size_dist).round().clamp(min_size, max_size) as i32;
        let coef = rng.sample(coef_dist).clamp(1.0, MAX_SIDE_COEFFICIENT);
        let coef = if rng.gen_bool(0.5) { coef } else { 1.0 / coef };
        let height = (width as f64 * coef).round().clamp(min_size, max_size) as i32;

        if placed_area + (width as i64) * (height as i64) > max_land {
            failures += 1;
            continue;
        }

        let mut placed = false;
        for _ in 0..POSITION_ATTEMPTS {
            let candidate = Rect {
                x: rng.gen_range(0..=canvas - width),
                y: rng.gen_range(0..=canvas - height),
                w: width,
                h: height,
            };
            if rects.iter().all(|r| r.distance(&candidate) >= separation) {
                rects.push(candidate);
                placed_area += (width as i64) * (height as i64);
                failures = 0;
                placed = true;
                break;
            }
        }
        if !placed {
            failures += 1;
        }
    }

    if rects.is_empty() {
        return Err(Error::NoIslandsPlaced);
    }

    stretch_to_canvas(&mut rects, canvas, &mut rng);

    Ok(rects
        .into_iter()
        .map(|r| PlacedIsland {
            origin: (r.x, r.y),
            spec: IslandSpec::new(CreationMethod::Scattered, r.w, r.h, rng.gen::<i64>()),
        })
        .collect())
}

/// Move one extremal island flush against each canvas edge so the map has
/// no unused border margin. Edges are handled in a fixed order (top,
/// bottom, left, right); ties are broken uniformly at random, which
/// consumes the layout rng. The island pinned to one edge is excluded when
/// picking for the opposite edge of the same axis, so both edges stay
/// touched even when a single island spans the extremes. Skipped for
/// single-island maps.
///
/// Moving an island that is extremal among the considered set strictly away
/// from the others can only increase rectangle distances, so the separation
/// invariant survives stretching.
fn stretch_to_canvas(rects: &mut [Rect], canvas: i32, rng: &mut ChaCha8Rng) {
    if rects.len() < 2 {
        return;
    }

    fn pick<K: Fn(&Rect) -> i32>(
        rng: &mut ChaCha8Rng,
        rects: &[Rect],
        exclude: Option<usize>,
        key: K,
        want_max: bool,
    ) -> usize {
        let mut best = if want_max { i32::MIN } else { i32::MAX };
        for (i, r) in rects.iter().enumerate() {
            if Some(i) == exclude {
                continue;
            }
            let v = key(r);
            best = if want_max { best.max(v) } else { best.min(v) };
        }
        let ties: Vec<usize> = (0..rects.len())
            .filter(|&i| Some(i) != exclude && key(&rects[i]) == best)
            .collect();
        ties[rng.gen_range(0..ties.len())]
    }

    let top = pick(rng, rects, None, |r| r.y, false);
    rects[top].y = 0;
    let bottom = pick(rng, rects, Some(top), |r| r.y + r.h - 1, true);
    rects[bottom].y = canvas - rects[bottom].h;
    let left = pick(rng, rects, None, |r| r.x, false);
    rects[left].x = 0;
    let right = pick(rng, rects, Some(left), |r| r.x + r.w - 1, true);
    rects[right].x = canvas - rects[right].w;
}
