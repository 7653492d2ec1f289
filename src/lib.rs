//! Island generation library
//!
//! Turns a numeric seed and a handful of shape parameters into fully
//! classified tile islands, reproducibly: the same seed always yields the
//! same tables. Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod coastline;
pub mod error;
pub mod export;
pub mod gapfill;
pub mod grid;
pub mod island;
pub mod layout;
pub mod persistence;
pub mod shapes;
pub mod tiles;
pub mod world;

pub use error::{Error, Result};
pub use island::IslandSpec;
pub use layout::{MapSpec, PlacedIsland};
pub use world::{create_random_island, generate_map};
