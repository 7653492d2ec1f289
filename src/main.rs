use std::path::PathBuf;
use std::process;

use clap::Parser;

use island_generator::error::Result;
use island_generator::layout::MapSpec;
use island_generator::{export, persistence, world};

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate random tile island maps")]
struct Args {
    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<i64>,

    /// Canvas side length in tiles
    #[arg(short = 'c', long, default_value = "150")]
    canvas_size: i32,

    /// Target water percentage of the canvas (0-100)
    #[arg(short = 'w', long, default_value = "50")]
    water_percent: i32,

    /// Largest island side length
    #[arg(long, default_value = "70")]
    max_island_size: i32,

    /// Preferred island side length (mean of the size distribution)
    #[arg(long, default_value = "70")]
    preferred_island_size: i32,

    /// Standard deviation of the island size distribution
    #[arg(long, default_value = "30")]
    island_size_deviation: i32,

    /// Output directory for map and island tables
    #[arg(short, long, default_value = "maps")]
    out: PathBuf,

    /// Also generate and save every island's ground table
    #[arg(long)]
    build_islands: bool,

    /// Export a PNG overview of the map (implies building the islands)
    #[arg(long)]
    export_png: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let spec = MapSpec {
        seed,
        canvas_size: args.canvas_size,
        water_percent: args.water_percent,
        max_island_size: args.max_island_size,
        preferred_island_size: args.preferred_island_size,
        island_size_deviation: args.island_size_deviation,
    };

    println!("Generating map with seed: {}", seed);
    println!("Canvas: {0}x{0}, {1}% water", spec.canvas_size, spec.water_percent);

    let map = world::generate_map(&spec)?;
    println!("Placed {} islands:", map.islands.len());
    for row in map.placement_rows() {
        println!("  ({:3}, {:3}) {}", row.x, row.y, row.file);
    }

    let map_path = persistence::save_map(&map, &args.out)?;
    println!("Map table written to {}", map_path.display());

    if args.build_islands || args.export_png.is_some() {
        println!("Building island ground tables...");
        let built = world::build_all(&map)?;
        let mut tables = Vec::with_capacity(built.len());
        for (placed, table) in &built {
            let id = placed.spec.to_string();
            let path = persistence::save_island_table(&id, table, &args.out)?;
            println!("  {} tiles -> {}", table.len(), path.display());
            tables.push(table.clone());
        }

        if let Some(png) = &args.export_png {
            export::export_map(&map, &tables, &png.to_string_lossy()).map_err(|e| {
                std::io::Error::new(std::io::ErrorKind::Other, format!("PNG export failed: {}", e))
            })?;
            println!("PNG overview written to {}", png.display());
        }
    }

    Ok(())
}
