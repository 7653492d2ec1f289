//! Debug script to dump one island as ASCII and PNG with band statistics

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;

use island_generator::ascii::{render_table, tile_char};
use island_generator::export::export_island;
use island_generator::tiles::TileShape;
use island_generator::world::create_random_island;

fn main() {
    let id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "random:2:60:50:12345".to_string());

    let table = create_random_island(&id).unwrap();

    // Write the full dump to a file
    let mut file = File::create("island_debug.txt").unwrap();
    writeln!(file, "=== ISLAND DEBUG DUMP {} ===", id).unwrap();
    writeln!(file).unwrap();
    writeln!(file, "LEGEND:").unwrap();
    writeln!(file, "  # = grass        . = sand").unwrap();
    writeln!(file, "  , = shallow      ~ = deep water").unwrap();
    writeln!(file, "  o = curve_in     * = curve_out").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "{}", render_table(&table)).unwrap();

    // Band statistics
    let mut band_counts: HashMap<u16, usize> = HashMap::new();
    let mut shape_counts: HashMap<&str, usize> = HashMap::new();
    for tile in &table {
        *band_counts.entry(tile.ground_id).or_insert(0) += 1;
        *shape_counts.entry(tile.shape_id.as_str()).or_insert(0) += 1;
    }

    writeln!(file, "=== BAND STATISTICS ===").unwrap();
    let total = table.len() as f32;
    let band_names = [(3u16, "grass"), (6, "sand"), (1, "shallow"), (0, "deep water")];
    for (ground_id, name) in band_names {
        let count = band_counts.get(&ground_id).copied().unwrap_or(0);
        let pct = count as f32 / total * 100.0;
        writeln!(file, "  {:12} {:5} ({:5.1}%)", name, count, pct).unwrap();
    }
    writeln!(file).unwrap();
    writeln!(file, "=== SHAPE STATISTICS ===").unwrap();
    for shape in [
        TileShape::Flat,
        TileShape::Straight,
        TileShape::CurveIn,
        TileShape::CurveOut,
    ] {
        let count = shape_counts.get(shape.as_str()).copied().unwrap_or(0);
        writeln!(file, "  {:12} {:5}", shape.as_str(), count).unwrap();
    }

    println!("Debug output written to island_debug.txt");

    // PNG preview
    export_island(&table, "island_debug.png").unwrap();
    println!("PNG preview written to island_debug.png");

    // Small terminal preview
    println!("\n=== TERMINAL PREVIEW ===\n");
    let min_x = table.iter().map(|t| t.x).min().unwrap();
    let min_y = table.iter().map(|t| t.y).min().unwrap();
    let max_x = table.iter().map(|t| t.x).max().unwrap();
    let max_y = table.iter().map(|t| t.y).max().unwrap();
    let mut grid: HashMap<(i32, i32), char> = HashMap::new();
    for tile in &table {
        grid.insert((tile.x, tile.y), tile_char(tile.ground_id, tile.shape_id));
    }
    for y in min_y..=max_y {
        let mut line = String::new();
        for x in min_x..=max_x {
            line.push(grid.get(&(x, y)).copied().unwrap_or(' '));
        }
        println!("{}", line);
    }
    println!(
        "\n{} tiles, bounds ({}, {}) to ({}, {})",
        table.len(),
        min_x,
        min_y,
        max_x,
        max_y
    );
}
