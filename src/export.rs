//! PNG export of generated islands and maps.
//!
//! Developer-facing visualization only; the real renderer consumes the
//! ground tables elsewhere. Each band has a base color and the coastline
//! transition tiles are tinted so shape assignment mistakes show up.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::tiles::{GroundTileTable, TileShape};
use crate::world::RandomMap;

/// Base color per ground id.
fn ground_color(ground_id: u16) -> [u8; 3] {
    match ground_id {
        0 => [20, 40, 80],    // deep water
        1 => [60, 100, 150],  // shallow water
        3 => [80, 160, 60],   // grass
        6 => [210, 190, 140], // sand
        _ => [255, 0, 255],   // unknown id, loud magenta
    }
}

fn tile_color(ground_id: u16, shape: TileShape) -> [u8; 3] {
    let base = ground_color(ground_id);
    let scale = match shape {
        TileShape::Flat => 1.0,
        TileShape::Straight => 0.9,
        TileShape::CurveIn => 0.8,
        TileShape::CurveOut => 1.1,
    };
    [
        (base[0] as f32 * scale).clamp(0.0, 255.0) as u8,
        (base[1] as f32 * scale).clamp(0.0, 255.0) as u8,
        (base[2] as f32 * scale).clamp(0.0, 255.0) as u8,
    ]
}

/// Render one island's ground table, tightly cropped to its bounds.
pub fn render_island(table: &GroundTileTable) -> RgbImage {
    if table.is_empty() {
        return ImageBuffer::new(1, 1);
    }

    let min_x = table.iter().map(|t| t.x).min().unwrap();
    let max_x = table.iter().map(|t| t.x).max().unwrap();
    let min_y = table.iter().map(|t| t.y).min().unwrap();
    let max_y = table.iter().map(|t| t.y).max().unwrap();

    let width = (max_x - min_x + 1) as u32;
    let height = (max_y - min_y + 1) as u32;
    let mut img: RgbImage = ImageBuffer::from_pixel(width, height, Rgb(ground_color(0)));

    for tile in table {
        let x = (tile.x - min_x) as u32;
        let y = (tile.y - min_y) as u32;
        img.put_pixel(x, y, Rgb(tile_color(tile.ground_id, tile.shape_id)));
    }

    img
}

/// Export one island as PNG.
pub fn export_island(table: &GroundTileTable, path: &str) -> Result<(), image::ImageError> {
    render_island(table).save(path)
}

/// Render a whole composed map: deep water canvas with every island's
/// table blitted at its placement origin. Tiles outside the canvas (the
/// coastline bands of edge-touching islands) are clipped.
pub fn render_map(map: &RandomMap, tables: &[GroundTileTable]) -> RgbImage {
    let size = map.spec.canvas_size as u32;
    let mut img: RgbImage = ImageBuffer::from_pixel(size, size, Rgb(ground_color(0)));

    for (placed, table) in map.islands.iter().zip(tables) {
        for tile in table {
            let x = placed.origin.0 + tile.x;
            let y = placed.origin.1 + tile.y;
            if x < 0 || y < 0 || x >= map.spec.canvas_size || y >= map.spec.canvas_size {
                continue;
            }
            img.put_pixel(x as u32, y as u32, Rgb(tile_color(tile.ground_id, tile.shape_id)));
        }
    }

    img
}

/// Export a whole composed map as PNG.
pub fn export_map(
    map: &RandomMap,
    tables: &[GroundTileTable],
    path: &str,
) -> Result<(), image::ImageError> {
    render_map(map, tables).save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::create_random_island;

    #[test]
    fn test_island_image_matches_table_bounds() {
        let table = create_random_island("random:2:40:30:9").unwrap();
        let min_x = table.iter().map(|t| t.x).min().unwrap();
        let max_x = table.iter().map(|t| t.x).max().unwrap();
        let img = render_island(&table);
        assert_eq!(img.width(), (max_x - min_x + 1) as u32);
        assert!(img.height() > 0);
    }

    #[test]
    fn test_grass_pixels_use_grass_color() {
        let table = create_random_island("random:1:35:30:5").unwrap();
        let min_x = table.iter().map(|t| t.x).min().unwrap();
        let min_y = table.iter().map(|t| t.y).min().unwrap();
        let img = render_island(&table);

        let grass = table.iter().find(|t| t.ground_id == 3).unwrap();
        let px = img.get_pixel((grass.x - min_x) as u32, (grass.y - min_y) as u32);
        assert_eq!(px.0, ground_color(3));
    }

    #[test]
    fn test_empty_table_renders_placeholder() {
        let img = render_island(&Vec::new());
        assert_eq!((img.width(), img.height()), (1, 1));
    }
}
