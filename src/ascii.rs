//! ASCII rendering of generated islands.
//!
//! Debug aid used by the binaries; one character per tile, keyed by band.

use crate::tiles::{GroundTileTable, TileShape};

/// Character for a ground id.
pub fn ground_char(ground_id: u16) -> char {
    match ground_id {
        0 => '~', // deep water
        1 => ',', // shallow water
        3 => '#', // grass
        6 => '.', // sand
        _ => '?',
    }
}

/// Character for a transition tile, keeping the band recognizable while
/// making coastline shapes visible.
pub fn tile_char(ground_id: u16, shape: TileShape) -> char {
    match shape {
        TileShape::Flat => ground_char(ground_id),
        TileShape::Straight => ground_char(ground_id),
        TileShape::CurveIn => 'o',
        TileShape::CurveOut => '*',
    }
}

/// Render a ground table as text, one line per row. Cells no band covers
/// (open water beyond the deep ring) render as spaces.
pub fn render_table(table: &GroundTileTable) -> String {
    if table.is_empty() {
        return String::new();
    }

    let min_x = table.iter().map(|t| t.x).min().unwrap();
    let max_x = table.iter().map(|t| t.x).max().unwrap();
    let min_y = table.iter().map(|t| t.y).min().unwrap();
    let max_y = table.iter().map(|t| t.y).max().unwrap();

    let width = (max_x - min_x + 1) as usize;
    let height = (max_y - min_y + 1) as usize;
    let mut rows = vec![vec![' '; width]; height];
    for tile in table {
        let x = (tile.x - min_x) as usize;
        let y = (tile.y - min_y) as usize;
        rows[y][x] = tile_char(tile.ground_id, tile.shape_id);
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::create_random_island;

    #[test]
    fn test_band_characters() {
        assert_eq!(ground_char(0), '~');
        assert_eq!(ground_char(3), '#');
        assert_eq!(ground_char(42), '?');
    }

    #[test]
    fn test_render_covers_all_bands() {
        let table = create_random_island("random:1:35:30:5").unwrap();
        let text = render_table(&table);
        for ch in ['~', ',', '#', '.'] {
            assert!(text.contains(ch), "character {:?} missing", ch);
        }
        assert!(text.lines().count() > 10);
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(render_table(&Vec::new()), "");
    }
}
