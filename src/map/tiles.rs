//! XYZ tile grid addressing for the basemap.

use std::fmt;

use crate::constants::{MAX_TILE_ZOOM, TILE_SIZE};
use crate::geo::{Coordinate, HALF_WORLD_SIZE};

use super::MapView;

/// Upper bound on tiles produced for one frame (a very tall window at a
/// fractional zoom stays well below this).
const MAX_VISIBLE_TILES: usize = 1024;

/// Address of a tile in the XYZ scheme (y grows southwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// The standard web mercator tile pyramid.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    pub tile_size: u32,
    pub max_zoom: u8,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            max_zoom: MAX_TILE_ZOOM,
        }
    }
}

impl TileGrid {
    /// Integer tile level used to draw a view at `zoom`.
    pub fn tile_zoom(&self, zoom: f64) -> u8 {
        (zoom.round().max(0.0) as u8).min(self.max_zoom)
    }

    fn tile_span(z: u8) -> f64 {
        2.0 * HALF_WORLD_SIZE / f64::from(1u32 << z)
    }

    /// `(min, max)` corners of a tile in projected units.
    pub fn tile_extent(&self, tile: TileCoord) -> (Coordinate, Coordinate) {
        let span = Self::tile_span(tile.z);
        let min_x = -HALF_WORLD_SIZE + f64::from(tile.x) * span;
        let max_y = HALF_WORLD_SIZE - f64::from(tile.y) * span;
        (
            Coordinate::new(min_x, max_y - span),
            Coordinate::new(min_x + span, max_y),
        )
    }

    /// Tiles intersecting the view, row by row from the north-west corner.
    pub fn visible_tiles(&self, view: &MapView) -> Vec<TileCoord> {
        let z = self.tile_zoom(view.zoom());
        let span = Self::tile_span(z);
        let count = 1i64 << z;
        let (min, max) = view.extent();

        let column = |x: f64| (((x + HALF_WORLD_SIZE) / span).floor() as i64).clamp(0, count - 1);
        let row = |y: f64| (((HALF_WORLD_SIZE - y) / span).floor() as i64).clamp(0, count - 1);

        let (first_x, last_x) = (column(min.x), column(max.x));
        let (first_y, last_y) = (row(max.y), row(min.y));

        let mut tiles = Vec::new();
        for y in first_y..=last_y {
            for x in first_x..=last_x {
                if tiles.len() == MAX_VISIBLE_TILES {
                    return tiles;
                }
                tiles.push(TileCoord {
                    z,
                    x: x as u32,
                    y: y as u32,
                });
            }
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::from_lon_lat;

    #[test]
    fn test_tile_zoom_is_rounded_and_capped() {
        let grid = TileGrid::default();
        assert_eq!(grid.tile_zoom(16.0), 16);
        assert_eq!(grid.tile_zoom(15.6), 16);
        assert_eq!(grid.tile_zoom(25.0), MAX_TILE_ZOOM);
        assert_eq!(grid.tile_zoom(0.2), 0);
    }

    #[test]
    fn test_zoom_zero_is_whole_world() {
        let grid = TileGrid::default();
        let (min, max) = grid.tile_extent(TileCoord { z: 0, x: 0, y: 0 });
        assert!((min.x + HALF_WORLD_SIZE).abs() < 1e-6);
        assert!((max.y - HALF_WORLD_SIZE).abs() < 1e-6);
    }

    #[test]
    fn test_display() {
        assert_eq!(TileCoord { z: 16, x: 64956, y: 41062 }.to_string(), "16/64956/41062");
    }

    #[test]
    fn test_visible_tiles_cover_center() {
        let grid = TileGrid::default();
        let center = from_lon_lat([174.7744, -41.2851]);
        let view = MapView::new(center, 16.0);
        let tiles = grid.visible_tiles(&view);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.z == 16));
        assert!(tiles.iter().any(|tile| {
            let (min, max) = grid.tile_extent(*tile);
            min.x <= center.x && center.x <= max.x && min.y <= center.y && center.y <= max.y
        }));
    }

    #[test]
    fn test_visible_tiles_stay_inside_grid() {
        let grid = TileGrid::default();
        let view = MapView::new(Coordinate::default(), 0.0);
        let tiles = grid.visible_tiles(&view);
        assert_eq!(tiles, vec![TileCoord { z: 0, x: 0, y: 0 }]);
    }
}
