use bevy::math::Vec2;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MAX_ZOOM, MIN_ZOOM};
use crate::geo::Coordinate;

/// Projected units per pixel at zoom 0 for 256px tiles.
const RESOLUTION_AT_ZOOM_ZERO: f64 = 156_543.033_928_040_97;

/// The part of the projected plane currently shown in the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: Coordinate,
    zoom: f64,
    size: Vec2,
}

impl MapView {
    pub fn new(center: Coordinate, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size: Vec2::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Projected units covered by one logical pixel.
    pub fn resolution(&self) -> f64 {
        RESOLUTION_AT_ZOOM_ZERO / 2f64.powf(self.zoom)
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ONE);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Convert a viewport pixel (top-left origin, y down) to a projected coordinate.
    pub fn coordinate_from_pixel(&self, pixel: Vec2) -> Coordinate {
        let resolution = self.resolution();
        let offset = pixel - self.size / 2.0;
        Coordinate::new(
            self.center.x + offset.x as f64 * resolution,
            self.center.y - offset.y as f64 * resolution,
        )
    }

    pub fn pixel_from_coordinate(&self, coordinate: Coordinate) -> Vec2 {
        let resolution = self.resolution();
        let dx = (coordinate.x - self.center.x) / resolution;
        let dy = (self.center.y - coordinate.y) / resolution;
        self.size / 2.0 + Vec2::new(dx as f32, dy as f32)
    }

    /// Move the view so the content follows a pointer drag of `delta` pixels.
    pub fn pan_by_pixels(&mut self, delta: Vec2) {
        let resolution = self.resolution();
        self.center.x -= delta.x as f64 * resolution;
        self.center.y += delta.y as f64 * resolution;
    }

    /// Zoom around `anchor` (a viewport pixel) so the coordinate under it stays put.
    pub fn zoom_around(&mut self, zoom: f64, anchor: Vec2) {
        let before = self.coordinate_from_pixel(anchor);
        self.set_zoom(zoom);
        let after = self.coordinate_from_pixel(anchor);
        self.center.x += before.x - after.x;
        self.center.y += before.y - after.y;
    }

    /// `(min, max)` corners of the visible area in projected units.
    pub fn extent(&self) -> (Coordinate, Coordinate) {
        let top_left = self.coordinate_from_pixel(Vec2::ZERO);
        let bottom_right = self.coordinate_from_pixel(self.size);
        (
            Coordinate::new(top_left.x, bottom_right.y),
            Coordinate::new(bottom_right.x, top_left.y),
        )
    }
}
