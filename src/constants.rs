//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration defaults that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels (also the initial map viewport width)
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels (also the initial map viewport height)
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Wellington, New Zealand, as `[longitude, latitude]`
pub const DEFAULT_CENTER_LON_LAT: [f64; 2] = [174.7744, -41.2851];

/// Zoom level the map view is created with
pub const DEFAULT_ZOOM: f64 = 16.0;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 28.0;

/// Zoom levels per wheel line
pub const ZOOM_STEP: f64 = 0.5;

/// Pixels of touchpad scroll that count as one wheel line
pub const PIXELS_PER_SCROLL_LINE: f64 = 50.0;

/// Default fill color of the draw interaction (the engine's edit blue)
pub const DEFAULT_FILL_COLOR: &str = "#0099FF";

/// Pointer-move debounce used when the config does not set one
pub const DEFAULT_POINTER_DEBOUNCE_MS: u64 = 0;

/// Stacking order of the basemap; it always sits at the bottom
pub const BASEMAP_Z_INDEX: i32 = 0;

/// Tile edge length in pixels at integer zoom levels
pub const TILE_SIZE: u32 = 256;

/// Deepest zoom level the tile grid subdivides to
pub const MAX_TILE_ZOOM: u8 = 19;

/// Pointer travel (pixels) before a press turns into a pan instead of a click
pub const DRAG_THRESHOLD: f32 = 3.0;
