//! Centralized color theme for the application.
//!
//! This module provides all colors used by the map renderer and the controls.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Map Colors
// ============================================================================

/// Clear color behind the basemap
pub const MAP_BACKGROUND: Color = Color::srgb(0.85, 0.85, 0.82);

/// Alternating basemap tile fills
pub const TILE_LIGHT: Color = Color::srgb(0.95, 0.94, 0.91);
pub const TILE_DARK: Color = Color::srgb(0.90, 0.89, 0.86);

/// Basemap tile border
pub const TILE_OUTLINE: Color = Color::srgba(0.5, 0.5, 0.5, 0.4);

/// Basemap tile `z/x/y` label
pub const TILE_LABEL: Color = Color::srgba(0.3, 0.3, 0.3, 0.8);

// ============================================================================
// Vector Styles
// ============================================================================

/// Outline drawn beneath every leader line and marker
pub const OUTLINE_WHITE: Color = Color::WHITE;

/// The engine's default edit blue (`#0099FF`)
pub const EDIT_BLUE: Color = Color::srgb(0.0, 0.6, 1.0);

/// Fill of the custom vector layers
pub const FUCHSIA: Color = Color::srgb(1.0, 0.0, 1.0);

/// Translucent white used for polygon sketches
pub const POLYGON_FILL: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);

// ============================================================================
// Control Colors
// ============================================================================

/// Readout text color
pub const READOUT_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 220, 220);

/// Border around the accepted-color swatch
pub const SWATCH_BORDER: egui::Color32 = egui::Color32::from_gray(90);
