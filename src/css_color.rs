//! CSS color parsing for user-entered colors.
//!
//! The `color` crate implements the CSS Color 4 grammar, so anything a browser
//! would accept for a `color` property (`"#ff00ff"`, `"fuchsia"`,
//! `"rgb(255 0 255)"`, ...) parses here too.

use std::str::FromStr;

use bevy::prelude::Color;
use bevy_egui::egui;
use ::color::{DynamicColor, Srgb};

/// Parse a CSS color string into a Bevy color.
///
/// Returns `None` for anything the CSS parser rejects, including the empty
/// string.
pub fn parse_css_color(input: &str) -> Option<Color> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = DynamicColor::from_str(trimmed).ok()?;
    let [red, green, blue, alpha] = parsed.to_alpha_color::<Srgb>().components;
    Some(Color::srgba(red, green, blue, alpha))
}

/// Check if provided string is a valid color.
pub fn is_color(input: &str) -> bool {
    parse_css_color(input).is_some()
}

/// Convert a Bevy color to the egui representation used by the painter.
pub fn to_color32(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        channel_to_u8(srgba.red),
        channel_to_u8(srgba.green),
        channel_to_u8(srgba.blue),
        channel_to_u8(srgba.alpha),
    )
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgba(color: Color, expected: [f32; 4]) {
        let srgba = color.to_srgba();
        let actual = [srgba.red, srgba.green, srgba.blue, srgba.alpha];
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 0.01, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_hex_color() {
        let color = parse_css_color("#FF00FF").unwrap();
        assert_rgba(color, [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_named_color() {
        let color = parse_css_color("fuchsia").unwrap();
        assert_rgba(color, [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_functional_color() {
        let color = parse_css_color("rgb(255, 0, 0)").unwrap();
        assert_rgba(color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_default_fill_color_is_valid() {
        let color = parse_css_color(crate::constants::DEFAULT_FILL_COLOR).unwrap();
        assert_rgba(color, [0.0, 0.6, 1.0, 1.0]);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(is_color("  red "));
    }

    #[test]
    fn test_invalid_colors() {
        assert!(!is_color("notacolor"));
        assert!(!is_color(""));
        assert!(!is_color("   "));
        assert!(!is_color("#12"));
    }

    #[test]
    fn test_to_color32() {
        let color32 = to_color32(Color::srgba(1.0, 0.0, 1.0, 1.0));
        assert_eq!(color32, egui::Color32::from_rgba_unmultiplied(255, 0, 255, 255));
    }
}
