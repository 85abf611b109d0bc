use std::fmt;

/// Shown in the readout while no cursor position is known.
pub const READOUT_PLACEHOLDER: &str = "Move the cursor over the map";

/// A projected (x, y) position in map units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.x, coordinate.y]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.x, self.y)
    }
}

/// Text for the cursor readout: four decimals per axis, or the placeholder.
pub fn format_readout(position: Option<Coordinate>) -> String {
    match position {
        Some(coordinate) => coordinate.to_string(),
        None => READOUT_PLACEHOLDER.to_string(),
    }
}
