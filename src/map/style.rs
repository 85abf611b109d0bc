//! Vector styling: fill, stroke and circle markers keyed by geometry type.

use std::collections::HashMap;

use bevy::prelude::Color;

use crate::geo::GeometryType;
use crate::theme::{EDIT_BLUE, OUTLINE_WHITE, POLYGON_FILL};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Color,
}

impl Fill {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A circular point marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub radius: f32,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
}

/// One drawing pass. A feature is drawn once per style, in list order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    /// Marker drawn at point geometries
    pub image: Option<CircleStyle>,
    /// Higher values draw later. Features with equal values keep insertion order.
    pub z_index: f32,
}

impl Style {
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            stroke: Some(Stroke::new(color, width)),
            ..Default::default()
        }
    }

    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(Fill::new(color)),
            ..Default::default()
        }
    }

    pub fn circle(radius: f32, fill: Color, stroke: Stroke) -> Self {
        Self {
            image: Some(CircleStyle {
                radius,
                fill: Some(Fill::new(fill)),
                stroke: Some(stroke),
            }),
            ..Default::default()
        }
    }

    pub fn with_z_index(mut self, z_index: f32) -> Self {
        self.z_index = z_index;
        self
    }
}

pub type StyleByGeometry = HashMap<GeometryType, Vec<Style>>;

const OUTLINE_WIDTH: f32 = 3.0;
const POINT_RADIUS: f32 = 6.0;

/// Build the edit style table in `color`: a white outline under a colored
/// core for lines, a colored dot with a white rim for points and a
/// translucent white fill for polygons.
pub fn create_styles(color: Color) -> StyleByGeometry {
    let polygon = vec![Style::fill(POLYGON_FILL)];
    let line = vec![
        Style::stroke(OUTLINE_WHITE, OUTLINE_WIDTH + 2.0),
        Style::stroke(color, OUTLINE_WIDTH),
    ];
    let point = vec![
        Style::circle(
            POINT_RADIUS,
            color,
            Stroke::new(OUTLINE_WHITE, OUTLINE_WIDTH / 2.0),
        )
        .with_z_index(f32::INFINITY),
    ];

    let mut styles = StyleByGeometry::new();
    styles.insert(GeometryType::Polygon, polygon.clone());
    styles.insert(GeometryType::MultiPolygon, polygon.clone());
    styles.insert(GeometryType::LineString, line.clone());
    styles.insert(GeometryType::MultiLineString, line.clone());
    styles.insert(
        GeometryType::Circle,
        polygon.iter().chain(line.iter()).copied().collect(),
    );
    styles.insert(GeometryType::Point, point.clone());
    styles.insert(GeometryType::MultiPoint, point.clone());
    styles.insert(
        GeometryType::GeometryCollection,
        polygon.into_iter().chain(line).chain(point).collect(),
    );
    styles
}

/// The engine's built-in edit styling.
pub fn default_edit_styles() -> StyleByGeometry {
    create_styles(EDIT_BLUE)
}
