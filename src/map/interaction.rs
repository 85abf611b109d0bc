//! Drawing interaction: turns pointer input into a geometry sketch.
//!
//! Pointer moves drag the last sketch vertex along with the cursor (the
//! "rubber band"). Clicks fix a vertex only when the [`DrawCondition`] lets
//! them through. Once `max_points` vertices are fixed the feature is finished
//! and the sketch starts over.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geo::{Coordinate, Feature, Geometry, GeometryType};

use super::style::{default_edit_styles, Style, StyleByGeometry};

static NEXT_INTERACTION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionId(u64);

impl InteractionId {
    fn next() -> Self {
        Self(NEXT_INTERACTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interaction#{}", self.0)
    }
}

/// Geometry produced by a draw interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawType {
    #[allow(dead_code)] // Engine draw type; the overlays only draw lines
    Point,
    LineString,
    #[allow(dead_code)] // Engine draw type; the overlays only draw lines
    Polygon,
}

impl DrawType {
    /// Vertices needed before the sketch can be finished.
    fn min_points(&self) -> usize {
        match self {
            DrawType::Point => 1,
            DrawType::LineString => 2,
            DrawType::Polygon => 3,
        }
    }
}

/// Decides whether a click adds a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawCondition {
    #[default]
    Always,
    Never,
}

impl DrawCondition {
    pub fn allows(&self) -> bool {
        matches!(self, DrawCondition::Always)
    }
}

#[derive(Debug, Clone)]
pub struct DrawOptions {
    pub draw_type: DrawType,
    pub max_points: Option<usize>,
    pub condition: DrawCondition,
    /// Sketch styling; the engine's edit styles when `None`.
    pub style: Option<StyleByGeometry>,
}

impl DrawOptions {
    pub fn new(draw_type: DrawType) -> Self {
        Self {
            draw_type,
            max_points: None,
            condition: DrawCondition::default(),
            style: None,
        }
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }

    pub fn with_condition(mut self, condition: DrawCondition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_style(mut self, style: StyleByGeometry) -> Self {
        self.style = Some(style);
        self
    }
}

pub struct DrawInteraction {
    id: InteractionId,
    draw_type: DrawType,
    max_points: Option<usize>,
    condition: DrawCondition,
    styles: StyleByGeometry,
    sketch: Vec<Coordinate>,
    pointer: Option<Coordinate>,
}

impl DrawInteraction {
    pub fn new(options: DrawOptions) -> Self {
        Self {
            id: InteractionId::next(),
            draw_type: options.draw_type,
            max_points: options.max_points,
            condition: options.condition,
            styles: options.style.unwrap_or_else(default_edit_styles),
            sketch: Vec::new(),
            pointer: None,
        }
    }

    pub fn id(&self) -> InteractionId {
        self.id
    }

    #[cfg(test)]
    pub fn condition(&self) -> DrawCondition {
        self.condition
    }

    /// Fixed sketch vertices, without the one following the pointer.
    #[cfg(test)]
    pub fn sketch_coordinates(&self) -> &[Coordinate] {
        &self.sketch
    }

    /// Append vertices to the sketch, starting one if needed.
    pub fn append_coordinates(&mut self, coordinates: &[Coordinate]) {
        self.sketch.extend_from_slice(coordinates);
        if self.reached_max_points() {
            self.finish_drawing();
        }
    }

    pub fn handle_pointer_move(&mut self, coordinate: Coordinate) {
        self.pointer = Some(coordinate);
    }

    /// Returns the finished feature when this click completed one.
    pub fn handle_click(&mut self, coordinate: Coordinate) -> Option<Feature> {
        self.pointer = Some(coordinate);
        if !self.condition.allows() {
            return None;
        }

        self.sketch.push(coordinate);
        if self.draw_type == DrawType::Point || self.reached_max_points() {
            return self.finish_drawing();
        }
        None
    }

    fn reached_max_points(&self) -> bool {
        self.max_points
            .is_some_and(|max| self.sketch.len() >= max.max(self.draw_type.min_points()))
    }

    /// Finish the current sketch. Too-short sketches are dropped.
    pub fn finish_drawing(&mut self) -> Option<Feature> {
        let coordinates = std::mem::take(&mut self.sketch);
        if coordinates.len() < self.draw_type.min_points() {
            return None;
        }

        let geometry = match self.draw_type {
            DrawType::Point => Geometry::Point(coordinates[0]),
            DrawType::LineString => Geometry::LineString(coordinates),
            DrawType::Polygon => Geometry::Polygon(coordinates),
        };
        Some(Feature::new(geometry))
    }

    /// What the overlay should show right now: the sketch geometry with its
    /// trailing vertex at the pointer, followed by the pointer marker.
    pub fn sketch_features(&self) -> Vec<Feature> {
        let mut features = Vec::new();

        if !self.sketch.is_empty() && self.draw_type != DrawType::Point {
            let mut coordinates = self.sketch.clone();
            if let Some(pointer) = self.pointer {
                coordinates.push(pointer);
            }
            if coordinates.len() >= 2 {
                let geometry = match self.draw_type {
                    DrawType::Polygon if coordinates.len() >= 3 => Geometry::Polygon(coordinates),
                    _ => Geometry::LineString(coordinates),
                };
                features.push(Feature::new(geometry));
            }
        }

        let marker = self.pointer.or_else(|| self.sketch.last().copied());
        if let Some(marker) = marker {
            features.push(Feature::new(Geometry::Point(marker)));
        }

        features
    }

    pub fn styles_for(&self, geometry_type: GeometryType) -> &[Style] {
        self.styles
            .get(&geometry_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl fmt::Debug for DrawInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawInteraction")
            .field("id", &self.id)
            .field("draw_type", &self.draw_type)
            .field("max_points", &self.max_points)
            .field("condition", &self.condition)
            .field("sketch", &self.sketch)
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::style::create_styles;
    use crate::map::style::Stroke;
    use crate::theme::{EDIT_BLUE, FUCHSIA, OUTLINE_WHITE};

    fn leader_line(condition: DrawCondition) -> DrawInteraction {
        DrawInteraction::new(
            DrawOptions::new(DrawType::LineString)
                .with_max_points(2)
                .with_condition(condition),
        )
    }

    #[test]
    fn test_seeded_sketch_follows_pointer() {
        let center = Coordinate::new(10.0, 20.0);
        let mut draw = leader_line(DrawCondition::Never);
        draw.append_coordinates(&[center]);
        assert_eq!(draw.sketch_coordinates(), &[center]);

        draw.handle_pointer_move(Coordinate::new(30.0, 40.0));
        draw.handle_pointer_move(Coordinate::new(50.0, 60.0));

        let features = draw.sketch_features();
        assert_eq!(features.len(), 2);
        assert_eq!(
            features[0].geometry(),
            &Geometry::LineString(vec![center, Coordinate::new(50.0, 60.0)])
        );
        assert_eq!(
            features[1].geometry(),
            &Geometry::Point(Coordinate::new(50.0, 60.0))
        );
    }

    #[test]
    fn test_never_condition_ignores_clicks() {
        let mut draw = leader_line(DrawCondition::Never);
        draw.append_coordinates(&[Coordinate::default()]);
        for i in 0..5 {
            assert!(draw.handle_click(Coordinate::new(i as f64, 1.0)).is_none());
        }
        assert_eq!(draw.sketch_coordinates(), &[Coordinate::default()]);
    }

    #[test]
    fn test_always_condition_finishes_at_max_points() {
        let mut draw = leader_line(DrawCondition::Always);
        assert!(draw.handle_click(Coordinate::new(0.0, 0.0)).is_none());
        let feature = draw.handle_click(Coordinate::new(1.0, 1.0)).unwrap();
        assert_eq!(
            feature.geometry(),
            &Geometry::LineString(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)])
        );
        assert!(draw.sketch_coordinates().is_empty());
    }

    #[test]
    fn test_finished_sketch_starts_over() {
        let mut draw = leader_line(DrawCondition::Always);
        for i in 0..6 {
            draw.handle_click(Coordinate::new(i as f64, 0.0));
        }
        assert!(draw.sketch_coordinates().is_empty());
        draw.handle_click(Coordinate::new(9.0, 9.0));
        assert_eq!(draw.sketch_coordinates(), &[Coordinate::new(9.0, 9.0)]);
    }

    #[test]
    fn test_point_draw_finishes_each_click() {
        let mut draw = DrawInteraction::new(DrawOptions::new(DrawType::Point));
        let feature = draw.handle_click(Coordinate::new(2.0, 3.0)).unwrap();
        assert_eq!(feature.geometry(), &Geometry::Point(Coordinate::new(2.0, 3.0)));
    }

    #[test]
    fn test_short_sketch_is_dropped_on_finish() {
        let mut draw = leader_line(DrawCondition::Always);
        draw.append_coordinates(&[Coordinate::default()]);
        assert!(draw.finish_drawing().is_none());
        assert!(draw.sketch_coordinates().is_empty());
        assert!(draw.sketch_features().is_empty());
    }

    #[test]
    fn test_pointer_marker_without_sketch() {
        let mut draw = leader_line(DrawCondition::Never);
        draw.handle_pointer_move(Coordinate::new(4.0, 4.0));
        let features = draw.sketch_features();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].geometry().geometry_type(), GeometryType::Point);
    }

    #[test]
    fn test_default_styles_are_edit_blue() {
        let draw = leader_line(DrawCondition::Never);
        let line = draw.styles_for(GeometryType::LineString);
        assert_eq!(line[1].stroke, Some(Stroke::new(EDIT_BLUE, 3.0)));
    }

    #[test]
    fn test_custom_styles_are_used() {
        let draw = DrawInteraction::new(
            DrawOptions::new(DrawType::LineString).with_style(create_styles(FUCHSIA)),
        );
        let line = draw.styles_for(GeometryType::LineString);
        assert_eq!(line[0].stroke, Some(Stroke::new(OUTLINE_WHITE, 5.0)));
        assert_eq!(line[1].stroke, Some(Stroke::new(FUCHSIA, 3.0)));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = leader_line(DrawCondition::Never);
        let b = leader_line(DrawCondition::Never);
        assert_ne!(a.id(), b.id());
    }
}
