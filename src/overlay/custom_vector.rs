//! Leader line drawn with two hand-managed vector layers whose sources are
//! replaced on every cursor update.

use bevy::prelude::*;

use crate::geo::{Coordinate, Geometry};
use crate::map::{Layer, LayerId, MapInstance, Stroke, Style, VectorSource};
use crate::theme::{FUCHSIA, OUTLINE_WHITE};

use super::{CursorTracker, Overlay, OverlaySettings};

pub const LINE_LAYER: &str = "lineLayer";
pub const POINT_LAYER: &str = "pointLayer";

fn line_style() -> Vec<Style> {
    vec![
        Style::stroke(OUTLINE_WHITE, 5.0),
        Style::stroke(FUCHSIA, 3.0),
    ]
}

fn point_style() -> Vec<Style> {
    vec![Style::circle(6.0, FUCHSIA, Stroke::new(OUTLINE_WHITE, 1.5))]
}

fn line_layer() -> Layer {
    Layer::vector(LINE_LAYER, line_style())
}

fn point_layer() -> Layer {
    Layer::vector(POINT_LAYER, point_style())
}

/// Holds the two layers while they are off the map; the same layers go back
/// on each mount.
#[derive(Resource, Debug)]
pub struct CustomVectorOverlay {
    line: Option<Layer>,
    point: Option<Layer>,
    mounted: Option<[LayerId; 2]>,
    tracker: CursorTracker,
}

impl Default for CustomVectorOverlay {
    fn default() -> Self {
        Self {
            line: Some(line_layer()),
            point: Some(point_layer()),
            mounted: None,
            tracker: CursorTracker::default(),
        }
    }
}

impl CustomVectorOverlay {
    /// Ids of the line and point layers while mounted.
    #[cfg(test)]
    pub fn layer_ids(&self) -> Option<[LayerId; 2]> {
        self.mounted
    }

    fn take_or_rebuild(slot: &mut Option<Layer>, rebuild: fn() -> Layer) -> Layer {
        slot.take().unwrap_or_else(rebuild)
    }

    fn store(slot: &mut Option<Layer>, layer: Option<Layer>) {
        if let Some(mut layer) = layer {
            layer.set_source(VectorSource::default());
            *slot = Some(layer);
        }
    }
}

impl Overlay for CustomVectorOverlay {
    const NAME: &'static str = "custom vector";

    fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    fn mount(&mut self, map: &mut MapInstance, _settings: &OverlaySettings) {
        let line = Self::take_or_rebuild(&mut self.line, line_layer);
        let point = Self::take_or_rebuild(&mut self.point, point_layer);
        let ids = [line.id(), point.id()];
        map.add_layer(line);
        map.add_layer(point);
        self.mounted = Some(ids);
        self.tracker.subscribe(map);
    }

    fn unmount(&mut self, map: &mut MapInstance) {
        if let Some([line, point]) = self.mounted.take() {
            Self::store(&mut self.line, map.remove_layer(line));
            Self::store(&mut self.point, map.remove_layer(point));
        }
        self.tracker.unsubscribe(map);
        self.tracker.reset();
    }

    fn forget(&mut self) {
        self.mounted = None;
        self.tracker.forget();
        self.tracker.reset();
    }

    fn tracker_mut(&mut self) -> &mut CursorTracker {
        &mut self.tracker
    }

    fn on_mouse_position(
        &mut self,
        map: &mut MapInstance,
        settings: &OverlaySettings,
        position: Coordinate,
    ) {
        update_leader_line(map, settings.center, position);
    }
}

/// Point the line layer from `center` to `position` and move the point layer's
/// marker there. Layers missing from the map are skipped.
pub fn update_leader_line(map: &mut MapInstance, center: Coordinate, position: Coordinate) {
    if let Some(layer) = map.find_layer_by_class_name_mut(LINE_LAYER) {
        layer.set_source(VectorSource::from_geometry(Geometry::LineString(vec![
            center, position,
        ])));
    }
    if let Some(layer) = map.find_layer_by_class_name_mut(POINT_LAYER) {
        layer.set_source(VectorSource::from_geometry(Geometry::Point(position)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::from_lon_lat;
    use crate::map::MapView;

    fn attached_map() -> MapInstance {
        let mut map = MapInstance::new(MapView::new(Coordinate::default(), 16.0));
        map.set_target(Some(Entity::PLACEHOLDER));
        map
    }

    fn geometries(map: &MapInstance, class_name: &str) -> Vec<Geometry> {
        map.find_layer_by_class_name(class_name)
            .and_then(Layer::source)
            .map(|source| source.features().iter().map(|f| f.geometry().clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_update_replaces_sources() {
        let center = from_lon_lat([174.7744, -41.2851]);
        let mut map = attached_map();
        let mut overlay = CustomVectorOverlay::default();
        overlay.mount(&mut map, &OverlaySettings::default());

        let first = Coordinate::new(19_455_000.0, -5_054_000.0);
        let second = Coordinate::new(19_456_000.0, -5_055_000.0);
        update_leader_line(&mut map, center, first);
        update_leader_line(&mut map, center, second);

        assert_eq!(
            geometries(&map, LINE_LAYER),
            vec![Geometry::LineString(vec![center, second])]
        );
        assert_eq!(geometries(&map, POINT_LAYER), vec![Geometry::Point(second)]);
    }

    #[test]
    fn test_update_without_layers_is_skipped() {
        let mut map = attached_map();
        update_leader_line(&mut map, Coordinate::default(), Coordinate::new(1.0, 1.0));
        assert!(map.layers().is_empty());
    }

    #[test]
    fn test_layers_are_reused_across_mounts() {
        let mut map = attached_map();
        let mut overlay = CustomVectorOverlay::default();

        overlay.mount(&mut map, &OverlaySettings::default());
        let first_ids = overlay.layer_ids().unwrap();
        update_leader_line(&mut map, Coordinate::default(), Coordinate::new(1.0, 1.0));
        overlay.unmount(&mut map);
        assert!(map.layers().is_empty());
        assert_eq!(map.listener_count(), 0);

        overlay.mount(&mut map, &OverlaySettings::default());
        assert_eq!(overlay.layer_ids(), Some(first_ids));
        assert!(geometries(&map, LINE_LAYER).is_empty());
        assert_eq!(map.layers().len(), 2);
    }

    #[test]
    fn test_forget_rebuilds_lost_layers() {
        let mut map = attached_map();
        let mut overlay = CustomVectorOverlay::default();
        overlay.mount(&mut map, &OverlaySettings::default());
        overlay.forget();

        let mut fresh_map = attached_map();
        overlay.mount(&mut fresh_map, &OverlaySettings::default());
        assert!(fresh_map.find_layer_by_class_name(LINE_LAYER).is_some());
        assert!(fresh_map.find_layer_by_class_name(POINT_LAYER).is_some());
    }
}
