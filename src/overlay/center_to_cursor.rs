//! Leader line on a single vector layer that can be switched off from the
//! controls. Reports the cursor position up to the readout while shown.

use bevy::prelude::*;

use crate::geo::{Coordinate, Geometry};
use crate::map::{Layer, LayerId, MapInstance, Style, VectorSource};
use crate::theme::{EDIT_BLUE, OUTLINE_WHITE};

use super::{CursorTracker, Overlay, OverlaySettings};

pub const CENTER_TO_CURSOR_LAYER: &str = "centerToCursor";

/// State of the "Show center-to-cursor layer" checkbox.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowCenterToCursor(pub bool);

impl Default for ShowCenterToCursor {
    fn default() -> Self {
        Self(true)
    }
}

/// Run condition: the center-to-cursor layer is switched on.
pub fn center_to_cursor_shown(show: Res<ShowCenterToCursor>) -> bool {
    show.0
}

fn line_style() -> Vec<Style> {
    vec![
        Style::stroke(OUTLINE_WHITE, 6.0),
        Style::stroke(EDIT_BLUE, 4.0),
    ]
}

#[derive(Resource, Debug, Default)]
pub struct CenterToCursorOverlay {
    layer: Option<LayerId>,
    tracker: CursorTracker,
}

impl CenterToCursorOverlay {
    #[cfg(test)]
    pub fn layer_id(&self) -> Option<LayerId> {
        self.layer
    }
}

impl Overlay for CenterToCursorOverlay {
    const NAME: &'static str = "center-to-cursor";

    fn is_mounted(&self) -> bool {
        self.layer.is_some()
    }

    fn mount(&mut self, map: &mut MapInstance, _settings: &OverlaySettings) {
        let layer = Layer::vector(CENTER_TO_CURSOR_LAYER, line_style());
        let id = layer.id();
        if map.add_layer(layer) {
            self.layer = Some(id);
        }
        self.tracker.subscribe(map);
    }

    fn unmount(&mut self, map: &mut MapInstance) {
        if let Some(id) = self.layer.take() {
            map.remove_layer(id);
        }
        self.tracker.unsubscribe(map);
        self.tracker.reset();
    }

    fn forget(&mut self) {
        self.layer = None;
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
        if let Some(layer) = map.find_layer_by_class_name_mut(CENTER_TO_CURSOR_LAYER) {
            layer.set_source(VectorSource::from_geometry(Geometry::LineString(vec![
                settings.center,
                position,
            ])));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapView, Stroke};

    fn attached_map() -> MapInstance {
        let mut map = MapInstance::new(MapView::new(Coordinate::default(), 16.0));
        map.set_target(Some(Entity::PLACEHOLDER));
        map
    }

    #[test]
    fn test_line_style() {
        let style = line_style();
        assert_eq!(style[0].stroke, Some(Stroke::new(OUTLINE_WHITE, 6.0)));
        assert_eq!(style[1].stroke, Some(Stroke::new(EDIT_BLUE, 4.0)));
    }

    #[test]
    fn test_fresh_layer_per_mount() {
        let mut map = attached_map();
        let mut overlay = CenterToCursorOverlay::default();

        overlay.mount(&mut map, &OverlaySettings::default());
        let first = overlay.layer_id().unwrap();
        overlay.unmount(&mut map);
        assert!(map.layers().is_empty());

        overlay.mount(&mut map, &OverlaySettings::default());
        assert_ne!(overlay.layer_id(), Some(first));
        assert_eq!(map.layers().len(), 1);
    }

    #[test]
    fn test_position_draws_line_from_center() {
        let settings = OverlaySettings {
            center: Coordinate::new(10.0, 10.0),
            ..Default::default()
        };
        let mut map = attached_map();
        let mut overlay = CenterToCursorOverlay::default();
        overlay.mount(&mut map, &settings);
        overlay.on_mouse_position(&mut map, &settings, Coordinate::new(20.0, 30.0));

        let source = map
            .find_layer_by_class_name(CENTER_TO_CURSOR_LAYER)
            .and_then(Layer::source)
            .unwrap();
        assert_eq!(
            source.features()[0].geometry(),
            &Geometry::LineString(vec![Coordinate::new(10.0, 10.0), Coordinate::new(20.0, 30.0)])
        );
    }
}
