//! Leader line drawn by a line-string draw interaction that is seeded with the
//! center vertex and can never complete, so its sketch rubber-bands to the
//! cursor.

use bevy::prelude::*;

use crate::css_color::parse_css_color;
use crate::geo::Coordinate;
use crate::map::{
    create_styles, DrawCondition, DrawInteraction, DrawOptions, DrawType, InteractionId,
    MapInstance,
};

use super::{CursorTracker, Overlay, OverlaySettings};

/// Color override for the draw interaction. `None` uses the engine's edit styles.
///
/// Only ever holds strings that parsed as a color.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct DrawColor(pub Option<String>);

#[derive(Resource, Debug, Default)]
pub struct DrawInteractionOverlay {
    interaction: Option<InteractionId>,
    /// Color the current interaction was built with
    color: Option<String>,
    tracker: CursorTracker,
}

impl DrawInteractionOverlay {
    #[cfg(test)]
    pub fn interaction(&self) -> Option<InteractionId> {
        self.interaction
    }

    fn attach(&mut self, map: &mut MapInstance, center: Coordinate) {
        let interaction = build_interaction(self.color.as_deref());
        let id = interaction.id();
        if map.add_interaction(interaction) {
            if let Some(interaction) = map.interaction_mut(id) {
                interaction.append_coordinates(&[center]);
            }
            self.interaction = Some(id);
        }
    }

    fn detach(&mut self, map: &mut MapInstance) {
        if let Some(id) = self.interaction.take() {
            map.remove_interaction(id);
        }
    }
}

/// A two-vertex line interaction whose click condition never fires.
pub fn build_interaction(color: Option<&str>) -> DrawInteraction {
    let mut options = DrawOptions::new(DrawType::LineString)
        .with_max_points(2)
        .with_condition(DrawCondition::Never);
    if let Some(color) = color.and_then(parse_css_color) {
        options = options.with_style(create_styles(color));
    }
    DrawInteraction::new(options)
}

impl Overlay for DrawInteractionOverlay {
    const NAME: &'static str = "draw interaction";

    fn is_mounted(&self) -> bool {
        self.interaction.is_some()
    }

    fn mount(&mut self, map: &mut MapInstance, settings: &OverlaySettings) {
        self.attach(map, settings.center);
        self.tracker.subscribe(map);
    }

    fn unmount(&mut self, map: &mut MapInstance) {
        self.detach(map);
        self.tracker.unsubscribe(map);
        self.tracker.reset();
    }

    fn forget(&mut self) {
        self.interaction = None;
        self.tracker.forget();
        self.tracker.reset();
    }

    fn tracker_mut(&mut self) -> &mut CursorTracker {
        &mut self.tracker
    }
}

/// Rebuild the interaction when the color override changes. The old one is
/// removed and the new one added and seeded in the same run.
pub fn apply_draw_color(
    draw_color: Res<DrawColor>,
    mut overlay: ResMut<DrawInteractionOverlay>,
    settings: Res<OverlaySettings>,
    map: Option<ResMut<MapInstance>>,
) {
    if overlay.color == draw_color.0 {
        return;
    }
    overlay.color = draw_color.0.clone();

    let Some(mut map) = map else {
        return;
    };
    if overlay.is_mounted() {
        overlay.detach(&mut map);
        overlay.attach(&mut map, settings.center);
        debug!("Rebuilt draw interaction with color {:?}", overlay.color);
    }
}
