//! SystemParam bundles for map input systems.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

/// Window cursor access gated by egui, so map input ignores pointers over panels.
#[derive(SystemParam)]
pub struct MapPointer<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub contexts: EguiContexts<'w, 's>,
}

impl MapPointer<'_, '_> {
    /// Cursor position in logical pixels (top-left origin), if inside the window
    pub fn cursor_pixel(&self) -> Option<Vec2> {
        self.window.single().ok()?.cursor_position()
    }

    pub fn is_over_ui(&mut self) -> bool {
        is_cursor_over_ui(&mut self.contexts)
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
