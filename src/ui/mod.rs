mod color_input;
mod mode_selector;
mod notifications;

pub use color_input::DrawColorInput;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigLoaded;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawColorInput>()
            .add_systems(
                Startup,
                color_input::init_color_input.after(ConfigLoaded),
            )
            .add_systems(
                Update,
                color_input::publish_draw_color
                    .run_if(resource_changed::<DrawColorInput>),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    mode_selector::mode_selector_ui,
                    // Dialogs draw over the controls
                    notifications::config_reset_notification_ui,
                )
                    .chain(),
            );
    }
}
