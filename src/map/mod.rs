//! The in-crate mapping engine: a single [`MapInstance`] holding the view,
//! ordered layers, draw interactions and pointer-move subscribers, plus the
//! Bevy systems that host it in the primary window.

mod host;
mod instance;
mod interaction;
mod layer;
mod params;
mod render;
mod style;
mod tiles;
mod view;

pub use host::PanState;
pub use instance::{ListenerKey, MapId, MapInstance};
pub use interaction::{DrawCondition, DrawInteraction, DrawOptions, DrawType, InteractionId};
pub use layer::{Layer, LayerId, VectorSource};
pub use style::{create_styles, Stroke, Style};
pub use tiles::TileGrid;
pub use view::MapView;

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigLoaded;

/// Systems that feed window input into the map. Overlays run after this set so
/// they see the current frame's pointer events.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapSystems;

pub struct MapHostPlugin;

impl Plugin for MapHostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanState>()
            .add_systems(Startup, host::mount_map_host.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    host::sync_view_size,
                    host::pan_view,
                    host::zoom_view,
                    host::dispatch_pointer_moves,
                    host::dispatch_clicks,
                )
                    .chain()
                    .in_set(MapSystems),
            )
            .add_systems(
                Last,
                host::detach_map_host.run_if(on_message::<AppExit>),
            )
            .add_systems(EguiPrimaryContextPass, render::render_map);
    }
}
