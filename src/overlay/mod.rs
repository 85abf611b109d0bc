//! Leader-line overlays: three interchangeable ways of drawing a line from a
//! fixed center to the cursor. Exactly one is mounted at a time, chosen by the
//! [`OverlayMode`] state.
//!
//! Mounting is reactive: an overlay attaches itself in `Update` once the map
//! exists and its mode is active. Unmounting runs in `OnExit`, so the previous
//! overlay is fully detached before the next one mounts.

mod center_to_cursor;
mod cursor_tracker;
mod custom_vector;
mod debounce;
mod draw_interaction;


pub use center_to_cursor::{
    center_to_cursor_shown, CenterToCursorOverlay, ShowCenterToCursor, CENTER_TO_CURSOR_LAYER,
};
pub use cursor_tracker::CursorTracker;
pub use custom_vector::{CustomVectorOverlay, LINE_LAYER, POINT_LAYER};
pub use draw_interaction::{DrawColor, DrawInteractionOverlay};

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, ConfigLoaded};
use crate::constants::DEFAULT_CENTER_LON_LAT;
use crate::css_color::is_color;
use crate::geo::{from_lon_lat, Coordinate};
use crate::map::{MapId, MapInstance, MapSystems};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OverlayMode {
    /// A draw interaction seeded at the center that never completes
    #[default]
    DrawInteraction,
    /// Hand-managed line and point layers
    CustomVector,
    /// A single line layer behind a visibility checkbox
    CenterToCursor,
}

impl OverlayMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            OverlayMode::DrawInteraction => "Draw interaction",
            OverlayMode::CustomVector => "Custom vector layers",
            OverlayMode::CenterToCursor => "Center to cursor",
        }
    }

    pub fn all() -> &'static [OverlayMode] {
        &[
            OverlayMode::DrawInteraction,
            OverlayMode::CustomVector,
            OverlayMode::CenterToCursor,
        ]
    }

    /// Source file implementing this variant.
    pub fn source_path(&self) -> PathBuf {
        let file = match self {
            OverlayMode::DrawInteraction => "draw_interaction.rs",
            OverlayMode::CustomVector => "custom_vector.rs",
            OverlayMode::CenterToCursor => "center_to_cursor.rs",
        };
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("src")
            .join("overlay")
            .join(file)
    }
}

/// Values every overlay reads when it mounts or updates.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    /// Fixed origin of the leader line
    pub center: Coordinate,
    pub pointer_debounce: Duration,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            center: from_lon_lat(DEFAULT_CENTER_LON_LAT),
            pointer_debounce: Duration::ZERO,
        }
    }
}

/// Cursor position reported up from the mounted overlay, shown in the readout.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct MousePositionStore {
    pub position: Option<Coordinate>,
}

/// A leader-line variant that owns map layers or interactions while mounted.
pub trait Overlay: Resource {
    /// Name used in logs
    const NAME: &'static str;

    fn is_mounted(&self) -> bool;

    /// Attach to the map. Only called while unmounted.
    fn mount(&mut self, map: &mut MapInstance, settings: &OverlaySettings);

    /// Remove everything this overlay added. Only called while mounted.
    fn unmount(&mut self, map: &mut MapInstance);

    /// The map disappeared along with everything attached to it.
    fn forget(&mut self);

    fn tracker_mut(&mut self) -> &mut CursorTracker;

    /// A new cursor position survived debouncing.
    fn on_mouse_position(
        &mut self,
        _map: &mut MapInstance,
        _settings: &OverlaySettings,
        _position: Coordinate,
    ) {
    }
}

/// Mount `T` once the map exists. Stale state is dropped when the map goes
/// away or is replaced by a new instance.
pub fn mount_overlay<T: Overlay>(
    mut overlay: ResMut<T>,
    map: Option<ResMut<MapInstance>>,
    settings: Res<OverlaySettings>,
    mut mounted_on: Local<Option<MapId>>,
) {
    let Some(mut map) = map else {
        if overlay.is_mounted() {
            overlay.forget();
            debug!("Map gone, forgot {} overlay", T::NAME);
        }
        return;
    };

    if overlay.is_mounted() && *mounted_on != Some(map.id()) {
        overlay.forget();
        debug!("Map replaced, forgot {} overlay", T::NAME);
    }
    if !overlay.is_mounted() {
        overlay.tracker_mut().set_interval(settings.pointer_debounce);
        overlay.mount(&mut map, &settings);
        *mounted_on = Some(map.id());
        info!("Mounted {} overlay", T::NAME);
    }
}

pub fn unmount_overlay<T: Overlay>(
    mut overlay: ResMut<T>,
    map: Option<ResMut<MapInstance>>,
    mut store: ResMut<MousePositionStore>,
) {
    if !overlay.is_mounted() {
        return;
    }
    match map {
        Some(mut map) => overlay.unmount(&mut map),
        None => overlay.forget(),
    }
    store.position = None;
    info!("Unmounted {} overlay", T::NAME);
}

/// Pull the mounted overlay's pointer moves and report new positions upward.
pub fn track_cursor<T: Overlay>(
    mut overlay: ResMut<T>,
    map: Option<ResMut<MapInstance>>,
    settings: Res<OverlaySettings>,
    time: Res<Time>,
    mut store: ResMut<MousePositionStore>,
) {
    let Some(mut map) = map else {
        return;
    };
    if !overlay.is_mounted() {
        return;
    }

    if let Some(position) = overlay.tracker_mut().poll(&mut map, time.elapsed()) {
        overlay.on_mouse_position(&mut map, &settings, position);
        store.position = Some(position);
    }
}

/// Overlay mount/track systems. Runs after [`MapSystems`] so this frame's
/// pointer events are already queued.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverlaySystems;

/// Startup system to derive overlay state from the loaded config
fn apply_overlay_config(
    config: Res<AppConfig>,
    mode: Res<State<OverlayMode>>,
    mut next_mode: ResMut<NextState<OverlayMode>>,
    mut settings: ResMut<OverlaySettings>,
    mut draw_color: ResMut<DrawColor>,
    mut show_center_to_cursor: ResMut<ShowCenterToCursor>,
) {
    settings.center = from_lon_lat(config.data.center_lon_lat);
    settings.pointer_debounce = Duration::from_millis(config.data.pointer_debounce_ms);

    if is_color(&config.data.draw_color) {
        draw_color.0 = Some(config.data.draw_color.clone());
    } else {
        warn!(
            "Ignoring invalid draw color {:?} from config",
            config.data.draw_color
        );
    }
    show_center_to_cursor.0 = config.data.show_center_to_cursor;

    if *mode.get() != config.data.mode {
        next_mode.set(config.data.mode);
    }
}

fn log_mode_change(mode: Res<State<OverlayMode>>) {
    info!("Overlay mode: {}", mode.get().display_name());
}

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<OverlayMode>()
            .init_resource::<OverlaySettings>()
            .init_resource::<MousePositionStore>()
            .init_resource::<DrawColor>()
            .init_resource::<ShowCenterToCursor>()
            .init_resource::<DrawInteractionOverlay>()
            .init_resource::<CustomVectorOverlay>()
            .init_resource::<CenterToCursorOverlay>()
            .configure_sets(Update, OverlaySystems.after(MapSystems))
            .add_systems(Startup, apply_overlay_config.after(ConfigLoaded))
            .add_systems(
                Update,
                log_mode_change.run_if(state_changed::<OverlayMode>),
            )
            // Unmount on the way out of each mode
            .add_systems(
                OnExit(OverlayMode::DrawInteraction),
                unmount_overlay::<DrawInteractionOverlay>,
            )
            .add_systems(
                OnExit(OverlayMode::CustomVector),
                unmount_overlay::<CustomVectorOverlay>,
            )
            .add_systems(
                OnExit(OverlayMode::CenterToCursor),
                unmount_overlay::<CenterToCursorOverlay>,
            )
            .add_systems(
                Update,
                (
                    draw_interaction::apply_draw_color,
                    mount_overlay::<DrawInteractionOverlay>,
                    track_cursor::<DrawInteractionOverlay>,
                )
                    .chain()
                    .run_if(in_state(OverlayMode::DrawInteraction))
                    .in_set(OverlaySystems),
            )
            .add_systems(
                Update,
                (
                    mount_overlay::<CustomVectorOverlay>,
                    track_cursor::<CustomVectorOverlay>,
                )
                    .chain()
                    .run_if(in_state(OverlayMode::CustomVector))
                    .in_set(OverlaySystems),
            )
            .add_systems(
                Update,
                (
                    unmount_overlay::<CenterToCursorOverlay>
                        .run_if(not(center_to_cursor_shown)),
                    (
                        mount_overlay::<CenterToCursorOverlay>,
                        track_cursor::<CenterToCursorOverlay>,
                    )
                        .chain()
                        .run_if(center_to_cursor_shown),
                )
                    .chain()
                    .run_if(in_state(OverlayMode::CenterToCursor))
                    .in_set(OverlaySystems),
            );
    }
}
