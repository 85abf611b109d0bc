//! Creates the map, keeps its view in sync with the window and turns window
//! input into map events.

use bevy::app::AppExit;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};

use crate::config::AppConfig;
use crate::constants::{DRAG_THRESHOLD, PIXELS_PER_SCROLL_LINE, ZOOM_STEP};
use crate::geo::from_lon_lat;

use super::params::MapPointer;
use super::{MapInstance, MapView};

/// Marks the camera the map is attached to.
#[derive(Component)]
pub struct MapViewport;

/// Press/drag bookkeeping shared by panning and click dispatch.
#[derive(Resource, Default, Debug)]
pub struct PanState {
    /// A press started over the map (not over a panel)
    pub active: bool,
    /// The press travelled far enough to count as a drag
    pub dragged: bool,
    travelled: f32,
}

/// Build the map once, centered on the configured location, and attach it to
/// a fresh viewport camera. Later config changes do not move the view.
pub fn mount_map_host(
    mut commands: Commands,
    config: Res<AppConfig>,
    window: Query<&Window, With<PrimaryWindow>>,
) {
    let center = from_lon_lat(config.data.center_lon_lat);
    let mut view = MapView::new(center, config.data.zoom);
    if let Ok(window) = window.single() {
        view.set_size(window.size());
    }

    let viewport = commands.spawn((Camera2d, MapViewport)).id();

    let mut map = MapInstance::new(view);
    map.set_target(Some(viewport));
    info!(
        "Created map at {} (zoom {})",
        map.view().center(),
        map.view().zoom()
    );
    commands.insert_resource(map);
}

pub fn sync_view_size(window: Query<&Window, With<PrimaryWindow>>, map: Option<ResMut<MapInstance>>) {
    let (Ok(window), Some(mut map)) = (window.single(), map) else {
        return;
    };
    let size = window.size();
    if map.view().size() != size {
        map.view_mut().set_size(size);
    }
}

fn pan_button_pressed(mouse_button: &ButtonInput<MouseButton>) -> bool {
    mouse_button.pressed(MouseButton::Left) || mouse_button.pressed(MouseButton::Middle)
}

pub fn pan_view(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut pan: ResMut<PanState>,
    mut pointer: MapPointer,
    map: Option<ResMut<MapInstance>>,
) {
    if mouse_button.just_pressed(MouseButton::Left) || mouse_button.just_pressed(MouseButton::Middle)
    {
        pan.active = !pointer.is_over_ui();
        pan.dragged = false;
        pan.travelled = 0.0;
    }

    let Some(mut map) = map else {
        mouse_motion.clear();
        return;
    };
    if !pan.active || !pan_button_pressed(&mouse_button) {
        mouse_motion.clear();
        return;
    }

    for event in mouse_motion.read() {
        pan.travelled += event.delta.length();
        if pan.travelled > DRAG_THRESHOLD {
            pan.dragged = true;
        }
        if pan.dragged {
            map.view_mut().pan_by_pixels(event.delta);
        }
    }
}

/// Wheel lines scrolled by one event.
fn scroll_lines(unit: MouseScrollUnit, y: f32) -> f64 {
    match unit {
        MouseScrollUnit::Line => y as f64,
        MouseScrollUnit::Pixel => y as f64 / PIXELS_PER_SCROLL_LINE,
    }
}

pub fn zoom_view(
    mut scroll_events: MessageReader<MouseWheel>,
    mut pointer: MapPointer,
    map: Option<ResMut<MapInstance>>,
) {
    let Some(mut map) = map else {
        scroll_events.clear();
        return;
    };
    if pointer.is_over_ui() {
        scroll_events.clear();
        return;
    }

    let anchor = pointer
        .cursor_pixel()
        .unwrap_or_else(|| map.view().size() / 2.0);

    for event in scroll_events.read() {
        let zoom = map.view().zoom() + scroll_lines(event.unit, event.y) * ZOOM_STEP;
        map.view_mut().zoom_around(zoom, anchor);
    }
}

/// Forward window cursor moves to the map in the order the OS reported them.
pub fn dispatch_pointer_moves(
    mut cursor_moved: MessageReader<CursorMoved>,
    mut pointer: MapPointer,
    map: Option<ResMut<MapInstance>>,
) {
    let Some(mut map) = map else {
        cursor_moved.clear();
        return;
    };
    if pointer.is_over_ui() {
        cursor_moved.clear();
        return;
    }

    for event in cursor_moved.read() {
        let coordinate = map.view().coordinate_from_pixel(event.position);
        map.dispatch_pointer_move(coordinate);
    }
}

/// A left press and release without a drag is a click.
pub fn dispatch_clicks(
    mouse_button: Res<ButtonInput<MouseButton>>,
    pan: Res<PanState>,
    pointer: MapPointer,
    map: Option<ResMut<MapInstance>>,
) {
    if !mouse_button.just_released(MouseButton::Left) || !pan.active || pan.dragged {
        return;
    }
    let (Some(mut map), Some(pixel)) = (map, pointer.cursor_pixel()) else {
        return;
    };

    let coordinate = map.view().coordinate_from_pixel(pixel);
    for feature in map.dispatch_click(coordinate) {
        debug!(
            "Interaction finished a {:?}",
            feature.geometry().geometry_type()
        );
    }
}

pub fn detach_map_host(mut exit: MessageReader<AppExit>, map: Option<ResMut<MapInstance>>) {
    if exit.read().last().is_none() {
        return;
    }
    if let Some(mut map) = map {
        map.set_target(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfigData;

    fn host_app(center_lon_lat: [f64; 2], zoom: f64) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<AppExit>()
            .insert_resource(AppConfig {
                data: AppConfigData {
                    center_lon_lat,
                    zoom,
                    ..default()
                },
                config_path: std::env::temp_dir().join("leaderline-host-test.json"),
                dirty: false,
            })
            .add_systems(Startup, mount_map_host)
            .add_systems(Update, sync_view_size)
            .add_systems(Last, detach_map_host.run_if(on_message::<AppExit>));
        app.update();
        app
    }

    fn map(app: &App) -> &MapInstance {
        app.world().resource::<MapInstance>()
    }

    #[test]
    fn test_map_is_built_from_config_and_attached() {
        let app = host_app([-0.1276, 51.5072], 12.0);

        assert_eq!(map(&app).view().center(), from_lon_lat([-0.1276, 51.5072]));
        assert_eq!(map(&app).view().zoom(), 12.0);
        assert!(map(&app).target().is_some());
        assert!(map(&app).layers().is_empty());
        assert!(map(&app).interactions().is_empty());
    }

    #[test]
    fn test_viewport_camera_is_the_target() {
        let mut app = host_app([0.0, 0.0], 3.0);
        let mut viewports = app
            .world_mut()
            .query_filtered::<Entity, With<MapViewport>>();
        let viewport = viewports.single(app.world()).unwrap();
        assert_eq!(map(&app).target(), Some(viewport));
    }

    #[test]
    fn test_config_change_does_not_rebuild_map() {
        let mut app = host_app([-0.1276, 51.5072], 12.0);
        let id = map(&app).id();
        let center = map(&app).view().center();

        app.world_mut()
            .resource_mut::<AppConfig>()
            .data
            .center_lon_lat = [174.7744, -41.2851];
        app.update();
        app.update();

        assert_eq!(map(&app).id(), id);
        assert_eq!(map(&app).view().center(), center);
    }

    #[test]
    fn test_exit_detaches_map() {
        let mut app = host_app([0.0, 0.0], 3.0);
        app.update();
        assert!(map(&app).target().is_some());

        app.world_mut().write_message(AppExit::Success);
        app.update();

        assert!(map(&app).target().is_none());
    }

    #[test]
    fn test_scroll_lines() {
        assert_eq!(scroll_lines(MouseScrollUnit::Line, -2.0), -2.0);
        assert_eq!(
            scroll_lines(MouseScrollUnit::Pixel, PIXELS_PER_SCROLL_LINE as f32),
            1.0
        );
    }
}
