use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CENTER_LON_LAT, DEFAULT_FILL_COLOR, DEFAULT_POINTER_DEBOUNCE_MS, DEFAULT_ZOOM,
};
use crate::overlay::OverlayMode;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfigData {
    /// Leader-line origin as `[longitude, latitude]`; read once when the map is created
    pub center_lon_lat: [f64; 2],

    /// Initial zoom level of the map view
    pub zoom: f64,

    /// Pointer-move debounce in milliseconds (0 applies the latest move every frame)
    pub pointer_debounce_ms: u64,

    /// Overlay variant shown on startup (the last one selected)
    pub mode: OverlayMode,

    /// Last accepted draw interaction color
    pub draw_color: String,

    /// Whether the center-to-cursor layer is shown in its mode
    pub show_center_to_cursor: bool,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            center_lon_lat: DEFAULT_CENTER_LON_LAT,
            zoom: DEFAULT_ZOOM,
            pointer_debounce_ms: DEFAULT_POINTER_DEBOUNCE_MS,
            mode: OverlayMode::default(),
            draw_color: DEFAULT_FILL_COLOR.to_string(),
            show_center_to_cursor: true,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember the selected overlay mode
#[derive(Message)]
pub struct UpdateModeRequest {
    pub mode: OverlayMode,
}

/// Message to remember the last accepted draw color
#[derive(Message)]
pub struct UpdateDrawColorRequest {
    pub color: String,
}

/// Message to remember the center-to-cursor checkbox
#[derive(Message)]
pub struct UpdateShowCenterToCursorRequest {
    pub show: bool,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Parse config JSON, describing why it was rejected on failure
fn parse_config(json: &str) -> Result<AppConfigData, String> {
    serde_json::from_str(json).map_err(|e| format!("Configuration file was corrupted: {}", e))
}

/// Result of loading config from disk
struct LoadConfigResult {
    config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = get_config_path();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match parse_config(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(reason) => {
                    warn!("Failed to parse config file: {}", reason);
                    (AppConfigData::default(), Some(reason))
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    if let Err(e) = crate::paths::ensure_config_dir() {
        error!("Failed to create config directory: {}", e);
        return;
    }

    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config();
    config.data = result.config.data;
    config.config_path = result.config.config_path;
    config.dirty = result.config.dirty;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

fn update_mode_system(
    mut events: MessageReader<UpdateModeRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.mode != event.mode {
            config.data.mode = event.mode;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
    }
}

fn update_draw_color_system(
    mut events: MessageReader<UpdateDrawColorRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.draw_color != event.color {
            config.data.draw_color = event.color.clone();
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
    }
}

fn update_show_center_to_cursor_system(
    mut events: MessageReader<UpdateShowCenterToCursorRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.show_center_to_cursor != event.show {
            config.data.show_center_to_cursor = event.show;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateModeRequest>()
            .add_message::<UpdateDrawColorRequest>()
            .add_message::<UpdateShowCenterToCursorRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    (
                        update_mode_system.run_if(on_message::<UpdateModeRequest>),
                        update_draw_color_system.run_if(on_message::<UpdateDrawColorRequest>),
                        update_show_center_to_cursor_system
                            .run_if(on_message::<UpdateShowCenterToCursorRequest>),
                    ),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
