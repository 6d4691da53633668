use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_ERASE_RADIUS_M, MAX_ERASE_RADIUS_M, MIN_ERASE_RADIUS_M};
use crate::geo::Coordinate;
use crate::territory::EditTarget;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Public OSRM demo server
pub const DEFAULT_ROUTING_URL: &str = "https://router.project-osrm.org";

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfigData {
    /// Base URL of the OSRM-compatible routing service used for snap-to-road
    pub routing_url: String,

    /// Snap freehand strokes to walkable roads
    pub snap_to_road: bool,

    /// Eraser radius in meters
    pub erase_radius_m: f64,

    /// Map center on startup
    pub map_center: Coordinate,

    /// Map zoom on startup
    pub map_zoom: f64,

    /// Whether strokes land in the selected group or the extra buffer
    pub edit_target: EditTarget,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            routing_url: DEFAULT_ROUTING_URL.to_string(),
            snap_to_road: false,
            erase_radius_m: DEFAULT_ERASE_RADIUS_M,
            map_center: Coordinate::new(-10.169, -48.331),
            map_zoom: 15.0,
            edit_target: EditTarget::Group,
        }
    }
}

impl AppConfigData {
    /// Eraser radius clamped to the supported range
    pub fn erase_radius(&self) -> f64 {
        if self.erase_radius_m.is_finite() {
            self.erase_radius_m.clamp(MIN_ERASE_RADIUS_M, MAX_ERASE_RADIUS_M)
        } else {
            DEFAULT_ERASE_RADIUS_M
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

/// Message to change the eraser radius
#[derive(Message)]
pub struct SetEraseRadiusRequest {
    pub radius: f64,
}

/// Message to toggle snap-to-road
#[derive(Message)]
pub struct SetSnapToRoadRequest {
    pub enabled: bool,
}

/// Message to remember the edit target between sessions
#[derive(Message)]
pub struct SetEditTargetRequest {
    pub target: EditTarget,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Parse config JSON, returning defaults plus the reason when it can't be used
fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str(json) {
        Ok(data) => (data, None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
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
            Ok(json) => {
                let parsed = parse_config(&json);
                if parsed.1.is_none() {
                    info!("Loaded config from {:?}", config_path);
                }
                parsed
            }
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

fn set_erase_radius_system(
    mut events: MessageReader<SetEraseRadiusRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        let radius = event.radius.clamp(MIN_ERASE_RADIUS_M, MAX_ERASE_RADIUS_M);
        if config.data.erase_radius_m != radius {
            config.data.erase_radius_m = radius;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
    }
}

fn set_snap_to_road_system(
    mut events: MessageReader<SetSnapToRoadRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.snap_to_road = event.enabled;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Snap to road {}", if event.enabled { "enabled" } else { "disabled" });
    }
}

fn set_edit_target_system(
    mut events: MessageReader<SetEditTargetRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.edit_target = event.target;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetEraseRadiusRequest>()
            .add_message::<SetSnapToRoadRequest>()
            .add_message::<SetEditTargetRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_erase_radius_system.run_if(on_message::<SetEraseRadiusRequest>),
                    set_snap_to_road_system.run_if(on_message::<SetSnapToRoadRequest>),
                    set_edit_target_system.run_if(on_message::<SetEditTargetRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert_eq!(data.routing_url, DEFAULT_ROUTING_URL);
        assert!(!data.snap_to_road);
        assert_eq!(data.erase_radius_m, 150.0);
        assert_eq!(data.edit_target, EditTarget::Group);
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            routing_url: "http://localhost:5000".to_string(),
            snap_to_road: true,
            erase_radius_m: 40.0,
            map_center: Coordinate::new(1.5, -2.5),
            map_zoom: 12.0,
            edit_target: EditTarget::Extra,
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, data);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let (data, reason) = parse_config(r#"{ "snap_to_road": true }"#);
        assert!(reason.is_none());
        assert!(data.snap_to_road);
        assert_eq!(data.routing_url, DEFAULT_ROUTING_URL);
        assert_eq!(data.map_zoom, 15.0);
    }

    #[test]
    fn test_corrupt_config_resets_with_reason() {
        let (data, reason) = parse_config("{ not json");
        assert_eq!(data, AppConfigData::default());
        assert!(reason.is_some_and(|r| r.contains("corrupted")));
    }

    #[test]
    fn test_erase_radius_is_clamped() {
        let mut data = AppConfigData {
            erase_radius_m: 9000.0,
            ..Default::default()
        };
        assert_eq!(data.erase_radius(), MAX_ERASE_RADIUS_M);
        data.erase_radius_m = f64::NAN;
        assert_eq!(data.erase_radius(), DEFAULT_ERASE_RADIUS_M);
    }
}
