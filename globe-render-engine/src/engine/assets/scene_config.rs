use bevy::prelude::*;
use constants::asset_paths::{
    EARTH_DAYMAP_TEXTURE, EARTH_NORMAL_TEXTURE, GEOFENCE_PATH, SKYBOX_TEXTURE,
};
use constants::render_settings::*;
use serde::{Deserialize, Serialize};

/// Scene description driving every spawn system. Loaded from JSON as a bevy asset;
/// any field missing from the file falls back to the compiled defaults.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeSceneConfig {
    pub globe_radius: f64,
    pub earth_segments: u32,
    pub earth_alpha: f32,
    pub skybox_size: f32,
    pub satellite: SatelliteSettings,
    pub grid: GridSettings,
    pub geofence: GeofenceSettings,
    pub camera: CameraSettings,
    pub textures: TextureFiles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteSettings {
    pub orbit_radius: f64,
    /// Radians added per rendered frame.
    pub angle_increment: f64,
    pub diameter: f32,
    pub segments: u32,
    pub cone_base_diameter: f32,
    pub cone_alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub visible: bool,
    pub step_deg: f64,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeofenceSettings {
    pub enabled: bool,
    pub path: String,
    /// Fill colour as sRGB components.
    pub colour: [f32; 3],
    pub surface_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub initial_radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub near: f32,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureFiles {
    pub earth_daymap: String,
    pub earth_normal: String,
    pub skybox: String,
}

impl Default for GlobeSceneConfig {
    fn default() -> Self {
        Self {
            globe_radius: GLOBE_RADIUS,
            earth_segments: EARTH_SEGMENTS,
            earth_alpha: EARTH_ALPHA,
            skybox_size: SKYBOX_SIZE,
            satellite: SatelliteSettings::default(),
            grid: GridSettings::default(),
            geofence: GeofenceSettings::default(),
            camera: CameraSettings::default(),
            textures: TextureFiles::default(),
        }
    }
}

impl Default for SatelliteSettings {
    fn default() -> Self {
        Self {
            orbit_radius: SATELLITE_ORBIT_RADIUS,
            angle_increment: ORBIT_ANGLE_INCREMENT,
            diameter: SATELLITE_DIAMETER,
            segments: SATELLITE_SEGMENTS,
            cone_base_diameter: SENSOR_CONE_BASE_DIAMETER,
            cone_alpha: SENSOR_CONE_ALPHA,
        }
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            step_deg: GRID_STEP_DEG,
            alpha: GRID_ALPHA,
        }
    }
}

impl Default for GeofenceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: GEOFENCE_PATH.to_string(),
            colour: [1.0, 1.0, 0.0],
            surface_offset: GEOFENCE_SURFACE_OFFSET,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            initial_radius: CAMERA_INITIAL_RADIUS,
            min_radius: CAMERA_MIN_RADIUS,
            max_radius: CAMERA_MAX_RADIUS,
            near: CAMERA_NEAR_PLANE,
            yaw: CAMERA_INITIAL_YAW,
            pitch: CAMERA_INITIAL_PITCH,
        }
    }
}

impl Default for TextureFiles {
    fn default() -> Self {
        Self {
            earth_daymap: EARTH_DAYMAP_TEXTURE.to_string(),
            earth_normal: EARTH_NORMAL_TEXTURE.to_string(),
            skybox: SKYBOX_TEXTURE.to_string(),
        }
    }
}

impl SatelliteSettings {
    /// The sensor cone reaches halfway from the satellite to the globe centre.
    pub fn cone_height(&self) -> f32 {
        (self.orbit_radius / 2.0) as f32
    }
}

impl CameraSettings {
    /// Clamp the configured limits into a usable range around the globe.
    pub fn sanitised(&self, globe_radius: f32) -> Self {
        let min_radius = self.min_radius.max(globe_radius * 1.01);
        let max_radius = self.max_radius.max(min_radius);
        Self {
            min_radius,
            max_radius,
            initial_radius: self.initial_radius.clamp(min_radius, max_radius),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: GlobeSceneConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GlobeSceneConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: GlobeSceneConfig = serde_json::from_str(
            r#"{ "satellite": { "orbit_radius": 1.5 }, "grid": { "visible": false } }"#,
        )
        .unwrap();

        assert_eq!(config.satellite.orbit_radius, 1.5);
        assert_eq!(config.satellite.angle_increment, ORBIT_ANGLE_INCREMENT);
        assert!(!config.grid.visible);
        assert_eq!(config.grid.step_deg, GRID_STEP_DEG);
        assert_eq!(config.camera, CameraSettings::default());
    }

    #[test]
    fn cone_spans_half_the_orbit() {
        let satellite = SatelliteSettings::default();
        assert!((satellite.cone_height() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn camera_limits_never_enter_the_globe() {
        let camera = CameraSettings {
            initial_radius: 0.2,
            min_radius: 0.5,
            max_radius: 0.1,
            ..default()
        };
        let fixed = camera.sanitised(1.0);
        assert!(fixed.min_radius > 1.0);
        assert!(fixed.max_radius >= fixed.min_radius);
        assert_eq!(fixed.initial_radius, fixed.min_radius);
    }
}
