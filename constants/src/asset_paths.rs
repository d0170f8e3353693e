/// Runtime overrides for the scene defaults.
pub const SCENE_CONFIG_PATH: &str = "config/globe.scene.json";

/// GeoJSON boundary document providing the geofence ring.
pub const GEOFENCE_PATH: &str = "jsons/geofence.geojson";

pub const EARTH_DAYMAP_TEXTURE: &str = "textures/8k_earth_daymap.jpg";
pub const EARTH_NORMAL_TEXTURE: &str = "textures/8k_earth_normal_map.jpg";
pub const SKYBOX_TEXTURE: &str = "textures/skybox.png";
