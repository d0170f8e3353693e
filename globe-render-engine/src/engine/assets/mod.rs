//! Asset types loaded from JSON at startup.
//!
//! Both are registered through `JsonAssetPlugin` and polled by the loading systems.

/// GeoJSON boundary document and outer-ring extraction for the geofence overlay.
pub mod geofence;

/// Scene configuration with compiled defaults and optional JSON overrides.
pub mod scene_config;
