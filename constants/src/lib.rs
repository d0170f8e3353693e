//! Shared constants and geographic helpers for the globe renderer.

/// Asset locations relative to the asset root.
pub mod asset_paths;

/// Geographic to Cartesian projection on the globe sphere.
pub mod coordinate_system;

/// Default scene dimensions, orbit parameters and camera limits.
pub mod render_settings;
