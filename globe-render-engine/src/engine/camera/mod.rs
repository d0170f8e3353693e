//! Orbit camera around the globe.
//!
//! Arc-rotate controls with smoothed motion and radius limits from the scene config.

/// Orbit camera resource and controller system.
pub mod orbit_camera;
