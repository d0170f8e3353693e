//! Asset loading for the scene config and the geofence document.
//!
//! Both loads are fire-and-poll: a system starts them and another resolves them
//! once bevy reports the asset loaded or failed.

/// Scene config loading with fallback to built-in defaults.
pub mod config_loader;

/// Geofence request and overlay creation once the document resolves.
pub mod geofence_loader;

/// Loading progress flags driving state transitions.
pub mod progress;
