//! Runtime systems for diagnostics and user control.
//!
//! FPS reporting, keyboard shortcuts and the scene command handler shared by
//! shortcuts and the RPC bridge.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the embedding page via RPC and updates the native overlay.
pub mod fps_tracking;

/// Applies grid and orbit commands to the scene.
pub mod scene_commands;

/// Native keyboard shortcuts.
pub mod shortcuts;
