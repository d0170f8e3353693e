//! JSON-RPC 2.0 bridge between the globe and the page embedding it.
//!
//! On WASM builds messages arrive through `window.postMessage` and replies go
//! back to the parent window. Native builds have no message source, so the
//! bridge only drains its outgoing queue.
//!
//! ## Methods
//!
//! - `get_fps` → `{ fps }`
//! - `get_satellite_state` → `{ angle, position: [x, y, z], paused }`, as drawn this frame
//! - `set_grid_visible { visible }` → `{ success, grid_visible }`
//! - `set_orbit_paused { paused }` → `{ success, paused }`
//!
//! The two setters are refused until the scene config has resolved.
//!
//! ## Notifications
//!
//! - `fps_update { fps }` every 0.5 s
//! - `scene_ready { globe_radius, grid_visible, geofence_enabled }`
//! - `geofence_status { loaded, vertices | error }`
//!
//! ## Errors
//!
//! - `-32601`: unknown method
//! - `-32602`: missing or mistyped params
//! - `-32603`: scene not ready, or satellite not spawned yet

/// Message types, the WASM listener and request dispatch.
pub mod web_rpc;
