use bevy::prelude::*;

use crate::engine::core::app_state::{SceneCommand, SceneToggles};

/// Keyboard shortcuts (native builds only): `G` toggles the grid, `Space` pauses the orbit.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_scene_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    toggles: Res<SceneToggles>,
    mut scene_commands: EventWriter<SceneCommand>,
) {
    if keyboard.just_pressed(KeyCode::KeyG) {
        scene_commands.write(SceneCommand::SetGridVisible(!toggles.grid_visible));
    }

    if keyboard.just_pressed(KeyCode::Space) {
        scene_commands.write(SceneCommand::SetOrbitPaused(!toggles.orbit_paused));
    }
}

/// Placeholder system for WASM builds where the page drives the scene over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_scene_shortcuts() {}
