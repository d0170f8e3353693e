use bevy::prelude::*;

use crate::engine::assets::scene_config::GlobeSceneConfig;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

/// Runtime switches that the keyboard and the RPC bridge can flip.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneToggles {
    pub grid_visible: bool,
    pub orbit_paused: bool,
}

impl Default for SceneToggles {
    fn default() -> Self {
        Self {
            grid_visible: true,
            orbit_paused: false,
        }
    }
}

impl SceneToggles {
    pub fn from_config(config: &GlobeSceneConfig) -> Self {
        Self {
            grid_visible: config.grid.visible,
            orbit_paused: false,
        }
    }

    pub fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SetGridVisible(visible) => self.grid_visible = visible,
            SceneCommand::SetOrbitPaused(paused) => self.orbit_paused = paused,
        }
    }
}

/// Scene change requested from a shortcut or an RPC call.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    SetGridVisible(bool),
    SetOrbitPaused(bool),
}

pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.config_resolved {
        info!("→ Scene config resolved, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_follow_commands() {
        let mut toggles = SceneToggles::default();
        toggles.apply(SceneCommand::SetGridVisible(false));
        toggles.apply(SceneCommand::SetOrbitPaused(true));
        assert_eq!(
            toggles,
            SceneToggles {
                grid_visible: false,
                orbit_paused: true
            }
        );
    }

    #[test]
    fn toggles_start_from_config() {
        let mut config = GlobeSceneConfig::default();
        config.grid.visible = false;
        let toggles = SceneToggles::from_config(&config);
        assert!(!toggles.grid_visible);
        assert!(!toggles.orbit_paused);
    }
}
