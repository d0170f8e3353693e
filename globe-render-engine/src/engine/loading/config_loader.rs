use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::asset_paths::SCENE_CONFIG_PATH;

use crate::engine::assets::scene_config::GlobeSceneConfig;
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::core::app_state::SceneToggles;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct SceneConfigLoader {
    handle: Option<Handle<GlobeSceneConfig>>,
}

// Start the loading process
pub fn start_loading(mut loader: ResMut<SceneConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading scene config from {}", SCENE_CONFIG_PATH);
    loader.handle = Some(asset_server.load(SCENE_CONFIG_PATH));
}

/// Wait for the scene config to load or fail, then publish it with the resources derived from it.
/// A missing or malformed file falls back to the built-in defaults.
pub fn resolve_scene_config(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    loader: Res<SceneConfigLoader>,
    configs: Res<Assets<GlobeSceneConfig>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.config_resolved {
        return;
    }
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    let config = if let Some(config) = configs.get(handle) {
        info!("✓ Scene config loaded");
        config.clone()
    } else if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        warn!("Scene config unavailable ({}), using defaults", err);
        GlobeSceneConfig::default()
    } else {
        return;
    };

    commands.insert_resource(OrbitCamera::from_settings(
        &config.camera,
        config.globe_radius as f32,
    ));
    commands.insert_resource(SceneToggles::from_config(&config));
    commands.insert_resource(config);
    loading_progress.config_resolved = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_common_assets::json::JsonAssetPlugin;
    use std::time::Duration;

    fn config_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .add_plugins(JsonAssetPlugin::<GlobeSceneConfig>::new(&["scene.json"]))
            .init_resource::<LoadingProgress>()
            .add_systems(Update, resolve_scene_config);
        app
    }

    fn update_until_resolved(app: &mut App) {
        for _ in 0..300 {
            app.update();
            if app.world().resource::<LoadingProgress>().config_resolved {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("scene config never resolved");
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let mut app = config_app();
        let handle = app
            .world()
            .resource::<AssetServer>()
            .load("config/does_not_exist.scene.json");
        app.insert_resource(SceneConfigLoader {
            handle: Some(handle),
        });

        update_until_resolved(&mut app);

        let world = app.world();
        assert_eq!(
            world.resource::<GlobeSceneConfig>(),
            &GlobeSceneConfig::default()
        );
        assert_eq!(
            *world.resource::<SceneToggles>(),
            SceneToggles::from_config(&GlobeSceneConfig::default())
        );
        assert!(world.get_resource::<OrbitCamera>().is_some());
    }

    #[test]
    fn nothing_resolves_before_loading_starts() {
        let mut app = config_app();
        app.init_resource::<SceneConfigLoader>();
        app.update();

        assert!(!app.world().resource::<LoadingProgress>().config_resolved);
        assert!(app.world().get_resource::<GlobeSceneConfig>().is_none());
    }
}
