use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::assets::geofence::GeofenceCollection;
use crate::engine::assets::scene_config::GlobeSceneConfig;
use crate::engine::camera::orbit_camera::{OrbitCamera, camera_controller, spawn_orbit_camera};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{SceneConfigLoader, resolve_scene_config, start_loading};
use crate::engine::loading::geofence_loader::{
    GeofenceLoader, create_geofence_overlay, request_geofence,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::globe::{spawn_earth, spawn_lighting, spawn_skybox};
use crate::engine::scene::grid::spawn_globe_grid;
use crate::engine::scene::satellite::{spawn_satellite, update_satellite_orbit};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::scene_commands::apply_scene_commands;
use crate::engine::systems::shortcuts::handle_scene_shortcuts;
// Web RPC
use crate::rpc::web_rpc::{WebRpcInterface, WebRpcPlugin};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{create_fps_overlay, fps_text_update_system};

const LOG_FILTER: &str = "wgpu=error,naga=warn,globe_render_engine=info";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Runtime scene overrides and the geofence document, both JSON under the asset root.
        .add_plugins(JsonAssetPlugin::<GlobeSceneConfig>::new(&["scene.json"]))
        .add_plugins(JsonAssetPlugin::<GeofenceCollection>::new(&["geojson"]))
        .add_plugins(WebRpcPlugin);

    app.init_resource::<LoadingProgress>()
        .init_resource::<SceneConfigLoader>()
        .init_resource::<GeofenceLoader>();

    app.add_systems(Startup, start_loading)
        .add_systems(
            Update,
            (resolve_scene_config, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            OnEnter(AppState::Running),
            (spawn_scene, request_geofence).chain(),
        );

    let runtime_systems = (
        handle_scene_shortcuts,
        apply_scene_commands,
        update_satellite_orbit,
        camera_controller,
        create_geofence_overlay,
        fps_notification_system,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

/// Build the globe scene from the resolved config.
fn spawn_scene(
    mut commands: Commands,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<GlobeSceneConfig>,
    orbit_camera: Res<OrbitCamera>,
) {
    spawn_lighting(&mut commands);
    spawn_skybox(
        &mut commands,
        &asset_server,
        &mut meshes,
        &mut materials,
        &config,
    );
    spawn_earth(
        &mut commands,
        &asset_server,
        &mut meshes,
        &mut materials,
        &config,
    );
    spawn_orbit_camera(&mut commands, &orbit_camera, config.camera.near);
    spawn_satellite(&mut commands, &mut meshes, &mut materials, &config);
    spawn_globe_grid(&mut commands, &mut meshes, &mut materials, &config);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_fps_overlay(&mut commands);
    }

    info!(
        "✓ Globe scene spawned (radius {:.2}, {} segments)",
        config.globe_radius, config.earth_segments
    );
    rpc_interface.send_notification(
        "scene_ready",
        serde_json::json!({
            "globe_radius": config.globe_radius,
            "grid_visible": config.grid.visible,
            "geofence_enabled": config.geofence.enabled
        }),
    );
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
