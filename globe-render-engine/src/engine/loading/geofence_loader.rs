use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::geofence::GeofenceCollection;
use crate::engine::assets::scene_config::GlobeSceneConfig;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::geofence::spawn_geofence_overlay;
use crate::engine::scene::globe::Earth;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Resource, Default)]
pub struct GeofenceLoader {
    handle: Option<Handle<GeofenceCollection>>,
}

pub fn request_geofence(
    mut loader: ResMut<GeofenceLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    config: Res<GlobeSceneConfig>,
) {
    if !config.geofence.enabled {
        info!("Geofence overlay disabled");
        loading_progress.geofence_resolved = true;
        return;
    }
    loader.handle = Some(asset_server.load(&config.geofence.path));
}

/// Drape the geofence over the earth once its document resolves. Any failure,
/// from the fetch to the triangulation, leaves the globe without the overlay.
pub fn create_geofence_overlay(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    loader: Res<GeofenceLoader>,
    collections: Res<Assets<GeofenceCollection>>,
    asset_server: Res<AssetServer>,
    config: Res<GlobeSceneConfig>,
    earth: Query<Entity, With<Earth>>,
) {
    if loading_progress.geofence_resolved {
        return;
    }
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    let outcome = if let Some(collection) = collections.get(handle) {
        collection
            .outer_ring()
            .and_then(|ring| {
                spawn_geofence_overlay(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    &config,
                    &ring,
                    earth.single().ok(),
                )
            })
            .map_err(|e| e.to_string())
    } else if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        Err(err.to_string())
    } else {
        return;
    };

    loading_progress.geofence_resolved = true;
    match outcome {
        Ok(vertices) => {
            info!("✓ Geofence overlay created from {} vertices", vertices);
            rpc_interface.send_notification(
                "geofence_status",
                serde_json::json!({ "loaded": true, "vertices": vertices }),
            );
        }
        Err(message) => {
            warn!("Geofence overlay skipped: {}", message);
            rpc_interface.send_notification(
                "geofence_status",
                serde_json::json!({ "loaded": false, "error": message }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::geofence::GeofenceOverlay;
    use bevy_common_assets::json::JsonAssetPlugin;
    use std::time::Duration;

    fn overlay_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .add_plugins(JsonAssetPlugin::<GeofenceCollection>::new(&["geojson"]))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<LoadingProgress>()
            .init_resource::<WebRpcInterface>()
            .insert_resource(GlobeSceneConfig::default())
            .add_systems(Update, create_geofence_overlay);
        app
    }

    fn use_document(app: &mut App, handle: Handle<GeofenceCollection>) {
        app.insert_resource(GeofenceLoader {
            handle: Some(handle),
        });
    }

    fn update_until_resolved(app: &mut App) {
        for _ in 0..300 {
            app.update();
            if app.world().resource::<LoadingProgress>().geofence_resolved {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("geofence never resolved");
    }

    fn overlay_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<GeofenceOverlay>>()
            .iter(app.world())
            .count()
    }

    fn geofence_status(app: &App) -> serde_json::Value {
        app.world()
            .resource::<WebRpcInterface>()
            .pending_notifications()
            .iter()
            .find(|n| n.method == "geofence_status")
            .map(|n| n.params.clone())
            .expect("geofence_status notification")
    }

    #[test]
    fn missing_document_skips_the_overlay() {
        let mut app = overlay_app();
        let handle = app
            .world()
            .resource::<AssetServer>()
            .load("jsons/does_not_exist.geojson");
        use_document(&mut app, handle);

        update_until_resolved(&mut app);

        assert_eq!(overlay_count(&mut app), 0);
        let status = geofence_status(&app);
        assert_eq!(status["loaded"], serde_json::json!(false));
        assert!(status["error"].is_string());
    }

    #[test]
    fn document_without_features_skips_the_overlay() {
        let mut app = overlay_app();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<GeofenceCollection>>()
            .add(GeofenceCollection::default());
        use_document(&mut app, handle);

        update_until_resolved(&mut app);

        assert_eq!(overlay_count(&mut app), 0);
        let status = geofence_status(&app);
        assert_eq!(status["loaded"], serde_json::json!(false));
        assert_eq!(
            status["error"],
            serde_json::json!("boundary document has no features")
        );
    }

    #[test]
    fn square_document_is_draped_on_the_earth() {
        let mut app = overlay_app();
        let earth = app.world_mut().spawn((Earth, Transform::default())).id();
        let square: GeofenceCollection = serde_json::from_str(
            r#"{"features":[{"geometry":{"coordinates":[[[10,20],[10,21],[11,21],[11,20],[10,20]]]}}]}"#,
        )
        .unwrap();
        let handle = app
            .world_mut()
            .resource_mut::<Assets<GeofenceCollection>>()
            .add(square);
        use_document(&mut app, handle);

        update_until_resolved(&mut app);

        let overlay = app
            .world_mut()
            .query_filtered::<Entity, With<GeofenceOverlay>>()
            .single(app.world())
            .unwrap();
        assert_eq!(
            app.world().get::<ChildOf>(overlay).map(|c| c.parent()),
            Some(earth)
        );
        let status = geofence_status(&app);
        assert_eq!(status["loaded"], serde_json::json!(true));
        assert_eq!(status["vertices"], serde_json::json!(4));
    }
}
