use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub config_resolved: bool,
    pub geofence_resolved: bool,
}
