use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use std::f32::consts::PI;

use crate::engine::assets::scene_config::CameraSettings;

/// Keeps the camera off the exact poles where the up vector degenerates.
const PITCH_LIMIT: f32 = 0.01;
const ROTATE_SENSITIVITY: f32 = 0.005;
const PAN_SENSITIVITY: f32 = 0.0015;
const ZOOM_SENSITIVITY: f32 = 0.1;

/// Arc-rotate camera state around a focus point.
///
/// `yaw` is the azimuth around +Y and `pitch` the polar angle from +Y, so
/// `yaw = pitch = π/2` places the eye on +Z looking back at the focus.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub focus_point: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub smoothing: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default(), 1.0)
    }
}

impl OrbitCamera {
    pub fn from_settings(settings: &CameraSettings, globe_radius: f32) -> Self {
        let settings = settings.sanitised(globe_radius);
        Self {
            focus_point: Vec3::ZERO,
            radius: settings.initial_radius,
            yaw: settings.yaw,
            pitch: settings.pitch.clamp(PITCH_LIMIT, PI - PITCH_LIMIT),
            min_radius: settings.min_radius,
            max_radius: settings.max_radius,
            smoothing: 12.0,
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.focus_point + self.radius * Vec3::new(cos_yaw * sin_pitch, cos_pitch, sin_yaw * sin_pitch)
    }

    pub fn target_transform(&self) -> Transform {
        Transform::from_translation(self.eye_position()).looking_at(self.focus_point, Vec3::Y)
    }

    /// Orbit by a mouse drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw += delta.x * ROTATE_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * ROTATE_SENSITIVITY).clamp(PITCH_LIMIT, PI - PITCH_LIMIT);
    }

    /// Zoom by scroll lines; positive moves closer. Scales with distance so it feels even.
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - lines * ZOOM_SENSITIVITY).max(0.1);
        self.radius = (self.radius * factor).clamp(self.min_radius, self.max_radius);
    }

    /// Slide the focus point in the view plane by a drag delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let transform = self.target_transform();
        let right = transform.right().as_vec3();
        let up = transform.up().as_vec3();
        let scale = self.radius * PAN_SENSITIVITY;
        self.focus_point += (-right * delta.x + up * delta.y) * scale;
    }
}

pub fn spawn_orbit_camera(commands: &mut Commands, orbit: &OrbitCamera, near: f32) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            near,
            ..default()
        }),
        orbit.target_transform(),
    ));
}

/// Left drag orbits, right drag pans, wheel zooms; the camera eases towards the target.
pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(mouse_delta);
        } else if mouse_button.pressed(MouseButton::Right) {
            orbit.pan(mouse_delta);
        }
    }

    let scroll_lines: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();
    if scroll_lines.abs() > f32::EPSILON {
        orbit.zoom(scroll_lines);
    }

    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let target = orbit.target_transform();
    let lerp_speed = (orbit.smoothing * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target.translation, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target.rotation, lerp_speed);
}
