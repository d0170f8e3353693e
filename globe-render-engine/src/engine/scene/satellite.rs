use bevy::math::DVec3;
use bevy::prelude::*;

use crate::engine::assets::scene_config::GlobeSceneConfig;
use crate::engine::core::app_state::SceneToggles;

/// Angular position of the satellite on its circular orbit.
/// The angle grows without bound; only its sine and cosine are ever used.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitState {
    pub angle: f64,
}

impl OrbitState {
    pub fn advance(self, increment: f64) -> Self {
        Self {
            angle: self.angle + increment,
        }
    }

    /// Position on the horizontal orbit of the given radius around the origin.
    pub fn position(&self, orbit_radius: f64) -> DVec3 {
        DVec3::new(
            self.angle.cos() * orbit_radius,
            0.0,
            self.angle.sin() * orbit_radius,
        )
    }
}

#[derive(Component, Debug, Clone)]
pub struct Satellite {
    /// State the next frame will be placed from.
    pub orbit: OrbitState,
    /// State the current transform was placed from.
    pub placed: OrbitState,
    pub orbit_radius: f64,
    pub angle_increment: f64,
}

impl Satellite {
    pub fn new(orbit_radius: f64, angle_increment: f64) -> Self {
        Self {
            orbit: OrbitState::default(),
            placed: OrbitState::default(),
            orbit_radius,
            angle_increment,
        }
    }
}

/// Translucent cone from the satellite towards the globe, marking the sensor footprint.
#[derive(Component)]
pub struct SensorCone;

pub fn spawn_satellite(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &GlobeSceneConfig,
) {
    let settings = &config.satellite;
    let orbit = OrbitState::default();

    let body_mesh = Sphere::new(settings.diameter * 0.5)
        .mesh()
        .uv(settings.segments.max(3) * 2, settings.segments.max(2));

    let cone_height = settings.cone_height();
    let cone_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, settings.cone_alpha),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let start = orbit.position(settings.orbit_radius).as_vec3();

    commands
        .spawn((
            Mesh3d(meshes.add(body_mesh)),
            MeshMaterial3d(materials.add(StandardMaterial::default())),
            Transform::from_translation(start).looking_at(Vec3::ZERO, Vec3::Y),
            Satellite::new(settings.orbit_radius, settings.angle_increment),
        ))
        .with_children(|parent| {
            // Cone apex sits on the satellite and the base opens along -Z, which
            // `look_at` keeps pointed at the globe centre.
            parent.spawn((
                Mesh3d(meshes.add(Cone {
                    radius: settings.cone_base_diameter * 0.5,
                    height: cone_height,
                })),
                MeshMaterial3d(cone_material),
                Transform::from_xyz(0.0, 0.0, -cone_height * 0.5)
                    .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                SensorCone,
            ));
        });

    info!(
        "Satellite spawned on a {:.2} orbit, {:.4} rad/frame",
        settings.orbit_radius, settings.angle_increment
    );
}

/// Place the satellite from its current angle, aim it at the globe, then advance the angle.
pub fn update_satellite_orbit(
    toggles: Res<SceneToggles>,
    mut satellites: Query<(&mut Satellite, &mut Transform)>,
) {
    if toggles.orbit_paused {
        return;
    }

    for (mut satellite, mut transform) in &mut satellites {
        satellite.placed = satellite.orbit;
        transform.translation = satellite.placed.position(satellite.orbit_radius).as_vec3();
        transform.look_at(Vec3::ZERO, Vec3::Y);
        satellite.orbit = satellite.orbit.advance(satellite.angle_increment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn advance_adds_the_increment() {
        let state = OrbitState::default().advance(0.005).advance(0.005);
        assert!((state.angle - 0.01).abs() < 1e-15);
    }

    #[test]
    fn position_after_n_ticks_matches_closed_form() {
        let k = 0.005;
        let radius = 2.0;
        let mut state = OrbitState::default();
        for n in 1..=5000u32 {
            state = state.advance(k);
            let expected_angle = n as f64 * k;
            let expected = DVec3::new(
                expected_angle.cos() * radius,
                0.0,
                expected_angle.sin() * radius,
            );
            assert!(state.position(radius).distance(expected) < 1e-9, "tick {n}");
        }
        // Beyond a full revolution; no reduction modulo 2π is applied.
        assert!(state.angle > std::f64::consts::TAU);
    }

    #[test]
    fn orbit_stays_in_the_horizontal_plane_at_fixed_radius() {
        for i in 0..100 {
            let p = OrbitState { angle: i as f64 * 0.37 }.position(1.5);
            assert_eq!(p.y, 0.0);
            assert!((p.length() - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn system_moves_satellite_and_faces_the_origin() {
        let mut world = World::new();
        world.insert_resource(SceneToggles::default());
        let entity = world
            .spawn((
                Satellite::new(2.0, 0.25),
                Transform::default(),
            ))
            .id();

        world.run_system_once(update_satellite_orbit).unwrap();
        world.run_system_once(update_satellite_orbit).unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        let expected = OrbitState { angle: 0.25 }.position(2.0).as_vec3();
        assert!(transform.translation.distance(expected) < 1e-5);
        let facing = transform.forward().as_vec3();
        assert!(facing.dot(-expected.normalize()) > 0.999);

        let satellite = world.get::<Satellite>(entity).unwrap();
        assert!((satellite.orbit.angle - 0.5).abs() < 1e-12);
        assert!((satellite.placed.angle - 0.25).abs() < 1e-12);
    }

    #[test]
    fn paused_orbit_does_not_move() {
        let mut world = World::new();
        world.insert_resource(SceneToggles {
            orbit_paused: true,
            ..default()
        });
        let entity = world
            .spawn((
                Satellite::new(2.0, 0.25),
                Transform::default(),
            ))
            .id();

        world.run_system_once(update_satellite_orbit).unwrap();

        assert_eq!(world.get::<Satellite>(entity).unwrap().orbit.angle, 0.0);
        assert_eq!(world.get::<Transform>(entity).unwrap().translation, Vec3::ZERO);
    }
}
