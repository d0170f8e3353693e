use bevy::asset::RenderAssetUsages;
use bevy::image::ImageLoaderSettings;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::coordinate_system::project;
use constants::render_settings::LIGHT_DIRECTION;

use crate::engine::assets::scene_config::GlobeSceneConfig;

#[derive(Component)]
pub struct Earth;

#[derive(Component)]
pub struct SkyBox;

/// Latitude/longitude sphere whose vertices come from the same projection as every
/// overlay, so the equirectangular earth texture lines up with the grid and geofence.
/// `u` follows longitude from -180 to 180, `v` runs from the north pole down.
pub fn create_earth_mesh(radius: f64, segments: u32) -> Mesh {
    let stacks = segments.max(2);
    let sectors = stacks * 2;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(positions.capacity());
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(positions.capacity());

    for i in 0..=stacks {
        let v = i as f64 / stacks as f64;
        let latitude = 90.0 - v * 180.0;
        for j in 0..=sectors {
            let u = j as f64 / sectors as f64;
            let longitude = -180.0 + u * 360.0;
            let (x, y, z) = project(latitude, longitude, radius);
            positions.push([x as f32, y as f32, z as f32]);
            let (nx, ny, nz) = project(latitude, longitude, 1.0);
            normals.push([nx as f32, ny as f32, nz as f32]);
            uvs.push([u as f32, v as f32]);
        }
    }

    let row = sectors + 1;
    let mut indices: Vec<u32> = Vec::with_capacity((stacks * sectors * 6) as usize);
    for i in 0..stacks {
        for j in 0..sectors {
            let a = i * row + j;
            let b = (i + 1) * row + j;
            let c = a + 1;
            let d = b + 1;
            // Counter-clockwise seen from outside the sphere.
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

pub fn spawn_earth(
    commands: &mut Commands,
    asset_server: &AssetServer,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &GlobeSceneConfig,
) -> Entity {
    let mesh = create_earth_mesh(config.globe_radius, config.earth_segments);
    // Normal mapping needs tangents; without them the daymap still renders.
    let mesh = match mesh.clone().with_generated_tangents() {
        Ok(with_tangents) => with_tangents,
        Err(e) => {
            warn!("Earth tangents unavailable, normal map disabled: {}", e);
            mesh
        }
    };
    let has_tangents = mesh.attribute(Mesh::ATTRIBUTE_TANGENT).is_some();

    let daymap: Handle<Image> = asset_server.load(&config.textures.earth_daymap);
    let normal_map = has_tangents.then(|| {
        asset_server.load_with_settings(
            &config.textures.earth_normal,
            |settings: &mut ImageLoaderSettings| settings.is_srgb = false,
        )
    });

    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, config.earth_alpha),
        base_color_texture: Some(daymap),
        normal_map_texture: normal_map,
        metallic: 0.0,
        perceptual_roughness: 1.0,
        alpha_mode: if config.earth_alpha < 1.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    });

    commands
        .spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material),
            Transform::IDENTITY,
            Visibility::Visible,
            Earth,
        ))
        .id()
}

/// Large unlit box around the scene textured from the inside.
pub fn spawn_skybox(
    commands: &mut Commands,
    asset_server: &AssetServer,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &GlobeSceneConfig,
) {
    let size = config.skybox_size;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size, size, size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(&config.textures.skybox)),
            unlit: true,
            cull_mode: None,
            ..default()
        })),
        Transform::IDENTITY,
        SkyBox,
    ));
}

/// Key light from the upper left plus a dim white fill so the night side is not pitch black.
pub fn spawn_lighting(commands: &mut Commands) {
    let [x, y, z] = LIGHT_DIRECTION;
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(x, y, z).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
        ..default()
    });
    commands.insert_resource(ClearColor(Color::BLACK));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => {
                values.iter().map(|p| Vec3::from_array(*p)).collect()
            }
            _ => panic!("missing positions"),
        }
    }

    #[test]
    fn earth_vertices_lie_on_the_globe() {
        let mesh = create_earth_mesh(1.0, 30);
        let positions = positions(&mesh);
        assert_eq!(positions.len(), 31 * 61);
        assert!(positions.iter().all(|p| (p.length() - 1.0).abs() < 1e-5));
    }

    #[test]
    fn earth_faces_point_outwards() {
        let mesh = create_earth_mesh(1.0, 8);
        let positions = positions(&mesh);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("missing indices");
        };
        for tri in indices.chunks(3) {
            let (a, b, c) = (
                positions[tri[0] as usize],
                positions[tri[1] as usize],
                positions[tri[2] as usize],
            );
            let normal = (b - a).cross(c - a);
            // Triangles touching the poles can be degenerate.
            if normal.length() > 1e-6 {
                let centroid = (a + b + c) / 3.0;
                assert!(normal.dot(centroid) > 0.0);
            }
        }
    }
}
