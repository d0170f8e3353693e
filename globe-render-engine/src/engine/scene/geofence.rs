use bevy::asset::RenderAssetUsages;
use bevy::math::{DVec2, DVec3};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::coordinate_system::GeoPoint;

use crate::engine::assets::geofence::{GeofenceError, open_ring};
use crate::engine::assets::scene_config::GlobeSceneConfig;

#[derive(Component)]
pub struct GeofenceOverlay;

const COLLINEAR_EPSILON: f64 = 1e-12;

/// Project every ring vertex onto the sphere, in document order.
pub fn project_ring(ring: &[GeoPoint], radius: f64) -> Vec<DVec3> {
    ring.iter()
        .map(|point| {
            let (x, y, z) = point.project(radius);
            DVec3::new(x, y, z)
        })
        .collect()
}

/// Planar (longitude, latitude) coordinates with longitude unwrapped so a ring
/// crossing the antimeridian stays contiguous.
fn unwrapped_plane_coordinates(ring: &[GeoPoint]) -> Vec<DVec2> {
    let mut coords = Vec::with_capacity(ring.len());
    let mut previous: Option<f64> = None;
    for point in ring {
        let mut longitude = point.longitude;
        if let Some(prev) = previous {
            while longitude - prev > 180.0 {
                longitude -= 360.0;
            }
            while longitude - prev < -180.0 {
                longitude += 360.0;
            }
        }
        previous = Some(longitude);
        coords.push(DVec2::new(longitude, point.latitude));
    }
    coords
}

fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

fn turn(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - b)
}

/// Inclusive point-in-triangle test for a counter-clockwise triangle.
fn inside_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    (b - a).perp_dot(p - a) >= 0.0 && (c - b).perp_dot(p - b) >= 0.0 && (a - c).perp_dot(p - c) >= 0.0
}

/// Ear-clipping triangulation of a simple polygon given as an open ring.
/// Triangles are returned as index triples into `points`, counter-clockwise.
pub fn triangulate_ring(points: &[DVec2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    if signed_area(points) < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    while remaining.len() > 3 {
        let m = remaining.len();
        let mut ear = None;
        let mut collinear = None;

        for k in 0..m {
            let prev = remaining[(k + m - 1) % m];
            let current = remaining[k];
            let next = remaining[(k + 1) % m];
            let (a, b, c) = (points[prev], points[current], points[next]);

            let cross = turn(a, b, c);
            if cross.abs() <= COLLINEAR_EPSILON {
                collinear.get_or_insert(k);
                continue;
            }
            if cross < 0.0 {
                continue;
            }

            let blocked = remaining.iter().any(|&other| {
                other != prev
                    && other != current
                    && other != next
                    && points[other] != a
                    && points[other] != b
                    && points[other] != c
                    && inside_triangle(points[other], a, b, c)
            });
            if !blocked {
                ear = Some(k);
                break;
            }
        }

        match (ear, collinear) {
            (Some(k), _) => {
                let prev = remaining[(k + m - 1) % m];
                let next = remaining[(k + 1) % m];
                triangles.push([prev, remaining[k], next]);
                remaining.remove(k);
            }
            // Degenerate vertex: drop it without emitting a sliver.
            (None, Some(k)) => {
                remaining.remove(k);
            }
            (None, None) => {
                warn!(
                    "Geofence ring is not simple; {} vertices left untriangulated",
                    remaining.len()
                );
                return triangles;
            }
        }
    }

    if turn(points[remaining[0]], points[remaining[1]], points[remaining[2]]).abs()
        > COLLINEAR_EPSILON
    {
        triangles.push([remaining[0], remaining[1], remaining[2]]);
    }
    triangles
}

/// Fill mesh for the geofence ring, lifted slightly above the surface.
pub fn create_geofence_mesh(ring: &[GeoPoint], radius: f64) -> Result<Mesh, GeofenceError> {
    let open = open_ring(ring);
    let triangles = triangulate_ring(&unwrapped_plane_coordinates(open));
    if triangles.is_empty() {
        return Err(GeofenceError::Degenerate {
            vertices: open.len(),
        });
    }

    let projected = project_ring(open, radius);
    let positions: Vec<[f32; 3]> = projected.iter().map(|p| p.as_vec3().to_array()).collect();
    let normals: Vec<[f32; 3]> = projected
        .iter()
        .map(|p| p.normalize_or_zero().as_vec3().to_array())
        .collect();

    // Counter-clockwise in (lon, lat) faces into the globe with this projection,
    // so each triangle is flipped to face outwards.
    let indices: Vec<u32> = triangles
        .iter()
        .flat_map(|[a, b, c]| [*a as u32, *c as u32, *b as u32])
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_indices(Indices::U32(indices));
    Ok(mesh)
}

/// Spawn the filled geofence as a child of the earth. Returns the vertex count on success.
pub fn spawn_geofence_overlay(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &GlobeSceneConfig,
    ring: &[GeoPoint],
    parent: Option<Entity>,
) -> Result<usize, GeofenceError> {
    let radius = config.globe_radius * (1.0 + config.geofence.surface_offset);
    let mesh = create_geofence_mesh(ring, radius)?;
    let [r, g, b] = config.geofence.colour;

    let overlay = commands
        .spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(r, g, b),
                cull_mode: None,
                double_sided: true,
                ..default()
            })),
            Transform::IDENTITY,
            GeofenceOverlay,
        ))
        .id();

    if let Some(parent) = parent {
        commands.entity(parent).add_child(overlay);
    }

    Ok(open_ring(ring).len())
}
