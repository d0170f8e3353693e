/// Latitude/longitude grid draped on the globe
use bevy::asset::RenderAssetUsages;
use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::coordinate_system::project;

use crate::engine::assets::scene_config::GlobeSceneConfig;

#[derive(Component)]
pub struct GlobeGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLineKind {
    /// Constant latitude, sweeping longitude from -180 to 180.
    Latitude,
    /// Constant longitude, sweeping latitude from -90 to 90 and closed back to its start.
    Longitude,
}

#[derive(Debug, Clone)]
pub struct GridLine {
    pub kind: GridLineKind,
    pub points: Vec<DVec3>,
}

/// Samples of the closed interval `[start, end]` at a fixed step, starting at `start`.
fn sweep(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || step <= 0.0 || end < start {
        return Vec::new();
    }
    // Tolerance keeps `end` itself when the step divides the span exactly.
    let count = ((end - start) / step + 1e-9).floor() as usize;
    (0..=count).map(|i| start + i as f64 * step).collect()
}

fn project_dvec(latitude: f64, longitude: f64, radius: f64) -> DVec3 {
    let (x, y, z) = project(latitude, longitude, radius);
    DVec3::new(x, y, z)
}

/// One open line per sampled latitude.
pub fn latitude_lines(step_deg: f64, radius: f64) -> Vec<GridLine> {
    let longitudes = sweep(-180.0, 180.0, step_deg);
    sweep(-90.0, 90.0, step_deg)
        .into_iter()
        .map(|lat| GridLine {
            kind: GridLineKind::Latitude,
            points: longitudes
                .iter()
                .map(|&lon| project_dvec(lat, lon, radius))
                .collect(),
        })
        .collect()
}

/// One closed loop per sampled longitude: the first point is appended again at the end.
pub fn longitude_lines(step_deg: f64, radius: f64) -> Vec<GridLine> {
    let latitudes = sweep(-90.0, 90.0, step_deg);
    sweep(-180.0, 180.0, step_deg)
        .into_iter()
        .map(|lon| {
            let mut points: Vec<DVec3> = latitudes
                .iter()
                .map(|&lat| project_dvec(lat, lon, radius))
                .collect();
            if let Some(&first) = points.first() {
                points.push(first);
            }
            GridLine {
                kind: GridLineKind::Longitude,
                points,
            }
        })
        .collect()
}

/// Merge every polyline into a single line-list mesh so the grid is one draw call.
pub fn create_grid_mesh(lines: &[GridLine]) -> Mesh {
    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for line in lines {
        let base = vertices.len() as u32;
        vertices.extend(line.points.iter().map(|p| p.as_vec3().to_array()));
        for i in 1..line.points.len() as u32 {
            indices.extend_from_slice(&[base + i - 1, base + i]);
        }
    }

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

pub fn spawn_globe_grid(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &GlobeSceneConfig,
) {
    let mut lines = latitude_lines(config.grid.step_deg, config.globe_radius);
    lines.extend(longitude_lines(config.grid.step_deg, config.globe_radius));

    let segments: usize = lines.iter().map(|l| l.points.len().saturating_sub(1)).sum();
    info!(
        "Grid: {} lines, {} segments at {:.2} deg spacing",
        lines.len(),
        segments,
        config.grid.step_deg
    );

    let grid_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, config.grid.alpha),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let visibility = if config.grid.visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };

    commands.spawn((
        Mesh3d(meshes.add(create_grid_mesh(&lines))),
        MeshMaterial3d(grid_material),
        Transform::IDENTITY,
        visibility,
        GlobeGrid,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_lattice_dimensions() {
        let lat = latitude_lines(1.0, 1.0);
        let lon = longitude_lines(1.0, 1.0);
        assert_eq!(lat.len(), 181);
        assert_eq!(lon.len(), 361);
        assert!(lat.iter().all(|l| l.points.len() == 361));
        // 181 latitude samples plus the closing point.
        assert!(lon.iter().all(|l| l.points.len() == 182));
    }

    #[test]
    fn longitude_lines_are_closed() {
        for line in longitude_lines(5.0, 1.0) {
            assert_eq!(line.kind, GridLineKind::Longitude);
            assert_eq!(line.points.first(), line.points.last());
        }
    }

    #[test]
    fn latitude_lines_stay_open_but_meet_at_the_antimeridian() {
        for line in latitude_lines(10.0, 1.0) {
            let first = line.points[0];
            let last = *line.points.last().unwrap();
            assert_eq!(line.points.len(), 37);
            // -180 and +180 coincide geometrically; no extra point is appended.
            assert!(first.distance(last) < 1e-9);
        }
    }

    #[test]
    fn grid_points_sit_on_the_sphere() {
        for line in latitude_lines(15.0, 2.5)
            .iter()
            .chain(longitude_lines(15.0, 2.5).iter())
        {
            for p in &line.points {
                assert!((p.length() - 2.5).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn uneven_step_stops_before_the_end() {
        let samples = sweep(-90.0, 90.0, 40.0);
        assert_eq!(samples, vec![-90.0, -50.0, -10.0, 30.0, 70.0]);
    }

    #[test]
    fn invalid_step_yields_no_lines() {
        assert!(latitude_lines(0.0, 1.0).is_empty());
        assert!(longitude_lines(-1.0, 1.0).is_empty());
        assert!(latitude_lines(f64::NAN, 1.0).is_empty());
    }

    #[test]
    fn mesh_holds_one_segment_per_point_pair() {
        let lines = longitude_lines(30.0, 1.0);
        let mesh = create_grid_mesh(&lines);
        let expected: usize = lines.iter().map(|l| (l.points.len() - 1) * 2).sum();
        assert_eq!(mesh.indices().map(|i| i.len()), Some(expected));
    }
}
