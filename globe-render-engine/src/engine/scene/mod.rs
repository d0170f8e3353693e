//! Scene content around the globe.
//!
//! Every overlay is placed through the shared latitude/longitude projection so the
//! earth texture, grid and geofence agree on where a coordinate lies.

/// Geofence ring projection, ear-clipping triangulation and fill overlay.
///
/// Consumes the outer ring of the boundary document and drapes it onto the sphere.
pub mod geofence;

/// Earth sphere, skybox and lighting.
pub mod globe;

/// Latitude/longitude line sampling and the merged grid mesh.
pub mod grid;

/// Orbit state, satellite with its sensor cone, and the per-frame orbit update.
pub mod satellite;
