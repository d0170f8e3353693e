use bevy::prelude::*;
use constants::coordinate_system::GeoPoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// GeoJSON feature collection carrying the geofence boundary.
/// Only the fields the overlay consumes are modelled; everything else is ignored.
#[derive(Asset, TypePath, Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeofenceCollection {
    #[serde(default)]
    pub features: Vec<GeofenceFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeofenceFeature {
    #[serde(default)]
    pub geometry: Option<GeofenceGeometry>,
}

/// Polygon geometry: a list of linear rings, each a list of `[lon, lat, ...]` positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeofenceGeometry {
    #[serde(default)]
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Error, PartialEq)]
pub enum GeofenceError {
    #[error("boundary document has no features")]
    NoFeatures,
    #[error("first feature has no polygon ring")]
    NoRing,
    #[error("position {index} is not a [longitude, latitude] pair of finite numbers")]
    MalformedPosition { index: usize },
    #[error("ring needs at least 3 distinct vertices, found {found}")]
    TooFewVertices { found: usize },
    #[error("ring of {vertices} vertices encloses no area")]
    Degenerate { vertices: usize },
}

impl GeofenceCollection {
    /// Outer ring of the first feature's polygon, in document order.
    /// A closing position that repeats the first is kept.
    pub fn outer_ring(&self) -> Result<Vec<GeoPoint>, GeofenceError> {
        let feature = self.features.first().ok_or(GeofenceError::NoFeatures)?;
        let ring = feature
            .geometry
            .as_ref()
            .and_then(|geometry| geometry.coordinates.first())
            .ok_or(GeofenceError::NoRing)?;

        let points = ring
            .iter()
            .enumerate()
            .map(|(index, position)| match position.as_slice() {
                [lon, lat, ..] if lon.is_finite() && lat.is_finite() => {
                    Ok(GeoPoint::from_lon_lat([*lon, *lat]))
                }
                _ => Err(GeofenceError::MalformedPosition { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let distinct = open_ring(&points).len();
        if distinct < 3 {
            return Err(GeofenceError::TooFewVertices { found: distinct });
        }

        Ok(points)
    }
}

/// Drop the closing vertex of a ring when it repeats the first one.
pub fn open_ring(points: &[GeoPoint]) -> &[GeoPoint] {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && first == last => {
            &points[..points.len() - 1]
        }
        _ => points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "name": "test" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[10, 20], [10, 21], [11, 21], [11, 20], [10, 20]]]
            }
        }]
    }"#;

    fn parse(source: &str) -> GeofenceCollection {
        serde_json::from_str(source).unwrap()
    }

    #[test]
    fn square_ring_keeps_all_five_positions() {
        let ring = parse(SQUARE).outer_ring().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], GeoPoint::new(20.0, 10.0));
        assert_eq!(ring.first(), ring.last());
        assert_eq!(ring[0].project(1.0), ring[4].project(1.0));
        assert_eq!(open_ring(&ring).len(), 4);
    }

    #[test]
    fn altitude_member_is_ignored() {
        let doc = r#"{"features":[{"geometry":{"coordinates":[[[1,2,300],[3,4,0],[5,6,0]]]}}]}"#;
        let ring = parse(doc).outer_ring().unwrap();
        assert_eq!(ring[0], GeoPoint::new(2.0, 1.0));
    }

    #[test]
    fn missing_structure_is_reported() {
        assert_eq!(parse("{}").outer_ring(), Err(GeofenceError::NoFeatures));
        assert_eq!(
            parse(r#"{"features":[{}]}"#).outer_ring(),
            Err(GeofenceError::NoRing)
        );
        assert_eq!(
            parse(r#"{"features":[{"geometry":{"coordinates":[]}}]}"#).outer_ring(),
            Err(GeofenceError::NoRing)
        );
    }

    #[test]
    fn short_position_is_malformed() {
        let doc = r#"{"features":[{"geometry":{"coordinates":[[[1,2],[3],[5,6],[7,8]]]}}]}"#;
        assert_eq!(
            parse(doc).outer_ring(),
            Err(GeofenceError::MalformedPosition { index: 1 })
        );
    }

    #[test]
    fn degenerate_ring_is_rejected() {
        let doc = r#"{"features":[{"geometry":{"coordinates":[[[1,2],[3,4],[1,2]]]}}]}"#;
        assert_eq!(
            parse(doc).outer_ring(),
            Err(GeofenceError::TooFewVertices { found: 2 })
        );
    }
}
