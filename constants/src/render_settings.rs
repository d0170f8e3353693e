/// Globe radius in world units. Every overlay is projected onto this sphere.
pub const GLOBE_RADIUS: f64 = 1.0;

/// Segment count of the earth sphere (stacks; sectors are doubled).
pub const EARTH_SEGMENTS: u32 = 30;

/// Earth surface opacity so the far-side grid and geofence stay visible.
pub const EARTH_ALPHA: f32 = 0.5;

/// Distance of the satellite from the globe centre.
pub const SATELLITE_ORBIT_RADIUS: f64 = 2.0;

/// Angle added to the orbit every rendered frame (radians).
pub const ORBIT_ANGLE_INCREMENT: f64 = 0.005;

pub const SATELLITE_DIAMETER: f32 = 0.08;
pub const SATELLITE_SEGMENTS: u32 = 5;

/// Base diameter of the sensor cone. Its height is half the orbit radius.
pub const SENSOR_CONE_BASE_DIAMETER: f32 = 0.14;
pub const SENSOR_CONE_ALPHA: f32 = 0.2;

/// Lattice spacing of the latitude/longitude grid in degrees.
pub const GRID_STEP_DEG: f64 = 1.0;
pub const GRID_ALPHA: f32 = 0.05;

/// Geofence fill is lifted this fraction of the radius above the surface to avoid z-fighting.
pub const GEOFENCE_SURFACE_OFFSET: f64 = 0.002;

pub const SKYBOX_SIZE: f32 = 50.0;

pub const CAMERA_INITIAL_RADIUS: f32 = 4.0;
pub const CAMERA_MIN_RADIUS: f32 = 1.5;
pub const CAMERA_MAX_RADIUS: f32 = 7.0;
pub const CAMERA_NEAR_PLANE: f32 = 0.1;

/// Initial azimuth of the orbit camera around Y (radians).
pub const CAMERA_INITIAL_YAW: f32 = std::f32::consts::FRAC_PI_2;

/// Initial polar angle of the orbit camera measured from +Y (radians).
pub const CAMERA_INITIAL_PITCH: f32 = std::f32::consts::FRAC_PI_2;

/// Hemispheric light direction, pointing from the lit side.
pub const LIGHT_DIRECTION: [f32; 3] = [-1.0, 1.0, 0.0];
