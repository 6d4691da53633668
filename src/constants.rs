//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Meters per degree of latitude used by the local-plane projection
pub const METERS_PER_DEGREE_LAT: f64 = 111_132.0;

/// Mean Earth radius for haversine distances
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Eraser radius bounds and step, in meters
pub const MIN_ERASE_RADIUS_M: f64 = 5.0;
pub const MAX_ERASE_RADIUS_M: f64 = 500.0;
pub const ERASE_RADIUS_STEP_M: f64 = 5.0;
pub const DEFAULT_ERASE_RADIUS_M: f64 = 150.0;

/// Interpolated eraser positions are spaced at this fraction of the radius
pub const ERASE_STROKE_SPACING: f64 = 0.25;

/// Screen displacement (pixels, either axis) that turns a marker tap into a drag
pub const MARKER_DRAG_THRESHOLD_PX: f32 = 2.0;

/// Screen radius for marker hit testing, in pixels
pub const MARKER_HIT_RADIUS_PX: f32 = 14.0;

/// Clicking this close (pixels) to the first vertex closes a polygon
pub const CLOSE_RING_DISTANCE_PX: f32 = 10.0;

/// Routing services accept 25 waypoints including origin and destination
pub const MAX_SNAP_WAYPOINTS: usize = 23;

/// Map zoom bounds
pub const MIN_MAP_ZOOM: f64 = 3.0;
pub const MAX_MAP_ZOOM: f64 = 20.0;
