//! Map projection helpers for the terminal map widget
//!
//! The canvas uses plain longitude/latitude coordinates (equirectangular),
//! so the visible window is a span of degrees around the center that
//! halves with every zoom level, like a web tile map does.

use crate::state::{GeoPosition, MAX_ZOOM, MIN_ZOOM, PanDirection};

pub const ATTRIBUTION: &str = "Map data © OpenStreetMap contributors";

/// Drawn at the marker position; the popup sits on the row above.
pub const MARKER_GLYPH: &str = "◉";

/// Horizontal pixels per terminal cell, at 256px per tile.
const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;
const TILE_PX: f64 = 256.0;

pub const MAX_LAT: f64 = 85.0;

pub fn clamp_zoom(zoom: i16) -> u8 {
    zoom.clamp(i16::from(MIN_ZOOM), i16::from(MAX_ZOOM)) as u8
}

/// Degrees covered by one pixel at `zoom`.
pub fn degrees_per_px(zoom: u8) -> f64 {
    360.0 / (TILE_PX * 2f64.powi(i32::from(zoom)))
}

/// Latitude covered by one terminal row at `zoom`.
pub fn row_degrees(zoom: u8) -> f64 {
    CELL_HEIGHT_PX * degrees_per_px(zoom)
}

/// Visible bounds for a `cols` x `rows` canvas as `(x_bounds, y_bounds)`.
pub fn viewport_bounds(center: GeoPosition, zoom: u8, cols: u16, rows: u16) -> ([f64; 2], [f64; 2]) {
    let per_px = degrees_per_px(zoom);
    let half_lon = f64::from(cols) * CELL_WIDTH_PX * per_px / 2.0;
    let half_lat = f64::from(rows) * CELL_HEIGHT_PX * per_px / 2.0;
    (
        [center.lon - half_lon, center.lon + half_lon],
        [center.lat - half_lat, center.lat + half_lat],
    )
}

/// Distance moved by one pan step at `zoom`.
pub fn pan_step(zoom: u8) -> f64 {
    90.0 / 2f64.powi(i32::from(zoom))
}

pub fn pan(center: GeoPosition, zoom: u8, direction: PanDirection) -> GeoPosition {
    let step = pan_step(zoom);
    let (lat, lon) = match direction {
        PanDirection::North => (center.lat + step, center.lon),
        PanDirection::South => (center.lat - step, center.lon),
        PanDirection::East => (center.lat, center.lon + step),
        PanDirection::West => (center.lat, center.lon - step),
    };
    GeoPosition::new(lat.clamp(-MAX_LAT, MAX_LAT), wrap_lon(lon))
}

pub fn wrap_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

pub fn contains(bounds: &([f64; 2], [f64; 2]), position: GeoPosition) -> bool {
    let (x, y) = bounds;
    (x[0]..=x[1]).contains(&position.lon) && (y[0]..=y[1]).contains(&position.lat)
}
