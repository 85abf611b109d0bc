//! Spherical mercator conversion for placing geographic positions on the map.

use std::f64::consts::PI;

use super::Coordinate;

const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the width of the projected world, in meters.
pub const HALF_WORLD_SIZE: f64 = PI * EARTH_RADIUS;

/// Project `[longitude, latitude]` (degrees) into EPSG:3857.
///
/// Latitudes beyond the mercator limit are clamped to the edge of the world.
pub fn from_lon_lat([lon, lat]: [f64; 2]) -> Coordinate {
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    Coordinate::new(x, y.clamp(-HALF_WORLD_SIZE, HALF_WORLD_SIZE))
}

/// Inverse of [`from_lon_lat`].
pub fn to_lon_lat(coordinate: Coordinate) -> [f64; 2] {
    let lon = (coordinate.x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (coordinate.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
    [lon, lat]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_origin() {
        let coordinate = from_lon_lat([0.0, 0.0]);
        assert!(coordinate.x.abs() < 1e-9);
        assert!(coordinate.y.abs() < 1e-9);
    }

    #[test]
    fn test_wellington() {
        let coordinate = from_lon_lat([174.7744, -41.2851]);
        assert!((coordinate.x - 19_455_797.2117).abs() < 0.001);
        assert!((coordinate.y - -5_054_485.2350).abs() < 0.001);
    }

    #[test]
    fn test_antimeridian_is_world_edge() {
        let coordinate = from_lon_lat([180.0, 0.0]);
        assert!((coordinate.x - HALF_WORLD_SIZE).abs() < 1e-6);
    }

    #[test]
    fn test_polar_latitude_is_clamped() {
        let coordinate = from_lon_lat([0.0, 90.0]);
        assert!(coordinate.y <= HALF_WORLD_SIZE);
    }

    #[test]
    fn test_to_lon_lat_inverts_projection() {
        let [lon, lat] = to_lon_lat(from_lon_lat([174.7744, -41.2851]));
        assert!((lon - 174.7744).abs() < 1e-9);
        assert!((lat - -41.2851).abs() < 1e-9);
    }
}
