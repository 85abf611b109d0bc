//! Projected coordinates and the geometries built from them.
//!
//! Everything on the map lives in spherical mercator (EPSG:3857) units. Use
//! [`from_lon_lat`] to bring geographic positions into that space.

mod coordinate;
mod geometry;
mod projection;

pub use coordinate::{format_readout, Coordinate};
pub use geometry::{Feature, Geometry, GeometryType};
pub use projection::{from_lon_lat, to_lon_lat, HALF_WORLD_SIZE};
