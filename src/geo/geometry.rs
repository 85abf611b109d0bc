use super::Coordinate;

/// Geometry kinds a style table can be keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    Circle,
    GeometryCollection,
}

impl GeometryType {
    #[cfg(test)]
    pub fn all() -> &'static [GeometryType] {
        &[
            GeometryType::Point,
            GeometryType::LineString,
            GeometryType::Polygon,
            GeometryType::MultiPoint,
            GeometryType::MultiLineString,
            GeometryType::MultiPolygon,
            GeometryType::Circle,
            GeometryType::GeometryCollection,
        ]
    }
}

/// Geometries the map can render.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    /// Outer ring only; the closing vertex is implied.
    Polygon(Vec<Coordinate>),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
        }
    }

    #[cfg(test)]
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Geometry::Point(coordinate) => std::slice::from_ref(coordinate),
            Geometry::LineString(coordinates) | Geometry::Polygon(coordinates) => coordinates,
        }
    }
}

/// A single renderable item in a vector source.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    geometry: Geometry,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_type() {
        let point = Geometry::Point(Coordinate::new(1.0, 2.0));
        let line = Geometry::LineString(vec![Coordinate::default(), Coordinate::new(1.0, 1.0)]);
        assert_eq!(point.geometry_type(), GeometryType::Point);
        assert_eq!(line.geometry_type(), GeometryType::LineString);
    }

    #[test]
    fn test_point_coordinates_is_single_element() {
        let point = Geometry::Point(Coordinate::new(1.0, 2.0));
        assert_eq!(point.coordinates(), &[Coordinate::new(1.0, 2.0)]);
    }

    #[test]
    fn test_all_geometry_types_are_distinct() {
        let all = GeometryType::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(all.len(), 8);
    }
}
