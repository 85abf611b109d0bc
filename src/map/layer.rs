use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geo::{Feature, Geometry};

use super::style::Style;
use super::tiles::TileGrid;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a layer instance. Two layers built with the same options are
/// still different layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Features backing a vector layer. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorSource {
    features: Vec<Feature>,
}

impl VectorSource {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn from_geometry(geometry: Geometry) -> Self {
        Self::new(vec![Feature::new(geometry)])
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorLayer {
    pub source: VectorSource,
    pub style: Vec<Style>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Tile(TileGrid),
    Vector(VectorLayer),
}

/// A rendering unit attached to a map.
///
/// Not `Clone`: a layer has one owner at a time, either the map or whoever
/// removed it.
#[derive(Debug)]
pub struct Layer {
    id: LayerId,
    class_name: String,
    pub z_index: i32,
    pub visible: bool,
    pub kind: LayerKind,
}

impl Layer {
    pub fn tile(grid: TileGrid) -> Self {
        Self {
            id: LayerId::next(),
            class_name: "ol-layer".to_string(),
            z_index: 0,
            visible: true,
            kind: LayerKind::Tile(grid),
        }
    }

    /// An empty vector layer tagged with `class_name` so it can be found again.
    pub fn vector(class_name: impl Into<String>, style: Vec<Style>) -> Self {
        Self {
            id: LayerId::next(),
            class_name: class_name.into(),
            z_index: 0,
            visible: true,
            kind: LayerKind::Vector(VectorLayer {
                source: VectorSource::default(),
                style,
            }),
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[cfg(test)]
    pub fn is_tile(&self) -> bool {
        matches!(self.kind, LayerKind::Tile(_))
    }

    /// Source of a vector layer; `None` for tile layers.
    pub fn source(&self) -> Option<&VectorSource> {
        match &self.kind {
            LayerKind::Vector(vector) => Some(&vector.source),
            LayerKind::Tile(_) => None,
        }
    }

    /// Replace the source of a vector layer. Returns false for tile layers.
    pub fn set_source(&mut self, source: VectorSource) -> bool {
        match &mut self.kind {
            LayerKind::Vector(vector) => {
                vector.source = source;
                true
            }
            LayerKind::Tile(_) => false,
        }
    }
}
