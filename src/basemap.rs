//! The tiled background layer, kept at the bottom of the map.

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::constants::BASEMAP_Z_INDEX;
use crate::map::{Layer, LayerId, MapInstance, MapSystems, TileGrid};

/// The basemap layer currently on the map, if any.
#[derive(Resource, Debug, Default)]
pub struct BasemapLayer {
    layer: Option<LayerId>,
}

impl BasemapLayer {
    #[cfg(test)]
    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    /// Add the tile layer unless this map already carries it.
    pub fn attach(&mut self, map: &mut MapInstance) {
        if self.layer.is_some_and(|id| map.has_layer(id)) {
            return;
        }
        let layer = Layer::tile(TileGrid::default()).with_z_index(BASEMAP_Z_INDEX);
        let id = layer.id();
        if map.add_layer(layer) {
            info!("Basemap attached as {}", id);
            self.layer = Some(id);
        }
    }

    /// Remove exactly the layer this resource added.
    pub fn detach(&mut self, map: &mut MapInstance) {
        if let Some(id) = self.layer.take() {
            map.remove_layer(id);
            info!("Basemap detached");
        }
    }
}

fn attach_basemap(mut basemap: ResMut<BasemapLayer>, map: Option<ResMut<MapInstance>>) {
    match map {
        Some(mut map) => {
            if basemap.layer.is_none_or(|id| !map.has_layer(id)) {
                basemap.attach(&mut map);
            }
        }
        None => {
            if basemap.layer.take().is_some() {
                debug!("Map gone, forgot basemap layer");
            }
        }
    }
}

fn detach_basemap(mut basemap: ResMut<BasemapLayer>, map: Option<ResMut<MapInstance>>) {
    if let Some(mut map) = map {
        basemap.detach(&mut map);
    }
}

pub struct BasemapPlugin;

impl Plugin for BasemapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BasemapLayer>()
            .add_systems(Update, attach_basemap.before(MapSystems))
            .add_systems(Last, detach_basemap.run_if(on_message::<AppExit>));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::map::MapView;

    fn attached_map() -> MapInstance {
        let mut map = MapInstance::new(MapView::new(Coordinate::default(), 16.0));
        map.set_target(Some(Entity::PLACEHOLDER));
        map
    }

    #[test]
    fn test_attach_adds_one_tile_layer_at_bottom() {
        let mut map = attached_map();
        map.add_layer(Layer::vector("above", Vec::new()).with_z_index(1));
        let mut basemap = BasemapLayer::default();

        basemap.attach(&mut map);
        basemap.attach(&mut map);

        let tiles: Vec<&Layer> = map.layers().iter().filter(|l| l.is_tile()).collect();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].z_index, 0);
        assert!(map.layers_by_z()[0].is_tile());
    }

    #[test]
    fn test_detach_removes_exact_layer() {
        let mut map = attached_map();
        let mut basemap = BasemapLayer::default();
        basemap.attach(&mut map);
        let id = basemap.layer().unwrap();

        basemap.detach(&mut map);
        assert!(!map.has_layer(id));
        assert!(map.layers().is_empty());
    }

    #[test]
    fn test_system_follows_map_instance() {
        let mut app = App::new();
        app.init_resource::<BasemapLayer>()
            .add_systems(Update, attach_basemap);

        app.update();
        assert!(app.world().resource::<BasemapLayer>().layer().is_none());

        app.insert_resource(attached_map());
        app.update();
        app.update();
        assert_eq!(app.world().resource::<MapInstance>().layers().len(), 1);

        app.world_mut().remove_resource::<MapInstance>();
        app.update();
        assert!(app.world().resource::<BasemapLayer>().layer().is_none());

        // A replacement map gets its own basemap
        app.insert_resource(attached_map());
        app.update();
        assert_eq!(app.world().resource::<MapInstance>().layers().len(), 1);
    }
}
