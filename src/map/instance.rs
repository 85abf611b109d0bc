use std::sync::atomic::{AtomicU64, Ordering};

use bevy::prelude::*;

use crate::geo::{Coordinate, Feature};

use super::interaction::{DrawInteraction, InteractionId};
use super::layer::{Layer, LayerId};
use super::view::MapView;

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a map instance, so consumers can tell a replacement apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapId(u64);

/// Handle returned by [`MapInstance::on_pointer_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

/// The live map: a view, its layers, its interactions and the pointer-move
/// subscribers.
///
/// Published as a resource once the host has created it, so consumers take it
/// as `Option<Res<MapInstance>>` and treat `None` as "not ready yet".
#[derive(Resource, Debug)]
pub struct MapInstance {
    id: MapId,
    view: MapView,
    target: Option<Entity>,
    layers: Vec<Layer>,
    interactions: Vec<DrawInteraction>,
    listeners: Vec<(ListenerKey, Vec<Coordinate>)>,
    next_listener: u64,
}

impl MapInstance {
    pub fn new(view: MapView) -> Self {
        Self {
            id: MapId(NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed)),
            view,
            target: None,
            layers: Vec::new(),
            interactions: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MapView {
        &mut self.view
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    /// Attach to (or with `None`, detach from) the viewport entity.
    pub fn set_target(&mut self, target: Option<Entity>) {
        match (self.target, target) {
            (_, Some(entity)) => info!("Map attached to viewport {:?}", entity),
            (Some(entity), None) => info!("Map detached from viewport {:?}", entity),
            (None, None) => {}
        }
        self.target = target;
    }

    // ------------------------------------------------------------------------
    // Layers
    // ------------------------------------------------------------------------

    /// Layers in insertion order.
    #[cfg(test)]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layers in draw order: ascending z-index, insertion order within a tie.
    pub fn layers_by_z(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.iter().collect();
        layers.sort_by_key(|layer| layer.z_index);
        layers
    }

    pub fn has_layer(&self, id: LayerId) -> bool {
        self.layers.iter().any(|layer| layer.id() == id)
    }

    /// Returns false (and keeps the map unchanged) if the layer is already present.
    pub fn add_layer(&mut self, layer: Layer) -> bool {
        if self.has_layer(layer.id()) {
            warn!("Refusing to add {} twice", layer.id());
            return false;
        }
        debug!(
            "Added {} ({}) at z-index {}",
            layer.id(),
            layer.class_name(),
            layer.z_index
        );
        self.layers.push(layer);
        true
    }

    /// Detach a layer and hand it back to the caller.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.layers.iter().position(|layer| layer.id() == id)?;
        let layer = self.layers.remove(index);
        debug!("Removed {} ({})", layer.id(), layer.class_name());
        Some(layer)
    }

    #[cfg(test)]
    pub fn find_layer_by_class_name(&self, class_name: &str) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|layer| layer.class_name() == class_name)
    }

    pub fn find_layer_by_class_name_mut(&mut self, class_name: &str) -> Option<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|layer| layer.class_name() == class_name)
    }

    // ------------------------------------------------------------------------
    // Interactions
    // ------------------------------------------------------------------------

    pub fn interactions(&self) -> &[DrawInteraction] {
        &self.interactions
    }

    pub fn has_interaction(&self, id: InteractionId) -> bool {
        self.interactions.iter().any(|i| i.id() == id)
    }

    pub fn add_interaction(&mut self, interaction: DrawInteraction) -> bool {
        if self.has_interaction(interaction.id()) {
            warn!("Refusing to add {} twice", interaction.id());
            return false;
        }
        debug!("Added {}", interaction.id());
        self.interactions.push(interaction);
        true
    }

    pub fn remove_interaction(&mut self, id: InteractionId) -> Option<DrawInteraction> {
        let index = self.interactions.iter().position(|i| i.id() == id)?;
        debug!("Removed {}", id);
        Some(self.interactions.remove(index))
    }

    pub fn interaction_mut(&mut self, id: InteractionId) -> Option<&mut DrawInteraction> {
        self.interactions.iter_mut().find(|i| i.id() == id)
    }

    // ------------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------------

    /// Subscribe to pointer moves. Events queue up until taken with
    /// [`MapInstance::take_pointer_moves`].
    pub fn on_pointer_move(&mut self) -> ListenerKey {
        let key = ListenerKey(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((key, Vec::new()));
        key
    }

    /// Unsubscribe. Events still queued for the key are dropped.
    pub fn un_pointer_move(&mut self, key: ListenerKey) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(k, _)| *k != key);
        self.listeners.len() != before
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver a pointer move to every interaction and listener. Ignored while
    /// the map has no target.
    pub fn dispatch_pointer_move(&mut self, coordinate: Coordinate) {
        if self.target.is_none() {
            return;
        }
        for interaction in &mut self.interactions {
            interaction.handle_pointer_move(coordinate);
        }
        for (_, queue) in &mut self.listeners {
            queue.push(coordinate);
        }
    }

    /// Queued pointer moves for `key`, in dispatch order. `None` once unsubscribed.
    pub fn take_pointer_moves(&mut self, key: ListenerKey) -> Option<Vec<Coordinate>> {
        self.listeners
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, queue)| std::mem::take(queue))
    }

    /// Deliver a click to every interaction, returning the features it finished.
    pub fn dispatch_click(&mut self, coordinate: Coordinate) -> Vec<Feature> {
        if self.target.is_none() {
            return Vec::new();
        }
        self.interactions
            .iter_mut()
            .filter_map(|interaction| interaction.handle_click(coordinate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::interaction::{DrawCondition, DrawOptions, DrawType};
    use crate::map::tiles::TileGrid;

    fn attached_map() -> MapInstance {
        let mut map = MapInstance::new(MapView::new(Coordinate::default(), 16.0));
        map.set_target(Some(Entity::PLACEHOLDER));
        map
    }

    #[test]
    fn test_new_map_is_empty() {
        let center = Coordinate::new(1.0, 2.0);
        let map = MapInstance::new(MapView::new(center, 16.0));
        assert_eq!(map.view().center(), center);
        assert_eq!(map.view().zoom(), 16.0);
        assert!(map.layers().is_empty());
        assert!(map.interactions().is_empty());
        assert!(map.target().is_none());
    }

    #[test]
    fn test_instances_have_distinct_ids() {
        let a = MapInstance::new(MapView::new(Coordinate::default(), 16.0));
        let b = MapInstance::new(MapView::new(Coordinate::default(), 16.0));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_layer_add_remove() {
        let mut map = attached_map();
        let layer = Layer::vector("lineLayer", Vec::new());
        let id = layer.id();
        assert!(map.add_layer(layer));
        assert!(map.find_layer_by_class_name("lineLayer").is_some());

        let removed = map.remove_layer(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(map.layers().is_empty());
        assert!(map.remove_layer(id).is_none());
    }

    #[test]
    fn test_removed_layer_can_be_added_again() {
        let mut map = attached_map();
        let layer = Layer::vector("a", Vec::new());
        let id = layer.id();
        assert!(map.add_layer(layer));
        let layer = map.remove_layer(id).unwrap();
        assert!(map.add_layer(layer));
        assert_eq!(map.layers().len(), 1);
    }

    #[test]
    fn test_layers_by_z_is_stable() {
        let mut map = attached_map();
        map.add_layer(Layer::vector("top", Vec::new()).with_z_index(5));
        map.add_layer(Layer::tile(TileGrid::default()));
        map.add_layer(Layer::vector("first", Vec::new()));
        let names: Vec<&str> = map.layers_by_z().iter().map(|l| l.class_name()).collect();
        assert_eq!(names, vec!["ol-layer", "first", "top"]);
    }

    #[test]
    fn test_interaction_add_remove() {
        let mut map = attached_map();
        let draw = DrawInteraction::new(DrawOptions::new(DrawType::LineString));
        let id = draw.id();
        assert!(map.add_interaction(draw));
        assert!(map.interaction_mut(id).is_some());
        assert!(map.remove_interaction(id).is_some());
        assert!(map.interactions().is_empty());
    }

    #[test]
    fn test_listeners_receive_moves_in_order() {
        let mut map = attached_map();
        let key = map.on_pointer_move();
        map.dispatch_pointer_move(Coordinate::new(1.0, 1.0));
        map.dispatch_pointer_move(Coordinate::new(2.0, 2.0));
        assert_eq!(
            map.take_pointer_moves(key),
            Some(vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)])
        );
        assert_eq!(map.take_pointer_moves(key), Some(Vec::new()));
    }

    #[test]
    fn test_unsubscribed_listener_gets_nothing() {
        let mut map = attached_map();
        let key = map.on_pointer_move();
        map.dispatch_pointer_move(Coordinate::new(1.0, 1.0));
        assert!(map.un_pointer_move(key));
        assert_eq!(map.listener_count(), 0);
        map.dispatch_pointer_move(Coordinate::new(2.0, 2.0));
        assert_eq!(map.take_pointer_moves(key), None);
        assert!(!map.un_pointer_move(key));
    }

    #[test]
    fn test_detached_map_dispatches_nothing() {
        let mut map = MapInstance::new(MapView::new(Coordinate::default(), 16.0));
        let key = map.on_pointer_move();
        map.dispatch_pointer_move(Coordinate::new(1.0, 1.0));
        assert_eq!(map.take_pointer_moves(key), Some(Vec::new()));
    }

    #[test]
    fn test_pointer_moves_reach_interactions() {
        let mut map = attached_map();
        let mut draw = DrawInteraction::new(
            DrawOptions::new(DrawType::LineString)
                .with_max_points(2)
                .with_condition(DrawCondition::Never),
        );
        draw.append_coordinates(&[Coordinate::default()]);
        let id = draw.id();
        map.add_interaction(draw);
        map.dispatch_pointer_move(Coordinate::new(5.0, 5.0));
        assert!(map.dispatch_click(Coordinate::new(5.0, 5.0)).is_empty());

        let features = map.interaction_mut(id).unwrap().sketch_features();
        assert_eq!(features[0].geometry().coordinates()[1], Coordinate::new(5.0, 5.0));
    }
}
