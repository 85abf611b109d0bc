use std::time::Duration;

use bevy::prelude::*;

use crate::geo::Coordinate;
use crate::map::{ListenerKey, MapInstance};

use super::debounce::Debouncer;

/// Follows the cursor over the map through a pointer-move subscription.
///
/// The position is `None` until the first move survives debouncing. Nothing
/// reaches it after [`CursorTracker::unsubscribe`].
#[derive(Debug)]
pub struct CursorTracker {
    key: Option<ListenerKey>,
    debouncer: Debouncer<Coordinate>,
    position: Option<Coordinate>,
}

impl Default for CursorTracker {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl CursorTracker {
    pub fn new(interval: Duration) -> Self {
        Self {
            key: None,
            debouncer: Debouncer::new(interval),
            position: None,
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.debouncer.set_interval(interval);
    }

    pub fn subscribe(&mut self, map: &mut MapInstance) {
        if self.key.is_none() {
            let key = map.on_pointer_move();
            debug!("Cursor tracker subscribed ({:?})", key);
            self.key = Some(key);
        }
    }

    pub fn unsubscribe(&mut self, map: &mut MapInstance) {
        if let Some(key) = self.key.take() {
            map.un_pointer_move(key);
            debug!("Cursor tracker unsubscribed ({:?})", key);
        }
        self.debouncer.cancel();
    }

    /// Drop the subscription without a map to remove it from.
    pub fn forget(&mut self) {
        self.key = None;
        self.debouncer.cancel();
    }

    pub fn reset(&mut self) {
        self.position = None;
    }

    /// Feed queued pointer moves through the debouncer. Returns the new
    /// position when it changed.
    pub fn poll(&mut self, map: &mut MapInstance, now: Duration) -> Option<Coordinate> {
        let key = self.key?;
        let Some(moves) = map.take_pointer_moves(key) else {
            // The map no longer knows this subscription
            self.forget();
            return None;
        };

        for coordinate in moves {
            self.debouncer.push(coordinate, now);
        }

        let coordinate = self.debouncer.poll(now)?;
        if self.position == Some(coordinate) {
            return None;
        }
        self.position = Some(coordinate);
        Some(coordinate)
    }
}
