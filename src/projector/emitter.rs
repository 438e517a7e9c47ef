//! Emitter handles
//!
//! The projector never owns its emitter. Gameplay code keeps the `Rc` and the
//! projector only holds a `Weak`, so dropping the item silences the effect.

use std::cell::Cell;

use glam::Vec3;

/// Anything that can point the projector
pub trait Emitter {
    /// World-space ray origin; `None` falls back to the camera position
    fn world_position(&self) -> Option<Vec3>;

    /// World-space forward; `None` when unavailable this frame
    fn forward(&self) -> Option<Vec3> {
        None
    }

    /// Reference up for building the cone basis
    fn up(&self) -> Option<Vec3> {
        None
    }
}

/// A movable emitter pose, e.g. a held item or a tripod
#[derive(Debug, Default)]
pub struct StaticEmitter {
    position: Cell<Vec3>,
    forward: Cell<Option<Vec3>>,
    up: Cell<Option<Vec3>>,
}

impl StaticEmitter {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position: Cell::new(position),
            forward: Cell::new(Some(forward)),
            up: Cell::new(None),
        }
    }

    /// An emitter with no direction accessor
    pub fn without_direction(position: Vec3) -> Self {
        Self {
            position: Cell::new(position),
            ..Default::default()
        }
    }

    pub fn set_pose(&self, position: Vec3, forward: Vec3) {
        self.position.set(position);
        self.forward.set(Some(forward));
    }

    pub fn set_up(&self, up: Option<Vec3>) {
        self.up.set(up);
    }
}

impl Emitter for StaticEmitter {
    fn world_position(&self) -> Option<Vec3> {
        Some(self.position.get())
    }

    fn forward(&self) -> Option<Vec3> {
        self.forward.get()
    }

    fn up(&self) -> Option<Vec3> {
        self.up.get()
    }
}
