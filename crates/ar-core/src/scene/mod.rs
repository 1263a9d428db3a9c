//! Scene graph attachment.
//!
//! The renderer's scene graph is an external collaborator; placement only
//! needs to attach and detach entities. [`Scene`] is an in-memory graph used by
//! headless hosts and tests.

mod entity;

pub use entity::*;

use std::collections::HashMap;
use uuid::Uuid;

/// Minimal scene graph interface used by placement.
pub trait SceneGraph {
    /// Attaches an entity to the scene.
    fn add(&mut self, entity: &SceneEntity);

    /// Detaches an entity from the scene.
    fn remove(&mut self, id: Uuid);

    /// Pushes the latest state of an attached entity.
    ///
    /// Returns false if the entity is not attached.
    fn sync(&mut self, entity: &SceneEntity) -> bool;

    /// Returns true if the entity is attached.
    fn contains(&self, id: Uuid) -> bool;
}

/// In-memory scene of attached entities.
pub struct Scene {
    entities: HashMap<Uuid, SceneEntity>,
    dirty: bool,
}

impl Scene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            dirty: false,
        }
    }

    /// Returns true if the scene has been modified since last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the scene as clean (called after rendering).
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Gets an entity by ID.
    pub fn get(&self, id: Uuid) -> Option<&SceneEntity> {
        self.entities.get(&id)
    }

    /// Returns the number of attached entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns an iterator over all attached entities.
    pub fn entities(&self) -> impl Iterator<Item = &SceneEntity> {
        self.entities.values()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for Scene {
    fn add(&mut self, entity: &SceneEntity) {
        self.entities.insert(entity.id, entity.clone());
        self.dirty = true;
    }

    fn remove(&mut self, id: Uuid) {
        if self.entities.remove(&id).is_some() {
            self.dirty = true;
        }
    }

    fn sync(&mut self, entity: &SceneEntity) -> bool {
        match self.entities.get_mut(&entity.id) {
            Some(stored) => {
                *stored = entity.clone();
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    fn contains(&self, id: Uuid) -> bool {
        self.entities.contains_key(&id)
    }
}
