//! Scene entity definition.

use uuid::Uuid;

use crate::types::ObjectTransform;

/// An entity that can be attached to a scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntity {
    /// Unique identifier for this entity.
    pub id: Uuid,

    /// Human readable name, as found in the source asset.
    pub name: String,

    /// Local transform.
    pub transform: ObjectTransform,

    /// Whether this entity is drawn.
    pub visible: bool,
}

impl SceneEntity {
    /// Creates a new visible entity with an identity transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transform: ObjectTransform::default(),
            visible: true,
        }
    }

    /// Sets the transform.
    pub fn with_transform(mut self, transform: ObjectTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}
