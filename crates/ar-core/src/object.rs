//! The single placeable object

use uuid::Uuid;

use crate::scene::{SceneEntity, SceneGraph};
use crate::types::ObjectTransform;

/// A loaded object that can be placed into the scene
///
/// Created hidden and detached. Only placement code calls
/// [`PlacedObject::attach`] and [`PlacedObject::detach`], which keep
/// `in_scene == visible`.
#[derive(Debug, Clone)]
pub struct PlacedObject {
    entity: SceneEntity,
    in_scene: bool,
    /// Animation clip names from the source asset
    pub clips: Vec<String>,
}

impl PlacedObject {
    /// Wrap a freshly loaded entity, hiding it until placement
    pub fn new(entity: SceneEntity) -> Self {
        Self {
            entity: entity.with_visible(false),
            in_scene: false,
            clips: Vec::new(),
        }
    }

    pub fn with_clips(mut self, clips: Vec<String>) -> Self {
        self.clips = clips;
        self
    }

    pub fn id(&self) -> Uuid {
        self.entity.id
    }

    pub fn entity(&self) -> &SceneEntity {
        &self.entity
    }

    pub fn transform(&self) -> &ObjectTransform {
        &self.entity.transform
    }

    pub fn transform_mut(&mut self) -> &mut ObjectTransform {
        &mut self.entity.transform
    }

    pub fn visible(&self) -> bool {
        self.entity.visible
    }

    pub fn in_scene(&self) -> bool {
        self.in_scene
    }

    /// Default animation clip
    pub fn default_clip(&self) -> Option<&str> {
        self.clips.first().map(String::as_str)
    }

    /// Show the object and attach it to `scene`
    pub fn attach(&mut self, scene: &mut dyn SceneGraph) {
        self.entity.visible = true;
        scene.add(&self.entity);
        self.in_scene = true;
    }

    /// Push the current transform to `scene` if attached
    ///
    /// Returns false if the object should be attached but `scene` no longer
    /// holds it.
    pub fn sync(&self, scene: &mut dyn SceneGraph) -> bool {
        if !self.in_scene {
            return true;
        }
        let synced = scene.sync(&self.entity);
        if !synced {
            tracing::debug!("Scene lost placed object {}", self.entity.id);
        }
        synced
    }

    /// Hide the object and detach it from `scene`
    pub fn detach(&mut self, scene: &mut dyn SceneGraph) {
        self.entity.visible = false;
        scene.remove(self.entity.id);
        self.in_scene = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    #[test]
    fn test_new_object_is_hidden_and_detached() {
        let object = PlacedObject::new(SceneEntity::new("plate"));
        assert!(!object.visible());
        assert!(!object.in_scene());
    }

    #[test]
    fn test_attach_detach_keep_visibility_in_step() {
        let mut scene = Scene::new();
        let mut object = PlacedObject::new(SceneEntity::new("plate"));

        object.attach(&mut scene);
        assert!(object.visible() && object.in_scene());
        assert!(scene.contains(object.id()));

        object.detach(&mut scene);
        assert!(!object.visible() && !object.in_scene());
        assert!(!scene.contains(object.id()));
    }

    #[test]
    fn test_sync_reports_entity_missing_from_scene() {
        let mut scene = Scene::new();
        let mut object = PlacedObject::new(SceneEntity::new("plate"));
        assert!(object.sync(&mut scene));

        object.attach(&mut scene);
        object.transform_mut().position.x = 2.0;
        assert!(object.sync(&mut scene));
        assert_eq!(scene.get(object.id()).unwrap().transform.position.x, 2.0);

        scene.remove(object.id());
        assert!(!object.sync(&mut scene));
    }

    #[test]
    fn test_default_clip_is_first() {
        let object = PlacedObject::new(SceneEntity::new("plate"))
            .with_clips(vec!["idle".into(), "walk".into()]);
        assert_eq!(object.default_clip(), Some("idle"));
    }
}
