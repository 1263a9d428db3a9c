//! Gesture-driven object placement
//!
//! [`PlacementController`] owns the placed object's attachment to the scene.
//! A tap places the object on the reticle, pan/pinch/rotate edit its
//! transform relative to a snapshot taken when the gesture started, and a
//! swipe removes it again.

use ar_core::{PlacedObject, ReticleState, SceneGraph};
use ar_gestures::{GestureEvent, GesturePhase};
use glam::{Quat, Vec3};

use crate::config::PlacementConfig;

/// Where the object is in its placement lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementState {
    /// Loaded or waiting to load, never placed
    #[default]
    Unplaced,
    Placed,
    /// Swiped away; a tap places it again
    Removed,
}

/// Transform baselines captured when continuous gestures start
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureSnapshots {
    pub pan: Option<Vec3>,
    pub pinch: Option<Vec3>,
    pub rotate: Option<Quat>,
}

/// Single-object placement state machine
pub struct PlacementController {
    config: PlacementConfig,
    object: Option<PlacedObject>,
    state: PlacementState,
    snapshots: GestureSnapshots,
}

impl PlacementController {
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            object: None,
            state: PlacementState::Unplaced,
            snapshots: GestureSnapshots::default(),
        }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn object(&self) -> Option<&PlacedObject> {
        self.object.as_ref()
    }

    pub fn snapshots(&self) -> &GestureSnapshots {
        &self.snapshots
    }

    /// Take ownership of a freshly loaded object
    ///
    /// A previous object is detached first.
    pub fn set_object(&mut self, object: PlacedObject, scene: &mut dyn SceneGraph) {
        if let Some(previous) = self.object.as_mut()
            && previous.in_scene()
        {
            previous.detach(scene);
        }
        self.object = Some(object);
        self.state = PlacementState::Unplaced;
        self.snapshots = GestureSnapshots::default();
    }

    /// Route any gesture to its handler
    ///
    /// Returns true if the object changed.
    pub fn handle(
        &mut self,
        event: &GestureEvent,
        reticle: &ReticleState,
        scene: &mut dyn SceneGraph,
    ) -> bool {
        match *event {
            GestureEvent::Tap { .. } => self.on_tap(reticle, scene),
            GestureEvent::Pan { phase, delta } => self.on_pan(phase, delta, scene),
            GestureEvent::Pinch { phase, scale, .. } => self.on_pinch(phase, scale, scene),
            GestureEvent::Rotate { phase, theta } => self.on_rotate(phase, theta, scene),
            GestureEvent::Swipe { .. } => self.on_swipe(scene),
            GestureEvent::DoubleTap { .. } | GestureEvent::Press { .. } => false,
        }
    }

    /// Place the object on the reticle if it is not already showing
    pub fn on_tap(&mut self, reticle: &ReticleState, scene: &mut dyn SceneGraph) -> bool {
        let Some(object) = self.object.as_mut() else {
            tracing::debug!("Tap ignored, object not loaded");
            return false;
        };
        if object.visible() {
            return false;
        }
        let Some(pose) = reticle.pose() else {
            return false;
        };

        object.transform_mut().position = pose.position() + self.config.offset();
        object.attach(scene);
        self.state = PlacementState::Placed;
        tracing::info!("Placed object at {:?}", object.transform().position);
        true
    }

    pub fn on_pan(&mut self, phase: GesturePhase, delta: Vec3, scene: &mut dyn SceneGraph) -> bool {
        let Some(object) = self.object.as_mut() else {
            return false;
        };
        match phase {
            GesturePhase::Start => {
                self.snapshots.pan = Some(object.transform().position);
                false
            }
            GesturePhase::Update => {
                let Some(start) = self.snapshots.pan else {
                    return false;
                };
                object.transform_mut().position = start + delta * self.config.pan_sensitivity;
                object.sync(scene);
                true
            }
            GesturePhase::End => {
                self.snapshots.pan = None;
                false
            }
        }
    }

    pub fn on_pinch(&mut self, phase: GesturePhase, scale: f32, scene: &mut dyn SceneGraph) -> bool {
        let Some(object) = self.object.as_mut() else {
            return false;
        };
        match phase {
            GesturePhase::Start => {
                self.snapshots.pinch = Some(object.transform().scale);
                false
            }
            GesturePhase::Update => {
                let Some(start) = self.snapshots.pinch else {
                    return false;
                };
                object.transform_mut().scale = start * scale;
                object.sync(scene);
                true
            }
            GesturePhase::End => {
                self.snapshots.pinch = None;
                false
            }
        }
    }

    /// Every update recomposes from the start orientation, so intermediate
    /// samples never accumulate.
    pub fn on_rotate(&mut self, phase: GesturePhase, theta: f32, scene: &mut dyn SceneGraph) -> bool {
        let Some(object) = self.object.as_mut() else {
            return false;
        };
        match phase {
            GesturePhase::Start => {
                self.snapshots.rotate = Some(object.transform().rotation);
                false
            }
            GesturePhase::Update => {
                let Some(start) = self.snapshots.rotate else {
                    return false;
                };
                let transform = object.transform_mut();
                transform.rotation = start;
                transform.rotate_y(theta);
                object.sync(scene);
                true
            }
            GesturePhase::End => {
                self.snapshots.rotate = None;
                false
            }
        }
    }

    /// Remove the object from the scene if it is showing
    pub fn on_swipe(&mut self, scene: &mut dyn SceneGraph) -> bool {
        let Some(object) = self.object.as_mut() else {
            return false;
        };
        if !object.visible() {
            return false;
        }
        object.detach(scene);
        self.state = PlacementState::Removed;
        tracing::info!("Removed object from scene");
        true
    }
}
