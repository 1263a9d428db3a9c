//! Application orchestration
//!
//! [`ArApp`] wires the hit-test tracker, the gesture recognizer and the
//! placement controller together. The host drives it from three places: the
//! render callback ([`ArApp::on_frame`]), touch input callbacks, and loader
//! or session notifications.

use std::rc::Rc;

use ar_core::{
    HitTestTracker, ObjectTransform, PlacedObject, ReferenceSpace, ReticleState, SceneGraph,
    XrFrame, XrSession,
};
use ar_gestures::{GestureBus, GestureEvent, GestureKind, GestureRecognizer, TouchSlot};
use glam::Vec3;

use crate::config::AppConfig;
use crate::loading::{AssetEvent, LoadedAsset, LoadingIndicator};
use crate::placement::PlacementController;

/// State gesture listeners operate on
pub struct Stage<S> {
    pub tracker: HitTestTracker,
    pub placement: PlacementController,
    pub scene: S,
}

impl<S: SceneGraph> Stage<S> {
    /// Latest reticle state
    pub fn reticle(&self) -> &ReticleState {
        self.tracker.reticle()
    }

    /// Forward a gesture to the placement controller
    pub fn apply(&mut self, event: &GestureEvent) -> bool {
        let reticle = *self.tracker.reticle();
        self.placement.handle(event, &reticle, &mut self.scene)
    }
}

fn log_gesture<S>(_stage: &mut Stage<S>, event: &GestureEvent) {
    tracing::debug!(gesture = event.kind().name(), ?event, "Gesture");
}

/// Placement application driven by host callbacks
pub struct ArApp<S: SceneGraph + 'static> {
    stage: Stage<S>,
    gestures: GestureRecognizer,
    bus: GestureBus<Stage<S>>,
    loading: LoadingIndicator,
    initial_scale: f32,
    load_failed: bool,
}

impl<S: SceneGraph + 'static> ArApp<S> {
    /// Create the app; poses are resolved into `renderer_space`
    pub fn new(config: &AppConfig, scene: S, renderer_space: ReferenceSpace) -> Self {
        let tracker = HitTestTracker::new(renderer_space)
            .with_source_space(config.tracking.hit_test_space);

        let mut app = Self {
            stage: Stage {
                tracker,
                placement: PlacementController::new(config.placement.clone()),
                scene,
            },
            gestures: GestureRecognizer::new(config.gestures.clone()),
            bus: GestureBus::new(),
            loading: LoadingIndicator::default(),
            initial_scale: config.placement.initial_scale,
            load_failed: false,
        };
        app.install_listeners();
        app
    }

    fn install_listeners(&mut self) {
        for kind in GestureKind::ALL {
            self.bus.subscribe(kind, log_gesture::<S>);
        }
        for kind in [
            GestureKind::Tap,
            GestureKind::Pan,
            GestureKind::Pinch,
            GestureKind::Rotate,
            GestureKind::Swipe,
        ] {
            self.bus.subscribe(kind, |stage: &mut Stage<S>, event: &GestureEvent| {
                stage.apply(event);
            });
        }
    }

    pub fn stage(&self) -> &Stage<S> {
        &self.stage
    }

    pub fn reticle(&self) -> &ReticleState {
        self.stage.reticle()
    }

    pub fn placement(&self) -> &PlacementController {
        &self.stage.placement
    }

    pub fn scene(&self) -> &S {
        &self.stage.scene
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    pub fn tracker(&self) -> &HitTestTracker {
        &self.stage.tracker
    }

    pub fn gestures(&self) -> &GestureRecognizer {
        &self.gestures
    }

    /// Subscribe extra listeners, e.g. for double-tap or press
    pub fn bus_mut(&mut self) -> &mut GestureBus<Stage<S>> {
        &mut self.bus
    }

    /// Render callback
    ///
    /// `xr` is present only while an AR session is running. The reticle is
    /// resolved before any gesture is dispatched for this frame.
    pub fn on_frame(&mut self, timestamp: f64, xr: Option<(&Rc<dyn XrSession>, &dyn XrFrame)>) {
        if let Some((session, frame)) = xr {
            let tracker = &mut self.stage.tracker;
            if !tracker.is_requested() {
                tracker.request_source(session);
            }
            if tracker.source().is_some() {
                tracker.update(frame);
            }
        }

        let events = self.gestures.update(timestamp);
        self.dispatch(&events);
    }

    pub fn on_pointer_down(&mut self, slot: TouchSlot, position: Vec3, now: f64) {
        let events = self.gestures.pointer_down(slot, position, now);
        self.dispatch(&events);
    }

    pub fn on_pointer_move(&mut self, slot: TouchSlot, position: Vec3, now: f64) {
        let events = self.gestures.pointer_move(slot, position, now);
        self.dispatch(&events);
    }

    pub fn on_pointer_up(&mut self, slot: TouchSlot, now: f64) {
        let events = self.gestures.pointer_up(slot, now);
        self.dispatch(&events);
    }

    /// The AR session ended
    pub fn on_session_end(&mut self) {
        self.stage.tracker.on_session_end();
    }

    /// Notification from the asset loader
    pub fn on_asset_event(&mut self, event: AssetEvent) {
        match event {
            AssetEvent::Progress { loaded, total } => self.loading.set_progress(loaded, total),
            AssetEvent::Loaded(asset) => self.install_asset(asset),
            AssetEvent::Failed(e) => {
                if !self.load_failed {
                    tracing::error!("Failed to load model: {}", e);
                    self.load_failed = true;
                }
            }
        }
    }

    fn install_asset(&mut self, asset: LoadedAsset) {
        let LoadedAsset { entity, clips } = asset;
        tracing::info!("Loaded model '{}' with {} animation clips", entity.name, clips.len());

        let entity = entity.with_transform(ObjectTransform::with_uniform_scale(self.initial_scale));
        let object = PlacedObject::new(entity).with_clips(clips);
        self.stage.placement.set_object(object, &mut self.stage.scene);
        self.loading.hide();
    }

    fn dispatch(&mut self, events: &[GestureEvent]) {
        for event in events {
            self.bus.dispatch(&mut self.stage, event);
        }
    }
}
