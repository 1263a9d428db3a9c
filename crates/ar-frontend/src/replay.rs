//! Scripted session replay
//!
//! Drives an [`ArApp`] from a RON script of frames, touches and loader
//! notifications, standing in for a live AR runtime. Sessions created here
//! settle their requests immediately.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use ar_core::{
    Completion, HitTestResult, HitTestSource, Pose, ReferenceSpace, ReferenceSpaceKind,
    SceneEntity, SceneGraph, XrError, XrFrame, XrSession,
};
use ar_gestures::TouchSlot;
use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::app::ArApp;
use crate::loading::{AssetEvent, LoadError, LoadedAsset};

/// Error type for loading replay scripts
#[derive(Debug, Clone, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid script: {0}")]
    Parse(String),
}

/// One scripted host callback
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ReplayStep {
    /// Loader finished
    Load {
        name: String,
        #[serde(default)]
        clips: Vec<String>,
    },
    /// Loader gave up
    LoadFailed { reason: String },
    Progress { loaded: u64, total: u64 },
    /// Render callback with an AR frame; `hits` are surface positions, nearest first
    Frame {
        t: f64,
        #[serde(default)]
        hits: Vec<[f32; 3]>,
    },
    /// Render callback outside a session
    Tick { t: f64 },
    Down { t: f64, slot: TouchSlot, at: [f32; 3] },
    Move { t: f64, slot: TouchSlot, at: [f32; 3] },
    Up { t: f64, slot: TouchSlot },
    EndSession,
}

fn default_supported() -> bool {
    true
}

/// A sequence of host callbacks
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplayScript {
    /// Whether scripted sessions grant hit-test sources
    #[serde(default = "default_supported")]
    pub hit_test_supported: bool,
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn from_ron(source: &str) -> Result<Self, ReplayError> {
        ron::from_str(source).map_err(|e| ReplayError::Parse(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ReplayError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }

    /// Place, pan, pinch, rotate, then swipe the object away
    pub fn demo() -> Self {
        use ReplayStep::*;
        use TouchSlot::{Primary, Secondary};

        let surface = vec![[0.0, -1.0, -1.5]];
        let frame = |t: f64| Frame {
            t,
            hits: surface.clone(),
        };
        let steps = vec![
            Progress { loaded: 512, total: 1024 },
            Load {
                name: "sandwich".into(),
                clips: vec!["Idle".into()],
            },
            frame(0.0),
            // Tap
            Down { t: 0.1, slot: Primary, at: [0.0, 0.0, -0.3] },
            frame(0.16),
            Up { t: 0.2, slot: Primary },
            frame(0.45),
            // Pan
            Down { t: 1.0, slot: Primary, at: [0.0, 0.0, -0.3] },
            frame(1.06),
            Move { t: 1.5, slot: Primary, at: [0.008, 0.0, -0.3] },
            Move { t: 1.6, slot: Primary, at: [0.018, 0.0, -0.3] },
            Up { t: 1.7, slot: Primary },
            // Pinch
            Down { t: 2.0, slot: Primary, at: [-0.05, 0.0, -0.3] },
            Down { t: 2.0, slot: Secondary, at: [0.05, 0.0, -0.3] },
            frame(2.06),
            Move { t: 2.1, slot: Secondary, at: [0.07, 0.0, -0.3] },
            Move { t: 2.2, slot: Secondary, at: [0.19, 0.0, -0.3] },
            Up { t: 2.3, slot: Secondary },
            Up { t: 2.3, slot: Primary },
            // Rotate
            Down { t: 3.0, slot: Primary, at: [0.0, 0.0, -0.3] },
            Down { t: 3.0, slot: Secondary, at: [0.1, 0.0, -0.3] },
            frame(3.06),
            Move { t: 3.1, slot: Secondary, at: [0.0955, 0.0, -0.3296] },
            Move { t: 3.2, slot: Secondary, at: [0.0697, 0.0, -0.3717] },
            Up { t: 3.3, slot: Secondary },
            Up { t: 3.3, slot: Primary },
            // Swipe
            Down { t: 4.0, slot: Primary, at: [0.0, 0.0, -0.3] },
            frame(4.06),
            Move { t: 4.1, slot: Primary, at: [0.0, -0.05, -0.3] },
            Up { t: 4.12, slot: Primary },
            frame(4.2),
            EndSession,
        ];

        Self {
            hit_test_supported: true,
            steps,
        }
    }
}

/// Session granting requests synchronously
pub struct ScriptedSession {
    supported: bool,
    next_id: Cell<u64>,
}

impl ScriptedSession {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            next_id: Cell::new(1),
        }
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl XrSession for ScriptedSession {
    fn request_reference_space(&self, kind: ReferenceSpaceKind, done: Completion<ReferenceSpace>) {
        done(Ok(ReferenceSpace::new(self.allocate_id(), kind)));
    }

    fn request_hit_test_source(&self, space: ReferenceSpace, done: Completion<HitTestSource>) {
        if self.supported {
            done(Ok(HitTestSource {
                id: self.allocate_id(),
                space,
            }));
        } else {
            done(Err(XrError::Unsupported("hit-test".into())));
        }
    }
}

/// Frame reporting fixed surface positions
pub struct ScriptedFrame {
    hits: Vec<Pose>,
}

impl ScriptedFrame {
    pub fn new(hits: &[[f32; 3]]) -> Self {
        Self {
            hits: hits
                .iter()
                .map(|&xyz| Pose::from_position(Vec3::from(xyz)))
                .collect(),
        }
    }
}

impl XrFrame for ScriptedFrame {
    fn hit_test_results(&self, _source: &HitTestSource) -> Vec<HitTestResult> {
        (0..self.hits.len() as u64).map(HitTestResult).collect()
    }

    fn result_pose(&self, result: &HitTestResult, _space: &ReferenceSpace) -> Option<Pose> {
        self.hits.get(result.0 as usize).copied()
    }
}

fn open_session(supported: bool) -> Rc<dyn XrSession> {
    Rc::new(ScriptedSession::new(supported))
}

/// Feed every step of `script` to `app`
pub fn replay<S: SceneGraph + 'static>(app: &mut ArApp<S>, script: &ReplayScript) {
    let mut session: Option<Rc<dyn XrSession>> = None;

    for step in &script.steps {
        match step {
            ReplayStep::Load { name, clips } => app.on_asset_event(AssetEvent::Loaded(LoadedAsset {
                entity: SceneEntity::new(name.clone()),
                clips: clips.clone(),
            })),
            ReplayStep::LoadFailed { reason } => {
                app.on_asset_event(AssetEvent::Failed(LoadError::Parse(reason.clone())))
            }
            ReplayStep::Progress { loaded, total } => app.on_asset_event(AssetEvent::Progress {
                loaded: *loaded,
                total: *total,
            }),
            ReplayStep::Frame { t, hits } => {
                let active = session.get_or_insert_with(|| open_session(script.hit_test_supported));
                let frame = ScriptedFrame::new(hits);
                let frame: &dyn XrFrame = &frame;
                app.on_frame(*t, Some((&*active, frame)));
            }
            ReplayStep::Tick { t } => app.on_frame(*t, None),
            ReplayStep::Down { t, slot, at } => app.on_pointer_down(*slot, Vec3::from(*at), *t),
            ReplayStep::Move { t, slot, at } => app.on_pointer_move(*slot, Vec3::from(*at), *t),
            ReplayStep::Up { t, slot } => app.on_pointer_up(*slot, *t),
            ReplayStep::EndSession => {
                session = None;
                app.on_session_end();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = ReplayScript::from_ron(
            r#"(
                steps: [
                    Load(name: "plate"),
                    Frame(t: 0.0, hits: [(0.0, -1.0, -1.5)]),
                    Down(t: 0.1, slot: Primary, at: (0.0, 0.0, -0.3)),
                    Up(t: 0.2, slot: Primary),
                    Tick(t: 0.5),
                    EndSession,
                ],
            )"#,
        )
        .unwrap();

        assert!(script.hit_test_supported);
        assert_eq!(script.steps.len(), 6);
        assert_eq!(
            script.steps[0],
            ReplayStep::Load {
                name: "plate".into(),
                clips: vec![]
            }
        );
        assert_eq!(script.steps[5], ReplayStep::EndSession);
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(
            ReplayScript::from_ron("(steps: [Jump])"),
            Err(ReplayError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            ReplayScript::load("/nonexistent/ar-place/script.ron"),
            Err(ReplayError::Io(_))
        ));
    }

    #[test]
    fn test_scripted_session_hands_out_fresh_ids() {
        let session = ScriptedSession::new(true);
        let first = Rc::new(Cell::new(0));
        let out = Rc::clone(&first);
        session.request_reference_space(
            ReferenceSpaceKind::Viewer,
            Box::new(move |space| out.set(space.map(|s| s.id).unwrap_or(0))),
        );
        let second = Rc::new(Cell::new(0));
        let out = Rc::clone(&second);
        session.request_reference_space(
            ReferenceSpaceKind::Viewer,
            Box::new(move |space| out.set(space.map(|s| s.id).unwrap_or(0))),
        );

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }
}
