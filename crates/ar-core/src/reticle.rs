//! Placement reticle state

use crate::types::Pose;

/// Marker following the latest resolved surface pose
///
/// Visibility is the only signal placement logic uses to decide whether a
/// surface is currently available.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReticleState {
    visible: bool,
    transform: Pose,
}

impl ReticleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the latest hit-test result
    ///
    /// The pose is stored as-is; it is already composed in the renderer's
    /// reference space. When hidden the previous transform is kept.
    pub fn update(&mut self, pose: Option<Pose>) {
        match pose {
            Some(pose) => {
                self.visible = true;
                self.transform = pose;
            }
            None => self.visible = false,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn transform(&self) -> Pose {
        self.transform
    }

    /// Current surface pose, if the reticle is showing
    pub fn pose(&self) -> Option<Pose> {
        self.visible.then_some(self.transform)
    }
}
