//! XR runtime abstraction
//!
//! The AR session and per-frame data are provided by the host runtime. These
//! traits describe the small surface the tracker needs: asynchronous
//! reference-space and hit-test-source requests on the session, and hit-test
//! queries on a frame.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Pose;

/// Error type for XR runtime requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XrError {
    #[error("Feature not supported: {0}")]
    Unsupported(String),

    #[error("Reference space unavailable: {0:?}")]
    ReferenceSpaceUnavailable(ReferenceSpaceKind),

    #[error("Session has ended")]
    SessionEnded,

    #[error("Request failed: {0}")]
    Failed(String),
}

/// Result type for XR requests
pub type XrResult<T> = Result<T, XrError>;

/// Callback invoked when an asynchronous session request settles
///
/// Runtimes may invoke it synchronously from inside the request or at any
/// later point on the same thread.
pub type Completion<T> = Box<dyn FnOnce(XrResult<T>)>;

/// Kind of reference space to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferenceSpaceKind {
    /// Origin tracks the viewer
    #[default]
    Viewer,
    /// Origin fixed near the viewer's position at session start
    Local,
    /// Like `Local`, with the origin on the floor
    LocalFloor,
}

/// Handle to a runtime reference space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceSpace {
    pub id: u64,
    pub kind: ReferenceSpaceKind,
}

impl ReferenceSpace {
    pub fn new(id: u64, kind: ReferenceSpaceKind) -> Self {
        Self { id, kind }
    }
}

/// Handle to a runtime hit-test source bound to a reference space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitTestSource {
    pub id: u64,
    pub space: ReferenceSpace,
}

/// Handle to a single hit-test result within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitTestResult(pub u64);

/// An active AR session
pub trait XrSession {
    /// Request a reference space of the given kind
    fn request_reference_space(&self, kind: ReferenceSpaceKind, done: Completion<ReferenceSpace>);

    /// Request a hit-test source casting from the origin of `space`
    fn request_hit_test_source(&self, space: ReferenceSpace, done: Completion<HitTestSource>);
}

/// A single frame of an active AR session
pub trait XrFrame {
    /// Hit-test results for `source`, nearest first
    fn hit_test_results(&self, source: &HitTestSource) -> Vec<HitTestResult>;

    /// Pose of a result expressed in `space`
    fn result_pose(&self, result: &HitTestResult, space: &ReferenceSpace) -> Option<Pose>;
}
