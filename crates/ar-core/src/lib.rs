//! AR Placement Core
//!
//! Tracking-side data structures for placing a virtual object on real-world
//! surfaces:
//! - Pose / ObjectTransform: tracked and scene transforms
//! - XrSession / XrFrame: the host AR runtime seam
//! - HitTestTracker: per-session hit-test source and per-frame surface pose
//! - ReticleState: placement marker mirroring the latest surface pose
//! - PlacedObject / SceneGraph: the placeable object and its scene attachment

pub mod object;
pub mod reticle;
pub mod scene;
pub mod types;
pub mod xr;

pub use hit_test::*;
pub use object::*;
pub use reticle::*;
pub use scene::{Scene, SceneEntity, SceneGraph};
pub use types::*;
pub use xr::*;
