//! Core type definitions

mod pose;
mod transform;

pub use pose::*;
pub use transform::*;
