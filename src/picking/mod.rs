//! Render-based picking: which polygons lie under a square window on screen.
//!
//! [`PickEngine`] narrows the camera projection to the pick window and asks
//! a [`PickBackend`] to render the mesh with each polygon tagged by its
//! index. [`SoftwareBackend`] does that on the CPU; a GPU renderer can plug
//! in through the same trait.

mod backend;
mod camera;
mod engine;
mod software;
mod viewport;

pub use backend::{PickBackend, PickPass};
pub use camera::{Camera, ProjectionParams};
pub use engine::{PickEngine, PickSettings, SelectionMode};
pub use software::SoftwareBackend;
pub use viewport::{PickRegion, Viewport, ViewportSize};
