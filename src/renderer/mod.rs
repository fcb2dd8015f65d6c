//! Rendering
//!
//! `scene` decides what is visible, `overlay` when. The WebGPU pipeline draws
//! the circles with signed distance fields in a single fullscreen pass; text
//! overlays are left to the host page.

pub mod overlay;
pub mod scene;
pub mod sdf_pipeline;

pub use overlay::OverlayAnimator;
pub use scene::{CircleDraw, Fill, Overlay, Scene, build_scene, colors};
pub use sdf_pipeline::SdfRenderState;
