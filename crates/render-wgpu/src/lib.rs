//! wgpu render backend for the trilab exercises.
//!
//! Draws the three vertices of a `FrameDraw` with per-vertex color, depth
//! testing and source-alpha blending. The vertex buffer is rewritten every
//! frame, the way an immediate-mode renderer re-emits its vertices.
//!
//! # Invariants
//! - Renderer never mutates controller state.
//! - Projection follows the surface aspect; depth is resized with the surface.

mod gpu;
mod shaders;

pub use gpu::{DEPTH_FORMAT, SAMPLE_COUNT, TriangleRenderer, wgpu_color};
