//! Rendering adapter: renderer-agnostic frame description.
//!
//! # Invariants
//! - Renderers never mutate controller state.
//! - A frame derives only from controller state and the surface aspect ratio.
//!
//! `FrameDraw` is what any backend consumes: clear color, view-projection,
//! model transform and three colored vertices. The text renderer here is used
//! by the CLI and tests; the GPU backend lives in `trilab-render-wgpu`.

mod frame;
mod renderer;

pub use frame::{
    FAR_PLANE, FIELD_OF_VIEW, FrameDraw, NEAR_PLANE, RenderError, RenderView, model_matrix,
};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "trilab-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
