use crate::frame::FrameDraw;
use glam::EulerRot;
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a composed frame and produces output. It never reaches
/// back into controller state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &FrameDraw) -> Self::Output;
}

/// Text renderer for headless runs and tests.
///
/// Lists the camera, the model rotation and each vertex with its color and
/// clip-space position.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameDraw) -> String {
        let mut out = String::new();
        let c = frame.clear;
        let _ = writeln!(
            out,
            "clear=({:.3}, {:.3}, {:.3}, {:.3})",
            c.r, c.g, c.b, c.a
        );
        let _ = writeln!(
            out,
            "camera: distance={:.1} aspect={:.3} fov={:.1}deg",
            frame.view.distance,
            frame.view.aspect,
            frame.view.fov.to_degrees()
        );
        let (_, rotation, _) = frame.model.to_scale_rotation_translation();
        let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
        let _ = writeln!(
            out,
            "model: yaw={:.1}deg pitch={:.1}deg",
            yaw.to_degrees(),
            pitch.to_degrees()
        );
        for (i, (vertex, clip)) in frame
            .vertices
            .iter()
            .zip(frame.clip_positions())
            .enumerate()
        {
            let p = vertex.position;
            let col = vertex.color;
            let _ = writeln!(
                out,
                "  v{i} pos=({:.2}, {:.2}, {:.2}) rgba=({:.3}, {:.3}, {:.3}, {:.3}) clip=({:.3}, {:.3}, {:.3}, {:.3})",
                p.x, p.y, p.z, col.r, col.g, col.b, col.a, clip.x, clip.y, clip.z, clip.w
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trilab_kernel::{RotateController, TintController};

    #[test]
    fn lists_three_vertices() {
        let frame = FrameDraw::compose(&RotateController::new(), 1.0).unwrap();
        let out = DebugTextRenderer::new().render(&frame);
        assert!(out.contains("distance=250.0"));
        assert!(out.contains("v0 pos=(-75.00, 0.00, 75.00)"));
        assert!(out.contains("  v2 "));
        assert!(!out.contains("  v3 "));
    }

    #[test]
    fn tint_renders_white_opaque() {
        let tint = TintController::new(Some(trilab_common::Triangle::default()));
        let frame = FrameDraw::compose(&tint, 1.0).unwrap();
        let out = DebugTextRenderer::new().render(&frame);
        assert!(out.contains("rgba=(1.000, 1.000, 1.000, 1.000)"));
        assert!(out.contains("fov=45.0deg"));
    }

    #[test]
    fn prints_model_rotation() {
        let mut frame = FrameDraw::compose(&RotateController::new(), 1.0).unwrap();
        frame.model = glam::Mat4::from_rotation_y(30f32.to_radians())
            * glam::Mat4::from_rotation_x((-20f32).to_radians());
        let out = DebugTextRenderer::new().render(&frame);
        assert!(out.contains("model: yaw=30.0deg pitch=-20.0deg"), "{out}");
    }
}
