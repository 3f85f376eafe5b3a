use trilab_common::Rgb;
use trilab_kernel::FrameController;

/// Read-only queries against a running exercise, for logs and overlays.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(controller: &dyn FrameController) -> SceneSummary {
        let rig = controller.rig();
        let color = controller.color();
        SceneSummary {
            exercise: controller.name(),
            ticks: controller.ticks(),
            distance: rig.camera.distance,
            yaw: rig.orientation.yaw,
            pitch: rig.orientation.pitch,
            current: color.map(|c| c.current),
            target: color.map(|c| c.target),
            alpha: color.map(|c| c.alpha),
            has_geometry: controller.triangle().is_some(),
            finished: controller.is_finished(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub exercise: &'static str,
    pub ticks: u64,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub current: Option<Rgb>,
    pub target: Option<Rgb>,
    pub alpha: Option<f32>,
    pub has_geometry: bool,
    pub finished: bool,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: tick={} distance={:.1} yaw={:.1} pitch={:.1}",
            self.exercise, self.ticks, self.distance, self.yaw, self.pitch
        )?;
        if let (Some(c), Some(t), Some(a)) = (self.current, self.target, self.alpha) {
            write!(
                f,
                " rgb=({:.3}, {:.3}, {:.3}) target=({:.1}, {:.1}, {:.1}) alpha={:.2}",
                c.r, c.g, c.b, t.r, t.g, t.b, a
            )?;
        }
        if !self.has_geometry {
            write!(f, " [no geometry]")?;
        }
        if self.finished {
            write!(f, " [finished]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use trilab_common::{ColorTarget, Triangle};
    use trilab_input::Action;
    use trilab_kernel::{FrameInput, RotateController, TintController};

    #[test]
    fn rotate_summary_has_no_color() {
        let summary = SceneInspector::summary(&RotateController::new());
        assert_eq!(summary.distance, 250.0);
        assert_eq!(summary.ticks, 0);
        assert!(summary.alpha.is_none());
        assert!(summary.has_geometry);
        assert!(!summary.to_string().contains("rgb="));
    }

    #[test]
    fn tint_summary_tracks_color() {
        let mut tint = TintController::new(Some(Triangle::default()));
        tint.step(&FrameInput {
            cursor: Vec2::ZERO,
            dragging: false,
            actions: vec![Action::Target(ColorTarget::Red)],
        });
        let summary = SceneInspector::summary(&tint);
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.target, Some(Rgb::RED));
        assert_eq!(summary.alpha, Some(1.0));
        assert!(summary.to_string().contains("target=(1.0, 0.0, 0.0)"));
    }

    #[test]
    fn absent_geometry_is_flagged() {
        let summary = SceneInspector::summary(&TintController::new(None));
        assert!(!summary.has_geometry);
        assert!(summary.to_string().ends_with("[no geometry]"));
    }
}
