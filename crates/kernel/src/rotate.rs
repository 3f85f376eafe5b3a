use crate::controller::{FrameController, FrameInput, FrameReport, Notice, OrbitRig};
use glam::{Vec2, Vec3};
use trilab_common::{ColoredVertex, Rgba, Triangle};
use trilab_input::{Action, Bindings};

const START_DISTANCE: f32 = 250.0;
const HALF_SIZE: f32 = 75.0;

/// First exercise: a fixed triangle with red, green and blue corners that
/// the user zooms and drags around.
#[derive(Debug, Clone)]
pub struct RotateController {
    rig: OrbitRig,
    triangle: Triangle,
    bindings: Bindings,
    ticks: u64,
    finished: bool,
}

impl RotateController {
    pub fn new() -> Self {
        Self {
            rig: OrbitRig::new(START_DISTANCE),
            triangle: Triangle::new(
                Vec3::new(-HALF_SIZE, 0.0, HALF_SIZE),
                Vec3::new(HALF_SIZE, 0.0, HALF_SIZE),
                Vec3::new(0.0, HALF_SIZE, 0.0),
            ),
            bindings: Bindings::rotate(),
            ticks: 0,
            finished: false,
        }
    }
}

impl Default for RotateController {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameController for RotateController {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn load(&mut self, cursor: Vec2) -> Vec<Notice> {
        self.rig.prime(cursor);
        Vec::new()
    }

    fn step(&mut self, input: &FrameInput) -> FrameReport {
        if self.finished {
            return FrameReport::exit();
        }
        if input.has(Action::Quit) {
            tracing::debug!(ticks = self.ticks, "rotate: quit requested");
            self.finished = true;
            return FrameReport::exit();
        }

        self.rig.apply(input);
        self.ticks += 1;
        FrameReport::default()
    }

    fn rig(&self) -> &OrbitRig {
        &self.rig
    }

    fn triangle(&self) -> Option<[ColoredVertex; 3]> {
        Some(self.triangle.per_vertex([
            Rgba::from_u8(255, 0, 0),
            Rgba::from_u8(0, 128, 0),
            Rgba::from_u8(0, 0, 255),
        ]))
    }

    fn clear_color(&self) -> Rgba {
        // cornflower blue
        Rgba::from_u8(100, 149, 237)
    }

    fn ticks(&self) -> u64 {
        self.ticks
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
