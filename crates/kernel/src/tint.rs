use crate::controller::{FrameController, FrameInput, FrameReport, MenuLatch, Notice, OrbitRig};
use crate::scene::ColorState;
use glam::Vec2;
use trilab_common::{ColoredVertex, Rgba, Triangle};
use trilab_input::{Action, Bindings};

const START_DISTANCE: f32 = 60.0;

/// Second exercise: a loaded triangle drawn in one color that fades toward a
/// chosen target, with adjustable opacity.
///
/// Geometry may be absent when the vertex file failed to load. The
/// controller still steps normally; `triangle` then returns `None`.
#[derive(Debug, Clone)]
pub struct TintController {
    rig: OrbitRig,
    color: ColorState,
    geometry: Option<Triangle>,
    menu: MenuLatch,
    bindings: Bindings,
    ticks: u64,
    finished: bool,
}

impl TintController {
    pub fn new(geometry: Option<Triangle>) -> Self {
        Self {
            rig: OrbitRig::new(START_DISTANCE),
            color: ColorState::default(),
            geometry,
            menu: MenuLatch::default(),
            bindings: Bindings::tint(),
            ticks: 0,
            finished: false,
        }
    }

    pub fn geometry(&self) -> Option<&Triangle> {
        self.geometry.as_ref()
    }
}

impl FrameController for TintController {
    fn name(&self) -> &'static str {
        "tint"
    }

    fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn load(&mut self, cursor: Vec2) -> Vec<Notice> {
        self.rig.prime(cursor);
        vec![Notice::Menu]
    }

    fn step(&mut self, input: &FrameInput) -> FrameReport {
        if self.finished {
            return FrameReport::exit();
        }
        if input.has(Action::Quit) {
            tracing::debug!(ticks = self.ticks, "tint: quit requested");
            self.finished = true;
            return FrameReport::exit();
        }

        self.rig.apply(input);

        if input.has(Action::RaiseAlpha) {
            self.color.raise_alpha();
        }
        if input.has(Action::LowerAlpha) {
            self.color.lower_alpha();
        }

        // Later bindings overwrite earlier ones: blue beats green beats red.
        for action in &input.actions {
            if let Action::Target(target) = action {
                self.color.set_target(*target);
            }
        }

        self.color.converge();

        let mut report = FrameReport::default();
        if input.has(Action::ResetColor) {
            self.color.reset();
            report.notices.push(Notice::ColorReset);
        }
        if input.has(Action::PrintColor) {
            report.notices.push(Notice::ColorValues(self.color.current));
        }
        if self.menu.observe(input.has(Action::ShowMenu)) {
            report.notices.push(Notice::Menu);
        }

        self.ticks += 1;
        report
    }

    fn rig(&self) -> &OrbitRig {
        &self.rig
    }

    fn color(&self) -> Option<&ColorState> {
        Some(&self.color)
    }

    fn triangle(&self) -> Option<[ColoredVertex; 3]> {
        self.geometry.map(|t| t.uniform(self.color.rgba()))
    }

    fn clear_color(&self) -> Rgba {
        // lavender
        Rgba::from_u8(230, 230, 250)
    }

    fn ticks(&self) -> u64 {
        self.ticks
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
