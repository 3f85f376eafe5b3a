use crate::scene::{Camera, ColorState, Orientation};
use glam::Vec2;
use trilab_common::{ColoredVertex, Rgb, Rgba};
use trilab_input::{Action, Bindings, InputSnapshot};

/// Input for one update tick: the sampled cursor, whether the primary
/// button is held, and the actions whose keys are held.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub cursor: Vec2,
    pub dragging: bool,
    pub actions: Vec<Action>,
}

impl FrameInput {
    /// Sample a snapshot through a binding table.
    pub fn sample(snapshot: &InputSnapshot, bindings: &Bindings) -> Self {
        Self {
            cursor: snapshot.cursor(),
            dragging: snapshot.primary_button(),
            actions: bindings.actions(snapshot),
        }
    }

    pub fn has(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

/// A console message a tick asks the host to print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    /// The control menu.
    Menu,
    /// The current color, on request.
    ColorValues(Rgb),
    /// The current color was snapped back to white.
    ColorReset,
}

/// What a tick produced besides new state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// The loop should end; no further updates or renders.
    pub exit: bool,
    pub notices: Vec<Notice>,
}

impl FrameReport {
    pub fn exit() -> Self {
        Self {
            exit: true,
            notices: Vec::new(),
        }
    }
}

/// Rising-edge detector for the menu key: fires once per press-and-release.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuLatch {
    shown: bool,
}

impl MenuLatch {
    /// Feed the key's held state; returns true on the tick it goes down.
    pub fn observe(&mut self, held: bool) -> bool {
        let fire = held && !self.shown;
        self.shown = held;
        fire
    }
}

/// Camera and orientation together with the cursor position recorded on the
/// previous tick. Both exercises drive their view through this.
#[derive(Debug, Clone, Copy)]
pub struct OrbitRig {
    pub camera: Camera,
    pub orientation: Orientation,
    previous_cursor: Vec2,
}

impl OrbitRig {
    pub fn new(distance: f32) -> Self {
        Self {
            camera: Camera::new(distance),
            orientation: Orientation::default(),
            previous_cursor: Vec2::ZERO,
        }
    }

    /// Record the cursor without rotating, so the first delta is relative to
    /// where the cursor was at load.
    pub fn prime(&mut self, cursor: Vec2) {
        self.previous_cursor = cursor;
    }

    /// Zoom from held keys, rotate from the cursor delta while dragging, then
    /// remember the cursor for the next tick.
    pub fn apply(&mut self, input: &FrameInput) {
        let delta = input.cursor - self.previous_cursor;

        if input.has(Action::ZoomOut) {
            self.camera.zoom_out();
        }
        if input.has(Action::ZoomIn) {
            self.camera.zoom_in();
        }

        if input.dragging {
            self.orientation.drag(delta.x, delta.y);
        }

        self.previous_cursor = input.cursor;
    }
}

/// The per-exercise frame loop controller.
///
/// The host calls `load` once, then `step` once per update tick and reads
/// the view accessors once per render.
pub trait FrameController {
    /// Short exercise name for titles and logs.
    fn name(&self) -> &'static str;

    /// Key table this exercise samples input through.
    fn bindings(&self) -> &Bindings;

    /// Prime the cursor and return anything to print at startup.
    fn load(&mut self, cursor: Vec2) -> Vec<Notice>;

    /// Advance one tick.
    fn step(&mut self, input: &FrameInput) -> FrameReport;

    fn rig(&self) -> &OrbitRig;

    /// Color state, for exercises that have one.
    fn color(&self) -> Option<&ColorState> {
        None
    }

    /// The triangle to emit this frame; `None` when geometry is absent.
    fn triangle(&self) -> Option<[ColoredVertex; 3]>;

    fn clear_color(&self) -> Rgba;

    /// Ticks stepped so far, not counting the quitting tick.
    fn ticks(&self) -> u64;

    fn is_finished(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use trilab_input::Key;

    fn held(cursor: Vec2, dragging: bool, actions: &[Action]) -> FrameInput {
        FrameInput {
            cursor,
            dragging,
            actions: actions.to_vec(),
        }
    }

    #[test]
    fn sample_reads_snapshot() {
        let mut snap = InputSnapshot::new();
        snap.press(Key::Escape);
        snap.set_primary_button(true);
        snap.set_cursor(Vec2::new(4.0, 5.0));
        let input = FrameInput::sample(&snap, &Bindings::rotate());
        assert!(input.has(Action::Quit));
        assert!(input.dragging);
        assert_eq!(input.cursor, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn menu_latch_fires_once_per_press() {
        let mut latch = MenuLatch::default();
        assert!(latch.observe(true));
        assert!(!latch.observe(true));
        assert!(!latch.observe(true));
        assert!(!latch.observe(false));
        assert!(latch.observe(true));
    }

    #[test]
    fn rig_zoom_sequence() {
        let mut rig = OrbitRig::new(100.0);
        for _ in 0..4 {
            rig.apply(&held(Vec2::ZERO, false, &[Action::ZoomOut]));
        }
        for _ in 0..7 {
            rig.apply(&held(Vec2::ZERO, false, &[Action::ZoomIn]));
        }
        assert_eq!(rig.camera.distance, 100.0 - 5.0 * 4.0 + 5.0 * 7.0);
    }

    #[test]
    fn rig_both_zoom_keys_cancel() {
        let mut rig = OrbitRig::new(60.0);
        rig.apply(&held(Vec2::ZERO, false, &[Action::ZoomOut, Action::ZoomIn]));
        assert_eq!(rig.camera.distance, 60.0);
    }

    #[test]
    fn rig_rotates_only_while_dragging() {
        let mut rig = OrbitRig::new(60.0);
        rig.apply(&held(Vec2::new(10.0, 5.0), true, &[]));
        rig.apply(&held(Vec2::new(50.0, 50.0), false, &[]));
        rig.apply(&held(Vec2::new(45.0, 60.0), true, &[]));

        // 10*0.2 + (-5)*0.2, and 5*0.2 + 10*0.2; the undragged move is skipped.
        assert!((rig.orientation.yaw - 1.0).abs() < 1e-5);
        assert!((rig.orientation.pitch - 3.0).abs() < 1e-5);
    }

    #[test]
    fn prime_sets_delta_origin() {
        let mut rig = OrbitRig::new(60.0);
        rig.prime(Vec2::new(100.0, 100.0));
        rig.apply(&held(Vec2::new(105.0, 100.0), true, &[]));
        assert!((rig.orientation.yaw - 1.0).abs() < 1e-5);
        assert_eq!(rig.orientation.pitch, 0.0);
    }
}
