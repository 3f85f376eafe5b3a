use trilab_common::{ColorTarget, Rgb, Rgba};

/// Distance change per tick while a zoom key is held.
pub const ZOOM_STEP: f32 = 5.0;
/// Degrees of rotation per unit of cursor motion while dragging.
pub const ROTATION_SENSITIVITY: f32 = 0.2;
/// Fraction of the remaining gap the color closes each tick.
pub const COLOR_SPEED: f32 = 0.05;
/// Alpha change per tick while an alpha key is held.
pub const ALPHA_STEP: f32 = 0.05;

/// Eye distance from the origin along +Z.
///
/// Unbounded in both directions. Zero or negative distances are reachable
/// and left as they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f32,
}

impl Camera {
    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    /// Grow the distance; the eye moves away from the origin.
    pub fn zoom_in(&mut self) {
        self.distance += ZOOM_STEP;
    }

    /// Shrink the distance; the eye moves toward (and possibly past) the origin.
    pub fn zoom_out(&mut self) {
        self.distance -= ZOOM_STEP;
    }
}

/// Accumulated model rotation in degrees. Never wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation about the vertical (Y) axis.
    pub yaw: f32,
    /// Rotation about the horizontal (X) axis.
    pub pitch: f32,
}

impl Orientation {
    /// Apply one drag sample: horizontal motion turns about Y, vertical about X.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * ROTATION_SENSITIVITY;
        self.pitch += dy * ROTATION_SENSITIVITY;
    }
}

/// Current color, the color it converges toward, and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    pub current: Rgb,
    pub target: Rgb,
    pub alpha: f32,
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            current: Rgb::WHITE,
            target: Rgb::WHITE,
            alpha: 1.0,
        }
    }
}

impl ColorState {
    pub fn raise_alpha(&mut self) {
        if self.alpha < 1.0 {
            self.alpha += ALPHA_STEP;
        }
    }

    pub fn lower_alpha(&mut self) {
        if self.alpha > 0.0 {
            self.alpha -= ALPHA_STEP;
        }
    }

    pub fn set_target(&mut self, target: ColorTarget) {
        self.target = target.rgb();
    }

    /// Close `COLOR_SPEED` of the gap between current and target.
    pub fn converge(&mut self) {
        self.current = self.current.lerp_toward(self.target, COLOR_SPEED);
    }

    /// Snap the current color to white. Target and alpha are untouched, so
    /// the color drifts back toward the target on the following ticks.
    pub fn reset(&mut self) {
        self.current = Rgb::WHITE;
    }

    pub fn rgba(&self) -> Rgba {
        self.current.with_alpha(self.alpha)
    }
}
