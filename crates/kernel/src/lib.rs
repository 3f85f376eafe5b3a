//! Frame loop kernel: the state each exercise owns and the per-tick update
//! that turns sampled input into new state.
//!
//! # Invariants
//! - All state lives in explicitly constructed controllers; nothing is ambient.
//! - `step` is pure with respect to its input: same state and input, same result.
//! - Once a controller has quit, further steps change nothing.
//! - Color converges toward its target on every tick, keys or not.

pub mod controller;
pub mod rotate;
pub mod scene;
pub mod tint;

pub use controller::{FrameController, FrameInput, FrameReport, MenuLatch, Notice, OrbitRig};
pub use rotate::RotateController;
pub use scene::{
    ALPHA_STEP, COLOR_SPEED, Camera, ColorState, Orientation, ROTATION_SENSITIVITY, ZOOM_STEP,
};
pub use tint::TintController;
