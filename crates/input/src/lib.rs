//! Input: per-tick keyboard/mouse snapshots mapped to frame actions.
//!
//! # Invariants
//! - Controllers consume actions, never raw window events.
//! - Actions are produced in a fixed check order per binding table.

pub mod action;
pub mod bindings;
pub mod snapshot;

pub use action::Action;
pub use bindings::Bindings;
pub use snapshot::{InputSnapshot, Key};

pub fn crate_info() -> &'static str {
    "trilab-input v0.1.0"
}
