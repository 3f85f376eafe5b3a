//! Developer tooling: console text for the exercises and a read-only scene
//! inspector.
//!
//! # Invariants
//! - Tools only read controller state; nothing here mutates it.

pub mod console;
pub mod inspector;

pub use console::{MENU, color_report, menu_text, notice_text};
pub use inspector::{SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "trilab-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
