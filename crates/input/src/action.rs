use trilab_common::ColorTarget;

/// A high-level action a frame controller consumes.
///
/// Every action is level-triggered: it is produced on each tick its key is
/// held. Edge behavior (like the menu reprint) is the controller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the frame loop.
    Quit,
    /// Grow the camera distance.
    ZoomIn,
    /// Shrink the camera distance.
    ZoomOut,
    /// Make the triangle more opaque.
    RaiseAlpha,
    /// Make the triangle more transparent.
    LowerAlpha,
    /// Pick a new color the triangle converges toward.
    Target(ColorTarget),
    /// Snap the current color back to white.
    ResetColor,
    /// Report the current color on the console.
    PrintColor,
    /// Reprint the control menu.
    ShowMenu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_actions_compare_by_color() {
        assert_eq!(
            Action::Target(ColorTarget::Red),
            Action::Target(ColorTarget::Red)
        );
        assert_ne!(
            Action::Target(ColorTarget::Red),
            Action::Target(ColorTarget::Green)
        );
    }

    #[test]
    fn zoom_actions_are_distinct() {
        assert!(matches!(Action::ZoomIn, Action::ZoomIn));
        assert_ne!(Action::ZoomIn, Action::ZoomOut);
    }
}
