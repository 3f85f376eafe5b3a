use crate::action::Action;
use crate::snapshot::{InputSnapshot, Key};
use trilab_common::ColorTarget;

/// Ordered key → action table.
///
/// `actions` walks the table front to back, so the order entries are listed
/// in is the order actions are reported. Color targets rely on this: with R,
/// G and B all held, blue is reported last and wins.
#[derive(Debug, Clone)]
pub struct Bindings {
    entries: Vec<(Key, Action)>,
}

impl Bindings {
    pub fn new(entries: Vec<(Key, Action)>) -> Self {
        Self { entries }
    }

    /// Quit and zoom only.
    pub fn rotate() -> Self {
        Self::new(vec![
            (Key::Escape, Action::Quit),
            (Key::S, Action::ZoomOut),
            (Key::W, Action::ZoomIn),
        ])
    }

    /// Full control set: zoom, alpha, color targets, reset, report, menu.
    pub fn tint() -> Self {
        Self::new(vec![
            (Key::Escape, Action::Quit),
            (Key::S, Action::ZoomOut),
            (Key::W, Action::ZoomIn),
            (Key::A, Action::RaiseAlpha),
            (Key::D, Action::LowerAlpha),
            (Key::R, Action::Target(ColorTarget::Red)),
            (Key::G, Action::Target(ColorTarget::Green)),
            (Key::B, Action::Target(ColorTarget::Blue)),
            (Key::X, Action::ResetColor),
            (Key::V, Action::PrintColor),
            (Key::M, Action::ShowMenu),
        ])
    }

    pub fn entries(&self) -> &[(Key, Action)] {
        &self.entries
    }

    /// Actions whose keys are held in `snapshot`, in table order.
    pub fn actions(&self, snapshot: &InputSnapshot) -> Vec<Action> {
        let actions: Vec<Action> = self
            .entries
            .iter()
            .filter(|(key, _)| snapshot.is_held(*key))
            .map(|(_, action)| *action)
            .collect();
        if !actions.is_empty() {
            tracing::trace!(?actions, "bound actions");
        }
        actions
    }

    /// First key bound to `action`, if any.
    pub fn key_for(&self, action: Action) -> Option<Key> {
        self.entries
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(key, _)| *key)
    }
}
