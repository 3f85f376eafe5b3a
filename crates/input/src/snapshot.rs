use glam::Vec2;
use std::collections::BTreeSet;

/// Keys the exercises react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Escape,
    W,
    S,
    A,
    D,
    R,
    G,
    B,
    X,
    V,
    M,
}

/// Polled input state, kept current by the host's event handlers and read
/// once per update tick.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: BTreeSet<Key>,
    cursor: Vec2,
    primary_button: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Shift the sampled cursor by a raw motion delta.
    pub fn move_cursor(&mut self, dx: f32, dy: f32) {
        self.cursor += Vec2::new(dx, dy);
    }

    pub fn set_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn set_primary_button(&mut self, down: bool) {
        self.primary_button = down;
    }

    pub fn primary_button(&self) -> bool {
        self.primary_button
    }

    /// Drop all held keys and buttons, e.g. when the window loses focus.
    /// The cursor position is kept so the next delta stays continuous.
    pub fn clear_held(&mut self) {
        self.held.clear();
        self.primary_button = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut s = InputSnapshot::new();
        s.press(Key::W);
        assert!(s.is_held(Key::W));
        s.release(Key::W);
        assert!(!s.is_held(Key::W));
    }

    #[test]
    fn cursor_accumulates_motion() {
        let mut s = InputSnapshot::new();
        s.move_cursor(3.0, -2.0);
        s.move_cursor(1.0, 1.0);
        assert_eq!(s.cursor(), Vec2::new(4.0, -1.0));
    }

    #[test]
    fn clear_held_keeps_cursor() {
        let mut s = InputSnapshot::new();
        s.press(Key::R);
        s.set_primary_button(true);
        s.set_cursor(Vec2::new(10.0, 20.0));
        s.clear_held();
        assert!(!s.is_held(Key::R));
        assert!(!s.primary_button());
        assert_eq!(s.cursor(), Vec2::new(10.0, 20.0));
    }
}
