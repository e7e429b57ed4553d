use std::collections::HashSet;

/// Keys the demo reacts to. Everything else is dropped at the platform edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Q,
    E,
    W,
    S,
    A,
    D,
    Escape,
}

/// Set of currently held keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    held: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. Returns `true` if it was not already held,
    /// which filters out OS auto-repeat.
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn release(&mut self, key: Key) -> bool {
        self.held.remove(&key)
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl FromIterator<Key> for KeyboardState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

/// Per-iteration snapshot handed from the event pump to the mapper.
#[derive(Debug, Clone)]
pub struct FrameContext {
    /// Seconds since the previous frame.
    pub frame_time: f32,
    pub keys: KeyboardState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut kb = KeyboardState::new();
        assert!(kb.press(Key::Left));
        assert!(!kb.press(Key::Left));
        assert!(kb.is_down(Key::Left));
        assert!(kb.release(Key::Left));
        assert!(!kb.is_down(Key::Left));
        assert!(kb.is_empty());
    }

    #[test]
    fn collect_from_keys() {
        let kb: KeyboardState = [Key::W, Key::D].into_iter().collect();
        assert!(kb.is_down(Key::W));
        assert!(kb.is_down(Key::D));
        assert!(!kb.is_down(Key::S));
    }

    #[test]
    fn clear_drops_everything() {
        let mut kb: KeyboardState = [Key::Q, Key::E].into_iter().collect();
        kb.clear();
        assert!(kb.is_empty());
    }
}
