//! Keyboard state polled by entities during `update`
//!
//! The platform layer calls [`InputState::press`] / [`InputState::release`]
//! from its key events; entities only ever ask [`InputSource::is_pressed`].

/// Keys the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Space,
        Key::Enter,
        Key::Escape,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Anything that can answer "is this key held down right now".
pub trait InputSource {
    fn is_pressed(&self, key: Key) -> bool;
}

/// Held-key table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; Key::ALL.len()],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Release every key (focus lost, say).
    pub fn clear(&mut self) {
        self.held = Default::default();
    }

    pub fn pressed(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|&key| self.is_pressed(key))
    }
}

impl InputSource for InputState {
    fn is_pressed(&self, key: Key) -> bool {
        self.held[key.index()]
    }
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn is_pressed(&self, key: Key) -> bool {
        (**self).is_pressed(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_released_independently() {
        let mut input = InputState::new();
        input.press(Key::Left);
        input.press(Key::Space);
        input.release(Key::Left);

        assert!(!input.is_pressed(Key::Left));
        assert!(input.is_pressed(Key::Space));
        assert_eq!(input.pressed().collect::<Vec<_>>(), vec![Key::Space]);

        input.clear();
        assert_eq!(input.pressed().count(), 0);
    }

    #[test]
    fn key_indices_match_table_order() {
        for (n, key) in Key::ALL.into_iter().enumerate() {
            assert_eq!(key.index(), n);
        }
    }
}
