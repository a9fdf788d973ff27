//! Key state shared between the host's input dispatch and the engine's polls.
//!
//! The host calls [`KeyState::press`] and [`KeyState::release`] from whatever
//! context it dispatches key events on; the engine reads
//! [`KeyState::current`] at its own pace. Nothing is queued: a press that is
//! overwritten by another press before the engine polls is lost.

use super::key::{Key, KeyCode};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Slots {
    /// Most recent press, cleared by any release.
    last: Option<Key>,
    /// Physical codes of every key currently held down.
    held: HashSet<KeyCode>,
}

/// Handle to one adapter's key state.
///
/// Cloning yields another handle to the same state. The adapter owns one
/// handle and gives a clone to its host so the host's event handlers can
/// write into it.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    inner: Arc<Mutex<Slots>>,
}

impl KeyState {
    /// Create an empty key state.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Key-press handler: record `key`, overwriting the previous value.
    pub fn press(&self, key: Key) {
        let mut slots = self.lock();
        slots.last = Some(key);
        slots.held.insert(key.code.physical());
    }

    /// Key-release handler: clear the slot.
    ///
    /// The slot is cleared whichever key was released, even if a different
    /// key is still recorded. Only the held-key table tracks the released
    /// key itself, by physical code: modifiers that changed between press
    /// and release do not matter.
    pub fn release(&self, key: Key) {
        let mut slots = self.lock();
        slots.last = None;
        slots.held.remove(&key.code.physical());
    }

    /// The most recently pressed key, without consuming it.
    pub fn current(&self) -> Option<Key> {
        self.lock().last
    }

    /// Reset the slot to none. Held keys stay tracked.
    pub fn clear(&self) {
        self.lock().last = None;
    }

    /// Whether the physical key behind `code` is currently held down.
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.lock().held.contains(&code.physical())
    }

    /// Physical codes of every key currently held down, in no particular
    /// order.
    pub fn held(&self) -> Vec<KeyCode> {
        self.lock().held.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;
    use std::thread;

    #[test]
    fn test_press_then_release() {
        let keys = KeyState::new();
        assert_eq!(keys.current(), None);

        keys.press(Key::char('a'));
        assert_eq!(keys.current(), Some(Key::char('a')));
        // Polling does not consume.
        assert_eq!(keys.current(), Some(Key::char('a')));

        keys.release(Key::char('a'));
        assert_eq!(keys.current(), None);
    }

    #[test]
    fn test_last_press_wins() {
        let keys = KeyState::new();
        keys.press(Key::char('a'));
        keys.press(Key::char('b'));
        assert_eq!(keys.current(), Some(Key::char('b')));
    }

    #[test]
    fn test_release_of_other_key_clears() {
        let keys = KeyState::new();
        keys.press(Key::char('a'));
        keys.press(Key::plain(KeyCode::Up));
        keys.release(Key::char('a'));
        assert_eq!(keys.current(), None);
        // Up is still physically held.
        assert!(keys.is_held(KeyCode::Up));
        assert!(!keys.is_held(KeyCode::Char('a')));
    }

    #[test]
    fn test_clear_keeps_held_table() {
        let keys = KeyState::new();
        keys.press(Key::char('x'));
        keys.clear();
        assert_eq!(keys.current(), None);
        assert_eq!(keys.held(), vec![KeyCode::Char('x')]);
    }

    #[test]
    fn test_release_with_changed_modifiers() {
        let keys = KeyState::new();
        keys.press(Key::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        keys.release(Key::char('s'));
        assert!(keys.held().is_empty());

        // Shift+a reports 'A' going down and 'a' coming up.
        keys.press(Key::char('A'));
        assert!(keys.is_held(KeyCode::Char('a')));
        keys.release(Key::char('a'));
        assert!(keys.held().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let keys = KeyState::new();
        let host_side = keys.clone();
        thread::spawn(move || host_side.press(Key::char('z')))
            .join()
            .unwrap();
        assert_eq!(keys.current(), Some(Key::char('z')));
    }
}
