//! Input actor: dedicated thread polling terminal key events.
//!
//! The actor writes every key event into the adapter's [`KeyState`] and
//! forwards presses over a channel so a blocking prompt can consume them as
//! typed text.

use crate::input::{Key, KeyCode, KeyModifiers, KeyState};
use crossbeam_channel::{Sender, TrySendError};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::{debug, warn};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Input actor that polls terminal events.
#[derive(Debug)]
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// * `keys` - Key state receiving press and release notifications.
    /// * `sender` - Channel receiving every press, for prompt input.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    /// * `synthetic_release` - When set, a press with no further key event
    ///   within this delay is followed by a release. Used when the terminal
    ///   cannot report releases itself.
    pub fn spawn(
        keys: KeyState,
        sender: Sender<Key>,
        poll_timeout: Duration,
        synthetic_release: Option<Duration>,
    ) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("pixel-adapter-input".to_string())
            .spawn(move || {
                Self::run_loop(&keys, &sender, &shutdown_clone, poll_timeout, synthetic_release);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(
        keys: &KeyState,
        sender: &Sender<Key>,
        shutdown: &AtomicBool,
        poll_timeout: Duration,
        synthetic_release: Option<Duration>,
    ) {
        let mut releases = ReleaseTracker::new(synthetic_release);

        while !shutdown.load(Ordering::Relaxed) {
            releases.tick(keys, Instant::now());

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key_event)) => {
                        let Some(key) = releases.on_event(keys, &key_event, Instant::now()) else {
                            continue;
                        };
                        if let Err(TrySendError::Disconnected(_)) = sender.try_send(key) {
                            debug!("input receiver dropped, stopping input thread");
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("failed to read terminal event: {e}"),
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("failed to poll terminal events: {e}");
                    thread::sleep(poll_timeout);
                }
            }
        }
    }
}

/// Applies key events to a [`KeyState`], standing in for key releases the
/// terminal does not report.
///
/// With a delay set, every press arms a pending release. The pending release
/// fires once the delay passes with no further key event, is fired early
/// when a different key is pressed, and is dropped when the terminal reports
/// the release itself.
#[derive(Debug, Clone)]
pub struct ReleaseTracker {
    delay: Option<Duration>,
    pending: Option<(Key, Instant)>,
}

impl ReleaseTracker {
    /// Create a tracker; `None` means the terminal reports releases.
    pub const fn new(delay: Option<Duration>) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The key whose release is pending, if any.
    pub fn pending(&self) -> Option<Key> {
        self.pending.map(|(key, _)| key)
    }

    /// Fire the pending release if its deadline has passed at `now`.
    pub fn tick(&mut self, keys: &KeyState, now: Instant) {
        if let Some((key, deadline)) = self.pending {
            if now >= deadline {
                keys.release(key);
                self.pending = None;
            }
        }
    }

    /// Apply one terminal key event received at `now`.
    ///
    /// Returns the key for presses and repeats, `None` for releases and
    /// keys with no [`Key`] counterpart.
    pub fn on_event(&mut self, keys: &KeyState, event: &KeyEvent, now: Instant) -> Option<Key> {
        let key = convert_key(event)?;
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if let Some((previous, _)) = self.pending.take() {
                    if previous != key {
                        keys.release(previous);
                    }
                }
                keys.press(key);
                self.pending = self.delay.map(|delay| (key, now + delay));
                Some(key)
            }
            KeyEventKind::Release => {
                if self.pending() == Some(key) {
                    self.pending = None;
                }
                keys.release(key);
                None
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm key event to a [`Key`].
///
/// Shift is dropped from character keys since the character already carries
/// the case. Back-tab becomes Shift+Tab. Keys with no DOM counterpart yield
/// `None`.
pub fn convert_key(event: &KeyEvent) -> Option<Key> {
    let mut modifiers = convert_modifiers(event.modifiers);
    let code = match event.code {
        event::KeyCode::Char(c) => {
            modifiers.remove(KeyModifiers::SHIFT);
            KeyCode::Char(c)
        }
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::Tab
        }
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    };
    Some(Key::new(code, modifiers))
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    let mut modifiers = KeyModifiers::empty();
    modifiers.set(KeyModifiers::SHIFT, mods.contains(event::KeyModifiers::SHIFT));
    modifiers.set(KeyModifiers::CONTROL, mods.contains(event::KeyModifiers::CONTROL));
    modifiers.set(KeyModifiers::ALT, mods.contains(event::KeyModifiers::ALT));
    modifiers.set(KeyModifiers::SUPER, mods.contains(event::KeyModifiers::SUPER));
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: event::KeyCode, mods: event::KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_convert_char_drops_shift() {
        let key = convert_key(&event(event::KeyCode::Char('A'), event::KeyModifiers::SHIFT));
        assert_eq!(key, Some(Key::char('A')));
        assert_eq!(key.map(|k| k.to_string()).as_deref(), Some("A"));
    }

    #[test]
    fn test_convert_named_keys() {
        let up = convert_key(&event(event::KeyCode::Up, event::KeyModifiers::NONE));
        assert_eq!(up.map(|k| k.to_string()).as_deref(), Some("ArrowUp"));

        let esc = convert_key(&event(event::KeyCode::Esc, event::KeyModifiers::NONE));
        assert_eq!(esc, Some(Key::plain(KeyCode::Esc)));

        let ctrl_s = convert_key(&event(event::KeyCode::Char('s'), event::KeyModifiers::CONTROL));
        assert_eq!(ctrl_s, Some(Key::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_convert_back_tab() {
        let key = convert_key(&event(event::KeyCode::BackTab, event::KeyModifiers::SHIFT));
        assert_eq!(key, Some(Key::new(KeyCode::Tab, KeyModifiers::SHIFT)));
    }

    fn press(code: event::KeyCode) -> KeyEvent {
        event(code, event::KeyModifiers::NONE)
    }

    fn release(code: event::KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, event::KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_synthetic_release_after_delay() {
        let keys = KeyState::new();
        let mut releases = ReleaseTracker::new(Some(Duration::from_millis(150)));
        let start = Instant::now();

        let pressed = releases.on_event(&keys, &press(event::KeyCode::Char('a')), start);
        assert_eq!(pressed, Some(Key::char('a')));
        assert_eq!(releases.pending(), Some(Key::char('a')));

        releases.tick(&keys, start + Duration::from_millis(100));
        assert_eq!(keys.current(), Some(Key::char('a')));

        releases.tick(&keys, start + Duration::from_millis(150));
        assert_eq!(keys.current(), None);
        assert!(keys.held().is_empty());
        assert_eq!(releases.pending(), None);
    }

    #[test]
    fn test_repeat_extends_deadline() {
        let keys = KeyState::new();
        let mut releases = ReleaseTracker::new(Some(Duration::from_millis(150)));
        let start = Instant::now();

        releases.on_event(&keys, &press(event::KeyCode::Up), start);
        releases.on_event(&keys, &press(event::KeyCode::Up), start + Duration::from_millis(100));
        releases.tick(&keys, start + Duration::from_millis(200));
        assert_eq!(keys.current(), Some(Key::plain(KeyCode::Up)));

        releases.tick(&keys, start + Duration::from_millis(250));
        assert_eq!(keys.current(), None);
    }

    #[test]
    fn test_new_press_releases_previous() {
        let keys = KeyState::new();
        let mut releases = ReleaseTracker::new(Some(Duration::from_millis(150)));
        let start = Instant::now();

        releases.on_event(&keys, &press(event::KeyCode::Char('a')), start);
        releases.on_event(&keys, &press(event::KeyCode::Char('b')), start);
        assert_eq!(keys.current(), Some(Key::char('b')));
        assert_eq!(keys.held(), vec![KeyCode::Char('b')]);
        assert_eq!(releases.pending(), Some(Key::char('b')));
    }

    #[test]
    fn test_reported_release_cancels_pending() {
        let keys = KeyState::new();
        let mut releases = ReleaseTracker::new(Some(Duration::from_millis(150)));
        let start = Instant::now();

        releases.on_event(&keys, &press(event::KeyCode::Char('a')), start);
        let released = releases.on_event(&keys, &release(event::KeyCode::Char('a')), start);
        assert_eq!(released, None);
        assert_eq!(releases.pending(), None);
        assert_eq!(keys.current(), None);

        // A later press is not cleared by the stale deadline.
        releases.on_event(&keys, &press(event::KeyCode::Char('b')), start + Duration::from_millis(10));
        releases.tick(&keys, start + Duration::from_millis(150));
        assert_eq!(keys.current(), Some(Key::char('b')));
    }

    #[test]
    fn test_reported_releases_never_synthesized() {
        let keys = KeyState::new();
        let mut releases = ReleaseTracker::new(None);
        let start = Instant::now();

        releases.on_event(&keys, &press(event::KeyCode::Char('a')), start);
        assert_eq!(releases.pending(), None);
        releases.tick(&keys, start + Duration::from_secs(10));
        assert_eq!(keys.current(), Some(Key::char('a')));
    }

    #[test]
    fn test_shifted_press_released_unshifted() {
        let keys = KeyState::new();
        let mut releases = ReleaseTracker::new(None);
        let start = Instant::now();

        let shifted = event(event::KeyCode::Char('A'), event::KeyModifiers::SHIFT);
        releases.on_event(&keys, &shifted, start);
        releases.on_event(&keys, &release(event::KeyCode::Char('a')), start);
        assert!(keys.held().is_empty());
    }

    #[test]
    fn test_convert_unmapped() {
        assert_eq!(convert_key(&event(event::KeyCode::Null, event::KeyModifiers::NONE)), None);
        assert_eq!(convert_key(&event(event::KeyCode::CapsLock, event::KeyModifiers::NONE)), None);
    }
}
