//! Key identifiers.
//!
//! Keys print and parse with the names a browser reports in
//! `KeyboardEvent.key` (`"a"`, `"Enter"`, `"ArrowUp"`, `"Escape"`), with
//! modifiers as a `Ctrl+`/`Alt+`/`Shift+`/`Super+` prefix.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

/// Key codes for keyboard input.
///
/// A simplified subset of crossterm's `KeyCode`, covering what an editing
/// engine binds actions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F24).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
}

const NAMED_CODES: [(&str, KeyCode); 15] = [
    ("Backspace", KeyCode::Backspace),
    ("Enter", KeyCode::Enter),
    ("ArrowLeft", KeyCode::Left),
    ("ArrowRight", KeyCode::Right),
    ("ArrowUp", KeyCode::Up),
    ("ArrowDown", KeyCode::Down),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Tab", KeyCode::Tab),
    ("Delete", KeyCode::Delete),
    ("Insert", KeyCode::Insert),
    ("Escape", KeyCode::Esc),
    ("Spacebar", KeyCode::Char(' ')),
];

impl KeyCode {
    /// The physical key behind this code.
    ///
    /// Characters fold to lowercase, so `'A'` reported with Shift held and
    /// `'a'` reported after Shift went up name the same key.
    pub fn physical(self) -> Self {
        match self {
            Self::Char(c) => Self::Char(c.to_lowercase().next().unwrap_or(c)),
            other => other,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::F(n) => write!(f, "F{n}"),
            other => {
                let name = NAMED_CODES
                    .iter()
                    .find(|(_, code)| code == other)
                    .map_or("Unidentified", |(name, _)| name);
                f.write_str(name)
            }
        }
    }
}

impl FromStr for KeyCode {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c));
        }
        if let Some((_, code)) = NAMED_CODES.iter().find(|(name, _)| *name == s) {
            return Ok(*code);
        }
        if let Some(n) = s.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
            if (1..=24).contains(&n) {
                return Ok(Self::F(n));
            }
        }
        if s == "Esc" {
            return Ok(Self::Esc);
        }
        Err(ParseKeyError(s.to_string()))
    }
}

bitflags! {
    /// Modifier keys held together with a key.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0000_0001;
        /// Control key held.
        const CONTROL = 0b0000_0010;
        /// Alt/Option key held.
        const ALT = 0b0000_0100;
        /// Super/Command/Windows key held.
        const SUPER = 0b0000_1000;
    }
}

impl fmt::Debug for KeyModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

const MODIFIER_NAMES: [(&str, KeyModifiers); 4] = [
    ("Ctrl", KeyModifiers::CONTROL),
    ("Alt", KeyModifiers::ALT),
    ("Shift", KeyModifiers::SHIFT),
    ("Super", KeyModifiers::SUPER),
];

/// A key identifier: code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held while the key went down.
    pub modifiers: KeyModifiers,
}

impl Key {
    /// Create a key with modifiers.
    #[inline]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// A bare key without modifiers.
    #[inline]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// A bare character key.
    #[inline]
    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, flag) in MODIFIER_NAMES {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.code)
    }
}

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "+" alone, or "Ctrl++", names the plus key itself.
        let (prefix, code) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            s.rsplit_once('+').unwrap_or(("", s))
        };

        let mut modifiers = KeyModifiers::empty();
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            let flag = match part {
                "Ctrl" | "Control" => KeyModifiers::CONTROL,
                "Alt" => KeyModifiers::ALT,
                "Shift" => KeyModifiers::SHIFT,
                "Super" | "Meta" => KeyModifiers::SUPER,
                _ => return Err(ParseKeyError(s.to_string())),
            };
            modifiers |= flag;
        }

        let code = code.parse::<KeyCode>().map_err(|_| ParseKeyError(s.to_string()))?;
        Ok(Self::new(code, modifiers))
    }
}

/// A key name that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name: {0:?}")]
pub struct ParseKeyError(pub String);
