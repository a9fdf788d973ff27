//! Input module: key identifiers and the key state the host writes into.

mod key;
mod state;

pub use key::{Key, KeyCode, KeyModifiers, ParseKeyError};
pub use state::KeyState;
