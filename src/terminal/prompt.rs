//! Prompt: the blocking line prompt shown on the status row.

use super::editor::LineEditor;
use super::host::TerminalConfig;
use super::output::OutputBuffer;
use super::present::encode_status;
use crate::error::{Error, Result};
use crate::input::{Key, KeyState};
use crossbeam_channel::Receiver;

/// Keys that end a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptKeys {
    /// Submits the edited line.
    pub submit: Key,
    /// Dismisses the prompt without an answer.
    pub cancel: Key,
}

/// Run one prompt over the presses arriving on `input`.
///
/// Presses queued before the prompt opened are discarded. `draw` is called
/// with the editor before every wait for a key. Once the prompt ends, by
/// answer, cancel or error, the key `slot` is cleared so the ending key does
/// not reach the engine.
pub fn run_prompt<F>(
    input: &Receiver<Key>,
    slot: Option<&KeyState>,
    keys: PromptKeys,
    mut draw: F,
) -> Result<Option<String>>
where
    F: FnMut(&LineEditor) -> Result<()>,
{
    while input.try_recv().is_ok() {}

    let mut editor = LineEditor::new();
    let answer = loop {
        if let Err(e) = draw(&editor) {
            break Err(e);
        }
        let Ok(key) = input.recv() else {
            break Err(Error::InputClosed);
        };
        if key == keys.cancel {
            break Ok(None);
        }
        if key == keys.submit {
            break Ok(Some(editor.take()));
        }
        editor.handle_key(&key);
    };

    if let Some(slot) = slot {
        slot.clear();
    }
    answer
}

/// Encode a prompt on `row`: the message, then the visible part of the
/// edited line, with the terminal cursor placed at the edit position.
pub fn encode_prompt(
    out: &mut OutputBuffer,
    row: u16,
    width: u16,
    message: &str,
    editor: &LineEditor,
    config: &TerminalConfig,
) {
    let used = encode_status(out, row, width, message, config.prompt_fg, config.status_bg);
    let remaining = width.saturating_sub(used);
    let (text, column) = editor.visible(usize::from(remaining));

    out.move_to(used, row);
    out.pen(config.input_fg, config.status_bg);
    out.text(text);
    out.reset();

    let column = u16::try_from(column).unwrap_or(remaining).min(remaining);
    out.move_to((used + column).min(width.saturating_sub(1)), row);
    out.cursor_visible(true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, KeyModifiers};
    use crossbeam_channel::{unbounded, Sender};

    fn keys() -> PromptKeys {
        TerminalConfig::default().prompt_keys()
    }

    /// Sends `script` on the first draw, after stale keys were drained.
    fn typist(tx: Sender<Key>, script: &str, end: Key) -> impl FnMut(&LineEditor) -> Result<()> {
        let mut pending = Some((tx, script.to_string()));
        move |_editor| {
            if let Some((tx, script)) = pending.take() {
                for c in script.chars() {
                    tx.send(Key::char(c)).unwrap();
                }
                tx.send(end).unwrap();
            }
            Ok(())
        }
    }

    #[test]
    fn test_submit_returns_line() {
        let (tx, rx) = unbounded();
        let answer = run_prompt(&rx, None, keys(), typist(tx, "fill", Key::plain(KeyCode::Enter)));
        assert_eq!(answer.unwrap().as_deref(), Some("fill"));
    }

    #[test]
    fn test_cancel_returns_none() {
        let (tx, rx) = unbounded();
        let answer = run_prompt(&rx, None, keys(), typist(tx, "fi", Key::plain(KeyCode::Esc)));
        assert_eq!(answer.unwrap(), None);
    }

    #[test]
    fn test_stale_keys_discarded() {
        let (tx, rx) = unbounded();
        tx.send(Key::char(':')).unwrap();
        tx.send(Key::char('x')).unwrap();
        let answer = run_prompt(&rx, None, keys(), typist(tx, "q", Key::plain(KeyCode::Enter)));
        assert_eq!(answer.unwrap().as_deref(), Some("q"));
    }

    #[test]
    fn test_slot_cleared_after_prompt() {
        let slot = KeyState::new();
        let (tx, rx) = unbounded();
        let mut send = typist(tx, "ok", Key::plain(KeyCode::Enter));
        let answer = run_prompt(&rx, Some(&slot), keys(), |editor| {
            // The input thread records every press in the slot too.
            slot.press(Key::plain(KeyCode::Enter));
            send(editor)
        });
        assert_eq!(answer.unwrap().as_deref(), Some("ok"));
        assert_eq!(slot.current(), None);
    }

    #[test]
    fn test_editing_keys_apply() {
        let (tx, rx) = unbounded();
        let mut frames = Vec::new();
        let mut pending = Some(tx);
        let answer = run_prompt(&rx, None, keys(), |editor| {
            frames.push(editor.content().to_string());
            if let Some(tx) = pending.take() {
                tx.send(Key::char('a')).unwrap();
                tx.send(Key::char('b')).unwrap();
                tx.send(Key::plain(KeyCode::Backspace)).unwrap();
                tx.send(Key::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap();
                tx.send(Key::plain(KeyCode::Enter)).unwrap();
            }
            Ok(())
        });
        assert_eq!(answer.unwrap().as_deref(), Some("a"));
        assert_eq!(frames, ["", "a", "ab", "a", "a"]);
    }

    #[test]
    fn test_closed_input_is_error() {
        let (tx, rx) = unbounded::<Key>();
        drop(tx);
        let slot = KeyState::new();
        slot.press(Key::char(':'));
        let answer = run_prompt(&rx, Some(&slot), keys(), |_| Ok(()));
        assert!(matches!(answer, Err(Error::InputClosed)));
        assert_eq!(slot.current(), None);
    }

    #[test]
    fn test_encode_prompt() {
        let config = TerminalConfig::default();
        let mut editor = LineEditor::new();
        for c in "rect".chars() {
            editor.handle_key(&Key::char(c));
        }
        editor.handle_key(&Key::new(KeyCode::Char('x'), KeyModifiers::CONTROL));

        let mut out = OutputBuffer::new();
        encode_prompt(&mut out, 1, 20, ":", &editor, &config);

        let mut parser = vt100::Parser::new(2, 20, 0);
        parser.process(out.as_bytes());
        let screen = parser.screen();
        assert_eq!(screen.contents_between(1, 0, 1, 5), ":rect");
        assert_eq!(screen.cursor_position(), (1, 5));
        assert!(!screen.hide_cursor());
        let prompt = config.prompt_fg;
        assert_eq!(
            screen.cell(1, 0).unwrap().fgcolor(),
            vt100::Color::Rgb(prompt.r, prompt.g, prompt.b)
        );
    }

    #[test]
    fn test_encode_prompt_long_input_scrolls() {
        let config = TerminalConfig::default();
        let mut editor = LineEditor::new();
        for c in "abcdefghij".chars() {
            editor.handle_key(&Key::char(c));
        }

        let mut out = OutputBuffer::new();
        encode_prompt(&mut out, 0, 8, "> ", &editor, &config);

        let mut parser = vt100::Parser::new(1, 8, 0);
        parser.process(out.as_bytes());
        let screen = parser.screen();
        assert_eq!(screen.contents_between(0, 0, 0, 7), "> fghij");
        assert_eq!(screen.cursor_position(), (0, 7));
    }
}
