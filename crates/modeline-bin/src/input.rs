//! crossterm events to editor key events.

use core_events::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    KeyCode as CKey, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers as CMods,
};

pub fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

/// Translate one terminal key event. Releases and keys the editor has no
/// use for yield `None`.
pub fn translate_key(ev: CKeyEvent) -> Option<KeyEvent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    let mut mods = map_mods(ev.modifiers);
    let code = match ev.code {
        CKey::Char(c) => {
            // printable keys arrive already shifted
            mods.remove(KeyModifiers::SHIFT);
            KeyCode::Char(c)
        }
        CKey::Enter => KeyCode::Enter,
        CKey::Esc => KeyCode::Esc,
        CKey::Backspace => KeyCode::Backspace,
        CKey::Tab if mods.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        CKey::Tab => KeyCode::Tab,
        CKey::BackTab => KeyCode::BackTab,
        CKey::CapsLock => KeyCode::CapsLock,
        CKey::Up => KeyCode::Up,
        CKey::Down => KeyCode::Down,
        CKey::Left => KeyCode::Left,
        CKey::Right => KeyCode::Right,
        _ => return None,
    };
    Some(KeyEvent { code, mods })
}
