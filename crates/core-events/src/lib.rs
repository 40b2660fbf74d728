//! Logical key events fed to the dispatcher once per tick.
//!
//! Hosts translate whatever their platform delivers into [`KeyEvent`]s. Shifted
//! printable keys arrive already shifted (`Char('N')`, `Char(':')`); the
//! `SHIFT` modifier is only meaningful for named keys.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    BackTab,
    CapsLock,
    Up,
    Down,
    Left,
    Right,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::empty(),
        }
    }

    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: KeyModifiers::CTRL,
        }
    }

    /// The printable character this key types, if it types one.
    pub fn glyph(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    /// True for `Ctrl+<c>`.
    pub fn is_ctrl(&self, c: char) -> bool {
        self.mods.contains(KeyModifiers::CTRL) && self.code == KeyCode::Char(c)
    }

    /// Parse a compact key notation: plain characters stand for themselves and
    /// `<Esc>`, `<CR>`, `<BS>`, `<Tab>`, `<S-Tab>`, `<Caps>`, `<Up>`, `<Down>`,
    /// `<Left>`, `<Right>`, `<lt>` and `<C-x>` name the rest. An unrecognised
    /// `<...>` group is read as literal characters.
    pub fn parse_sequence(notation: &str) -> Vec<KeyEvent> {
        let mut out = Vec::new();
        let mut rest = notation;
        while let Some(c) = rest.chars().next() {
            if c == '<'
                && let Some(end) = rest.find('>')
                && let Some(key) = parse_named(&rest[1..end])
            {
                out.push(key);
                rest = &rest[end + 1..];
                continue;
            }
            out.push(KeyEvent::char(c));
            rest = &rest[c.len_utf8()..];
        }
        out
    }
}

fn parse_named(name: &str) -> Option<KeyEvent> {
    let code = match name {
        "Esc" => KeyCode::Esc,
        "CR" | "Enter" => KeyCode::Enter,
        "BS" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "S-Tab" => KeyCode::BackTab,
        "Caps" => KeyCode::CapsLock,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "lt" => KeyCode::Char('<'),
        _ => {
            let c = name.strip_prefix("C-")?;
            let mut chars = c.chars();
            let ch = chars.next()?;
            return chars.next().is_none().then(|| KeyEvent::ctrl(ch));
        }
    };
    Some(KeyEvent::new(code))
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = self.glyph() {
            return write!(f, "{c}");
        }
        match self.code {
            KeyCode::Char(c) if self.mods.contains(KeyModifiers::CTRL) => write!(f, "<C-{c}>"),
            KeyCode::Char(c) => write!(f, "<M-{c}>"),
            KeyCode::Enter => f.write_str("<CR>"),
            KeyCode::Esc => f.write_str("<Esc>"),
            KeyCode::Backspace => f.write_str("<BS>"),
            KeyCode::Tab => f.write_str("<Tab>"),
            KeyCode::BackTab => f.write_str("<S-Tab>"),
            KeyCode::CapsLock => f.write_str("<Caps>"),
            KeyCode::Up => f.write_str("<Up>"),
            KeyCode::Down => f.write_str("<Down>"),
            KeyCode::Left => f.write_str("<Left>"),
            KeyCode::Right => f.write_str("<Right>"),
        }
    }
}
