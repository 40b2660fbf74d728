//! Raw-mode alternate-screen session with guaranteed restoration.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

/// RAII guard: the terminal is restored when this drops, including during a
/// panic unwind or an early `?` return.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter(title: &str) -> Result<Self> {
        enable_raw_mode()?;
        let guard = Self { active: true };
        execute!(stdout(), EnterAlternateScreen, Hide, SetTitle(title))?;
        Ok(guard)
    }

    pub fn leave(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}
