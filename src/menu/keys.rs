//! Raw keyboard input
//!
//! Keys are read one at a time with the terminal in raw mode and decoded
//! into a small closed set of events. Raw mode is held by [`RawModeGuard`]
//! only for the duration of a single read.

use std::io::{self, Read};

use crossterm::terminal;

use crate::errors::{ConvcomError, Result};

const ENTER: u8 = 13;
const LINE_FEED: u8 = 10;
const ESCAPE: u8 = 27;
/// Ctrl+X
const FORCE_QUIT: u8 = 24;
const ARROW_UP: u8 = 65;
const ARROW_DOWN: u8 = 66;

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Up,
    Down,
    Enter,
    Escape,
    ForceQuit,
    Other(u8),
}

impl KeyEvent {
    /// Decodes the bytes delivered by a single raw read.
    ///
    /// Arrow keys arrive as three-byte escape sequences (`ESC [ A`), so a
    /// three-byte read is classified by its last byte. Anything shorter is
    /// classified by its first byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use convcom::menu::keys::KeyEvent;
    ///
    /// assert_eq!(KeyEvent::from_bytes(&[27, 91, 65]), KeyEvent::Up);
    /// assert_eq!(KeyEvent::from_bytes(&[27]), KeyEvent::Escape);
    /// assert_eq!(KeyEvent::from_bytes(&[b'q']), KeyEvent::Other(b'q'));
    /// ```
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match bytes {
            [_, _, ARROW_UP] => KeyEvent::Up,
            [_, _, ARROW_DOWN] => KeyEvent::Down,
            [_, _, last] => KeyEvent::Other(*last),
            [ENTER | LINE_FEED, ..] => KeyEvent::Enter,
            [ESCAPE, ..] => KeyEvent::Escape,
            [FORCE_QUIT, ..] => KeyEvent::ForceQuit,
            [first, ..] => KeyEvent::Other(*first),
            [] => KeyEvent::Other(0),
        }
    }
}

/// Source of key events for the menus.
#[cfg_attr(test, mockall::automock)]
pub trait KeyReader {
    /// Blocks until one key event is available.
    ///
    /// # Errors
    /// * If the input cannot be read
    fn read_key(&mut self) -> Result<KeyEvent>;
}

/// Keeps the terminal in raw mode while alive.
///
/// Call [`RawModeGuard::release`] to restore the previous mode and learn
/// whether that worked. Dropping an unreleased guard restores the mode as
/// well, which covers early returns through `?` and unwinding.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    /// Switches the terminal to raw mode.
    ///
    /// # Errors
    /// * If the terminal mode cannot be queried or changed
    pub fn acquire() -> Result<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| ConvcomError::Terminal(format!("cannot enter raw mode: {e}")))?;

        Ok(RawModeGuard { active: true })
    }

    /// Restores the previous terminal mode.
    ///
    /// # Errors
    /// * If the terminal mode cannot be restored
    pub fn release(mut self) -> Result<()> {
        self.active = false;
        restore_result(terminal::disable_raw_mode())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
        }
    }
}

fn restore_result(result: io::Result<()>) -> Result<()> {
    result.map_err(|e| ConvcomError::Terminal(format!("cannot restore terminal mode: {e}")))
}

/// Reads keys from the process's standard input.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    #[must_use]
    pub fn new() -> Self {
        TerminalKeys
    }
}

impl KeyReader for TerminalKeys {
    fn read_key(&mut self) -> Result<KeyEvent> {
        let raw = RawModeGuard::acquire()?;

        let mut buffer = [0u8; 3];
        let read = io::stdin().lock().read(&mut buffer);

        raw.release()?;

        let read =
            read.map_err(|e| ConvcomError::Terminal(format!("cannot read from stdin: {e}")))?;

        Ok(KeyEvent::from_bytes(&buffer[..read]))
    }
}
