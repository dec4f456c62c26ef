//! Terminal Menu Module
//!
//! Interactive building blocks used by the commit composer: raw key input,
//! line input and the single-choice [`SelectMenu`].

pub mod keys;
pub mod line;
pub mod select;

pub use keys::{KeyEvent, KeyReader, RawModeGuard, TerminalKeys};
pub use line::{LineReader, TerminalLines};
pub use select::{MenuChoice, MenuItem, SelectMenu, Selection};
