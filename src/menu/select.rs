//! Single-choice menu
//!
//! [`Selection`] holds the items and the cursor and knows nothing about the
//! terminal. [`SelectMenu`] wraps it with a prompt, draws it to any
//! [`Write`] sink and drives it from a [`KeyReader`].

use std::io::Write;

use console::style;
use crossterm::{cursor, execute, queue};

use crate::errors::{ConvcomError, Result};

use super::keys::{KeyEvent, KeyReader};

/// Notice printed when the user force-quits from a menu.
pub const FORCE_QUIT_NOTICE: &str = "Process exited.";

/// One entry of a menu: what is shown and what is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub value: String,
}

/// How a menu session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Enter was pressed; holds the value of the highlighted item.
    Selected(String),
    /// Escape was pressed.
    Cancelled,
    /// Ctrl+X was pressed; the whole program must stop.
    Quit,
}

/// Ordered items with a cursor that wraps around at both ends.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    items: Vec<MenuItem>,
    cursor: usize,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.items.push(MenuItem {
            label: label.into(),
            value: value.into(),
        });
    }

    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The highlighted item, `None` only when there are no items.
    #[must_use]
    pub fn current(&self) -> Option<&MenuItem> {
        self.items.get(self.cursor)
    }

    pub fn move_up(&mut self) {
        if !self.is_empty() {
            self.cursor = (self.cursor + self.len() - 1) % self.len();
        }
    }

    pub fn move_down(&mut self) {
        if !self.is_empty() {
            self.cursor = (self.cursor + 1) % self.len();
        }
    }
}

/// A prompt followed by a list of items, one of which is highlighted.
///
/// # Examples
///
/// ```no_run
/// use convcom::menu::{MenuChoice, SelectMenu, TerminalKeys};
///
/// let mut menu = SelectMenu::new("Breaking change?")
///     .with_item("no", "")
///     .with_item("yes", "!");
///
/// match menu.display(&mut TerminalKeys::new(), &mut std::io::stdout())? {
///     MenuChoice::Selected(marker) => println!("marker: {marker:?}"),
///     MenuChoice::Cancelled | MenuChoice::Quit => {}
/// }
/// # Ok::<(), convcom::errors::ConvcomError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SelectMenu {
    prompt: String,
    selection: Selection,
}

impl SelectMenu {
    pub fn new(prompt: impl Into<String>) -> Self {
        SelectMenu {
            prompt: prompt.into(),
            selection: Selection::new(),
        }
    }

    /// Appends an item; items are displayed in insertion order.
    #[must_use]
    pub fn with_item(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.selection.push(label, value);
        self
    }

    /// Shows the menu and blocks until the user confirms, cancels or quits.
    ///
    /// Up and Down move the highlight (wrapping around), Enter selects,
    /// Escape cancels and Ctrl+X quits. Other keys are ignored. The
    /// terminal cursor is hidden while the menu is active and shown again
    /// however the session ends.
    ///
    /// # Errors
    /// * If the menu has no items
    /// * If a key cannot be read or the output cannot be written
    pub fn display<K, W>(&mut self, keys: &mut K, out: &mut W) -> Result<MenuChoice>
    where
        K: KeyReader + ?Sized,
        W: Write,
    {
        if self.selection.is_empty() {
            return Err(ConvcomError::EmptyMenu {
                prompt: self.prompt.clone(),
            });
        }

        writeln!(out, "{}", style(&self.prompt).magenta().bold())?;
        self.render_items(out, false)?;
        execute!(out, cursor::Hide)?;

        let choice = self.run(keys, out);
        let shown = execute!(out, cursor::Show);

        let choice = choice?;
        shown?;

        Ok(choice)
    }

    fn run<K, W>(&mut self, keys: &mut K, out: &mut W) -> Result<MenuChoice>
    where
        K: KeyReader + ?Sized,
        W: Write,
    {
        loop {
            match keys.read_key()? {
                KeyEvent::Up => {
                    self.selection.move_up();
                    self.render_items(out, true)?;
                }
                KeyEvent::Down => {
                    self.selection.move_down();
                    self.render_items(out, true)?;
                }
                KeyEvent::Enter => {
                    let value = self
                        .selection
                        .current()
                        .map(|item| item.value.clone())
                        .unwrap_or_default();

                    write!(out, "\r\n")?;
                    return Ok(MenuChoice::Selected(value));
                }
                KeyEvent::Escape => {
                    write!(out, "\r\n")?;
                    return Ok(MenuChoice::Cancelled);
                }
                KeyEvent::ForceQuit => {
                    write!(out, "\r\n{FORCE_QUIT_NOTICE}\r\n")?;
                    return Ok(MenuChoice::Quit);
                }
                KeyEvent::Other(_) => {}
            }
        }
    }

    /// Prints the item block. With `redraw`, the cursor first goes back to
    /// the first row so the block is overwritten in place. The last row has
    /// no trailing newline, which keeps the cursor inside the block.
    fn render_items<W: Write>(&self, out: &mut W, redraw: bool) -> Result<()> {
        let count = self.selection.len();

        if redraw && count > 1 {
            let rows_up = u16::try_from(count - 1).unwrap_or(u16::MAX);
            queue!(out, cursor::MoveUp(rows_up))?;
        }

        for (index, item) in self.selection.items().iter().enumerate() {
            let newline = if index + 1 == count { "" } else { "\n" };

            if index == self.selection.cursor() {
                write!(
                    out,
                    "\r{} {}{newline}",
                    style("> ").yellow().bold(),
                    style(&item.label).yellow().bold()
                )?;
            } else {
                write!(out, "\r   {}{newline}", item.label)?;
            }
        }

        out.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::keys::MockKeyReader;

    fn scripted(events: Vec<KeyEvent>) -> MockKeyReader {
        let mut keys = MockKeyReader::new();
        let count = events.len();
        let mut events = events.into_iter();

        keys.expect_read_key()
            .times(count)
            .returning(move || Ok(events.next().expect("key script exhausted")));

        keys
    }

    fn menu_with(count: usize) -> SelectMenu {
        (0..count).fold(SelectMenu::new("Pick one"), |menu, index| {
            menu.with_item(format!("item {index}"), format!("value-{index}"))
        })
    }

    fn display(menu: &mut SelectMenu, events: Vec<KeyEvent>) -> (MenuChoice, String) {
        console::set_colors_enabled(false);

        let mut keys = scripted(events);
        let mut out = Vec::new();
        let choice = menu.display(&mut keys, &mut out).unwrap();

        (choice, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_down_cycles_back_to_start() {
        for count in 1..=6 {
            let mut selection = Selection::new();
            for index in 0..count {
                selection.push(format!("{index}"), format!("{index}"));
            }

            for start in 0..count {
                while selection.cursor() != start {
                    selection.move_down();
                }
                for _ in 0..count {
                    selection.move_down();
                }
                assert_eq!(selection.cursor(), start, "down x{count} from {start}");

                for _ in 0..count {
                    selection.move_up();
                }
                assert_eq!(selection.cursor(), start, "up x{count} from {start}");
            }
        }
    }

    #[test]
    fn test_up_from_first_wraps_to_last() {
        let mut selection = Selection::new();
        selection.push("a", "a");
        selection.push("b", "b");
        selection.push("c", "c");

        selection.move_up();
        assert_eq!(selection.cursor(), 2);
        assert_eq!(selection.current().unwrap().value, "c");
    }

    #[test]
    fn test_empty_selection_does_not_move() {
        let mut selection = Selection::new();
        selection.move_up();
        selection.move_down();

        assert_eq!(selection.cursor(), 0);
        assert!(selection.current().is_none());
    }

    #[test]
    fn test_enter_returns_value_at_cursor() {
        for target in 0..4 {
            let mut menu = menu_with(4);
            let mut events = vec![KeyEvent::Down; target];
            events.push(KeyEvent::Enter);

            let (choice, _) = display(&mut menu, events);
            assert_eq!(choice, MenuChoice::Selected(format!("value-{target}")));
        }
    }

    #[test]
    fn test_full_cycle_then_enter_returns_first_item() {
        let mut menu = menu_with(3);
        let events = vec![
            KeyEvent::Down,
            KeyEvent::Down,
            KeyEvent::Down,
            KeyEvent::Up,
            KeyEvent::Up,
            KeyEvent::Up,
            KeyEvent::Enter,
        ];

        let (choice, _) = display(&mut menu, events);
        assert_eq!(choice, MenuChoice::Selected("value-0".to_string()));
    }

    #[test]
    fn test_escape_cancels() {
        let mut menu = SelectMenu::new("Scope").with_item("none", "").with_item("api", "api");

        let (choice, _) = display(&mut menu, vec![KeyEvent::Down, KeyEvent::Escape]);
        assert_eq!(choice, MenuChoice::Cancelled);
    }

    #[test]
    fn test_force_quit_stops_reading_keys() {
        let mut menu = menu_with(2);

        // The mock panics if a key is read after the quit
        let (choice, output) = display(&mut menu, vec![KeyEvent::ForceQuit]);
        assert_eq!(choice, MenuChoice::Quit);
        assert!(output.contains(FORCE_QUIT_NOTICE));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut menu = menu_with(2);
        let events = vec![
            KeyEvent::Other(b'j'),
            KeyEvent::Other(3),
            KeyEvent::Other(67),
            KeyEvent::Enter,
        ];

        let (choice, _) = display(&mut menu, events);
        assert_eq!(choice, MenuChoice::Selected("value-0".to_string()));
    }

    #[test]
    fn test_initial_render() {
        let mut menu = SelectMenu::new("Breaking change?")
            .with_item("no", "")
            .with_item("yes", "!");

        let (_, output) = display(&mut menu, vec![KeyEvent::Enter]);
        assert!(output.starts_with("Breaking change?\n\r>  no\n\r   yes\x1b[?25l"));
        assert!(output.ends_with("\x1b[?25h"));
    }

    #[test]
    fn test_redraw_moves_back_to_top_of_block() {
        let mut menu = menu_with(3);

        let (_, output) = display(&mut menu, vec![KeyEvent::Down, KeyEvent::Enter]);
        assert!(output.contains("\x1b[2A\r   item 0\n\r>  item 1\n\r   item 2\r\n"));
    }

    #[test]
    fn test_single_item_redraw_does_not_move_up() {
        let mut menu = menu_with(1);

        let (choice, output) = display(&mut menu, vec![KeyEvent::Down, KeyEvent::Up, KeyEvent::Enter]);
        assert_eq!(choice, MenuChoice::Selected("value-0".to_string()));
        assert!(!output.contains("A\r"));
    }

    #[test]
    fn test_empty_menu_is_an_error() {
        let mut menu = SelectMenu::new("Nothing");
        let mut keys = MockKeyReader::new();
        keys.expect_read_key().never();

        assert!(matches!(
            menu.display(&mut keys, &mut Vec::new()),
            Err(ConvcomError::EmptyMenu { .. })
        ));
    }
}
