//! Commit Composer
//!
//! Walks the user through the questions that make up a Conventional Commit
//! header (`type(scope)!: message`), redrawing a live preview after every
//! answer, and hands the result to a [`CommitExecutor`] once confirmed.
//!
//! Escape on any question aborts the whole composition. Ctrl+X stops
//! immediately and is reported as [`Composition::Quit`] so the caller can
//! end the process.

use std::{io::Write, ops::ControlFlow};

use console::style;
use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
};

use crate::{
    config::Config,
    errors::Result,
    git::CommitExecutor,
    menu::{KeyReader, LineReader, MenuChoice, SelectMenu},
};

/// Value of the implicit "none" scope.
const NO_SCOPE: &str = "";
const BREAKING_MARKER: &str = "!";
const CONFIRM_YES: &str = "yes";
const CONFIRM_NO: &str = "no";

/// The answers collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitChoices {
    pub commit_type: String,
    pub scope: String,
    pub breaking: bool,
    pub message: String,
}

impl CommitChoices {
    /// Formats the commit header.
    ///
    /// # Examples
    ///
    /// ```
    /// use convcom::composer::CommitChoices;
    ///
    /// let choices = CommitChoices {
    ///     commit_type: "fix".to_string(),
    ///     scope: String::new(),
    ///     breaking: true,
    ///     message: "drop legacy field".to_string(),
    /// };
    ///
    /// assert_eq!(choices.header(), "fix!: drop legacy field");
    /// ```
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "{}{}{}: {}",
            self.commit_type,
            self.scope_part(),
            self.breaking_part(),
            self.message
        )
    }

    fn scope_part(&self) -> String {
        if self.scope.is_empty() {
            String::new()
        } else {
            format!("({})", self.scope)
        }
    }

    fn breaking_part(&self) -> &'static str {
        if self.breaking { BREAKING_MARKER } else { "" }
    }

    /// Clears the screen and prints the header as it stands. Nothing but
    /// the bullet is shown until a type has been chosen.
    ///
    /// # Errors
    /// * If the output cannot be written
    pub fn render_preview<W: Write>(&self, out: &mut W) -> Result<()> {
        queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        writeln!(
            out,
            "{}\n",
            style("Conventional Commit").white().bold().underlined()
        )?;

        if self.commit_type.is_empty() {
            writeln!(out, "* \n")?;
        } else {
            writeln!(
                out,
                "* {}{}{}: {}\n",
                style(&self.commit_type).on_cyan(),
                style(self.scope_part()).on_green(),
                style(self.breaking_part()).on_red(),
                self.message
            )?;
        }

        out.flush()?;

        Ok(())
    }
}

/// How a composition ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// The user confirmed and the executor ran with this message.
    Committed(String),
    /// The user answered every question but declined the commit.
    Declined(String),
    /// The user pressed Escape or closed the input.
    Aborted,
    /// The user pressed Ctrl+X.
    Quit,
}

/// Asks the commit questions in order and runs the executor on confirmation.
pub struct CommitComposer<'a> {
    config: &'a Config,
    executor: &'a dyn CommitExecutor,
    dry_run: bool,
    push: bool,
}

/// Unwraps the answer of a menu, or returns the composition outcome it implies.
macro_rules! answer {
    ($flow:expr) => {
        match $flow {
            ControlFlow::Continue(value) => value,
            ControlFlow::Break(outcome) => return Ok(outcome),
        }
    };
}

impl<'a> CommitComposer<'a> {
    pub fn new(config: &'a Config, executor: &'a dyn CommitExecutor) -> Self {
        CommitComposer {
            config,
            executor,
            dry_run: false,
            push: false,
        }
    }

    /// Passes the dry-run flag on to the executor.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Only changes the wording of the confirmation question; pushing
    /// itself is the executor's business.
    #[must_use]
    pub fn push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    /// Runs the whole question sequence.
    ///
    /// # Errors
    /// * If a key or line cannot be read, or the output cannot be written
    /// * If the executor fails
    pub fn compose<K, L, W>(&self, keys: &mut K, lines: &mut L, out: &mut W) -> Result<Composition>
    where
        K: KeyReader + ?Sized,
        L: LineReader + ?Sized,
        W: Write,
    {
        let mut choices = CommitChoices::default();
        choices.render_preview(out)?;

        choices.commit_type = answer!(ask(self.type_menu(), keys, out)?);
        choices.render_preview(out)?;

        choices.scope = answer!(ask(self.scope_menu(), keys, out)?);
        choices.render_preview(out)?;

        choices.breaking = answer!(ask(breaking_menu(), keys, out)?) == BREAKING_MARKER;
        choices.render_preview(out)?;

        choices.message = answer!(read_message(lines, out)?);
        choices.render_preview(out)?;

        let header = choices.header();

        match self.confirm_menu().display(keys, out)? {
            MenuChoice::Selected(answer) if answer == CONFIRM_YES => {
                self.executor.execute(&header, self.dry_run)?;
                Ok(Composition::Committed(header))
            }
            MenuChoice::Selected(_) | MenuChoice::Cancelled => Ok(Composition::Declined(header)),
            MenuChoice::Quit => Ok(Composition::Quit),
        }
    }

    fn type_menu(&self) -> SelectMenu {
        self.config
            .types
            .iter()
            .fold(SelectMenu::new("Choose a type"), |menu, commit_type| {
                menu.with_item(commit_type, commit_type)
            })
    }

    fn scope_menu(&self) -> SelectMenu {
        self.config.scopes.iter().fold(
            SelectMenu::new("Choose a scope").with_item("none", NO_SCOPE),
            |menu, scope| menu.with_item(scope, scope),
        )
    }

    fn confirm_menu(&self) -> SelectMenu {
        let prompt = if self.push { "Commit and push?" } else { "Commit?" };

        SelectMenu::new(prompt)
            .with_item(CONFIRM_NO, CONFIRM_NO)
            .with_item(CONFIRM_YES, CONFIRM_YES)
    }
}

fn breaking_menu() -> SelectMenu {
    SelectMenu::new("Breaking change?")
        .with_item("no", "")
        .with_item("yes", BREAKING_MARKER)
}

fn ask<K, W>(mut menu: SelectMenu, keys: &mut K, out: &mut W) -> Result<ControlFlow<Composition, String>>
where
    K: KeyReader + ?Sized,
    W: Write,
{
    Ok(match menu.display(keys, out)? {
        MenuChoice::Selected(value) => ControlFlow::Continue(value),
        MenuChoice::Cancelled => ControlFlow::Break(Composition::Aborted),
        MenuChoice::Quit => ControlFlow::Break(Composition::Quit),
    })
}

/// Prompts until a non-blank message is entered. End of input aborts.
fn read_message<L, W>(lines: &mut L, out: &mut W) -> Result<ControlFlow<Composition, String>>
where
    L: LineReader + ?Sized,
    W: Write,
{
    loop {
        write!(out, "Enter commit message: ")?;
        out.flush()?;

        let Some(line) = lines.read_line()? else {
            writeln!(out)?;
            return Ok(ControlFlow::Break(Composition::Aborted));
        };

        let message = line.trim();
        if !message.is_empty() {
            return Ok(ControlFlow::Continue(message.to_string()));
        }

        writeln!(out, "{}", style("Commit message must not be empty.").yellow())?;
    }
}
