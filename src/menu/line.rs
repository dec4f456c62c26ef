//! Line input for free-text answers.

use std::io::{self, BufRead};

use crate::errors::Result;

/// Source of whole lines of text.
pub trait LineReader {
    /// Reads one line, without its terminator.
    ///
    /// # Errors
    /// * If the input cannot be read
    ///
    /// # Returns
    /// `None` once the input is exhausted
    fn read_line(&mut self) -> Result<Option<String>>;
}

impl<R: BufRead> LineReader for R {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();

        if BufRead::read_line(self, &mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Reads lines from the process's standard input.
///
/// The stdin lock is only held for the duration of one line, so key reads
/// can interleave with line reads.
#[derive(Debug, Default)]
pub struct TerminalLines;

impl TerminalLines {
    #[must_use]
    pub fn new() -> Self {
        TerminalLines
    }
}

impl LineReader for TerminalLines {
    fn read_line(&mut self) -> Result<Option<String>> {
        LineReader::read_line(&mut io::stdin().lock())
    }
}
