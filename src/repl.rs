//! Interactive command loop.
//!
//! Commands, one per line:
//!
//! - `i <key>` insert, prints `SUCCESS` or `FAILED` (already present)
//! - `s <key>` search, prints `<key> FOUND` or `<key> NOT FOUND`
//! - `p` print the table
//! - `q` quit (end of input also quits)
//!
//! Problems with a line are reported on the error stream and the loop goes on.

use std::io::{self, BufRead, Write};

use crate::error::Error;
use crate::key::validate_key;
use crate::table::ExtHash;

const PROMPT: &str = "\n> ";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(String),
    Search(String),
    Print,
    Quit,
}

/// Why a line could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Error: Please provide valid input (e.g., 'i <key>' or 's <key>')")]
    Usage,
    #[error("Error: Unknown command. Use 'i', 's', 'p', or 'q'.")]
    Unknown,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["q"] => Ok(Command::Quit),
            ["p"] => Ok(Command::Print),
            ["i", key] => Ok(Command::Insert((*key).to_owned())),
            ["s", key] => Ok(Command::Search((*key).to_owned())),
            [_, _] => Err(ParseError::Unknown),
            _ => Err(ParseError::Usage),
        }
    }
}

/// Runs commands against a table, writing results to `out` and
/// diagnostics to `err`.
pub struct Repl<W, E> {
    table: ExtHash,
    out: W,
    err: E,
}

impl<W: Write, E: Write> Repl<W, E> {
    pub fn new(table: ExtHash, out: W, err: E) -> Self {
        Self { table, out, err }
    }

    pub fn table(&self) -> &ExtHash {
        &self.table
    }

    pub fn into_table(self) -> ExtHash {
        self.table
    }

    /// Prompt and execute lines until `q` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };
            if !self.execute(&line)? {
                break;
            }
        }
        Ok(())
    }

    /// Execute one line. Returns `false` once the user asked to quit.
    pub fn execute(&mut self, line: &str) -> io::Result<bool> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.err, "{e}")?;
                return Ok(true);
            }
        };

        match command {
            Command::Quit => return Ok(false),
            Command::Print => writeln!(self.out, "{}", self.table.describe())?,
            Command::Insert(key) => {
                if self.check_key(&key)? {
                    match self.table.insert(&key) {
                        Ok(true) => writeln!(self.out, "SUCCESS")?,
                        Ok(false) => writeln!(self.out, "FAILED")?,
                        Err(e) => writeln!(self.err, "Error: {e}")?,
                    }
                }
            }
            Command::Search(key) => {
                if self.check_key(&key)? {
                    if self.table.search(&key) {
                        writeln!(self.out, "{key} FOUND")?;
                    } else {
                        writeln!(self.out, "{key} NOT FOUND")?;
                    }
                }
            }
        }
        Ok(true)
    }

    fn check_key(&mut self, key: &str) -> io::Result<bool> {
        match validate_key(key, self.table.key_length()) {
            Ok(()) => Ok(true),
            Err(e @ Error::InvalidKey { .. }) => {
                tracing::debug!(key, "rejected key");
                writeln!(self.err, "Error: {e}")?;
                Ok(false)
            }
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }
}
