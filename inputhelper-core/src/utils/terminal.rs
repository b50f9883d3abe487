//! # Terminal Input Helper
//!
//! This module provides [`Terminal`], the prompt reader. Each `read_*`
//! method prints a question, reads one line and keeps asking until the line
//! passes the matching rule from [`sanitize`](crate::utils::sanitize).
//!
//! ## Features
//! - Continuously prompts the user until valid input is received.
//! - Prints the exact reason an answer was refused before asking again.
//! - Works over any `BufRead`/`Write` pair, standard input/output by default.
//!
//! ## Usage
//!
//! Build one [`Terminal`] per process with [`Terminal::stdio`] and pass it
//! by `&mut` to whatever needs to ask questions.
//!
//! ### Example 1: Ranged integer
//! ```rust,no_run
//! use inputhelper_core::utils::Terminal;
//!
//! let mut terminal = Terminal::stdio();
//! let threads = terminal.read_int::<u16>("Scan threads (1-16)", 1..=16).unwrap();
//! println!("The input: {}", threads);
//! ```
//!
//! ### Example 2: Restricted character
//! ```rust,no_run
//! use inputhelper_core::utils::Terminal;
//!
//! let mut terminal = Terminal::stdio();
//! let choice = terminal.read_character("Do you like Rust? Y/N", Some("YNyn")).unwrap();
//! println!("The input: {}", choice);
//! ```
//!
//! ### Example 3: Scripted input
//! ```rust
//! use inputhelper_core::utils::{BoolLiterals, Terminal};
//! use std::io::Cursor;
//!
//! let mut terminal = Terminal::new(Cursor::new("maybe\nTRUE\n"), Vec::new());
//! assert!(terminal.read_boolean("Ready", &BoolLiterals::default()).unwrap());
//! ```

use crate::error::{PromptError, Result};
use crate::utils::date::DatePattern;
use crate::utils::sanitize::{self, BoolLiterals, Integer, Rejection};
use chrono::NaiveDate;
use log::{debug, trace};
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::ops::RangeBounds;

/// A prompt reader over one line source and one output sink.
///
/// Methods take `&mut self`, so a single reader can only be in one
/// question at a time.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// A reader over locked standard input and standard output.
    pub fn stdio() -> Self {
        Terminal::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// A reader over any line source and output sink.
    pub fn new(input: R, output: W) -> Self {
        Terminal { input, output }
    }

    /// Gives back the wrapped input and output.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Reads the first character of a non-empty line.
    ///
    /// With `allowed` set, the character must also appear in that string
    /// (case-sensitive). The rest of the line is discarded.
    pub fn read_character(&mut self, prompt: &str, allowed: Option<&str>) -> Result<char> {
        self.ask_until(prompt, |line| sanitize::first_char(line, allowed))
    }

    /// Reads one line as is. An empty line is a valid answer.
    pub fn read_string(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)
    }

    /// Reads a non-empty line.
    ///
    /// `label` names what is being asked for in the diagnostic
    /// (`No name inputted. Please input a(n) name.`); `None` gives a generic
    /// message.
    pub fn read_string_required(&mut self, prompt: &str, label: Option<&str>) -> Result<String> {
        self.ask_until(prompt, |line| {
            sanitize::required(line, label).map(str::to_owned)
        })
    }

    /// Reads a base-10 integer of type `T` that lies inside `range`.
    ///
    /// Pass `..` to accept any value `T` can hold.
    ///
    /// ```rust,no_run
    /// # use inputhelper_core::utils::Terminal;
    /// let mut terminal = Terminal::stdio();
    /// let age = terminal.read_int::<u8>("Age", 18..=99).unwrap();
    /// let offset = terminal.read_int::<i64>("Offset", ..).unwrap();
    /// ```
    pub fn read_int<T: Integer>(&mut self, prompt: &str, range: impl RangeBounds<T>) -> Result<T> {
        self.ask_until(prompt, |line| sanitize::integer(line, &range))
    }

    /// Reads one of the two literals in `literals`, ignoring case.
    pub fn read_boolean(&mut self, prompt: &str, literals: &BoolLiterals) -> Result<bool> {
        self.ask_until(prompt, |line| sanitize::boolean(line, literals))
    }

    /// Reads a date that matches `pattern`.
    ///
    /// The question is shown as `"{prompt} ({display})"` so the user sees
    /// the expected format. Empty answers are refused as a missing date and
    /// impossible dates such as `2021-02-30` as an invalid one.
    pub fn read_date(
        &mut self,
        prompt: &str,
        pattern: &DatePattern,
        display: &str,
    ) -> Result<NaiveDate> {
        let question = format!("{} ({})", prompt, display);

        loop {
            let line = self.read_string_required(&question, Some("date"))?;

            match sanitize::date(&line, pattern, display) {
                Ok(date) => break Ok(date),
                Err(e) => self.refuse(&e)?,
            }
        }
    }

    fn ask_until<T, F>(&mut self, prompt: &str, mut check: F) -> Result<T>
    where
        F: FnMut(&str) -> std::result::Result<T, Rejection>,
    {
        loop {
            let line = self.ask(prompt)?;

            match check(&line) {
                Ok(value) => break Ok(value),
                Err(e) => self.refuse(&e)?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.output, "{}: ", prompt)?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            debug!("input closed while asking {:?}", prompt);
            return Err(PromptError::InputClosed);
        }

        if raw.ends_with(b"\n") {
            raw.pop();
            if raw.ends_with(b"\r") {
                raw.pop();
            }
        }

        trace!("read {} bytes for {:?}", raw.len(), prompt);

        // undecodable bytes become U+FFFD and go through validation like any other text
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    fn refuse(&mut self, rejection: &Rejection) -> Result<()> {
        debug!("answer refused: {}", rejection.kind());

        writeln!(self.output, "{}", rejection)?;
        self.output.flush()?;
        Ok(())
    }
}
