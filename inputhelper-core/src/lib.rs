//! # InputHelper
//!
//! Blocking console prompts for CLI applications. Every read prints a
//! question, reads one line and keeps asking until the answer is valid for
//! the requested type.
//!
//! ## Features
//!
//! - **Characters** - first character of the line, optionally restricted to a set
//! - **Strings** - free text, or required (non-empty) text with a labelled message
//! - **Integers** - any primitive integer type, with an optional inclusive range
//! - **Booleans** - `true`/`false` or any custom pair of literals, case-insensitive
//! - **Dates** - strict calendar dates parsed with a `yyyy-MM-dd` style or strftime pattern
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inputhelper_core::utils::{BoolLiterals, DatePattern, Terminal};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut terminal = Terminal::stdio();
//!
//! let name = terminal.read_string_required("Name", Some("name"))?;
//! let threads = terminal.read_int::<u8>("Threads (1-16)", 1..=16)?;
//! let proceed = terminal.read_boolean("Continue? (y/n)", &BoolLiterals::new("y", "n"))?;
//!
//! let pattern: DatePattern = "yyyy-MM-dd".parse()?;
//! let start = terminal.read_date("Start date", &pattern, "YYYY-MM-DD")?;
//!
//! println!("{name} {threads} {proceed} {start}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Invalid answers are never returned to the caller. They print a diagnostic
//! and the question is asked again. The `Result` of each call only carries
//! stream failures, see [`PromptError`].
//!
//! ## Logging
//!
//! Rejected answers are logged at `debug` level through the [`log`] facade.
//! Installing a logger is left to the application.

pub mod error;

pub mod utils;

pub use error::{PromptError, Result};
