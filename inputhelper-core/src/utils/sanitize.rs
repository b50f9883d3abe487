//! # Answer Validation
//!
//! The rules applied to each line read by [`Terminal`](crate::utils::Terminal).
//! Every rule is a pure function from the raw line to either the parsed
//! value or a [`Rejection`]. A rejection's `Display` text is exactly the
//! diagnostic shown to the user before the question is repeated.
//!
//! The functions are public so the same rules can check answers that came
//! from somewhere other than a terminal.
//!
//! ```rust
//! use inputhelper_core::utils::sanitize::{self, Rejection};
//!
//! assert_eq!(sanitize::integer::<i32>("7", &(1..=10)), Ok(7));
//! assert_eq!(
//!     sanitize::integer::<i32>("15", &(1..=10)),
//!     Err(Rejection::NumberOutOfRange)
//! );
//! ```

use crate::utils::date::DatePattern;
use chrono::NaiveDate;
use std::fmt::Display;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;
use thiserror::Error;

/// Why an answer was refused. The message is printed verbatim, a leading
/// newline included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("No character inputted. Please input a character.")]
    NoCharacter,

    #[error("No text inputted. Please input text.")]
    NoText,

    #[error("No {0} inputted. Please input a(n) {0}.")]
    NoLabelled(String),

    #[error("Cannot be empty. Please re-enter either {truthy} or {falsy}.")]
    NoChoice { truthy: String, falsy: String },

    #[error("\nCharacter out of range. Please re-enter.")]
    CharacterOutOfRange,

    #[error("\nNumber is out of range. Please re-enter.")]
    NumberOutOfRange,

    #[error("\nNot a valid number. Please re-enter.")]
    NotANumber,

    #[error("\nNot a valid number. Please re-enter a whole number between {min} and {max}.")]
    NotAWholeNumber { min: String, max: String },

    #[error("\nNot a valid input. Please re-enter either {truthy} or {falsy}.")]
    NotAChoice { truthy: String, falsy: String },

    #[error("\nNot a valid date. Please re-enter to the format of {0}")]
    InvalidDate(String),
}

/// Coarse classification of a [`Rejection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    Empty,
    OutOfRange,
    NotANumber,
    NotAllowed,
    InvalidDate,
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::NoCharacter | Self::NoText | Self::NoLabelled(_) | Self::NoChoice { .. } => {
                RejectionKind::Empty
            }
            Self::CharacterOutOfRange => RejectionKind::NotAllowed,
            Self::NumberOutOfRange => RejectionKind::OutOfRange,
            Self::NotANumber | Self::NotAWholeNumber { .. } => RejectionKind::NotANumber,
            Self::NotAChoice { .. } => RejectionKind::NotAllowed,
            Self::InvalidDate(_) => RejectionKind::InvalidDate,
        }
    }
}

impl Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::OutOfRange => write!(f, "out of range"),
            Self::NotANumber => write!(f, "not a number"),
            Self::NotAllowed => write!(f, "not allowed"),
            Self::InvalidDate => write!(f, "invalid date"),
        }
    }
}

/// The pair of words accepted by
/// [`Terminal::read_boolean`](crate::utils::Terminal::read_boolean).
///
/// Matching is case-insensitive. The default pair is `true` / `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolLiterals {
    truthy: String,
    falsy: String,
}

impl BoolLiterals {
    /// A pair where `truthy` reads as `true` and `falsy` as `false`.
    ///
    /// ```rust
    /// use inputhelper_core::utils::{BoolLiterals, sanitize};
    ///
    /// let literals = BoolLiterals::new("y", "n");
    /// assert_eq!(sanitize::boolean("Y", &literals), Ok(true));
    /// assert_eq!(literals.falsy(), "n");
    /// ```
    pub fn new(truthy: impl Into<String>, falsy: impl Into<String>) -> BoolLiterals {
        BoolLiterals {
            truthy: truthy.into(),
            falsy: falsy.into(),
        }
    }

    pub fn truthy(&self) -> &str {
        &self.truthy
    }

    pub fn falsy(&self) -> &str {
        &self.falsy
    }
}

impl Default for BoolLiterals {
    fn default() -> Self {
        BoolLiterals::new("true", "false")
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Primitive integers readable with
/// [`Terminal::read_int`](crate::utils::Terminal::read_int).
pub trait Integer: FromStr + PartialOrd + Display + Copy + sealed::Sealed {
    const MIN: Self;
    const MAX: Self;
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Integer for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// First character of a non-empty line, optionally restricted to the
/// characters of `allowed` (case-sensitive).
pub fn first_char(line: &str, allowed: Option<&str>) -> Result<char, Rejection> {
    let first = line.chars().next().ok_or(Rejection::NoCharacter)?;

    match allowed {
        Some(set) if !set.contains(first) => Err(Rejection::CharacterOutOfRange),
        _ => Ok(first),
    }
}

/// The line itself, as long as it is not empty.
pub fn required<'a>(line: &'a str, label: Option<&str>) -> Result<&'a str, Rejection> {
    if !line.is_empty() {
        return Ok(line);
    }

    match label {
        Some(label) => Err(Rejection::NoLabelled(label.to_string())),
        None => Err(Rejection::NoText),
    }
}

/// A base-10 integer inside `range`.
///
/// A fully unbounded range (`..`) reports parse failures with the limits of
/// `T`, since there is no caller range to be outside of.
pub fn integer<T: Integer>(line: &str, range: &impl RangeBounds<T>) -> Result<T, Rejection> {
    let unbounded = matches!(
        (range.start_bound(), range.end_bound()),
        (Bound::Unbounded, Bound::Unbounded)
    );

    let value: T = line.parse().map_err(|_| {
        if unbounded {
            Rejection::NotAWholeNumber {
                min: T::MIN.to_string(),
                max: T::MAX.to_string(),
            }
        } else {
            Rejection::NotANumber
        }
    })?;

    if range.contains(&value) {
        Ok(value)
    } else {
        Err(Rejection::NumberOutOfRange)
    }
}

/// `true` or `false` depending on which literal the line matches,
/// ignoring case. The truthy literal is checked first.
pub fn boolean(line: &str, literals: &BoolLiterals) -> Result<bool, Rejection> {
    if line.is_empty() {
        return Err(Rejection::NoChoice {
            truthy: literals.truthy.clone(),
            falsy: literals.falsy.clone(),
        });
    }

    let answer = line.to_lowercase();
    if answer == literals.truthy.to_lowercase() {
        Ok(true)
    } else if answer == literals.falsy.to_lowercase() {
        Ok(false)
    } else {
        Err(Rejection::NotAChoice {
            truthy: literals.truthy.clone(),
            falsy: literals.falsy.clone(),
        })
    }
}

/// A real calendar date matching `pattern`. `display` is the format text
/// shown back to the user on failure.
pub fn date(line: &str, pattern: &DatePattern, display: &str) -> Result<NaiveDate, Rejection> {
    pattern
        .parse_date(line)
        .map_err(|_| Rejection::InvalidDate(display.to_string()))
}
