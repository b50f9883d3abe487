//! # Date Patterns
//!
//! A [`DatePattern`] is the parse format handed to
//! [`Terminal::read_date`](crate::utils::Terminal::read_date). It accepts two
//! spellings:
//!
//! - a `chrono` strftime format, recognised by the presence of `%`
//!   (e.g. `%Y-%m-%d`). The answer must be exactly what the format would
//!   print for the parsed date, so `%m` needs `02`, not `2`;
//! - a letter pattern in the familiar `yyyy-MM-dd` style.
//!
//! ## Letter patterns
//!
//! | letters        | field                    | accepts                  |
//! |----------------|--------------------------|--------------------------|
//! | `yyyy`, `uuuu` | year                     | 4 or more digits         |
//! | `yy`, `uu`     | year 2000-2099           | exactly 2 digits         |
//! | `MMMM`         | full month name          | `January` .. `December`  |
//! | `MMM`          | abbreviated month name   | `Jan` .. `Dec`           |
//! | `MM` / `M`     | month number             | 2 digits / 1-2 digits    |
//! | `dd` / `d`     | day of month             | 2 digits / 1-2 digits    |
//! | `DDD` / `DD` / `D` | day of year          | 3 / 2-3 / 1-3 digits     |
//! | `EEEE`         | full weekday name        | `Monday` .. `Sunday`     |
//! | `EEE`, `E`     | abbreviated weekday name | `Mon` .. `Sun`           |
//! | `'text'`       | literal text, `''` is a single quote | |
//!
//! Every other character is matched literally. Parsing is strict: no signs,
//! no surrounding whitespace, names are case-sensitive, and a date that does
//! not exist on the calendar (`2021-02-30`) is an error. A numeric field
//! directly followed by another numeric field (`yyyyMMdd`) takes exactly its
//! minimum width.
//!
//! ```rust
//! use inputhelper_core::utils::DatePattern;
//!
//! let pattern: DatePattern = "dd 'of' MMMM yyyy".parse().unwrap();
//! assert_eq!(pattern.as_strftime(), "%d of %B %Y");
//!
//! let date = pattern.parse_date("05 of March 2024").unwrap();
//! assert_eq!(date.to_string(), "2024-03-05");
//! assert!(pattern.parse_date("5 of march 2024").is_err());
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
    ("Sunday", Weekday::Sun),
];

/// Reasons a date pattern cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Unsupported pattern letter '{0}'")]
    UnsupportedLetter(char),

    #[error("Unsupported width {width} for pattern letter '{letter}'")]
    UnsupportedWidth { letter: char, width: usize },

    #[error("Unterminated quoted literal in pattern")]
    UnterminatedQuote,

    #[error("Pattern '{0}' does not name a year, month and day")]
    Incomplete(String),
}

/// Reasons a piece of text is not a date under a [`DatePattern`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Text does not match the pattern")]
    Mismatch,

    #[error("No such calendar date")]
    NoSuchDate,

    #[error(transparent)]
    Chrono(#[from] chrono::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numeric {
    Year,
    ShortYear,
    Month,
    Day,
    Ordinal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameStyle {
    Short,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Number {
        field: Numeric,
        min: usize,
        max: usize,
    },
    MonthName(NameStyle),
    WeekdayName(NameStyle),
}

impl Token {
    fn strftime(&self) -> &str {
        match self {
            Token::Literal(text) => text,
            Token::Number { field, .. } => match field {
                Numeric::Year => "%Y",
                Numeric::ShortYear => "%y",
                Numeric::Month => "%m",
                Numeric::Day => "%d",
                Numeric::Ordinal => "%j",
            },
            Token::MonthName(NameStyle::Short) => "%b",
            Token::MonthName(NameStyle::Full) => "%B",
            Token::WeekdayName(NameStyle::Short) => "%a",
            Token::WeekdayName(NameStyle::Full) => "%A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Syntax {
    Strftime,
    Letters(Vec<Token>),
}

/// A validated date parse pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    format: String,
    syntax: Syntax,
}

impl DatePattern {
    /// Builds a pattern from strftime or `yyyy-MM-dd` style text.
    pub fn new(pattern: &str) -> Result<DatePattern, PatternError> {
        let (format, syntax) = if pattern.contains('%') {
            (pattern.to_string(), Syntax::Strftime)
        } else {
            let tokens = tokenize(pattern)?;
            let format = tokens.iter().map(Token::strftime).collect();
            (format, Syntax::Letters(tokens))
        };

        if !names_full_date(&format) {
            return Err(PatternError::Incomplete(pattern.to_string()));
        }

        Ok(DatePattern {
            source: pattern.to_string(),
            format,
            syntax,
        })
    }

    /// The pattern as the caller wrote it.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The closest `chrono` strftime format, for rendering dates back.
    pub fn as_strftime(&self) -> &str {
        &self.format
    }

    /// Parses `text` strictly. The whole input must match the pattern field
    /// by field and the result must be a real calendar date.
    pub fn parse_date(&self, text: &str) -> Result<NaiveDate, DateError> {
        match &self.syntax {
            Syntax::Letters(tokens) => parse_letters(tokens, text),
            Syntax::Strftime => {
                let date = NaiveDate::parse_from_str(text, &self.format)?;
                if date.format(&self.format).to_string() != text {
                    return Err(DateError::Mismatch);
                }
                Ok(date)
            }
        }
    }
}

impl FromStr for DatePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatePattern::new(s)
    }
}

impl Display for DatePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                if chars.next_if_eq(&'\'').is_some() {
                    push_literal(&mut tokens, '\'');
                    continue;
                }
                loop {
                    match chars.next() {
                        None => return Err(PatternError::UnterminatedQuote),
                        Some('\'') => {
                            if chars.next_if_eq(&'\'').is_some() {
                                push_literal(&mut tokens, '\'');
                            } else {
                                break;
                            }
                        }
                        Some(literal) => push_literal(&mut tokens, literal),
                    }
                }
            }
            c if c.is_ascii_alphabetic() => {
                let mut width = 1;
                while chars.next_if_eq(&c).is_some() {
                    width += 1;
                }
                tokens.push(field(c, width)?);
            }
            literal => push_literal(&mut tokens, literal),
        }
    }

    // adjacent numbers cannot be told apart by width, so each takes its minimum
    for i in 1..tokens.len() {
        if let Token::Number { .. } = tokens[i] {
            if let Token::Number { min, max, .. } = &mut tokens[i - 1] {
                *max = *min;
            }
        }
    }

    Ok(tokens)
}

fn push_literal(tokens: &mut Vec<Token>, c: char) {
    match tokens.last_mut() {
        Some(Token::Literal(text)) => text.push(c),
        _ => tokens.push(Token::Literal(c.to_string())),
    }
}

fn field(letter: char, width: usize) -> Result<Token, PatternError> {
    let number = |field, min, max| Ok(Token::Number { field, min, max });

    match (letter, width) {
        ('y' | 'u', 4) => number(Numeric::Year, 4, 9),
        ('y' | 'u', 2) => number(Numeric::ShortYear, 2, 2),
        ('M', 1) => number(Numeric::Month, 1, 2),
        ('M', 2) => number(Numeric::Month, 2, 2),
        ('M', 3) => Ok(Token::MonthName(NameStyle::Short)),
        ('M', 4) => Ok(Token::MonthName(NameStyle::Full)),
        ('d', 1) => number(Numeric::Day, 1, 2),
        ('d', 2) => number(Numeric::Day, 2, 2),
        ('D', 1..=3) => number(Numeric::Ordinal, width, 3),
        ('E', 1..=3) => Ok(Token::WeekdayName(NameStyle::Short)),
        ('E', 4) => Ok(Token::WeekdayName(NameStyle::Full)),
        ('y' | 'u' | 'M' | 'd' | 'D' | 'E', _) => {
            Err(PatternError::UnsupportedWidth { letter, width })
        }
        _ => Err(PatternError::UnsupportedLetter(letter)),
    }
}

/// Field values collected while walking a letter pattern.
#[derive(Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    ordinal: Option<u32>,
    weekday: Option<Weekday>,
}

fn agree<T: PartialEq>(slot: &mut Option<T>, value: T) -> Result<(), DateError> {
    match slot {
        Some(existing) if *existing != value => Err(DateError::Mismatch),
        _ => {
            *slot = Some(value);
            Ok(())
        }
    }
}

impl Fields {
    fn set(&mut self, field: Numeric, value: u32) -> Result<(), DateError> {
        match field {
            Numeric::Year => {
                let year = i32::try_from(value).map_err(|_| DateError::NoSuchDate)?;
                agree(&mut self.year, year)
            }
            Numeric::ShortYear => agree(&mut self.year, 2000 + value as i32),
            Numeric::Month => agree(&mut self.month, value),
            Numeric::Day => agree(&mut self.day, value),
            Numeric::Ordinal => agree(&mut self.ordinal, value),
        }
    }

    fn resolve(self) -> Result<NaiveDate, DateError> {
        let year = self.year.ok_or(DateError::Mismatch)?;

        let date = match (self.month, self.day, self.ordinal) {
            (Some(month), Some(day), _) => NaiveDate::from_ymd_opt(year, month, day),
            (_, _, Some(ordinal)) => NaiveDate::from_yo_opt(year, ordinal),
            _ => None,
        }
        .ok_or(DateError::NoSuchDate)?;

        if self.ordinal.is_some_and(|ordinal| ordinal != date.ordinal())
            || self.weekday.is_some_and(|weekday| weekday != date.weekday())
        {
            return Err(DateError::NoSuchDate);
        }

        Ok(date)
    }
}

fn parse_letters(tokens: &[Token], text: &str) -> Result<NaiveDate, DateError> {
    let mut rest = text;
    let mut fields = Fields::default();

    for token in tokens {
        rest = match token {
            Token::Literal(literal) => rest
                .strip_prefix(literal.as_str())
                .ok_or(DateError::Mismatch)?,
            Token::Number { field, min, max } => {
                let len = rest
                    .bytes()
                    .take(*max)
                    .take_while(u8::is_ascii_digit)
                    .count();
                if len < *min {
                    return Err(DateError::Mismatch);
                }
                let (digits, tail) = rest.split_at(len);
                let value: u32 = digits.parse().map_err(|_| DateError::Mismatch)?;
                fields.set(*field, value)?;
                tail
            }
            Token::MonthName(style) => {
                let (index, tail) = match_name(rest, MONTHS.iter().copied(), *style)?;
                fields.set(Numeric::Month, index as u32 + 1)?;
                tail
            }
            Token::WeekdayName(style) => {
                let (index, tail) = match_name(rest, WEEKDAYS.iter().map(|(n, _)| *n), *style)?;
                agree(&mut fields.weekday, WEEKDAYS[index].1)?;
                tail
            }
        };
    }

    if !rest.is_empty() {
        return Err(DateError::Mismatch);
    }

    fields.resolve()
}

fn match_name<'a, 'n>(
    rest: &'a str,
    names: impl Iterator<Item = &'n str>,
    style: NameStyle,
) -> Result<(usize, &'a str), DateError> {
    names
        .enumerate()
        .find_map(|(index, name)| {
            let name = match style {
                NameStyle::Short => name.get(..3).unwrap_or(name),
                NameStyle::Full => name,
            };
            rest.strip_prefix(name).map(|tail| (index, tail))
        })
        .ok_or(DateError::Mismatch)
}

/// Whether a strftime format carries enough fields to resolve a date.
fn names_full_date(format: &str) -> bool {
    let (mut year, mut month, mut day, mut ordinal) = (false, false, false, false);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        let mut directive = chars.next();
        while let Some('-' | '_' | '0') = directive {
            directive = chars.next();
        }
        match directive {
            Some('Y' | 'y') => year = true,
            Some('m' | 'b' | 'B' | 'h') => month = true,
            Some('d' | 'e') => day = true,
            Some('j') => ordinal = true,
            Some('F' | 'D' | 'x' | 'v') => (year, month, day) = (true, true, true),
            _ => {}
        }
    }

    year && ((month && day) || ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_translate_iso_letters() {
        let pattern = DatePattern::new("yyyy-MM-dd").unwrap();
        assert_eq!(pattern.as_strftime(), "%Y-%m-%d");
        assert_eq!(pattern.source(), "yyyy-MM-dd");
        assert_eq!(pattern.to_string(), "yyyy-MM-dd");
    }

    #[test]
    fn test_translate_uuuu_and_short_fields() {
        let pattern = DatePattern::new("d/M/uuuu").unwrap();
        assert_eq!(pattern.as_strftime(), "%d/%m/%Y");
        assert_eq!(pattern.parse_date("7/3/2020").unwrap(), ymd(2020, 3, 7));
        assert_eq!(pattern.parse_date("07/03/2020").unwrap(), ymd(2020, 3, 7));
        assert_eq!(pattern.parse_date("7/03/2020").unwrap(), ymd(2020, 3, 7));
    }

    #[test]
    fn test_translate_names_and_quotes() {
        let pattern = DatePattern::new("EEEE, dd 'of' MMMM yyyy").unwrap();
        assert_eq!(pattern.as_strftime(), "%A, %d of %B %Y");
        assert_eq!(
            pattern.parse_date("Tuesday, 05 of March 2024").unwrap(),
            ymd(2024, 3, 5)
        );

        let pattern = DatePattern::new("dd MMM yy").unwrap();
        assert_eq!(pattern.as_strftime(), "%d %b %y");
        assert_eq!(pattern.parse_date("09 Sep 21").unwrap(), ymd(2021, 9, 9));

        let pattern = DatePattern::new("yyyy''MM''dd").unwrap();
        assert_eq!(pattern.as_strftime(), "%Y'%m'%d");
        assert_eq!(pattern.parse_date("2021'02'28").unwrap(), ymd(2021, 2, 28));

        let pattern = DatePattern::new("yyyy-MM-dd 'o''clock'").unwrap();
        assert_eq!(pattern.as_strftime(), "%Y-%m-%d o'clock");
    }

    #[test]
    fn test_strftime_passthrough() {
        let pattern: DatePattern = "%d.%m.%Y".parse().unwrap();
        assert_eq!(pattern.as_strftime(), "%d.%m.%Y");
        assert_eq!(pattern.parse_date("28.02.2021").unwrap(), ymd(2021, 2, 28));
        assert!(DatePattern::new("%F").is_ok());
        assert!(DatePattern::new("%Y-%j").is_ok());
        assert!(DatePattern::new("%-d/%-m/%Y").is_ok());
    }

    #[test]
    fn test_strftime_requires_canonical_text() {
        let pattern = DatePattern::new("%Y-%m-%d").unwrap();
        assert_eq!(pattern.parse_date("2021-2-8"), Err(DateError::Mismatch));
        assert!(pattern.parse_date(" 2021-02-28").is_err());
        assert!(pattern.parse_date("2021-02-30").is_err());

        let pattern = DatePattern::new("%-d/%-m/%Y").unwrap();
        assert_eq!(pattern.parse_date("8/2/2021").unwrap(), ymd(2021, 2, 8));
        assert!(pattern.parse_date("08/02/2021").is_err());
    }

    #[test]
    fn test_day_of_year() {
        let pattern = DatePattern::new("yyyy-DDD").unwrap();
        assert_eq!(pattern.parse_date("2024-060").unwrap(), ymd(2024, 2, 29));
        assert_eq!(pattern.parse_date("2024-60"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("2023-366"), Err(DateError::NoSuchDate));
    }

    #[test]
    fn test_pattern_errors() {
        assert_eq!(
            DatePattern::new("yyyy-MM-dd HH:mm"),
            Err(PatternError::UnsupportedLetter('H'))
        );
        assert_eq!(
            DatePattern::new("yyy-MM-dd"),
            Err(PatternError::UnsupportedWidth {
                letter: 'y',
                width: 3
            })
        );
        assert_eq!(
            DatePattern::new("yyyy-MM-dd 'at"),
            Err(PatternError::UnterminatedQuote)
        );
        assert_eq!(
            DatePattern::new("MM-dd"),
            Err(PatternError::Incomplete("MM-dd".to_string()))
        );
        assert_eq!(
            DatePattern::new("%H:%M"),
            Err(PatternError::Incomplete("%H:%M".to_string()))
        );
    }

    #[test]
    fn test_parse_is_strict() {
        let pattern = DatePattern::new("yyyy-MM-dd").unwrap();
        assert_eq!(pattern.parse_date("2021-02-30"), Err(DateError::NoSuchDate));
        assert_eq!(pattern.parse_date("2021-04-31"), Err(DateError::NoSuchDate));
        assert_eq!(pattern.parse_date("2021-13-01"), Err(DateError::NoSuchDate));
        assert_eq!(pattern.parse_date("2021-02-28 extra"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date(""), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("2024-02-29").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_parse_rejects_short_fields() {
        let pattern = DatePattern::new("yyyy-MM-dd").unwrap();
        assert_eq!(pattern.parse_date("2021-2-8"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("2021-02-8"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("21-02-28"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("2021-002-28"), Err(DateError::Mismatch));
    }

    #[test]
    fn test_parse_rejects_signs_and_whitespace() {
        let pattern = DatePattern::new("yyyy-MM-dd").unwrap();
        assert_eq!(pattern.parse_date(" 2021-02-28"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("2021-02-28 "), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("+2021-02-28"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("2021-+2-28"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("2021- 2-28"), Err(DateError::Mismatch));
    }

    #[test]
    fn test_long_years() {
        let pattern = DatePattern::new("dd/MM/yyyy").unwrap();
        assert_eq!(pattern.parse_date("01/01/12345").unwrap(), ymd(12345, 1, 1));
        assert_eq!(pattern.parse_date("01/01/0999").unwrap(), ymd(999, 1, 1));
        assert_eq!(pattern.parse_date("01/01/999"), Err(DateError::Mismatch));
    }

    #[test]
    fn test_adjacent_fields() {
        let pattern = DatePattern::new("yyyyMMdd").unwrap();
        assert_eq!(pattern.parse_date("20210228").unwrap(), ymd(2021, 2, 28));
        assert_eq!(pattern.parse_date("2021228"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("202102280"), Err(DateError::Mismatch));
    }

    #[test]
    fn test_two_digit_year_is_this_century() {
        let pattern = DatePattern::new("dd/MM/yy").unwrap();
        assert_eq!(pattern.parse_date("01/01/75").unwrap(), ymd(2075, 1, 1));
        assert_eq!(pattern.parse_date("31/12/99").unwrap(), ymd(2099, 12, 31));
        assert_eq!(pattern.parse_date("01/01/00").unwrap(), ymd(2000, 1, 1));
        assert_eq!(pattern.parse_date("01/01/2075"), Err(DateError::Mismatch));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let pattern = DatePattern::new("dd MMM yyyy").unwrap();
        assert_eq!(pattern.parse_date("01 Mar 2024").unwrap(), ymd(2024, 3, 1));
        assert_eq!(pattern.parse_date("01 mar 2024"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("01 MAR 2024"), Err(DateError::Mismatch));
        assert_eq!(pattern.parse_date("01 March 2024"), Err(DateError::Mismatch));

        let pattern = DatePattern::new("dd MMMM yyyy").unwrap();
        assert_eq!(pattern.parse_date("01 march 2024"), Err(DateError::Mismatch));

        let pattern = DatePattern::new("%d %B %Y").unwrap();
        assert!(pattern.parse_date("01 march 2024").is_err());
    }

    #[test]
    fn test_weekday_must_agree() {
        let pattern = DatePattern::new("EEE yyyy-MM-dd").unwrap();
        assert_eq!(pattern.parse_date("Fri 2024-03-01").unwrap(), ymd(2024, 3, 1));
        assert_eq!(pattern.parse_date("Mon 2024-03-01"), Err(DateError::NoSuchDate));
        assert_eq!(pattern.parse_date("fri 2024-03-01"), Err(DateError::Mismatch));
    }
}
