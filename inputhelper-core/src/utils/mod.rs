pub mod date;
pub use date::{DateError, DatePattern, PatternError};

pub mod sanitize;
pub use sanitize::{BoolLiterals, Integer, Rejection, RejectionKind};

pub mod terminal;
pub use terminal::Terminal;
