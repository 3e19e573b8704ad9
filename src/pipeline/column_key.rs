//! Column selectors accepted by the dataset editing operations

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A user-supplied reference to a column, either by name or by position.
///
/// Text coming from a prompt or the command line is parsed once with
/// [`ColumnKey::parse`]; the dataset resolves the key against its current
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// Literal column name
    Name(String),
    /// Zero-based integer key. Matches a column named after the integer first,
    /// then the column at that position.
    Index(usize),
}

impl ColumnKey {
    /// Parse a raw token.
    ///
    /// Any token that parses as a non-negative integer (`"3"`, `"03"`, `"+3"`)
    /// becomes [`ColumnKey::Index`]; anything else becomes a
    /// [`ColumnKey::Name`] of the trimmed token.
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim();
        match trimmed.parse::<usize>() {
            Ok(index) => ColumnKey::Index(index),
            Err(_) => ColumnKey::Name(trimmed.to_string()),
        }
    }
}

impl FromStr for ColumnKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ColumnKey::parse(s))
    }
}

impl From<&str> for ColumnKey {
    fn from(s: &str) -> Self {
        ColumnKey::Name(s.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(s: String) -> Self {
        ColumnKey::Name(s)
    }
}

impl From<usize> for ColumnKey {
    fn from(index: usize) -> Self {
        ColumnKey::Index(index)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Name(name) => write!(f, "{}", name),
            ColumnKey::Index(index) => write!(f, "{}", index),
        }
    }
}
