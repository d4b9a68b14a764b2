//! Delimited text input and output

pub mod delimited;
pub mod writer;

use std::fmt;

/// Field separator for delimited tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Split on every occurrence of the character; adjacent separators give empty fields
    Char(char),
    /// Split on runs of whitespace, ignoring leading and trailing padding
    Whitespace,
}

impl Delimiter {
    pub const SPACE: Delimiter = Delimiter::Char(' ');
    pub const TAB: Delimiter = Delimiter::Char('\t');

    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Char(c) => line.split(*c).collect(),
            Delimiter::Whitespace => line.split_whitespace().collect(),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Char('\t') => f.write_str("tab"),
            Delimiter::Char(' ') => f.write_str("space"),
            Delimiter::Char(c) => write!(f, "'{}'", c),
            Delimiter::Whitespace => f.write_str("whitespace"),
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = String;

    /// Accepts `tab`, `space`, `whitespace`, `\t` or any single character
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tab" | "\\t" | "\t" => Ok(Delimiter::TAB),
            "space" | " " => Ok(Delimiter::SPACE),
            "whitespace" | "ws" => Ok(Delimiter::Whitespace),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii() && !matches!(c, '\n' | '\r' | '"') => Ok(Delimiter::Char(c)),
                    _ => Err(format!("invalid delimiter '{}': expected a single ASCII character, 'tab', 'space' or 'whitespace'", s)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_split_keeps_empty_fields() {
        assert_eq!(Delimiter::SPACE.split("a  b"), vec!["a", "", "b"]);
        assert_eq!(Delimiter::TAB.split("Lat.\tLong."), vec!["Lat.", "Long."]);
    }

    #[test]
    fn test_whitespace_split() {
        assert_eq!(Delimiter::Whitespace.split("   FID1  IID1 DST "), vec!["FID1", "IID1", "DST"]);
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!("tab".parse::<Delimiter>(), Ok(Delimiter::TAB));
        assert_eq!(",".parse::<Delimiter>(), Ok(Delimiter::Char(',')));
        assert_eq!("whitespace".parse::<Delimiter>(), Ok(Delimiter::Whitespace));
        assert!("ab".parse::<Delimiter>().is_err());
        assert!("".parse::<Delimiter>().is_err());
        assert!("§".parse::<Delimiter>().is_err());
        assert!("\"".parse::<Delimiter>().is_err());
    }
}
