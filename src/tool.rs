// ABOUTME: Closed set of sqldef binaries this crate knows how to fetch and run
// ABOUTME: Parsing rejects anything else before any network call

use crate::error::SqldefError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Mysqldef,
    Psqldef,
    Sqlite3def,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Mysqldef, Tool::Psqldef, Tool::Sqlite3def];

    /// Binary name, which is also the tar entry name and the release asset prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Mysqldef => "mysqldef",
            Tool::Psqldef => "psqldef",
            Tool::Sqlite3def => "sqlite3def",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = SqldefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| SqldefError::UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tools() {
        assert_eq!("mysqldef".parse::<Tool>().unwrap(), Tool::Mysqldef);
        assert_eq!("psqldef".parse::<Tool>().unwrap(), Tool::Psqldef);
        assert_eq!("sqlite3def".parse::<Tool>().unwrap(), Tool::Sqlite3def);
    }

    #[test]
    fn test_parse_unknown_tool_fails() {
        for name in ["", "mssqldef", "PSQLDEF", "psqldef ", "../psqldef"] {
            match name.parse::<Tool>() {
                Err(SqldefError::UnknownCommand(got)) => assert_eq!(got, name),
                other => panic!("expected UnknownCommand for {:?}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_display_matches_binary_name() {
        for tool in Tool::ALL {
            assert_eq!(tool.to_string(), tool.as_str());
        }
    }
}
