//! Screens the controller can show.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseError;

/// Active screen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Summary statistics (initial screen)
    #[default]
    Dashboard,
    /// New-encounter entry form
    New,
    /// Full encounter list
    List,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::New => "new",
            View::List => "list",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(View::Dashboard),
            "new" => Ok(View::New),
            "list" => Ok(View::List),
            _ => Err(ParseError::UnknownView(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view() {
        assert_eq!("list".parse::<View>().unwrap(), View::List);
        assert_eq!("Dashboard".parse::<View>().unwrap(), View::Dashboard);
        assert!("settings".parse::<View>().is_err());
    }

    #[test]
    fn test_default_is_dashboard() {
        assert_eq!(View::default(), View::Dashboard);
    }
}
