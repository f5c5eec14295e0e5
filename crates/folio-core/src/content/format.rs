use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The markup dialect post bodies are stored in.
///
/// Fixed for a deployment; a store never mixes formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Markdown,
    Html,
}

impl ContentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentFormat::Markdown => "markdown",
            ContentFormat::Html => "html",
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content format `{0}` (expected `markdown` or `html`)")]
pub struct ParseFormatError(pub String);

impl FromStr for ContentFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ContentFormat::Markdown),
            "html" => Ok(ContentFormat::Html),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Markdown".parse(), Ok(ContentFormat::Markdown));
        assert_eq!(" md ".parse(), Ok(ContentFormat::Markdown));
        assert_eq!("HTML".parse(), Ok(ContentFormat::Html));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "rst".parse::<ContentFormat>().unwrap_err();
        assert_eq!(err, ParseFormatError("rst".to_string()));
    }
}
