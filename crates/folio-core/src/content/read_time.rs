use std::fmt;

use serde::Serialize;

use super::{ContentFormat, plain_text};

/// Reading speed behind every estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time, rendered as `"N min read"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ReadTime {
    minutes: usize,
}

impl ReadTime {
    /// Never reports less than one minute, even for empty content.
    pub fn from_word_count(words: usize) -> Self {
        Self {
            minutes: words.div_ceil(WORDS_PER_MINUTE).max(1),
        }
    }

    pub fn minutes(self) -> usize {
        self.minutes
    }
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.minutes)
    }
}

/// Words left once markup is stripped.
pub fn word_count(content: &str, format: ContentFormat) -> usize {
    plain_text(content, format).split_whitespace().count()
}

pub fn read_time(content: &str, format: ContentFormat) -> ReadTime {
    ReadTime::from_word_count(word_count(content, format))
}

pub fn read_time_minutes(content: &str, format: ContentFormat) -> usize {
    read_time(content, format).minutes()
}

/// Read-time label for Markdown `content`.
pub fn compute_read_time(content: &str) -> String {
    read_time(content, ContentFormat::Markdown).to_string()
}
