//! Content summarization for the blog listing.
//!
//! Both entry points are pure functions of a post's raw `content`: they never
//! fail, never allocate shared state, and run once per post while a listing
//! is rendered.

mod excerpt;
mod format;
mod read_time;
mod strip;

pub use excerpt::{ExcerptOptions, compute_excerpt, excerpt};
pub use format::{ContentFormat, ParseFormatError};
pub use read_time::{
    ReadTime, WORDS_PER_MINUTE, compute_read_time, read_time, read_time_minutes, word_count,
};
pub use strip::plain_text;
