use serde::{Deserialize, Serialize};

use super::{ContentFormat, plain_text};

/// Tuning for excerpt truncation.
///
/// Lengths count Unicode scalar values, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptOptions {
    /// Plain text at or under this length is returned whole.
    pub max_chars: usize,
    /// A sentence end is only used as the cut if the kept text is at least
    /// this long; otherwise the cut falls back to a word boundary.
    pub sentence_floor: usize,
    /// Appended when the cut falls on a word boundary.
    pub ellipsis: String,
}

impl Default for ExcerptOptions {
    fn default() -> Self {
        Self {
            max_chars: 200,
            sentence_floor: 150,
            ellipsis: "...".to_string(),
        }
    }
}

/// Plain-text preview of `content`, bounded by `options.max_chars` plus the
/// ellipsis.
pub fn excerpt(content: &str, format: ContentFormat, options: &ExcerptOptions) -> String {
    truncate(&plain_text(content, format), options)
}

/// Excerpt of Markdown `content` with the default options.
pub fn compute_excerpt(content: &str) -> String {
    excerpt(content, ContentFormat::Markdown, &ExcerptOptions::default())
}

fn truncate(text: &str, options: &ExcerptOptions) -> String {
    let max = options.max_chars;
    // One past the cut so a boundary sitting exactly on it is visible.
    let chars: Vec<(usize, char)> = text.char_indices().take(max + 1).collect();
    if chars.len() <= max {
        return text.to_string();
    }

    let head = &chars[..max];
    if let Some(pos) = head.iter().rposition(|&(_, c)| matches!(c, '.' | '?' | '!')) {
        if pos + 1 >= options.sentence_floor {
            let (offset, c) = head[pos];
            return text[..offset + c.len_utf8()].to_string();
        }
    }

    let cut = chars[max].0;
    let body = match chars.iter().rev().find(|&&(_, c)| c.is_whitespace()) {
        Some(&(offset, _)) if offset > 0 => text[..offset].trim_end(),
        // A single token longer than the limit: hard cut.
        _ => &text[..cut],
    };

    format!("{body}{}", options.ellipsis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(compute_excerpt(""), "");
    }

    #[test]
    fn test_short_text_is_returned_whole() {
        assert_eq!(compute_excerpt("Just a *short* note."), "Just a short note.");
    }

    #[test]
    fn test_exactly_max_chars_is_not_truncated() {
        let text = "a".repeat(200);
        assert_eq!(compute_excerpt(&text), text);
    }

    #[test]
    fn test_markdown_scenario() {
        let content = "# Title\n\nSome **bold** text with a [link](http://x.com) and ![img](http://y.com/i.png).";
        let out = compute_excerpt(content);

        assert!(out.contains("Title"));
        assert!(out.contains("Some bold text with a link and"));
        assert!(!out.contains("http"));
        assert!(!out.contains("img"));
    }

    #[test]
    fn test_cuts_at_late_sentence_end_without_ellipsis() {
        // 159 chars of words, a full stop, then more text past the limit.
        let first = format!("{}.", "x".repeat(159));
        let content = format!("{first} {}", words(40));
        let out = compute_excerpt(&content);

        assert_eq!(out, first);
        assert_eq!(out.chars().count(), 160);
    }

    #[test]
    fn test_early_sentence_end_falls_back_to_word_boundary() {
        let content = format!("Short start. {}", words(60));
        let out = compute_excerpt(&content);

        assert!(out.ends_with("word..."));
        assert!(out.chars().count() <= 203);
        assert!(!out.contains("wor..."));
    }

    #[test]
    fn test_never_cuts_mid_word() {
        let content = words(60);
        let out = compute_excerpt(&content);
        let body = out.strip_suffix("...").unwrap();

        assert!(body.split(' ').all(|w| w == "word"));
    }

    #[test]
    fn test_boundary_exactly_at_cut_keeps_full_head() {
        // 200 chars then a space: the head ends on a word boundary.
        let head = format!("{} {}", "a".repeat(99), "b".repeat(100));
        let content = format!("{head} tail");
        assert_eq!(compute_excerpt(&content), format!("{head}..."));
    }

    #[test]
    fn test_single_long_token_hard_cut() {
        let content = "z".repeat(300);
        let out = compute_excerpt(&content);

        assert_eq!(out, format!("{}...", "z".repeat(200)));
    }

    #[test]
    fn test_multibyte_text_does_not_split_chars() {
        let content = "é".repeat(250);
        let out = compute_excerpt(&content);

        assert_eq!(out.chars().count(), 203);
    }

    #[test]
    fn test_custom_options() {
        let options = ExcerptOptions {
            max_chars: 20,
            sentence_floor: 5,
            ellipsis: "…".to_string(),
        };
        let out = excerpt("<p>Hello world. This keeps going on.</p>", ContentFormat::Html, &options);
        assert_eq!(out, "Hello world.");

        let out = excerpt("one two three four five six", ContentFormat::Markdown, &options);
        assert_eq!(out, "one two three four…");
    }

    #[test]
    fn test_zero_limit_does_not_panic() {
        let options = ExcerptOptions {
            max_chars: 0,
            ..ExcerptOptions::default()
        };
        assert_eq!(excerpt("anything", ContentFormat::Markdown, &options), "...");
    }

    proptest! {
        #[test]
        fn prop_excerpt_is_bounded(content in "\\PC{0,600}") {
            for format in [ContentFormat::Markdown, ContentFormat::Html] {
                let out = excerpt(&content, format, &ExcerptOptions::default());
                let plain = plain_text(&content, format);
                if plain.chars().count() <= 200 {
                    prop_assert_eq!(out, plain);
                } else {
                    prop_assert!(out.chars().count() <= 203);
                }
            }
        }

        #[test]
        fn prop_excerpt_has_no_markup_delimiters(content in "[a-z \\[\\]()<>`!*_#\n]{0,400}") {
            for format in [ContentFormat::Markdown, ContentFormat::Html] {
                let out = excerpt(&content, format, &ExcerptOptions::default());
                prop_assert!(!out.contains('<'));
                prop_assert!(!out.contains('>'));
                prop_assert!(!out.contains('`'));
                let link = regex::Regex::new(r"\[[^\]]*\]\([^)]*\)").unwrap();
                prop_assert!(!link.is_match(&out));
            }
        }
    }
}
