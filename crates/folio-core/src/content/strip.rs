//! Markup stripping as ordered regular-expression passes.
//!
//! Each format has its own pass list. Order matters: code is removed before
//! anything else so its contents cannot be mistaken for links or tags, and
//! images are removed before links so `![alt](src)` never leaves its alt
//! text behind.

use std::sync::LazyLock;

use regex::Regex;

use super::ContentFormat;

struct Pass {
    pattern: Regex,
    replacement: &'static str,
    /// Re-apply until nothing matches. Needed where a replacement can expose
    /// a new match, e.g. nested link brackets.
    until_stable: bool,
}

impl Pass {
    fn once(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("strip pass pattern must compile"),
            replacement,
            until_stable: false,
        }
    }

    fn until_stable(pattern: &str, replacement: &'static str) -> Self {
        Self {
            until_stable: true,
            ..Self::once(pattern, replacement)
        }
    }

    fn apply(&self, text: String) -> String {
        let mut text = self.pattern.replace_all(&text, self.replacement).into_owned();
        while self.until_stable && self.pattern.is_match(&text) {
            text = self.pattern.replace_all(&text, self.replacement).into_owned();
        }
        text
    }
}

const IMAGE_INLINE: &str = r"!\[[^\]]*\]\([^)]*\)";
const IMAGE_REFERENCE: &str = r"!\[[^\]]*\]\[[^\]]*\]";
const LINK_INLINE: &str = r"\[([^\]]*)\]\([^)]*\)";
const LINK_REFERENCE: &str = r"\[([^\]]+)\]\[[^\]]*\]";
const STRAY_DELIMITERS: &str = r"[<>`]";

static MARKDOWN_PASSES: LazyLock<Vec<Pass>> = LazyLock::new(|| {
    vec![
        // Code blocks; an unterminated fence swallows the rest of the input.
        Pass::once(r"(?s)```.*?(?:```|\z)", " "),
        Pass::once(r"(?s)~~~.*?(?:~~~|\z)", " "),
        Pass::once(r"`([^`\n]*)`", "${1}"),
        // Images, then links.
        Pass::until_stable(IMAGE_INLINE, ""),
        Pass::until_stable(IMAGE_REFERENCE, ""),
        Pass::until_stable(LINK_INLINE, "${1}"),
        Pass::until_stable(LINK_REFERENCE, "${1}"),
        Pass::once(r"(?m)^[ \t]*\[[^\]]+\]:[ \t]*\S.*$", ""),
        // Residual markup.
        Pass::once(r"<[^>]*>", ""),
        Pass::once(r"(?m)^[ \t]{0,3}#{1,6}[ \t]*", ""),
        Pass::once(r"(?m)^[ \t]*(?:[-*_][ \t]*){3,}$", ""),
        Pass::once(r"(?m)^[ \t]*=+[ \t]*$", ""),
        Pass::once(r"(?m)^[ \t]*(?:>[ \t]?)+", ""),
        Pass::once(r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+(?:\[[ xX]\][ \t]+)?", ""),
        Pass::once(r"\\([\\`*_{}\[\]()#+\-.!|~<>])", "${1}"),
        Pass::once(r"\*{1,3}|~~", ""),
        Pass::once(r"(^|[^\w])_{1,3}", "${1}"),
        Pass::once(r"_{1,3}([^\w]|$)", "${1}"),
        Pass::once(STRAY_DELIMITERS, ""),
        // Deleting delimiters can splice link syntax back together.
        Pass::until_stable(IMAGE_INLINE, ""),
        Pass::until_stable(LINK_INLINE, "${1}"),
    ]
});

static HTML_PASSES: LazyLock<Vec<Pass>> = LazyLock::new(|| {
    vec![
        Pass::once(r"(?s)<!--.*?(?:-->|\z)", " "),
        Pass::once(r"(?is)<pre\b[^>]*>.*?(?:</pre\s*>|\z)", " "),
        Pass::once(r"(?is)<script\b[^>]*>.*?(?:</script\s*>|\z)", " "),
        Pass::once(r"(?is)<style\b[^>]*>.*?(?:</style\s*>|\z)", " "),
        Pass::once(r"(?i)</?code\b[^>]*>", ""),
        Pass::once(r"(?i)<img\b[^>]*>", ""),
        Pass::once(r"(?is)<a\b[^>]*>(.*?)</a\s*>", "${1}"),
        // Block boundaries become spaces so adjacent paragraphs keep apart.
        Pass::once(
            r"(?i)</?(?:p|div|h[1-6]|li|ul|ol|blockquote|br|hr|tr|td|th|table|section|article|header|footer|figure|figcaption)\b[^>]*>",
            " ",
        ),
        Pass::once(r"<[^>]*>", ""),
        Pass::once(r"<[^>]*\z", ""),
        Pass::once(r"&nbsp;", " "),
        Pass::once(r"&quot;", "\""),
        Pass::once(r"&#0*39;|&apos;", "'"),
        Pass::once(r"&lt;|&gt;", ""),
        Pass::once(r"&amp;", "&"),
        Pass::once(STRAY_DELIMITERS, ""),
        Pass::until_stable(IMAGE_INLINE, ""),
        Pass::until_stable(LINK_INLINE, "${1}"),
    ]
});

fn passes(format: ContentFormat) -> &'static [Pass] {
    match format {
        ContentFormat::Markdown => &MARKDOWN_PASSES,
        ContentFormat::Html => &HTML_PASSES,
    }
}

/// Reduce `content` to plain text: markup removed, link labels kept, images
/// and code dropped, whitespace runs collapsed to single spaces and trimmed.
///
/// Best effort on malformed input; never fails.
pub fn plain_text(content: &str, format: ContentFormat) -> String {
    let stripped = passes(format)
        .iter()
        .fold(content.to_owned(), |text, pass| pass.apply(text));

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md(s: &str) -> String {
        plain_text(s, ContentFormat::Markdown)
    }

    fn html(s: &str) -> String {
        plain_text(s, ContentFormat::Html)
    }

    #[test]
    fn test_markdown_keeps_link_labels_and_drops_images() {
        let text = md("See [the docs](https://docs.rs) ![logo](logo.png) now");
        assert_eq!(text, "See the docs now");
    }

    #[test]
    fn test_markdown_fenced_code_is_removed_before_links() {
        let text = md("Intro\n\n```rust\nlet x = \"[a](b)\";\n```\n\nOutro");
        assert_eq!(text, "Intro Outro");
    }

    #[test]
    fn test_markdown_unterminated_fence_runs_to_end() {
        assert_eq!(md("Before\n```\nnever closed [x](y)"), "Before");
    }

    #[test]
    fn test_markdown_inline_code_keeps_text() {
        assert_eq!(md("Run `cargo fmt` first"), "Run cargo fmt first");
    }

    #[test]
    fn test_markdown_structure_markers() {
        let text = md("# Heading\n\n> quoted\n\n- one\n- two\n1. three\n\n---\n\n**bold** and _soft_");
        assert_eq!(text, "Heading quoted one two three bold and soft");
    }

    #[test]
    fn test_markdown_keeps_snake_case_words() {
        assert_eq!(md("call my_function here"), "call my_function here");
    }

    #[test]
    fn test_markdown_nested_link_brackets() {
        assert_eq!(md("[[a](b)](c)"), "a");
    }

    #[test]
    fn test_markdown_reference_links() {
        let text = md("Read [the guide][g] today.\n\n[g]: https://example.com/guide");
        assert_eq!(text, "Read the guide today.");
    }

    #[test]
    fn test_markdown_inline_html() {
        assert_eq!(md("Some <b>bold</b> words"), "Some bold words");
    }

    #[test]
    fn test_html_paragraphs_stay_separated() {
        assert_eq!(html("<h1>Title</h1><p>First.</p><p>Second.</p>"), "Title First. Second.");
    }

    #[test]
    fn test_html_drops_pre_blocks_and_images() {
        let text = html("<p>Look</p><pre><code>fn main() {}</code></pre><img src=\"x.png\"><p>done</p>");
        assert_eq!(text, "Look done");
    }

    #[test]
    fn test_html_link_label_kept() {
        assert_eq!(html("<p>Go <a href=\"https://x.com\">here</a>.</p>"), "Go here.");
    }

    #[test]
    fn test_html_entities() {
        assert_eq!(html("<p>Tom &amp; Jerry&nbsp;&quot;live&quot; &lt;3</p>"), "Tom & Jerry \"live\" 3");
    }

    #[test]
    fn test_html_unterminated_tag() {
        assert_eq!(html("<p>text</p><div class=\"open"), "text");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(md(""), "");
        assert_eq!(html(""), "");
    }
}
