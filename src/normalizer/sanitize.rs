//! Text cleanup for search API fields
//!
//! The search endpoints wrap matched query terms in `<b>` tags and escape
//! quotes as HTML entities. These helpers reduce such a field to plain text
//! with single spaces.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::normalize_whitespace;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Reduce an API text field to plain text
///
/// Applies, in order: tag removal, HTML entity decoding, zero-width
/// character removal, control character removal and whitespace collapsing.
///
/// # Examples
///
/// ```
/// use shoplens::normalizer::sanitize::clean_text;
///
/// let raw = "<b>오메가3</b> &quot;추천&quot;\n후기";
/// assert_eq!(clean_text(raw), "오메가3 \"추천\" 후기");
/// ```
pub fn clean_text(text: &str) -> String {
    let without_tags = strip_tags(text);
    let decoded = html_escape::decode_html_entities(&without_tags);
    let visible = remove_zero_width(&decoded);
    let printable = remove_control_chars(&visible);
    normalize_whitespace(&printable)
}

/// Remove HTML/XML tags, keeping their inner text
pub fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Remove zero-width spaces and similar invisible characters
///
/// Removes \u{200B}-\u{200F}, \u{2028}-\u{202F} and the byte order mark.
///
/// # Examples
///
/// ```
/// use shoplens::normalizer::sanitize::remove_zero_width;
///
/// let text = "가\u{200B}나\u{FEFF}다";
/// assert_eq!(remove_zero_width(text), "가나다");
/// ```
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Replace control characters with spaces
///
/// Newlines and tabs become spaces too; they are collapsed afterwards.
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_highlight_tags() {
        assert_eq!(strip_tags("<b>비타민D</b> 효능"), "비타민D 효능");
        assert_eq!(strip_tags("no tags"), "no tags");
    }

    #[test]
    fn test_clean_text_decodes_entities() {
        assert_eq!(clean_text("A &amp; B &lt;3"), "A & B <3");
        assert_eq!(clean_text("it&#39;s"), "it's");
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  one\t\ttwo \n three  "), "one two three");
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        let once = clean_text("<b>오메가3</b>&nbsp;&nbsp;rTG\u{200B} 추천");
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("<b></b>"), "");
    }
}
