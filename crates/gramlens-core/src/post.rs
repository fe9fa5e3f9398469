//! Canonical post model shared by every data source.

/// A single post in canonical shape, regardless of which source produced it.
///
/// Source-specific normalizers build these; nothing mutates them afterwards.
/// `account` is always the handle the caller queried, never a value taken
/// from the raw record, so grouping stays stable even when a source reports
/// a display name that differs from the queried handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPost {
    /// Queried account handle. Grouping key, compared case-sensitively.
    pub account: String,
    /// Public URL of the post.
    pub permalink: String,
    /// Preview image URL, when the source exposed one.
    pub media_url: Option<String>,
    /// Like count, zero when the source omitted it.
    pub like_count: u64,
    /// Comment count, zero when the source omitted it.
    pub comment_count: u64,
    /// Caption with newlines collapsed, truncated for display.
    pub caption_excerpt: String,
}

/// Replace newlines with spaces, then truncate to `limit` characters.
///
/// Truncation counts `char`s rather than bytes: captions here are often
/// Japanese and a byte cut would split code points.
#[must_use]
pub fn caption_excerpt(text: &str, limit: usize) -> String {
    text.chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::caption_excerpt;

    #[test]
    fn collapses_newlines_before_truncating() {
        let text = "line one\nline two\nline three";
        assert_eq!(caption_excerpt(text, 50), "line one line two line three");
    }

    #[test]
    fn truncates_to_char_limit() {
        let text = "a".repeat(80);
        assert_eq!(caption_excerpt(&text, 50).chars().count(), 50);
    }

    #[test]
    fn long_multiline_caption_truncates_after_collapsing() {
        // 80 chars of "abc\n" repeated; the excerpt is exactly 50 chars with
        // every newline already replaced.
        let text = "abc\n".repeat(20);
        assert_eq!(text.chars().count(), 80);
        let excerpt = caption_excerpt(&text, 50);
        assert_eq!(excerpt.chars().count(), 50);
        assert!(!excerpt.contains('\n'));
        assert!(excerpt.starts_with("abc abc "));
    }

    #[test]
    fn counts_chars_not_bytes() {
        let text = "新作タイトルの発売日が決定しました";
        let excerpt = caption_excerpt(text, 5);
        assert_eq!(excerpt, "新作タイトル".chars().take(5).collect::<String>());
        assert_eq!(excerpt.chars().count(), 5);
    }

    #[test]
    fn shorter_than_limit_is_unchanged() {
        assert_eq!(caption_excerpt("short", 50), "short");
    }

    #[test]
    fn empty_caption_stays_empty() {
        assert_eq!(caption_excerpt("", 50), "");
    }
}
