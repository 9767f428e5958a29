// Output formatting — terminal display for recommendation results.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if
/// truncated.
///
/// Catalog descriptions and titles run long, and byte slicing would panic on
/// multi-byte characters, so this walks char boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn long_strings_get_ellipsis() {
        assert_eq!(truncate_chars("hello!", 5), "hello...");
    }

    #[test]
    fn multibyte_titles_truncate_safely() {
        // "Spirited Away" in Japanese — 6 chars, 18 bytes
        assert_eq!(truncate_chars("千と千尋の神隠し", 4), "千と千尋...");
    }
}
