//! Label text helpers.

/// Line break marker understood by Graphviz HTML-like labels.
pub const LINE_BREAK: &str = "<BR/>";

/// Wrap `text` into lines of at most `limit` characters, joined by [`LINE_BREAK`].
///
/// Words are split on whitespace. The first word is always placed. Every
/// following word joins the current line when `len(word) + 1` fits into the
/// remaining columns, otherwise it starts a new line with a fresh budget.
/// Words longer than `limit` are never split; they overflow their line.
///
/// # Examples
///
/// ```
/// use blueprint_core::text::wrap_words;
///
/// assert_eq!(wrap_words("Foo Bar Baz", 9), "Foo Bar<BR/>Baz");
/// assert_eq!(wrap_words("Short TooLong", 7), "Short<BR/>TooLong");
/// ```
pub fn wrap_words(text: &str, limit: usize) -> String {
    let limit = limit as isize;
    let mut wrapped = String::with_capacity(text.len());
    let mut remaining = limit;

    for (i, word) in text.split_whitespace().enumerate() {
        let len = word.chars().count() as isize;
        if i > 0 {
            if len + 1 > remaining {
                wrapped.push_str(LINE_BREAK);
                remaining = limit;
            } else {
                wrapped.push(' ');
                remaining -= 1;
            }
        }
        wrapped.push_str(word);
        remaining -= len;
    }

    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_last_word() {
        assert_eq!(wrap_words("Foo Bar Baz", 9), "Foo Bar<BR/>Baz");
    }

    #[test]
    fn test_wrap_last_word_exact() {
        assert_eq!(wrap_words("Foo Bar Baz", 8), "Foo Bar<BR/>Baz");
    }

    #[test]
    fn test_wrap_last_two_words() {
        assert_eq!(wrap_words("Foo Bar Ba", 6), "Foo<BR/>Bar Ba");
    }

    #[test]
    fn test_wrap_multiple_words() {
        assert_eq!(wrap_words("Foo Bar Baz", 6), "Foo<BR/>Bar<BR/>Baz");
    }

    #[test]
    fn test_dont_wrap_too_long_word() {
        assert_eq!(wrap_words("Short TooLong", 7), "Short<BR/>TooLong");
    }

    #[test]
    fn test_dont_wrap_too_long_word_at_start() {
        assert_eq!(wrap_words("TooLong", 7), "TooLong");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(wrap_words("  Foo \t Bar\n", 38), "Foo Bar");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(wrap_words("", 38), "");
        assert_eq!(wrap_words("   ", 38), "");
    }
}
