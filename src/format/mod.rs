use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static SGR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[([0-9]{1,3}(;[0-9]{1,3})*)?[mGK]").expect("valid SGR pattern")
});

static HYPERLINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B]8;[^;]*;(.*?)(\x1B.|\x07)").expect("valid hyperlink pattern")
});

/// Strips colour codes and terminal hyperlink markers.
pub fn decolorise(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1B') {
        return Cow::Borrowed(s);
    }
    let without_sgr = SGR_PATTERN.replace_all(s, "");
    let without_links = HYPERLINK_PATTERN.replace_all(&without_sgr, "");
    Cow::Owned(without_links.into_owned())
}

/// Number of terminal cells `s` occupies.
pub fn string_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Display width clamped into a cell count.
pub fn cell_width(s: &str) -> u16 {
    u16::try_from(string_width(s)).unwrap_or(u16::MAX)
}

/// Makes control characters in file names visible.
pub fn escape_special_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_special) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            '\u{b}' => escaped.push_str("\\v"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

fn is_special(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t' | '\u{8}' | '\u{c}' | '\u{b}')
}
