use git_dash::format::{cell_width, decolorise, escape_special_chars, string_width};
use std::borrow::Cow;

#[test]
fn test_decolorise_plain_text_is_borrowed() {
    assert!(matches!(decolorise("plain"), Cow::Borrowed("plain")));
}

#[test]
fn test_decolorise_strips_sgr() {
    assert_eq!(decolorise("\x1b[1;32mgreen\x1b[0m text"), "green text");
    assert_eq!(decolorise("\x1b[Kcleared"), "cleared");
}

#[test]
fn test_decolorise_strips_hyperlinks() {
    let link = "\x1b]8;;https://example.com\x1b\\label\x1b]8;;\x1b\\";
    assert_eq!(decolorise(link), "label");
}

#[test]
fn test_string_width() {
    assert_eq!(string_width("abc"), 3);
    assert_eq!(string_width("日本"), 4);
    assert_eq!(string_width(""), 0);
}

#[test]
fn test_cell_width_clamps() {
    assert_eq!(cell_width("git-dash"), 8);
    let huge = "x".repeat(usize::from(u16::MAX) + 10);
    assert_eq!(cell_width(&huge), u16::MAX);
}

#[test]
fn test_escape_special_chars() {
    assert_eq!(escape_special_chars("a\tb\nc"), "a\\tb\\nc");
    assert_eq!(escape_special_chars("\r\u{8}\u{c}\u{b}"), "\\r\\b\\f\\v");
    assert!(matches!(escape_special_chars("normal.txt"), Cow::Borrowed(_)));
}
