use tuidom::text::{align_offset, char_width, display_width, tail_to_width, truncate_to_width};
use tuidom::TextAlign;

#[test]
fn test_display_width_mixed() {
    assert_eq!(display_width("hello"), 5);
    assert_eq!(display_width(""), 0);
    assert_eq!(display_width("a日b"), 4);
}

#[test]
fn test_char_width() {
    assert_eq!(char_width('a'), 1);
    assert_eq!(char_width('日'), 2);
    assert_eq!(char_width('•'), 1);
}

#[test]
fn test_truncate_fits() {
    assert_eq!(truncate_to_width("hello", 10), "hello");
    assert_eq!(truncate_to_width("hello", 5), "hello");
}

#[test]
fn test_truncate_overflow() {
    assert_eq!(truncate_to_width("hello world", 8), "hello w…");
    assert_eq!(truncate_to_width("hello", 3), "he…");
    assert_eq!(truncate_to_width("hello", 0), "");
}

#[test]
fn test_truncate_does_not_split_wide_chars() {
    // 日本 is 4 cells; with 4 cells total only one wide char fits before the ellipsis
    assert_eq!(truncate_to_width("日本語", 4), "日…");
}

#[test]
fn test_tail_keeps_end_of_value() {
    assert_eq!(tail_to_width("alice@example.com", 7), "ple.com");
    assert_eq!(tail_to_width("abc", 10), "abc");
    assert_eq!(tail_to_width("abc", 0), "");
    assert_eq!(tail_to_width("a日本", 4), "日本");
}

#[test]
fn test_align_offset() {
    assert_eq!(align_offset(4, 10, TextAlign::Left), 0);
    assert_eq!(align_offset(4, 10, TextAlign::Center), 3);
    assert_eq!(align_offset(4, 10, TextAlign::Right), 6);
    assert_eq!(align_offset(12, 10, TextAlign::Right), 0);
}
