use super::{display_width, spinner_frame, truncate_to_display_width, wrap_to_display_width, SPINNER_FRAMES};

#[test]
fn display_width_counts_wide_characters() {
    assert_eq!(display_width("abc"), 3);
    assert_eq!(display_width("数据"), 4);
}

#[test]
fn truncate_keeps_short_text_untouched() {
    assert_eq!(truncate_to_display_width("sales", 10), "sales");
    assert_eq!(truncate_to_display_width("sales", 5), "sales");
}

#[test]
fn truncate_marks_cut_with_ellipsis() {
    assert_eq!(truncate_to_display_width("inventory", 5), "inve…");
    assert_eq!(truncate_to_display_width("inventory", 1), "…");
    assert_eq!(truncate_to_display_width("inventory", 0), "");
}

#[test]
fn truncate_never_splits_wide_characters() {
    let cut = truncate_to_display_width("数据库备份", 6);
    assert_eq!(cut, "数据…");
    assert!(display_width(&cut) <= 6);
}

#[test]
fn spinner_frame_wraps_around() {
    assert_eq!(spinner_frame(0), SPINNER_FRAMES[0]);
    assert_eq!(spinner_frame(SPINNER_FRAMES.len()), SPINNER_FRAMES[0]);
    assert_eq!(spinner_frame(SPINNER_FRAMES.len() + 3), SPINNER_FRAMES[3]);
}

#[test]
fn wrap_splits_on_column_budget() {
    assert_eq!(wrap_to_display_width("abcdefgh", 3), vec!["abc", "def", "gh"]);
    assert_eq!(wrap_to_display_width("abc", 3), vec!["abc"]);
    assert_eq!(wrap_to_display_width("", 3), vec![""]);
}

#[test]
fn wrap_moves_wide_character_to_next_row() {
    assert_eq!(wrap_to_display_width("a数据", 2), vec!["a", "数", "据"]);
}
