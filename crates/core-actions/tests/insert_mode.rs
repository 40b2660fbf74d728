mod common;
use common::*;
use core_state::Mode;
use pretty_assertions::assert_eq;

#[test]
fn typed_glyphs_are_inserted() {
    let mut ed = editor("");
    feed(&mut ed, "ihello<Esc>");
    assert_eq!(text(&ed), "hello");
    assert_eq!(cursor(&ed), (0, 5));
    assert_eq!(ed.mode(), Mode::MoveAndEdit);
}

#[test]
fn insert_mode_does_not_run_rules() {
    let mut ed = editor("");
    feed(&mut ed, "idd3j");
    assert_eq!(text(&ed), "dd3j");
    assert_eq!(ed.pending_command(), "");
}

#[test]
fn append_variants() {
    let mut ed = editor("  ab");
    feed(&mut ed, "A!<Esc>");
    assert_eq!(text(&ed), "  ab!");
    feed(&mut ed, "I-<Esc>");
    assert_eq!(text(&ed), "  -ab!");
    feed(&mut ed, "0a+<Esc>");
    assert_eq!(text(&ed), " + -ab!");
}

#[test]
fn enter_splits_and_indents_by_brace_depth() {
    let mut ed = editor("fn main() {");
    feed(&mut ed, "A<CR>");
    assert_eq!(cursor(&ed), (1, 4));
    feed(&mut ed, "x");
    assert_eq!(text(&ed), "fn main() {\n    x");
}

#[test]
fn enter_mid_line_carries_the_tail() {
    let mut ed = editor("ab");
    feed(&mut ed, "a<CR>");
    assert_eq!(text(&ed), "a\nb");
    assert_eq!(cursor(&ed), (1, 0));
}

#[test]
fn o_opens_below_with_indent() {
    let mut ed = editor("{\n}");
    feed(&mut ed, "o");
    assert_eq!(ed.mode(), Mode::Insert);
    assert_eq!(text(&ed), "{\n    \n}");
    assert_eq!(cursor(&ed), (1, 4));
}

#[test]
fn shift_o_opens_above() {
    let mut ed = editor("{\nx\n}");
    feed(&mut ed, "jO");
    assert_eq!(text(&ed), "{\n    \nx\n}");
    assert_eq!(cursor(&ed), (1, 4));
}

#[test]
fn backspace_deletes_left_and_stops_at_column_zero() {
    let mut ed = editor("abc");
    feed(&mut ed, "A<BS>");
    assert_eq!(text(&ed), "ab");
    assert_eq!(cursor(&ed), (0, 2));
    feed(&mut ed, "<Esc>0i<BS>");
    assert_eq!(text(&ed), "ab");
    assert_eq!(cursor(&ed), (0, 0));
}

#[test]
fn tab_and_back_tab() {
    let mut ed = editor("x");
    feed(&mut ed, "i<Tab>");
    assert_eq!(text(&ed), "    x");
    assert_eq!(cursor(&ed), (0, 4));
    feed(&mut ed, "<S-Tab>");
    assert_eq!(text(&ed), "x");
    assert_eq!(cursor(&ed), (0, 0));
}

#[test]
fn caps_lock_returns_to_move_and_edit() {
    let mut ed = editor("");
    feed(&mut ed, "ia<Caps>");
    assert_eq!(ed.mode(), Mode::MoveAndEdit);
}
