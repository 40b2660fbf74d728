mod common;
use common::*;
use core_actions::Session;
use core_text::TextBuffer;

#[test]
fn partial_commands_wait_for_more_keys() {
    let mut ed = editor("a\nb\nc");
    let res = feed(&mut ed, "1");
    assert!(!res.dirty);
    assert_eq!(ed.pending_command(), "1");
    feed(&mut ed, "2");
    assert_eq!(ed.pending_command(), "12");
    feed(&mut ed, "j");
    assert_eq!(ed.pending_command(), "");
    assert_eq!(cursor(&ed), (2, 0));
}

#[test]
fn escape_clears_a_stuck_prefix() {
    let mut ed = editor("a\nb");
    feed(&mut ed, "qj");
    assert_eq!(ed.pending_command(), "qj");
    assert_eq!(cursor(&ed), (0, 0));
    feed(&mut ed, "<Esc>j");
    assert_eq!(ed.pending_command(), "");
    assert_eq!(cursor(&ed), (1, 0));
}

#[test]
fn overflowing_prefix_is_discarded() {
    let session = Session {
        max_pending_keys: 4,
        ..Session::default()
    };
    let mut ed = editor_with(TextBuffer::from_text("a\nb"), session);
    feed(&mut ed, "zzzz");
    assert_eq!(ed.pending_command(), "zzzz");
    let res = feed(&mut ed, "z");
    assert!(res.dirty);
    assert_eq!(ed.pending_command(), "");
    feed(&mut ed, "j");
    assert_eq!(cursor(&ed), (1, 0));
}

#[test]
fn unbound_key_consumes_the_prefix() {
    let mut ed = editor("a\nb\nc\nd");
    feed(&mut ed, "dM");
    assert_eq!(ed.pending_command(), "");
    assert_eq!(cursor(&ed), (2, 0));
    assert_eq!(text(&ed), "a\nb\nc\nd");
}

#[test]
fn ctrl_keys_never_enter_the_prefix() {
    let mut ed = editor("abc");
    feed(&mut ed, "<C-x>");
    assert_eq!(ed.pending_command(), "");
}
