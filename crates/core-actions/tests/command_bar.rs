mod common;
use common::*;
use core_state::Mode;
use pretty_assertions::assert_eq;

#[test]
fn colon_opens_prefilled_bar() {
    let mut ed = editor("abc");
    feed(&mut ed, ":w");
    assert_eq!(ed.mode(), Mode::Command);
    assert_eq!(ed.command_bar(), ":w");
}

#[test]
fn write_saves_with_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "one\ntwo\n").unwrap();
    let mut ed = open_editor(&path);
    let res = feed(&mut ed, "x:w<CR>");
    assert!(!res.quit);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "ne\ntwo\n");
    assert!(!ed.viewport().buffer().is_modified());
    assert!(ed.status().unwrap().starts_with("written"));
    assert_eq!(ed.mode(), Mode::MoveAndEdit);
    assert_eq!(ed.command_bar(), "");
}

#[test]
fn quit_and_write_quit() {
    let mut ed = editor("abc");
    let res = feed(&mut ed, ":q<CR>x");
    assert!(res.quit);
    assert_eq!(text(&ed), "abc", "keys after quit are dropped");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    std::fs::write(&path, "abc").unwrap();
    let mut ed = open_editor(&path);
    assert!(feed(&mut ed, ":wq<CR>").quit);
}

#[test]
fn write_quit_without_path_stays_open() {
    let mut ed = editor("abc");
    let res = feed(&mut ed, ":wq<CR>");
    assert!(!res.quit);
    assert_eq!(ed.status(), Some("no file name"));
}

#[test]
fn unknown_command_is_discarded() {
    let mut ed = editor("abc");
    let res = feed(&mut ed, ":zz<CR>");
    assert!(!res.quit);
    assert_eq!(ed.mode(), Mode::MoveAndEdit);
    assert_eq!(text(&ed), "abc");
}

#[test]
fn backspace_edits_then_leaves_command_mode() {
    let mut ed = editor("abc");
    feed(&mut ed, ":wx<BS>");
    assert_eq!(ed.command_bar(), ":w");
    feed(&mut ed, "<BS>");
    assert_eq!(ed.mode(), Mode::Command);
    feed(&mut ed, "<BS>");
    assert_eq!(ed.mode(), Mode::MoveAndEdit);
}

#[test]
fn search_jumps_and_n_cycles() {
    let mut ed = editor("foo bar\nbaz foo\nfoo");
    feed(&mut ed, "/foo<CR>");
    assert_eq!(ed.search_results().len(), 2);
    assert_eq!(cursor(&ed), (1, 4));
    feed(&mut ed, "n");
    assert_eq!(cursor(&ed), (2, 0));
    feed(&mut ed, "n");
    assert_eq!(cursor(&ed), (1, 4), "wraps to the first result");
    feed(&mut ed, "N");
    assert_eq!(cursor(&ed), (2, 0));
}

#[test]
fn search_is_literal() {
    let mut ed = editor("x a.c abc");
    feed(&mut ed, "/a.c<CR>");
    assert_eq!(ed.search_results().len(), 1);
    assert_eq!(cursor(&ed), (0, 2));
}

#[test]
fn failed_search_reports_status() {
    let mut ed = editor("abc");
    feed(&mut ed, "/zzz<CR>");
    assert!(ed.search_results().is_empty());
    assert_eq!(ed.status(), Some("pattern not found: zzz"));
    assert_eq!(cursor(&ed), (0, 0));
}
