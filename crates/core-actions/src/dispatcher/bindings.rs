//! Default rule table for MOVE_AND_EDIT and VISUAL_SELECT.
//!
//! Order matters: a pending command is matched against the rules top to
//! bottom and the first hit wins, so a rule must precede any later rule
//! whose pattern also matches its input.

use super::{EditorCore, PanelRequest};
use crate::rules::{CommandRules, RuleError, group};
use core_state::ModeSet;
use core_text::Bracket;

const EDIT: ModeSet = ModeSet::MOVE_AND_EDIT;
const VISUAL: ModeSet = ModeSet::VISUAL_SELECT;
const NAV: ModeSet = ModeSet::NAVIGATION;

pub(super) fn default_rules() -> Result<CommandRules<EditorCore>, RuleError> {
    let mut rules: CommandRules<EditorCore> = CommandRules::new();

    // selection operators
    rules
        .add(VISUAL, "[xd]", |core, _| core.delete_selection(false))?
        .add(VISUAL, "c", |core, _| core.delete_selection(true))?
        .add(VISUAL, "y", |core, _| core.yank_selection())?;

    rules
        .add(EDIT, "x", |core, _| core.delete_character_under_cursor())?
        .add(NAV, "m", |core, _| core.viewport.move_cursor_to_middle_of_line())?
        .add(NAV, r"\$", |core, _| core.viewport.move_cursor_to_end_of_line())?
        .add(EDIT, "p", |core, _| core.paste_last_deleted())?
        .add(EDIT, "P", |core, _| core.paste_register())?
        .add(NAV, "0", |core, _| core.viewport.move_cursor_to_start_of_line())?
        .add(EDIT, "v", |core, _| core.enter_visual())?
        .add(EDIT, "i", |core, _| core.enter_insert())?
        .add(EDIT, "a", |core, _| {
            core.viewport.scroll_right();
            core.enter_insert();
        })?
        .add(EDIT, "A", |core, _| {
            core.viewport.move_cursor_to_end_of_line();
            core.enter_insert();
        })?
        .add(EDIT, "I", |core, _| {
            core.viewport.move_cursor_to_first_non_whitespace();
            core.enter_insert();
        })?
        .add(NAV, r"\^", |core, _| core.viewport.move_cursor_to_first_non_whitespace())?;

    // counted and targeted motions, optionally under a c/d operator
    rules
        .add(NAV, r"(\d*)([jklh])", |core, caps| {
            core.counted_motion(parse_count(group(caps, 1)), group(caps, 2))
        })?
        .add(NAV, r"(\d*)G", |core, caps| {
            core.go_to_line(group(caps, 1).parse().ok())
        })?
        .add(NAV, "([cd]?)([fFtT])(.)", |core, caps| {
            if let Some(target) = group(caps, 3).chars().next() {
                core.find_character(group(caps, 1), group(caps, 2), target);
            }
        })?
        .add(NAV, "([cd]?)([webB])", |core, caps| {
            core.word_motion(group(caps, 1), group(caps, 2))
        })?
        .add(EDIT, "([cd])([ai])([bB])", |core, caps| {
            let bracket = if group(caps, 3) == "B" {
                Bracket::Brace
            } else {
                Bracket::Paren
            };
            core.bracket_object(group(caps, 1), group(caps, 2) == "i", bracket);
        })?
        .add(NAV, "gg", |core, _| core.go_to_line(Some(1)))?;

    rules
        .add(EDIT, "o", |core, _| core.open_line(true))?
        .add(EDIT, "O", |core, _| core.open_line(false))?
        .add(EDIT, "u", |core, _| core.undo())?
        .add(EDIT, "r", |core, _| core.redo())?;

    // leader sequences and doubled operators
    rules
        .add(EDIT, " sf", |core, _| core.request_panel(PanelRequest::SearchFiles))?
        .add(EDIT, "  ", |core, _| core.request_panel(PanelRequest::OpenBuffers))?
        .add(EDIT, "dd", |core, _| core.delete_current_line())?
        .add(EDIT, "yy", |core, _| core.yank_current_line())?
        .add(EDIT, " cc", |core, _| core.switch_to_source_file())?
        .add(EDIT, " hh", |core, _| core.switch_to_header_file())?;

    Ok(rules)
}

/// Repeat count from a digit prefix. Empty, zero or overflowing counts are 1.
fn parse_count(digits: &str) -> usize {
    digits.parse().ok().filter(|n| *n > 0).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_compiles() {
        let rules = default_rules().unwrap();
        assert!(rules.len() > 30);
    }

    #[test]
    fn counts_default_to_one() {
        assert_eq!(parse_count(""), 1);
        assert_eq!(parse_count("0"), 1);
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("99999999999999999999999"), 1);
    }
}
