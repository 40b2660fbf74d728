//! Ordered regex rule table.
//!
//! Each rule pairs a pattern with the set of modes it is active in and an
//! action closure. Patterns are anchored at the start of the pending
//! command, and the first active rule that matches wins.

use core_state::{Mode, ModeSet};
use regex::{Captures, Regex};
use thiserror::Error;
use tracing::trace;

/// Action run when a rule matches. Receives the capture groups of the match.
pub type RuleAction<C> = Box<dyn Fn(&mut C, &Captures<'_>)>;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid command pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

struct CommandRule<C> {
    modes: ModeSet,
    pattern: Regex,
    action: RuleAction<C>,
}

pub struct CommandRules<C> {
    rules: Vec<CommandRule<C>>,
}

impl<C> Default for CommandRules<C> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<C> CommandRules<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Registration order is match priority.
    pub fn add(
        &mut self,
        modes: ModeSet,
        pattern: &str,
        action: impl Fn(&mut C, &Captures<'_>) + 'static,
    ) -> Result<&mut Self, RuleError> {
        let anchored = if pattern.starts_with('^') {
            pattern.to_owned()
        } else {
            format!("^(?:{pattern})")
        };
        let compiled = Regex::new(&anchored).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        self.rules.push(CommandRule {
            modes,
            pattern: compiled,
            action: Box::new(action),
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the first rule active in `mode` that matches `input`.
    /// Returns whether any rule fired.
    pub fn run(&self, mode: Mode, ctx: &mut C, input: &str) -> bool {
        for (idx, rule) in self.rules.iter().enumerate() {
            if !rule.modes.contains_mode(mode) {
                continue;
            }
            if let Some(caps) = rule.pattern.captures(input) {
                trace!(target: "actions.rules", idx, pattern = rule.pattern.as_str(), input, "rule_fired");
                (rule.action)(ctx, &caps);
                return true;
            }
        }
        false
    }
}

/// Text of capture group `idx`, or `""` when the group did not participate.
pub(crate) fn group<'h>(caps: &Captures<'h>, idx: usize) -> &'h str {
    caps.get(idx).map_or("", |m| m.as_str())
}
