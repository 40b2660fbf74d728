//! Literal text search and bracket-depth scanning.

use crate::{TextBuffer, TextRange, buffer::floor_boundary};
use regex::Regex;
use tracing::{debug, warn};

fn literal(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    match Regex::new(&regex::escape(pattern)) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(target: "text.search", ?e, "pattern_compile_failed");
            None
        }
    }
}

impl TextBuffer {
    /// Every occurrence of `pattern` (taken literally) from `(line, col)` to
    /// the end of the document, in document order.
    pub fn find_forward_matches(&self, line: usize, col: usize, pattern: &str) -> Vec<TextRange> {
        let Some(re) = literal(pattern) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for (l, text) in self.lines().iter().enumerate().skip(line) {
            let offset = if l == line { floor_boundary(text, col) } else { 0 };
            out.extend(
                re.find_iter(&text[offset..])
                    .map(|m| TextRange::new(l, offset + m.start(), l, offset + m.end())),
            );
        }
        debug!(target: "text.search", pattern, hits = out.len(), "forward_search");
        out
    }

    /// Every occurrence of `pattern` (taken literally) before `(line, col)`,
    /// nearest first.
    pub fn find_backward_matches(&self, line: usize, col: usize, pattern: &str) -> Vec<TextRange> {
        let Some(re) = literal(pattern) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let first = line.min(self.line_count() - 1);
        for l in (0..=first).rev() {
            let text = self.get_line(l);
            let limit = if l == line { floor_boundary(text, col) } else { text.len() };
            let hits: Vec<_> = re
                .find_iter(&text[..limit])
                .map(|m| TextRange::new(l, m.start(), l, m.end()))
                .collect();
            out.extend(hits.into_iter().rev());
        }
        debug!(target: "text.search", pattern, hits = out.len(), "backward_search");
        out
    }

    /// Net `{` depth of everything before `(line, col)`. Unmatched `}` never
    /// drive the depth below zero.
    pub fn get_indentation_level(&self, line: usize, col: usize) -> usize {
        let mut depth = 0usize;
        let last = line.min(self.line_count() - 1);
        for (l, text) in self.lines()[..=last].iter().enumerate() {
            let bytes = text.as_bytes();
            let upto = if l == line { col.min(bytes.len()) } else { bytes.len() };
            for &b in &bytes[..upto] {
                match b {
                    b'{' => depth += 1,
                    b'}' => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
        }
        depth
    }
}
