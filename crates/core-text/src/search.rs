//! Literal, case-insensitive search and replace over a [`Buffer`].
//!
//! The term is regex-escaped and compiled case-insensitively, then scanned one
//! line at a time. Matches never span a line break and never overlap. All
//! offsets returned are char columns.

use regex::{NoExpand, Regex, RegexBuilder};
use thiserror::Error;

use crate::{Buffer, Position};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A match as `(line, col, len)` in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub line: usize,
    pub col: usize,
    pub len: usize,
}

impl SearchMatch {
    pub fn start(&self) -> Position {
        Position::new(self.line, self.col)
    }

    pub fn end(&self) -> Position {
        Position::new(self.line, self.col + self.len)
    }
}

/// Result of a replace-all pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub lines_changed: usize,
    pub occurrences: usize,
}

fn compile_literal(term: &str) -> Result<Regex, SearchError> {
    Ok(RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()?)
}

/// All matches of `term` in document order. An empty term matches nothing.
pub fn find_all(buf: &Buffer, term: &str) -> Result<Vec<SearchMatch>, SearchError> {
    if term.is_empty() {
        return Ok(Vec::new());
    }
    let re = compile_literal(term)?;
    let mut out = Vec::new();
    for (line, text) in buf.lines().enumerate() {
        for m in re.find_iter(&text) {
            if m.start() == m.end() {
                continue;
            }
            out.push(SearchMatch {
                line,
                col: text[..m.start()].chars().count(),
                len: m.as_str().chars().count(),
            });
        }
    }
    Ok(out)
}

/// First match at or after `from` in row-major order, wrapping to the first
/// match of the document.
pub fn find_next(matches: &[SearchMatch], from: Position) -> Option<SearchMatch> {
    matches
        .iter()
        .find(|m| m.start() >= from)
        .or_else(|| matches.first())
        .copied()
}

/// Replace every occurrence of `term` with `replacement` taken literally.
pub fn replace_all(
    buf: &mut Buffer,
    term: &str,
    replacement: &str,
) -> Result<ReplaceOutcome, SearchError> {
    let mut outcome = ReplaceOutcome::default();
    if term.is_empty() {
        return Ok(outcome);
    }
    let re = compile_literal(term)?;
    // Bottom-up so a replacement containing a line break never shifts rows
    // that are still to be visited.
    for line in (0..buf.line_count()).rev() {
        let text = buf.line(line);
        let hits = re.find_iter(&text).filter(|m| !m.as_str().is_empty()).count();
        if hits == 0 {
            continue;
        }
        let replaced = re.replace_all(&text, NoExpand(replacement));
        buf.replace_line(line, &replaced);
        outcome.lines_changed += 1;
        outcome.occurrences += hits;
    }
    tracing::debug!(
        target: "text.buffer",
        op = "replace_all",
        lines_changed = outcome.lines_changed,
        occurrences = outcome.occurrences,
        "edit"
    );
    Ok(outcome)
}
