use crate::{ParseError, Result};
use regex::Regex;

/// Number of characters shown in diagnostic context snippets.
const CONTEXT_CHARS: usize = 30;

/// Cursor-based consumption over an immutable text buffer.
///
/// Consumption is whitespace-aware: `consume_literal` and `consume_pattern`
/// skip a leading whitespace run before matching. The cursor is a byte
/// offset, externally readable and settable; combinators snapshot and
/// restore it to backtrack.
#[derive(Debug)]
pub struct Scanner<'s> {
    text: &'s str,
    position: usize,
    depth: usize,
}

impl<'s> Scanner<'s> {
    pub fn new(text: &'s str) -> Self {
        Self { text, position: 0, depth: 0 }
    }

    /// The part of the text that still needs parsing.
    fn head(&self) -> &'s str {
        &self.text[self.position..]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor. The sole mechanism by which backtracking
    /// combinators restore scanner state; `pos` must lie on a char
    /// boundary previously obtained from `position`.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(self.text.is_char_boundary(pos));
        self.position = pos;
    }

    /// Returns up to `n` characters from the cursor without consuming and
    /// without skipping whitespace. Diagnostics only.
    pub fn peek(&self, n: usize) -> &'s str {
        let head = self.head();
        match head.char_indices().nth(n) {
            Some((idx, _)) => &head[..idx],
            None => head,
        }
    }

    /// Diagnostic snippet of the unconsumed input, newline-escaped for
    /// single-line display.
    pub fn context(&self) -> String {
        format!("{}[...]", self.peek(CONTEXT_CHARS)).replace('\n', "\\n")
    }

    pub fn skip_leading_whitespace(&mut self) {
        while let Some(c) = self.head().chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.position += c.len_utf8();
        }
    }

    /// Skips whitespace, then requires the remaining buffer to start with
    /// `literal`. Advances past it and returns the consumed slice.
    pub fn consume_literal(&mut self, literal: &str) -> Result<&'s str> {
        self.skip_leading_whitespace();
        let head = self.head();
        if !head.starts_with(literal) {
            return Err(ParseError::literal_mismatch(literal, self.context()));
        }
        let consumed = &head[..literal.len()];
        self.position += literal.len();
        Ok(consumed)
    }

    /// Non-failing form of `consume_literal`: on mismatch the cursor is
    /// fully restored, including any whitespace skipped.
    pub fn consume_literal_maybe(&mut self, literal: &str) -> Option<&'s str> {
        let start = self.position;
        match self.consume_literal(literal) {
            Ok(consumed) => Some(consumed),
            Err(_) => {
                self.position = start;
                None
            }
        }
    }

    /// Skips whitespace, then attempts `pattern` anchored at the cursor.
    /// The pattern contract requires a leading `^` and exactly one
    /// capturing group: the cursor advances by the full match, only the
    /// captured sub-match is returned.
    pub fn consume_pattern(&mut self, pattern: &Regex) -> Result<&'s str> {
        self.skip_leading_whitespace();
        let head = self.head();
        let captures = match pattern.captures(head) {
            Some(captures) => captures,
            None => return Err(ParseError::pattern_mismatch(pattern.as_str(), self.context())),
        };
        let full = captures.get(0).expect("regex match without a full match");
        if full.start() != 0 {
            // Unanchored pattern; matches beyond the cursor do not count.
            return Err(ParseError::pattern_mismatch(pattern.as_str(), self.context()));
        }
        self.position += full.end();
        Ok(captures.get(1).map_or("", |group| group.as_str()))
    }

    /// True when nothing but whitespace remains. Non-mutating; trailing
    /// whitespace is tolerated.
    pub fn is_at_end(&self) -> bool {
        self.head().chars().all(char::is_whitespace)
    }

    pub(crate) fn enter(&mut self, limit: usize) -> Result<()> {
        if self.depth >= limit {
            return Err(ParseError::depth_exceeded(self.context()));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }
}
