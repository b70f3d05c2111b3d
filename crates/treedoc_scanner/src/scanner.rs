use std::fmt::{self, Display, Formatter};
use std::ops::Range;
use std::sync::Arc;

use memchr::{memchr, memchr2, memchr3, memchr_iter, memmem};

use crate::escape::unescape_quoted;
use crate::{ScanError, ScanResult};

/// An opaque type representing a shared reference to the source text being
/// scanned, cheap to clone between the scanner and the finished document.
pub type SourceText = Arc<str>;

// Learned from: https://nullprogram.com/blog/2017/10/06/
#[rustfmt::skip]
static UTF8_LENGTH_LOOKUP: [usize; 32] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 3, 3, 4, 0,
];

/// Return the byte length of the complete UTF-8 code point that starts with `byte`. This can be
/// done branchlessly and without computing the entire `char`.
#[inline(always)]
pub(crate) fn char_length_from_byte(byte: u8) -> usize {
    UTF8_LENGTH_LOOKUP[byte as usize >> 3]
}

/// An opaque source-position token. Bookmarks are recorded on tree nodes for
/// diagnostics and can be handed back to [`Scanner::rewind`] to restore the
/// cursor to a previously-seen position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bookmark {
    /// Byte offset into the source text.
    pub offset: usize,
    /// 1-based line number.
    pub line: u32,
    /// 1-based byte column within the line.
    pub col: u32,
}

impl Display for Bookmark {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

/// A sequential, peekable, bookmark-capable cursor over a fully-buffered
/// source text.
///
/// The cursor is byte-oriented: all structural characters the parsers care
/// about are ASCII, and multi-byte UTF-8 sequences are only ever stepped over
/// as opaque runs (using a branchless byte-length lookup), never inspected.
/// Line and column positions are tracked as a line counter plus the byte
/// offset of the last line start, so columns are derived on demand rather
/// than updated per character.
pub struct Scanner {
    source: SourceText,
    position: usize,
    line: usize,
    last_line_start: usize,
}

impl Scanner {
    pub fn new(source: SourceText) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            last_line_start: 0,
        }
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    #[inline]
    fn rest(&self) -> &[u8] {
        &self.source.as_bytes()[self.position..]
    }

    /// Advance the cursor by `n` bytes, keeping the line/column tracking
    /// accurate by counting the newlines in the consumed run.
    fn advance(&mut self, n: usize) {
        let end = (self.position + n).min(self.source.len());
        let consumed = &self.source.as_bytes()[self.position..end];
        let mut line_count = 0;
        let mut last_newline = None;
        for found in memchr_iter(b'\n', consumed) {
            line_count += 1;
            last_newline = Some(found);
        }
        if let Some(found) = last_newline {
            self.line += line_count;
            self.last_line_start = self.position + found + 1;
        }
        self.position = end;
    }

    /// Lookahead without consuming. Returns `None` past the end of input.
    #[inline]
    pub fn peek(&self, n: usize) -> Option<u8> {
        self.source.as_bytes().get(self.position + n).copied()
    }

    /// The byte under the cursor, if any.
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.peek(0)
    }

    #[inline]
    pub fn is_eof(&self, n: usize) -> bool {
        self.position + n >= self.source.len()
    }

    /// Consume and return one full character.
    pub fn read(&mut self) -> Option<char> {
        let ch = self.source[self.position..].chars().next()?;
        self.advance(ch.len_utf8());
        Some(ch)
    }

    /// Consume `n` bytes.
    pub fn skip(&mut self, n: usize) {
        self.advance(n);
    }

    pub fn bookmark(&self) -> Bookmark {
        Bookmark {
            offset: self.position,
            line: self.line as u32,
            col: (self.position - self.last_line_start + 1) as u32,
        }
    }

    /// Restore the cursor to a previously recorded bookmark.
    pub fn rewind(&mut self, bookmark: Bookmark) {
        self.position = bookmark.offset;
        self.line = bookmark.line as usize;
        self.last_line_start = bookmark.offset - (bookmark.col as usize - 1);
    }

    /// Produce an error carrying the current position.
    pub fn error(&self, message: impl Into<String>) -> ScanError {
        ScanError {
            message: message.into(),
            at: self.bookmark(),
        }
    }

    /// Consume while the current byte is in `set`.
    pub fn skip_chars(&mut self, set: &[u8]) {
        while let Some(current) = self.current() {
            if !set.contains(&current) {
                break;
            }
            self.advance(1);
        }
    }

    /// Consume the run of spaces, tabs, and line terminators under the
    /// cursor. Returns whether any non-EOF content remains.
    pub fn skip_spaces_and_returns(&mut self) -> bool {
        self.skip_chars(b" \t\n\r");
        !self.is_eof(0)
    }

    /// Like [`Scanner::skip_spaces_and_returns`], but commas are consumed as
    /// well. Used between documents of a batch, where commas and newlines are
    /// interchangeable separators.
    pub fn skip_spaces_returns_and_commas(&mut self) -> bool {
        self.skip_chars(b" \t\n\r,");
        !self.is_eof(0)
    }

    /// Consume up to and including `terminator`, or to EOF if it never
    /// appears.
    pub fn skip_until_terminator(&mut self, terminator: u8) {
        match memchr(terminator, self.rest()) {
            Some(found) => self.advance(found + 1),
            None => self.advance(self.rest().len()),
        }
    }

    /// Consume up to a multi-byte `pattern`, optionally consuming the pattern
    /// itself. Returns whether the pattern was found before EOF.
    pub fn skip_until_match(&mut self, pattern: &str, consume_match: bool) -> bool {
        match memmem::find(self.rest(), pattern.as_bytes()) {
            Some(found) => {
                let matched_len = if consume_match { pattern.len() } else { 0 };
                self.advance(found + matched_len);
                true
            }
            None => {
                self.advance(self.rest().len());
                false
            }
        }
    }

    /// Consume up to (not including) the first byte in `terminators`,
    /// returning the span of the consumed run. The cursor is left on the
    /// terminator, or at EOF if none was found. Callers trim the slice.
    pub fn read_until_terminator(&mut self, terminators: &[u8]) -> Range<usize> {
        let start = self.position;
        let rest = self.rest();
        let len = match *terminators {
            [a] => memchr(a, rest),
            [a, b] => memchr2(a, b, rest),
            [a, b, c] => memchr3(a, b, c, rest),
            _ => rest.iter().position(|byte| terminators.contains(byte)),
        }
        .unwrap_or(rest.len());
        self.advance(len);
        start..self.position
    }

    /// Borrow a previously returned span of the source.
    #[inline]
    pub fn str_slice(&self, range: Range<usize>) -> &str {
        &self.source[range]
    }

    /// Consume a quoted run under the cursor (which must sit on the opening
    /// `quote`), honoring backslash escaping, and return the decoded text.
    /// The run may span multiple lines. Reaching EOF before the closing quote
    /// is an error.
    pub fn read_quoted_string(&mut self, quote: u8) -> ScanResult<String> {
        debug_assert_eq!(self.current(), Some(quote));
        self.advance(1);
        let start = self.position;
        let mut has_escapes = false;
        loop {
            let rest = self.rest();
            let Some(found) = memchr2(quote, b'\\', rest) else {
                self.advance(rest.len());
                return Err(self.error("unterminated quoted string"));
            };
            if rest[found] == quote {
                let end = self.position + found;
                self.advance(found + 1);
                let raw = &self.source[start..end];
                return if has_escapes {
                    match unescape_quoted(raw) {
                        Ok(decoded) => Ok(decoded.into_owned()),
                        Err(_) => Err(self.error("invalid escape sequence in quoted string")),
                    }
                } else {
                    Ok(raw.to_string())
                };
            }
            // A backslash: step over it and the full character it escapes.
            has_escapes = true;
            self.advance(found + 1);
            match self.current() {
                Some(escaped) => self.advance(char_length_from_byte(escaped).max(1)),
                None => return Err(self.error("unterminated quoted string")),
            }
        }
    }

    /// Consume a quoted run under the cursor where a doubled quote decodes to
    /// one literal quote character and backslashes carry no meaning (the CSV
    /// convention).
    pub fn read_doubled_quoted_string(&mut self, quote: u8) -> ScanResult<String> {
        debug_assert_eq!(self.current(), Some(quote));
        self.advance(1);
        let mut text = String::new();
        loop {
            let rest = self.rest();
            let Some(found) = memchr(quote, rest) else {
                self.advance(rest.len());
                return Err(self.error("unterminated quoted field"));
            };
            let segment_end = self.position + found;
            text.push_str(&self.source[self.position..segment_end]);
            self.advance(found + 1);
            if self.current() == Some(quote) {
                text.push(quote as char);
                self.advance(1);
            } else {
                return Ok(text);
            }
        }
    }
}
