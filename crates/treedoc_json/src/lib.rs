//! A recursive-descent parser for an extended, human-friendly JSON dialect,
//! producing the addressable tree documents of [`treedoc_core`].
//!
//! The dialect relaxes strict JSON in several ways: the root brackets are
//! optional (with a configurable default root kind), keys and scalars may be
//! unquoted, commas and newlines are interchangeable separators, `#`, `//`,
//! and `/* */` comments may appear anywhere between tokens, adjacent quoted
//! segments concatenate into one string, and a map entry without a `:`
//! becomes a positional value under an auto-generated numeric key.
//!
//! Parsing is synchronous and purely recursive; nesting is bounded by
//! [`ParseOptions::max_depth`] rather than the host call stack.

mod error;
mod options;
mod parser;

pub use error::{ParseError, ParseResult};
pub use options::ParseOptions;
pub use parser::ExtendedJsonParser;

use treedoc_core::Document;
use treedoc_scanner::SourceText;

/// Parse `text` as a single document with default options.
pub fn parse(text: &str) -> ParseResult<Document> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse `text` as a single document.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> ParseResult<Document> {
    ExtendedJsonParser::new(SourceText::from(text), options.clone()).parse()
}

/// Parse `text` as a batch of documents under a synthetic array root. The
/// documents share one id map; ids and references are suffixed with each
/// document's batch ordinal (`0`, `1`, `2`, …) so they stay unambiguous.
pub fn parse_all(text: &str, options: &ParseOptions) -> ParseResult<Document> {
    ExtendedJsonParser::new(SourceText::from(text), options.clone()).parse_all()
}
