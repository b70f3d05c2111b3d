//! A CSV front-end over the treedoc tree model: a document is an array of
//! records, a record an array of fields. Quoted fields are always strings;
//! unquoted fields are trimmed and typed through the same literal inference
//! the extended-JSON parser uses.

mod error;
mod options;
mod parser;

pub use error::{CsvError, CsvResult};
pub use options::CsvOptions;
pub use parser::CsvParser;

use treedoc_core::Document;
use treedoc_scanner::SourceText;

/// Parse `text` with default options (newline records, comma fields,
/// double-quote quoting).
pub fn parse(text: &str) -> CsvResult<Document> {
    parse_with_options(text, &CsvOptions::default())
}

pub fn parse_with_options(text: &str, options: &CsvOptions) -> CsvResult<Document> {
    CsvParser::new(SourceText::from(text), options.clone()).parse()
}
