use treedoc_core::{Document, NodeId, NodeKind, Scalar};
use treedoc_scanner::{Scanner, SourceText};

use crate::{CsvOptions, CsvResult};

/// A line/field oriented parser producing a fixed two-level tree: an array
/// of records, each an array of fields.
pub struct CsvParser {
    scanner: Scanner,
    document: Document,
    record_sep: u8,
    field_sep: u8,
    quote: u8,
}

impl CsvParser {
    pub fn new(source: SourceText, options: CsvOptions) -> Self {
        debug_assert!(
            options.record_sep.is_ascii()
                && options.field_sep.is_ascii()
                && options.quote_char.is_ascii(),
            "CSV separators must be ASCII"
        );
        let document = Document::new(source.clone(), None);
        Self {
            scanner: Scanner::new(source),
            document,
            record_sep: options.record_sep as u8,
            field_sep: options.field_sep as u8,
            quote: options.quote_char as u8,
        }
    }

    pub fn parse(mut self) -> CsvResult<Document> {
        let root = self.document.root();
        self.document.node_mut(root).set_start(self.scanner.bookmark());
        self.document.node_mut(root).commit_kind(NodeKind::Array);
        while !self.scanner.is_eof(0) {
            self.parse_record(root)?;
        }
        self.document.node_mut(root).set_end(self.scanner.bookmark());
        Ok(self.document)
    }

    fn parse_record(&mut self, root: NodeId) -> CsvResult<()> {
        // Pure-whitespace records produce no fields and are dropped rather
        // than emitted as empty rows. The lookahead to the next record
        // separator is safe even though quoted fields may span separators:
        // a quoted field would make the lookahead text non-blank.
        let mark = self.scanner.bookmark();
        let span = self.scanner.read_until_terminator(&[self.record_sep]);
        let blank = self.scanner.str_slice(span).trim().is_empty();
        if blank {
            if !self.scanner.is_eof(0) {
                self.scanner.skip(1);
            }
            return Ok(());
        }
        self.scanner.rewind(mark);

        let row = self.document.create_child(root, None);
        self.document.node_mut(row).set_start(self.scanner.bookmark());
        self.document.node_mut(row).commit_kind(NodeKind::Array);
        loop {
            self.parse_field(row)?;
            match self.scanner.current() {
                Some(byte) if byte == self.field_sep => self.scanner.skip(1),
                Some(byte) if byte == self.record_sep => {
                    self.scanner.skip(1);
                    break;
                }
                None => break,
                unexpected => unreachable!(
                    "field reads stop at a separator or EOF, found {unexpected:?}"
                ),
            }
        }
        self.document.node_mut(row).set_end(self.scanner.bookmark());
        Ok(())
    }

    fn parse_field(&mut self, row: NodeId) -> CsvResult<()> {
        let field = self.document.create_child(row, None);
        self.document.node_mut(field).set_start(self.scanner.bookmark());
        match self.scanner.current() {
            Some(byte) if byte == self.quote => {
                // Quoted fields are always strings, never passed through
                // inference.
                let text = self.scanner.read_doubled_quoted_string(byte)?;
                self.document.node_mut(field).set_value(Scalar::String(text));
                self.document.node_mut(field).set_end(self.scanner.bookmark());
                // Anything between the closing quote and the next separator
                // (a stray carriage return, usually) is dropped.
                self.scanner
                    .read_until_terminator(&[self.field_sep, self.record_sep]);
            }
            _ => {
                let span = self
                    .scanner
                    .read_until_terminator(&[self.field_sep, self.record_sep]);
                let value = Scalar::infer(self.scanner.str_slice(span).trim());
                self.document.node_mut(field).set_value(value);
                self.document.node_mut(field).set_end(self.scanner.bookmark());
            }
        }
        Ok(())
    }
}
