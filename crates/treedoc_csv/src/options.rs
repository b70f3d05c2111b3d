/// Configuration for one CSV parse. All separators must be ASCII.
#[derive(Clone, Debug)]
pub struct CsvOptions {
    /// Separator between records.
    ///
    /// Defaults to newline. A carriage return immediately ahead of the
    /// separator is treated as record-terminal whitespace, so CRLF input
    /// produces the same rows as LF input.
    pub record_sep: char,
    /// Separator between fields within a record.
    ///
    /// Defaults to `,`.
    pub field_sep: char,
    /// Quote character for quoted fields. Inside a quoted field a doubled
    /// quote decodes to one literal quote character.
    ///
    /// Defaults to `"`.
    pub quote_char: char,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            record_sep: '\n',
            field_sep: ',',
            quote_char: '"',
        }
    }
}
