use treedoc_core::NodeKind;

/// Configuration for one extended-JSON parse.
///
/// Every field has a default; construction is plain field-by-field override,
/// typically through struct update syntax:
///
/// ```
/// use treedoc_json::ParseOptions;
///
/// let options = ParseOptions {
///     id_key: "name".to_string(),
///     ..ParseOptions::default()
/// };
/// # let _ = options;
/// ```
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// How a bracket-less root document is interpreted: content like
    /// `a:1,b:2` parses as this kind without surrounding brackets.
    ///
    /// Defaults to [`NodeKind::Map`].
    pub default_root_kind: NodeKind,
    /// Batch ordinal used to disambiguate ids and references across multiple
    /// top-level documents parsed together. Supplied automatically by
    /// [`parse_all`]; leave unset for single-document parses.
    ///
    /// [`parse_all`]: crate::parse_all
    pub doc_id: Option<u32>,
    /// Opaque source identifier carried on the document for diagnostics
    /// only.
    pub uri: Option<String>,
    /// The map key that triggers cross-reference id registration.
    ///
    /// Defaults to `"id"`.
    pub id_key: String,
    /// The map key whose scalar value is rewritten with the batch ordinal
    /// suffix so it keeps matching registered ids. Resolution of the
    /// reference itself is left to the consumer.
    ///
    /// Defaults to `"ref"`.
    pub reference_key: String,
    /// Maximum value nesting depth before the parse fails with
    /// [`ParseError::DepthLimitExceeded`] instead of exhausting the call
    /// stack.
    ///
    /// Defaults to `128`.
    ///
    /// [`ParseError::DepthLimitExceeded`]: crate::ParseError::DepthLimitExceeded
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_root_kind: NodeKind::Map,
            doc_id: None,
            uri: None,
            id_key: "id".to_string(),
            reference_key: "ref".to_string(),
            max_depth: 128,
        }
    }
}
