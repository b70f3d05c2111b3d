use treedoc_core::{Document, NodeId, NodeKind, Scalar};
use treedoc_scanner::{Bookmark, Scanner, SourceText};

use crate::{ParseError, ParseOptions, ParseResult};

/// Terminator sets for bare tokens depend on the enclosing container, so a
/// bare value stops at the parent's closing bracket without consuming it.
#[derive(Clone, Copy, Debug)]
enum ParseContext {
    Root,
    Map,
    Array,
}

impl ParseContext {
    fn bare_terminators(self) -> &'static [u8] {
        match self {
            ParseContext::Root => b",\n\r",
            ParseContext::Map => b",\n\r}",
            ParseContext::Array => b",\n\r]",
        }
    }
}

/// Characters an unquoted map key is read up to.
const KEY_TERMINATORS: &[u8] = b":{[,}\"";

fn is_quote(byte: u8) -> bool {
    matches!(byte, b'"' | b'\'' | b'`')
}

/// A recursive-descent parser for the extended JSON dialect: optional root
/// brackets, unquoted keys and scalars, `#`/`//`/`/* */` comments, commas
/// and newlines interchangeable as separators, continuous quoted strings,
/// and cross-reference id registration.
///
/// A parser value is constructed fresh for every parse; nothing is shared
/// between parses.
pub struct ExtendedJsonParser {
    scanner: Scanner,
    document: Document,
    options: ParseOptions,
    depth: usize,
}

impl ExtendedJsonParser {
    pub fn new(source: SourceText, options: ParseOptions) -> Self {
        let document = Document::new(source.clone(), options.uri.clone());
        Self {
            scanner: Scanner::new(source),
            document,
            options,
            depth: 0,
        }
    }

    /// Parse the whole input as one document.
    pub fn parse(mut self) -> ParseResult<Document> {
        let root = self.document.root();
        self.parse_value(root, ParseContext::Root, true)?;
        Ok(self.document)
    }

    /// Parse the input as a batch of documents under a synthetic array root.
    /// Each document is parsed with an increasing batch ordinal, which feeds
    /// the id/reference disambiguation so independently-addressed documents
    /// can share one id map.
    pub fn parse_all(mut self) -> ParseResult<Document> {
        let root = self.document.root();
        self.document.node_mut(root).set_start(self.scanner.bookmark());
        self.document.node_mut(root).commit_kind(NodeKind::Array);
        let mut ordinal: u32 = 0;
        let result = loop {
            if !self.scanner.skip_spaces_returns_and_commas() {
                break Ok(());
            }
            self.options.doc_id = Some(ordinal);
            let child = self.document.create_child(root, None);
            if let Err(error) = self.parse_value(child, ParseContext::Root, true) {
                break Err(error);
            }
            ordinal += 1;
        };
        self.document.node_mut(root).set_end(self.scanner.bookmark());
        result?;
        Ok(self.document)
    }

    /// Parse one value into `node`. Start and end bookmarks are recorded
    /// around the whole value unconditionally, including failure paths.
    fn parse_value(
        &mut self,
        node: NodeId,
        context: ParseContext,
        is_root: bool,
    ) -> ParseResult<()> {
        let current = self.skip_space_and_comments();
        self.document.node_mut(node).set_start(self.scanner.bookmark());
        self.depth += 1;
        let result = if self.depth > self.options.max_depth {
            Err(ParseError::DepthLimitExceeded {
                limit: self.options.max_depth,
                at: self.scanner.bookmark(),
            })
        } else {
            self.dispatch_value(node, current, context, is_root)
        };
        self.depth -= 1;
        self.document.node_mut(node).set_end(self.scanner.bookmark());
        result
    }

    fn dispatch_value(
        &mut self,
        node: NodeId,
        current: Option<u8>,
        context: ParseContext,
        is_root: bool,
    ) -> ParseResult<()> {
        match current {
            Some(b'{') => {
                self.scanner.skip(1);
                self.parse_map(node, true)
            }
            Some(b'[') => {
                self.scanner.skip(1);
                self.parse_array(node, true)
            }
            Some(quote) if is_quote(quote) => {
                let text = self.read_continuous_string(quote)?;
                self.document.node_mut(node).set_value(Scalar::String(text));
                Ok(())
            }
            _ if is_root => match self.options.default_root_kind {
                NodeKind::Map => self.parse_map(node, false),
                NodeKind::Array => self.parse_array(node, false),
                NodeKind::Simple => self.parse_bare(node, context),
            },
            _ => self.parse_bare(node, context),
        }
    }

    /// The single gate every structural decision point passes through:
    /// whitespace and `#`, `//`, and `/* */` comments are consumed until the
    /// next significant byte, which is returned without being consumed.
    /// Returns `None` at end of input.
    fn skip_space_and_comments(&mut self) -> Option<u8> {
        loop {
            if !self.scanner.skip_spaces_and_returns() {
                return None;
            }
            match self.scanner.current()? {
                b'#' => self.scanner.skip_until_terminator(b'\n'),
                b'/' => match self.scanner.peek(1) {
                    Some(b'/') => self.scanner.skip_until_terminator(b'\n'),
                    Some(b'*') => {
                        self.scanner.skip(2);
                        self.scanner.skip_until_match("*/", true);
                    }
                    _ => return Some(b'/'),
                },
                other => return Some(other),
            }
        }
    }

    /// Parse map entries until `}` (when an opening brace was consumed) or
    /// until input is exhausted (for bracket-less roots).
    fn parse_map(&mut self, node: NodeId, has_open_brace: bool) -> ParseResult<()> {
        self.document.node_mut(node).commit_kind(NodeKind::Map);
        loop {
            let Some(current) = self.skip_space_and_comments() else {
                if has_open_brace {
                    return Err(ParseError::UnterminatedStructure {
                        closing: '}',
                        at: self.scanner.bookmark(),
                    });
                }
                return Ok(());
            };
            match current {
                b'}' => {
                    self.scanner.skip(1);
                    return Ok(());
                }
                b',' => self.scanner.skip(1),
                quote if is_quote(quote) => {
                    let key_start = self.scanner.bookmark();
                    let key = self.scanner.read_quoted_string(quote)?;
                    let Some(follower) = self.skip_space_and_comments() else {
                        return Err(ParseError::MissingKeySeparator {
                            key,
                            at: self.scanner.bookmark(),
                        });
                    };
                    match follower {
                        b':' => {
                            self.scanner.skip(1);
                            self.parse_child(node, key)?;
                        }
                        b'{' | b'[' => {
                            self.parse_child(node, key)?;
                        }
                        // No colon ever appeared: the quoted text is a
                        // positional value. A quoted positional stays a
                        // string, bypassing inference.
                        b',' | b'}' => {
                            self.append_positional(node, Scalar::String(key), key_start);
                        }
                        _ => {
                            return Err(ParseError::MissingKeySeparator {
                                key,
                                at: self.scanner.bookmark(),
                            });
                        }
                    }
                }
                _ => {
                    let key_start = self.scanner.bookmark();
                    let span = self.scanner.read_until_terminator(KEY_TERMINATORS);
                    let key = self.scanner.str_slice(span).trim().to_string();
                    let Some(follower) = self.scanner.current() else {
                        return Err(ParseError::MissingKeySeparator {
                            key,
                            at: self.scanner.bookmark(),
                        });
                    };
                    match follower {
                        b':' => {
                            self.scanner.skip(1);
                            self.parse_child(node, key)?;
                        }
                        // `{a,b,c}`: the key text itself is a positional
                        // value stored under the current child index.
                        b',' | b'}' => {
                            self.append_positional(node, Scalar::infer(&key), key_start);
                        }
                        // `{`, `[`, or a quote directly after the key: the
                        // value starts without a separator.
                        _ => {
                            self.parse_child(node, key)?;
                        }
                    }
                }
            }
        }
    }

    /// Parse array elements until `]` (when an opening bracket was consumed)
    /// or until input is exhausted.
    fn parse_array(&mut self, node: NodeId, has_open_bracket: bool) -> ParseResult<()> {
        self.document.node_mut(node).commit_kind(NodeKind::Array);
        loop {
            let Some(current) = self.skip_space_and_comments() else {
                if has_open_bracket {
                    return Err(ParseError::UnterminatedStructure {
                        closing: ']',
                        at: self.scanner.bookmark(),
                    });
                }
                return Ok(());
            };
            if current == b']' {
                self.scanner.skip(1);
                return Ok(());
            }
            let child = self.document.create_child(node, None);
            self.parse_value(child, ParseContext::Array, false)?;
            if self.skip_space_and_comments() == Some(b',') {
                self.scanner.skip(1);
            }
        }
    }

    /// Parse the value for map key `key`, then apply the id/reference
    /// handling for the two configured special keys.
    fn parse_child(&mut self, parent: NodeId, key: String) -> ParseResult<()> {
        let child = self.document.create_child(parent, Some(key));
        self.parse_value(child, ParseContext::Map, false)?;
        self.resolve_reference_keys(parent, child);
        Ok(())
    }

    /// Id/reference resolution: when a SIMPLE child sits under the id key,
    /// its rendered value (suffixed with `_<docId>` in batch parses) is
    /// registered in the document id map pointing at the *enclosing map
    /// node*. A child under the reference key gets the same suffix rewrite
    /// so it keeps matching, but nothing is registered; resolving the
    /// reference is the consumer's job.
    fn resolve_reference_keys(&mut self, parent: NodeId, child: NodeId) {
        let child_node = self.document.node(child);
        if !child_node.is_simple() {
            return;
        }
        let key = child_node.key();
        let is_id = key == Some(self.options.id_key.as_str());
        let is_reference = key == Some(self.options.reference_key.as_str());
        if !is_id && !is_reference {
            return;
        }
        let Some(rendered) = child_node.value().map(Scalar::to_string) else {
            return;
        };
        match self.options.doc_id {
            Some(doc_id) => {
                let scoped = format!("{rendered}_{doc_id}");
                self.document
                    .node_mut(child)
                    .set_value(Scalar::String(scoped.clone()));
                if is_id {
                    self.document.register_id(scoped, parent);
                }
            }
            None => {
                if is_id {
                    self.document.register_id(rendered, parent);
                }
            }
        }
    }

    /// Store a no-colon map entry: the key text becomes a SIMPLE child under
    /// an auto-generated numeric key equal to its child index.
    fn append_positional(&mut self, parent: NodeId, value: Scalar, start: Bookmark) {
        let index = self.document.node(parent).children().len();
        let child = self.document.create_child(parent, Some(index.to_string()));
        let node = self.document.node_mut(child);
        node.set_start(start);
        node.set_value(value);
        node.set_end(self.scanner.bookmark());
    }

    /// Read adjacent quoted segments separated only by whitespace/comments
    /// and concatenate them into one string. This is what makes multi-line
    /// string literals possible.
    fn read_continuous_string(&mut self, first_quote: u8) -> ParseResult<String> {
        let mut text = self.scanner.read_quoted_string(first_quote)?;
        loop {
            match self.skip_space_and_comments() {
                Some(quote) if is_quote(quote) => {
                    text.push_str(&self.scanner.read_quoted_string(quote)?);
                }
                _ => return Ok(text),
            }
        }
    }

    /// Read a bare token up to the context's terminator set, trim it, and
    /// store the inferred scalar.
    fn parse_bare(&mut self, node: NodeId, context: ParseContext) -> ParseResult<()> {
        let span = self.scanner.read_until_terminator(context.bare_terminators());
        let value = Scalar::infer(self.scanner.str_slice(span).trim());
        self.document.node_mut(node).set_value(value);
        Ok(())
    }
}
