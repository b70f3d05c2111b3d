use treedoc_scanner::Bookmark;

use crate::{NodeId, Scalar};

/// The structural role of a node, committed when the parser sees the first
/// token that decides it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Map,
    Array,
    Simple,
}

/// One element of a tree document.
///
/// A node starts out with an indeterminate kind and is committed exactly once
/// by the parser. Children are appended in discovery order and never removed;
/// for maps that makes child order insertion order, not key order, and
/// duplicate keys across siblings are preserved. The `parent` link and the
/// child ids are plain indices into the owning [`Document`], so ownership
/// runs strictly document → nodes.
///
/// [`Document`]: crate::Document
#[derive(Debug)]
pub struct Node {
    kind: Option<NodeKind>,
    key: Option<String>,
    value: Option<Scalar>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    start: Option<Bookmark>,
    end: Option<Bookmark>,
}

impl Node {
    pub(crate) fn new(parent: Option<NodeId>, key: Option<String>) -> Self {
        Self {
            kind: None,
            key,
            value: None,
            children: Vec::new(),
            parent,
            start: None,
            end: None,
        }
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.kind
    }

    /// Commit the structural kind of this node. Committing twice with the
    /// same kind is a no-op; committing a conflicting kind is a programming
    /// error in the parser, not a reachable parse state.
    pub fn commit_kind(&mut self, kind: NodeKind) {
        match self.kind {
            None => self.kind = Some(kind),
            Some(existing) => assert_eq!(
                existing, kind,
                "node kind was already committed as {existing:?}"
            ),
        }
    }

    pub fn is_map(&self) -> bool {
        self.kind == Some(NodeKind::Map)
    }

    pub fn is_array(&self) -> bool {
        self.kind == Some(NodeKind::Array)
    }

    pub fn is_simple(&self) -> bool {
        self.kind == Some(NodeKind::Simple)
    }

    /// The key this node is stored under, when it is the child of a map.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The scalar value, present only on SIMPLE nodes.
    pub fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }

    /// Store a scalar value, committing this node as SIMPLE.
    pub fn set_value(&mut self, value: Scalar) {
        self.commit_kind(NodeKind::Simple);
        self.value = Some(value);
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn start(&self) -> Option<Bookmark> {
        self.start
    }

    pub fn end(&self) -> Option<Bookmark> {
        self.end
    }

    pub fn set_start(&mut self, bookmark: Bookmark) {
        self.start = Some(bookmark);
    }

    pub fn set_end(&mut self, bookmark: Bookmark) {
        self.end = Some(bookmark);
    }
}
