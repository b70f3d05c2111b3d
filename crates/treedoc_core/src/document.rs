use std::fmt::{self, Debug, Formatter};

use rustc_hash::FxHashMap;
use treedoc_scanner::SourceText;

use crate::{Node, NodeKind};

/// A handle addressing one node of a [`Document`]. Ids are plain indices and
/// are only meaningful within the document that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The shared context for one parse unit (or one batch of documents): the
/// tree of nodes plus the cross-reference id map.
///
/// The document owns every node; `parent` links and id map entries are
/// non-owning [`NodeId`]s used only for lookup, so registering a node under
/// an id never extends its lifetime. The whole tree is released as a unit
/// when the document drops.
pub struct Document {
    source: SourceText,
    uri: Option<String>,
    nodes: Vec<Node>,
    root: NodeId,
    id_map: FxHashMap<String, NodeId>,
}

impl Document {
    /// Create a document with a single root node of indeterminate kind.
    pub fn new(source: SourceText, uri: Option<String>) -> Self {
        Self {
            source,
            uri,
            nodes: vec![Node::new(None, None)],
            root: NodeId(0),
            id_map: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    /// Opaque source identifier carried for diagnostics only.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Append a new child of indeterminate kind under `parent`. Map children
    /// carry the key they were stored under; array children carry none.
    pub fn create_child(&mut self, parent: NodeId, key: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(Some(parent), key));
        self.nodes[parent.index()].push_child(id);
        id
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.node(id).children().get(index).copied()
    }

    /// The first child of `id` stored under `key`. Duplicate keys are
    /// permitted, so later siblings with the same key are only reachable by
    /// iterating [`Document::children`].
    pub fn map_child(&self, id: NodeId, key: &str) -> Option<NodeId> {
        self.node(id)
            .children()
            .iter()
            .copied()
            .find(|child| self.node(*child).key() == Some(key))
    }

    /// Register a cross-reference id. Ids are expected unique by convention,
    /// but a later registration for the same id wins.
    pub fn register_id(&mut self, id: String, node: NodeId) {
        self.id_map.insert(id, node);
    }

    pub fn node_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map.get(id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.id_map.iter().map(|(id, node)| (id.as_str(), *node))
    }

    /// The source slice between a node's bookmarks, for diagnostics and
    /// re-parse checks. `None` until both bookmarks have been recorded.
    pub fn text_span(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id);
        match (node.start(), node.end()) {
            (Some(start), Some(end)) => self.source.get(start.offset..end.offset),
            _ => None,
        }
    }

    fn fmt_node(&self, f: &mut Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = self.node(id);
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        if let Some(key) = node.key() {
            write!(f, "{key:?}: ")?;
        }
        match node.kind() {
            Some(NodeKind::Map) => writeln!(f, "MAP({})", node.children().len())?,
            Some(NodeKind::Array) => writeln!(f, "ARRAY({})", node.children().len())?,
            Some(NodeKind::Simple) => match node.value() {
                Some(value) => writeln!(f, "{value:?}")?,
                None => writeln!(f, "SIMPLE")?,
            },
            None => writeln!(f, "PENDING")?,
        }
        for child in node.children() {
            self.fmt_node(f, *child, depth + 1)?;
        }
        Ok(())
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0)
    }
}
