//! Position-annotated syntax tree.
//!
//! Nodes live in an arena owned by [`Ast`] and reference each other through
//! [`NodeId`] indices: child lists own downward, `parent` ids point upward
//! without owning. The tree is immutable once the parser hands it over.

use std::ops::Index;

use serde_json::{Map, Value};

use crate::diagnostics::Range;

/// Index of a node in its [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// One step of a path from the root to a node: an object key or an array
/// index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// The kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Null,
    Boolean(bool),
    Number {
        value: f64,
        /// Whether the literal had no `.`; exponent notation with an
        /// integer mantissa still counts as an integer.
        is_integer: bool,
    },
    String {
        value: String,
        /// Set on strings that are the key of a property.
        is_key: bool,
    },
    Array {
        items: Vec<NodeId>,
    },
    Object {
        properties: Vec<NodeId>,
    },
    Property {
        key: NodeId,
        /// Absent when recovery gave up before a value was parsed.
        value: Option<NodeId>,
        colon_offset: Option<usize>,
    },
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub range: Range,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn is_object(&self) -> bool {
        matches!(self.kind, NodeKind::Object { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, NodeKind::Array { .. })
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, NodeKind::Property { .. })
    }

    /// The string value, for string nodes.
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::String { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// The node arena plus the root, produced by the parser.
///
/// The arena may hold orphan nodes abandoned during error recovery; they
/// are unreachable from the root and ignored by every traversal.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }
}

impl Ast {
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub(crate) fn push(&mut self, kind: NodeKind, range: Range, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            range,
            parent,
        });
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// The node's children in source order. Property nodes yield the key
    /// first, then the value if present.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let (slice, pair): (&[NodeId], [Option<NodeId>; 2]) = match &self[id].kind {
            NodeKind::Array { items } => (items, [None, None]),
            NodeKind::Object { properties } => (properties, [None, None]),
            NodeKind::Property { key, value, .. } => (&[], [Some(*key), *value]),
            _ => (&[], [None, None]),
        };
        slice.iter().copied().chain(pair.into_iter().flatten())
    }

    /// The path segment this node contributes: its key for a property,
    /// its position for an array item, nothing otherwise.
    pub fn segment(&self, id: NodeId) -> Option<Segment> {
        let node = &self[id];
        let parent = node.parent?;
        if let NodeKind::Array { items } = &self[parent].kind {
            return items.iter().position(|&c| c == id).map(Segment::Index);
        }
        if let NodeKind::Property { key, .. } = &node.kind {
            return Some(Segment::Key(self[*key].as_str().unwrap_or_default().to_string()));
        }
        None
    }

    /// The sequence of segments from the root down to `id`.
    pub fn path(&self, id: NodeId) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            if let Some(segment) = self.segment(id) {
                segments.push(segment);
            }
            current = self[id].parent;
        }
        segments.reverse();
        segments
    }

    /// The deepest node whose range contains `offset`, starting the search
    /// at `from`. Sibling order lets the search stop at the first child
    /// starting past the offset.
    pub fn node_at_offset(
        &self,
        from: NodeId,
        offset: usize,
        include_end: bool,
    ) -> Option<NodeId> {
        if !self[from].range.contains(offset, include_end) {
            return None;
        }
        for child in self.children(from) {
            if self[child].range.start > offset {
                break;
            }
            if let Some(found) = self.node_at_offset(child, offset, include_end) {
                return Some(found);
            }
        }
        Some(from)
    }

    /// Pre-order traversal from `from`; the visitor returns `false` to
    /// prune the subtree below the visited node.
    pub fn visit(&self, from: NodeId, visitor: &mut impl FnMut(NodeId) -> bool) {
        if !visitor(from) {
            return;
        }
        for child in self.children(from) {
            self.visit(child, visitor);
        }
    }

    /// Project the subtree at `id` to a plain JSON value.
    ///
    /// Properties without a value are omitted; duplicate keys resolve to
    /// the last occurrence. Non-finite numbers (only producible from
    /// malformed literals) project to `null`.
    pub fn value(&self, id: NodeId) -> Value {
        match &self[id].kind {
            NodeKind::Null => Value::Null,
            NodeKind::Boolean(b) => Value::Bool(*b),
            NodeKind::Number { value, .. } => number_value(*value),
            NodeKind::String { value, .. } => Value::String(value.clone()),
            NodeKind::Array { items } => {
                Value::Array(items.iter().map(|&item| self.value(item)).collect())
            }
            NodeKind::Object { properties } => {
                let mut map = Map::new();
                for &property in properties {
                    if let NodeKind::Property {
                        key,
                        value: Some(value),
                        ..
                    } = &self[property].kind
                    {
                        let key = self[*key].as_str().unwrap_or_default().to_string();
                        map.insert(key, self.value(*value));
                    }
                }
                Value::Object(map)
            }
            NodeKind::Property { value, .. } => {
                value.map_or(Value::Null, |value| self.value(value))
            }
        }
    }
}

/// Numbers keep their integer identity when they have one, so enum and
/// const comparisons against schema literals stay value-based.
fn number_value(value: f64) -> Value {
    if !value.is_finite() {
        return Value::Null;
    }
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        return Value::from(value as i64);
    }
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}
