//! Sinks for node→schema associations recorded during validation.

use serde_json::Value;

use crate::ast::{Ast, NodeId};

/// One schema that applied to one node during validation. `inverted` marks
/// associations recorded underneath a `not`.
#[derive(Debug, Clone, Copy)]
pub struct ApplicableSchema<'s> {
    pub node: NodeId,
    pub schema: &'s Value,
    pub inverted: bool,
}

/// Collects `(node, schema)` associations, optionally pruned to a focus
/// offset and an excluded node.
///
/// The no-op flavor ([`MatchingSchemas::noop`]) accepts every node but
/// records nothing; it backs plain validation and the `contains`/
/// `propertyNames` probes that must not pollute hover associations.
///
/// Branch evaluation builds a sub-collector per alternative with
/// [`new_sub`](Self::new_sub); only the winner is folded back in with
/// [`merge`](Self::merge).
#[derive(Debug)]
pub struct MatchingSchemas<'s> {
    schemas: Vec<ApplicableSchema<'s>>,
    focus_offset: Option<usize>,
    exclude: Option<NodeId>,
    collecting: bool,
}

impl<'s> MatchingSchemas<'s> {
    pub fn collecting(focus_offset: Option<usize>, exclude: Option<NodeId>) -> Self {
        Self {
            schemas: Vec::new(),
            focus_offset,
            exclude,
            collecting: true,
        }
    }

    pub fn noop() -> Self {
        Self {
            schemas: Vec::new(),
            focus_offset: None,
            exclude: None,
            collecting: false,
        }
    }

    /// Whether validation should descend into `node` at all. This is the
    /// pruning point for focused queries.
    pub fn include(&self, ast: &Ast, node: NodeId) -> bool {
        if !self.collecting {
            return true;
        }
        if self.exclude == Some(node) {
            return false;
        }
        let Some(offset) = self.focus_offset else {
            return true;
        };
        if ast[node].range.contains(offset, true) {
            return true;
        }
        // A property value stays in focus whenever its property is:
        // a cursor on the key or the colon still targets the value's
        // schema.
        matches!(ast[node].parent, Some(parent)
            if ast[parent].is_property() && ast[parent].range.contains(offset, true))
    }

    pub fn add(&mut self, node: NodeId, schema: &'s Value) {
        if self.collecting {
            self.schemas.push(ApplicableSchema {
                node,
                schema,
                inverted: false,
            });
        }
    }

    /// A collector for one combinator branch: unfocused, so a winning
    /// branch contributes all of its associations on merge.
    pub fn new_sub(&self) -> Self {
        Self {
            schemas: Vec::new(),
            focus_offset: None,
            exclude: self.exclude,
            collecting: self.collecting,
        }
    }

    pub fn merge(&mut self, other: MatchingSchemas<'s>) {
        self.schemas.extend(other.schemas);
    }

    /// Flip the `inverted` flag on everything collected, for folding the
    /// associations found under a `not` back into the parent.
    pub fn merge_inverted(&mut self, other: MatchingSchemas<'s>) {
        self.schemas.extend(other.schemas.into_iter().map(|mut applicable| {
            applicable.inverted = !applicable.inverted;
            applicable
        }));
    }

    pub fn into_schemas(self) -> Vec<ApplicableSchema<'s>> {
        self.schemas
    }
}
