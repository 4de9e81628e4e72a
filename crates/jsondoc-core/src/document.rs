//! The parsed-document surface consumed by editor features.

use serde_json::Value;

use crate::ast::{Ast, NodeId};
use crate::diagnostics::{Diagnostic, Range};
use crate::validation::{self, ApplicableSchema, MatchingSchemas, ValidationResult};

/// A parsed JSONC document: the syntax tree, the parser's diagnostics, and
/// (when requested) the comment ranges.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    ast: Ast,
    pub syntax_errors: Vec<Diagnostic>,
    pub comments: Vec<Range>,
}

impl JsonDocument {
    pub(crate) fn new(ast: Ast, syntax_errors: Vec<Diagnostic>, comments: Vec<Range>) -> Self {
        Self {
            ast,
            syntax_errors,
            comments,
        }
    }

    /// The root node; `None` only for input without any token.
    pub fn root(&self) -> Option<NodeId> {
        self.ast.root()
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn into_ast(self) -> Ast {
        self.ast
    }

    /// Project the document to a plain JSON value.
    pub fn value(&self) -> Option<Value> {
        self.root().map(|root| self.ast.value(root))
    }

    /// The deepest node containing `offset`.
    pub fn node_at_offset(&self, offset: usize, include_end: bool) -> Option<NodeId> {
        self.root()
            .and_then(|root| self.ast.node_at_offset(root, offset, include_end))
    }

    /// Validate against `schema`, returning the schema diagnostics.
    ///
    /// Validation walks the schema object directly and never fails; calling
    /// it twice yields the same list.
    pub fn validate(&self, schema: &Value) -> Vec<Diagnostic> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        let mut result = ValidationResult::new();
        let mut collector = MatchingSchemas::noop();
        validation::validate(&self.ast, root, schema, &mut result, &mut collector);
        result.problems
    }

    /// The `(node, schema)` associations recorded while validating against
    /// `schema`, pruned to nodes containing `focus_offset` when one is
    /// given. `exclude` drops one node from collection (and from descent).
    pub fn matching_schemas<'s>(
        &self,
        schema: &'s Value,
        focus_offset: Option<usize>,
        exclude: Option<NodeId>,
    ) -> Vec<ApplicableSchema<'s>> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        let mut result = ValidationResult::new();
        let mut collector = MatchingSchemas::collecting(focus_offset, exclude);
        validation::validate(&self.ast, root, schema, &mut result, &mut collector);
        collector.into_schemas()
    }
}
