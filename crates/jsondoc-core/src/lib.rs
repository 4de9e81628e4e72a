//! Fault-tolerant JSONC parsing and JSON Schema validation for editor
//! tooling.
//!
//! The crate parses a JSON or JSON-with-comments source text into a
//! position-annotated syntax tree and validates that tree against a JSON
//! Schema (draft-07 subset), producing diagnostics plus a report of which
//! schemas applied to which nodes — the raw material for hover, completion,
//! and goto-definition over schemas.
//!
//! Parsing never aborts: the parser recovers on structural tokens and
//! always returns the largest well-formed tree the input allows, with one
//! diagnostic per malformed construct. Validation likewise never fails;
//! every violated keyword contributes an independent warning.
//!
//! ```
//! use jsondoc_core::{parse, ParseOptions};
//! use serde_json::json;
//!
//! let document = parse(r#"{"name": "jsondoc", "port": 80}"#, &ParseOptions::default());
//! assert!(document.syntax_errors.is_empty());
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "port": { "type": "integer", "minimum": 1024 } }
//! });
//! let problems = document.validate(&schema);
//! assert_eq!(problems.len(), 1);
//! assert!(problems[0].message.contains("minimum"));
//! ```
//!
//! Offsets everywhere — node ranges, diagnostics, focus offsets — are
//! UTF-8 byte offsets into the source text.

mod ast;
mod config;
mod diagnostics;
mod document;
mod parser;
mod scanner;
mod validation;

pub use ast::{Ast, Node, NodeId, NodeKind, Segment};
pub use config::ParseOptions;
pub use diagnostics::{Diagnostic, ErrorCode, Range, Severity};
pub use document::JsonDocument;
pub use parser::parse;
pub use scanner::{ScanError, Scanner, TokenKind};
pub use validation::{ApplicableSchema, ValidationResult};
