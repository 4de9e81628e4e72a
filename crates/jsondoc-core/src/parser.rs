//! Fault-tolerant recursive-descent parser.
//!
//! The parser never fails and never throws: every malformed construct
//! produces a diagnostic plus a recovery action (finalizing the node built
//! so far, skipping to a structural token, or both), and the largest
//! well-formed tree the input allows is always returned.

use std::collections::HashMap;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::config::ParseOptions;
use crate::diagnostics::{Diagnostic, ErrorCode, Range, Severity};
use crate::document::JsonDocument;
use crate::scanner::{Scanner, TokenKind};

/// Parse `text` into a document. The returned root is `None` only when the
/// input holds no token at all.
pub fn parse(text: &str, options: &ParseOptions) -> JsonDocument {
    Parser::new(text, options).parse()
}

/// Tracks duplicate keys within one object. A key maps to the range of its
/// first occurrence until that occurrence has been reported; later
/// duplicates of the same key only flag themselves.
type KeysSeen = HashMap<String, Option<Range>>;

struct Parser<'a> {
    text: &'a str,
    scanner: Scanner<'a>,
    options: &'a ParseOptions,
    ast: Ast,
    problems: Vec<Diagnostic>,
    comments: Vec<Range>,
    last_problem_offset: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            text,
            scanner: Scanner::new(text),
            options,
            ast: Ast::default(),
            problems: Vec::new(),
            comments: Vec::new(),
            last_problem_offset: None,
        }
    }

    fn parse(mut self) -> JsonDocument {
        let token = self.scan_next();
        let mut root = None;
        if token != TokenKind::Eof {
            root = self.parse_value(None);
            if root.is_none() {
                self.error(
                    "Expected a JSON object, array or literal.",
                    ErrorCode::Undefined,
                    None,
                    &[],
                    &[],
                );
            } else if self.scanner.token() != TokenKind::Eof {
                self.error("End of file expected.", ErrorCode::Undefined, None, &[], &[]);
            }
        }
        self.ast.set_root(root);
        JsonDocument::new(self.ast, self.problems, self.comments)
    }

    /// Advance past trivia, line breaks, and comments to the next token
    /// the grammar can see, reporting scan errors along the way.
    fn scan_next(&mut self) -> TokenKind {
        loop {
            let token = self.scanner.scan();
            self.check_scan_error();
            match token {
                TokenKind::LineComment | TokenKind::BlockComment => {
                    let range = self.token_range();
                    if !self.options.allow_comments {
                        self.add_problem(
                            range,
                            Severity::Error,
                            ErrorCode::Undefined,
                            "Comments are not permitted in JSON.",
                        );
                    } else if self.options.collect_comments {
                        self.comments.push(range);
                    }
                }
                TokenKind::Trivia | TokenKind::LineBreak => {}
                _ => return token,
            }
        }
    }

    fn check_scan_error(&mut self) {
        if let Some(scan_error) = self.scanner.token_error() {
            use crate::scanner::ScanError::*;
            let code = match scan_error {
                InvalidUnicode => ErrorCode::InvalidUnicode,
                InvalidEscapeCharacter => ErrorCode::InvalidEscapeCharacter,
                UnexpectedEndOfNumber => ErrorCode::UnexpectedEndOfNumber,
                UnexpectedEndOfComment => ErrorCode::UnexpectedEndOfComment,
                UnexpectedEndOfString => ErrorCode::UnexpectedEndOfString,
                InvalidCharacter => ErrorCode::InvalidCharacter,
            };
            self.error(&scan_error.to_string(), code, None, &[], &[]);
        }
    }

    fn token_range(&self) -> Range {
        Range::new(self.scanner.token_offset(), self.scanner.token_end())
    }

    /// Append a diagnostic; consecutive diagnostics at the same start
    /// offset collapse into the first one.
    fn add_problem(
        &mut self,
        range: Range,
        severity: Severity,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        if self.problems.is_empty() || self.last_problem_offset != Some(range.start) {
            self.problems.push(Diagnostic {
                range,
                severity,
                code: Some(code),
                message: message.into(),
            });
            self.last_problem_offset = Some(range.start);
        }
    }

    /// Report an error at the current token and recover.
    ///
    /// When the current token is zero-width (EOF), the diagnostic backs up
    /// to the previous non-whitespace character so the squiggle lands on
    /// something visible. `node` is finalized at the current token, and the
    /// token stream is advanced until after a token in `skip_until_after`
    /// or up to a token in `skip_until`, whichever fires first.
    fn error(
        &mut self,
        message: &str,
        code: ErrorCode,
        node: Option<NodeId>,
        skip_until_after: &[TokenKind],
        skip_until: &[TokenKind],
    ) -> Option<NodeId> {
        let mut start = self.scanner.token_offset();
        let mut end = self.scanner.token_end();
        if start == end && start > 0 {
            start = prev_char_boundary(self.text, start);
            while start > 0 && char_at(self.text, start).is_some_and(char::is_whitespace) {
                start = prev_char_boundary(self.text, start);
            }
            end = start + char_at(self.text, start).map_or(1, char::len_utf8);
        }
        self.add_problem(Range::new(start, end), Severity::Error, code, message);

        if let Some(node) = node {
            self.finalize(node, false);
        }
        if !skip_until_after.is_empty() || !skip_until.is_empty() {
            let mut token = self.scanner.token();
            while token != TokenKind::Eof {
                if skip_until_after.contains(&token) {
                    self.scan_next();
                    break;
                }
                if skip_until.contains(&token) {
                    break;
                }
                token = self.scan_next();
            }
        }
        node
    }

    /// Set the node's end to the current token's end and optionally
    /// consume that token.
    fn finalize(&mut self, node: NodeId, scan: bool) -> Option<NodeId> {
        self.ast.node_mut(node).range.end = self.scanner.token_end();
        if scan {
            self.scan_next();
        }
        Some(node)
    }

    fn new_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let start = self.scanner.token_offset();
        self.ast.push(kind, Range::new(start, start), parent)
    }

    fn parse_value(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        match self.scanner.token() {
            TokenKind::OpenBracket => self.parse_array(parent),
            TokenKind::OpenBrace => self.parse_object(parent),
            TokenKind::String => self.parse_string(parent, false),
            TokenKind::Number => self.parse_number(parent),
            TokenKind::True | TokenKind::False | TokenKind::Null => self.parse_literal(parent),
            _ => None,
        }
    }

    fn parse_literal(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        let kind = match self.scanner.token() {
            TokenKind::True => NodeKind::Boolean(true),
            TokenKind::False => NodeKind::Boolean(false),
            TokenKind::Null => NodeKind::Null,
            _ => return None,
        };
        let node = self.new_node(kind, parent);
        self.finalize(node, true)
    }

    fn parse_string(&mut self, parent: Option<NodeId>, is_key: bool) -> Option<NodeId> {
        if self.scanner.token() != TokenKind::String {
            return None;
        }
        let node = self.new_node(
            NodeKind::String {
                value: self.scanner.token_value().to_string(),
                is_key,
            },
            parent,
        );
        self.finalize(node, true)
    }

    fn parse_number(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        if self.scanner.token() != TokenKind::Number {
            return None;
        }
        let node = self.new_node(
            NodeKind::Number {
                value: 0.0,
                is_integer: true,
            },
            parent,
        );
        if self.scanner.token_error().is_none() {
            let literal = self.scanner.token_value().to_string();
            let is_integer = !literal.contains('.');
            let value = match literal.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    self.error("Invalid number format.", ErrorCode::Undefined, Some(node), &[], &[]);
                    f64::NAN
                }
            };
            self.ast.node_mut(node).kind = NodeKind::Number { value, is_integer };
        }
        self.finalize(node, true)
    }

    fn parse_array(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        if self.scanner.token() != TokenKind::OpenBracket {
            return None;
        }
        let node = self.new_node(NodeKind::Array { items: Vec::new() }, parent);
        self.scan_next();

        let mut items = Vec::new();
        let mut needs_comma = false;
        while self.scanner.token() != TokenKind::CloseBracket
            && self.scanner.token() != TokenKind::Eof
        {
            if self.scanner.token() == TokenKind::Comma {
                if !needs_comma {
                    self.error("Value expected", ErrorCode::ValueExpected, None, &[], &[]);
                }
                let comma_offset = self.scanner.token_offset();
                self.scan_next();
                if self.scanner.token() == TokenKind::CloseBracket {
                    if needs_comma && !self.options.allow_trailing_commas {
                        self.add_problem(
                            Range::new(comma_offset, comma_offset + 1),
                            Severity::Error,
                            ErrorCode::TrailingComma,
                            "Trailing comma",
                        );
                    }
                    continue;
                }
            } else if needs_comma {
                self.error("Expected comma", ErrorCode::CommaExpected, None, &[], &[]);
            }
            match self.parse_value(Some(node)) {
                Some(item) => items.push(item),
                None => {
                    self.error(
                        "Value expected",
                        ErrorCode::ValueExpected,
                        None,
                        &[],
                        &[TokenKind::CloseBracket, TokenKind::Comma],
                    );
                }
            }
            needs_comma = true;
        }
        self.ast.node_mut(node).kind = NodeKind::Array { items };

        if self.scanner.token() != TokenKind::CloseBracket {
            return self.error(
                "Expected comma or closing bracket",
                ErrorCode::CommaOrCloseBracketExpected,
                Some(node),
                &[],
                &[],
            );
        }
        self.finalize(node, true)
    }

    fn parse_object(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        if self.scanner.token() != TokenKind::OpenBrace {
            return None;
        }
        let node = self.new_node(
            NodeKind::Object {
                properties: Vec::new(),
            },
            parent,
        );
        let mut keys_seen = KeysSeen::new();
        self.scan_next();

        let mut properties = Vec::new();
        let mut needs_comma = false;
        while self.scanner.token() != TokenKind::CloseBrace
            && self.scanner.token() != TokenKind::Eof
        {
            if self.scanner.token() == TokenKind::Comma {
                if !needs_comma {
                    self.error("Property expected", ErrorCode::PropertyExpected, None, &[], &[]);
                }
                let comma_offset = self.scanner.token_offset();
                self.scan_next();
                if self.scanner.token() == TokenKind::CloseBrace {
                    if needs_comma && !self.options.allow_trailing_commas {
                        self.add_problem(
                            Range::new(comma_offset, comma_offset + 1),
                            Severity::Error,
                            ErrorCode::TrailingComma,
                            "Trailing comma",
                        );
                    }
                    continue;
                }
            } else if needs_comma {
                self.error("Expected comma", ErrorCode::CommaExpected, None, &[], &[]);
            }
            match self.parse_property(node, &mut keys_seen) {
                Some(property) => properties.push(property),
                None => {
                    self.error(
                        "Property expected",
                        ErrorCode::PropertyExpected,
                        None,
                        &[],
                        &[TokenKind::CloseBrace, TokenKind::Comma],
                    );
                }
            }
            needs_comma = true;
        }
        self.ast.node_mut(node).kind = NodeKind::Object { properties };

        if self.scanner.token() != TokenKind::CloseBrace {
            return self.error(
                "Expected comma or closing brace",
                ErrorCode::CommaOrCloseBraceExpected,
                Some(node),
                &[],
                &[],
            );
        }
        self.finalize(node, true)
    }

    fn parse_property(&mut self, parent: NodeId, keys_seen: &mut KeysSeen) -> Option<NodeId> {
        let key = match self.parse_string(None, true) {
            Some(key) => key,
            None => {
                if self.scanner.token() != TokenKind::Unknown {
                    return None;
                }
                // Recover an unquoted key from the stray token's text.
                self.error(
                    "Property keys must be doublequoted",
                    ErrorCode::Undefined,
                    None,
                    &[],
                    &[],
                );
                let key = self.new_node(
                    NodeKind::String {
                        value: self.scanner.token_value().to_string(),
                        is_key: true,
                    },
                    None,
                );
                self.finalize(key, true);
                key
            }
        };
        let key_range = self.ast[key].range;
        let node = self.ast.push(
            NodeKind::Property {
                key,
                value: None,
                colon_offset: None,
            },
            key_range,
            Some(parent),
        );
        self.ast.node_mut(key).parent = Some(node);

        let key_value = self.ast[key].as_str().unwrap_or_default().to_string();
        match keys_seen.get(&key_value).copied() {
            Some(first) => {
                self.add_problem(
                    key_range,
                    Severity::Warning,
                    ErrorCode::Undefined,
                    "Duplicate object key",
                );
                if let Some(first_range) = first {
                    self.add_problem(
                        first_range,
                        Severity::Warning,
                        ErrorCode::Undefined,
                        "Duplicate object key",
                    );
                }
                // Later occurrences of this key only flag themselves.
                keys_seen.insert(key_value, None);
            }
            None => {
                keys_seen.insert(key_value, Some(key_range));
            }
        }

        if self.scanner.token() == TokenKind::Colon {
            if let NodeKind::Property { colon_offset, .. } = &mut self.ast.node_mut(node).kind {
                *colon_offset = Some(self.scanner.token_offset());
            }
            self.scan_next();
        } else {
            self.error("Colon expected", ErrorCode::ColonExpected, None, &[], &[]);
            // A string on a later line starts the next property; close
            // this one at its key.
            if self.scanner.token() == TokenKind::String
                && has_line_break(self.text, key_range.end, self.scanner.token_offset())
            {
                self.ast.node_mut(node).range.end = key_range.end;
                return Some(node);
            }
        }

        match self.parse_value(Some(node)) {
            Some(value) => {
                let value_end = self.ast[value].range.end;
                if let NodeKind::Property { value: slot, .. } = &mut self.ast.node_mut(node).kind {
                    *slot = Some(value);
                }
                self.ast.node_mut(node).range.end = value_end;
                Some(node)
            }
            None => self.error(
                "Value expected",
                ErrorCode::ValueExpected,
                Some(node),
                &[],
                &[TokenKind::CloseBrace, TokenKind::Comma],
            ),
        }
    }
}

fn prev_char_boundary(text: &str, mut offset: usize) -> usize {
    offset = offset.saturating_sub(1);
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn char_at(text: &str, offset: usize) -> Option<char> {
    text[offset..].chars().next()
}

fn has_line_break(text: &str, start: usize, end: usize) -> bool {
    text[start..end].bytes().any(|b| b == b'\n' || b == b'\r')
}
