//! Diagnostic types shared by the parser and the validator.
//!
//! Diagnostics are plain data, never `Err`s: parsing and validation always
//! run to completion and hand back everything they found.

use serde::{Deserialize, Serialize};

/// A half-open byte range into the source text. `end` is one past the last
/// byte of the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` falls inside the range. `include_end` switches the
    /// right-hand comparison from strict to inclusive.
    pub fn contains(&self, offset: usize, include_end: bool) -> bool {
        (offset >= self.start && offset < self.end) || (include_end && offset == self.end)
    }
}

/// How a diagnostic should be surfaced by the host UI.
///
/// Syntax errors are [`Severity::Error`]; every schema violation is
/// [`Severity::Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Ignore,
}

/// Stable, machine-readable diagnostic codes.
///
/// The numeric values form a **stable API contract**: the high byte
/// separates lexical (`0x1xx`) from syntactic (`0x2xx`) errors. Schema
/// diagnostics carry no code, except enum/const mismatches which use
/// [`ErrorCode::EnumValueMismatch`] so editors can offer the accepted
/// values as quick fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum ErrorCode {
    Undefined = 0,
    EnumValueMismatch = 1,
    UnexpectedEndOfComment = 0x101,
    UnexpectedEndOfString = 0x102,
    UnexpectedEndOfNumber = 0x103,
    InvalidUnicode = 0x104,
    InvalidEscapeCharacter = 0x105,
    InvalidCharacter = 0x106,
    PropertyExpected = 0x201,
    CommaExpected = 0x202,
    ColonExpected = 0x203,
    ValueExpected = 0x204,
    CommaOrCloseBracketExpected = 0x205,
    CommaOrCloseBraceExpected = 0x206,
    TrailingComma = 0x207,
}

impl ErrorCode {
    /// The stable numeric value of this code.
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// A single parser or validator finding, anchored to a source range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(range: Range, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            range,
            severity: Severity::Error,
            code: Some(code),
            message: message.into(),
        }
    }

    pub fn warning(range: Range, message: impl Into<String>) -> Self {
        Self {
            range,
            severity: Severity::Warning,
            code: None,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains() {
        let range = Range::new(2, 5);
        assert!(!range.contains(1, false));
        assert!(range.contains(2, false));
        assert!(range.contains(4, false));
        assert!(!range.contains(5, false));
        assert!(range.contains(5, true));
        assert!(!range.contains(6, true));
    }

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Undefined.code(), 0);
        assert_eq!(ErrorCode::EnumValueMismatch.code(), 1);
        assert_eq!(ErrorCode::InvalidUnicode.code(), 0x104);
        assert_eq!(ErrorCode::PropertyExpected.code(), 0x201);
        assert_eq!(ErrorCode::TrailingComma.code(), 0x207);
    }

    #[test]
    fn test_diagnostic_serialization() {
        let diag = Diagnostic::error(Range::new(3, 4), ErrorCode::ValueExpected, "Value expected.");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], serde_json::json!("error"));
        assert_eq!(json["code"], serde_json::json!("value_expected"));
        assert_eq!(json["range"]["start"], serde_json::json!(3));

        // Schema diagnostics carry no code and must serialize without one.
        let warn = Diagnostic::warning(Range::new(0, 1), "Incorrect type.");
        let json = serde_json::to_value(&warn).unwrap();
        assert!(json.get("code").is_none());
    }
}
