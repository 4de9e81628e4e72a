//! Per-subtree validation accumulator and the best-match ordering.

use std::cmp::Ordering;

use serde_json::Value;

use crate::diagnostics::{Diagnostic, ErrorCode};

/// Accumulates the outcome of validating one subtree against one schema.
///
/// Besides diagnostics, the counters feed the [`compare`](Self::compare)
/// ordering that picks the intended branch of an `anyOf`/`oneOf` when no
/// branch validates cleanly.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub problems: Vec<Diagnostic>,
    /// Object properties that were evaluated against a schema.
    pub properties_matches: usize,
    /// Properties whose value validated without problems (or matched a
    /// nested enum/const exactly).
    pub properties_value_matches: usize,
    /// Properties whose value matched a schema with a singleton
    /// enum/const: the branch "claimed" the object via its discriminator.
    pub primary_value_matches: usize,
    /// Whether the subject satisfied an `enum`/`const`.
    pub enum_value_match: bool,
    /// The accepted values when an enum/const was active, kept so sibling
    /// branches can merge their accepted sets into one message.
    pub enum_values: Option<Vec<Value>>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Fold another result's diagnostics into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.problems.extend(other.problems);
    }

    /// Concatenate the accepted enum sets of two rejecting branches and
    /// rewrite this result's mismatch messages to list the union.
    pub fn merge_enum_values(&mut self, other: &ValidationResult) {
        if self.enum_value_match || other.enum_value_match {
            return;
        }
        let (Some(values), Some(other_values)) = (&mut self.enum_values, &other.enum_values)
        else {
            return;
        };
        values.extend(other_values.iter().cloned());
        let listed = format_enum_values(values);
        for problem in &mut self.problems {
            if problem.code == Some(ErrorCode::EnumValueMismatch) {
                problem.message = format!("Value is not accepted. Valid values: {listed}.");
            }
        }
    }

    /// Fold the result of validating one property value (or one array
    /// item) into this object's counters.
    pub fn merge_property_match(&mut self, property: ValidationResult) {
        let primary = property.enum_value_match
            && property.enum_values.as_ref().is_some_and(|v| v.len() == 1);
        if property.enum_value_match || !property.has_problems() {
            self.properties_value_matches += 1;
        }
        if primary {
            self.primary_value_matches += 1;
        }
        self.properties_matches += 1;
        self.merge(property);
    }

    /// Lexicographic quality ordering used to pick the best `anyOf`/`oneOf`
    /// branch: clean beats dirty, then enum match, then discriminator
    /// matches, then validated property values, then attempted properties.
    /// `Greater` means `self` is the better match.
    pub fn compare(&self, other: &ValidationResult) -> Ordering {
        if self.has_problems() != other.has_problems() {
            return if self.has_problems() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        if self.enum_value_match != other.enum_value_match {
            return if self.enum_value_match {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        if self.primary_value_matches != other.primary_value_matches {
            return self.primary_value_matches.cmp(&other.primary_value_matches);
        }
        if self.properties_value_matches != other.properties_value_matches {
            return self
                .properties_value_matches
                .cmp(&other.properties_value_matches);
        }
        self.properties_matches.cmp(&other.properties_matches)
    }
}

/// Render accepted enum values for a mismatch message.
pub(crate) fn format_enum_values(values: &[Value]) -> String {
    values
        .iter()
        .map(|value| serde_json::to_string(value).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Range, Severity};
    use serde_json::json;

    fn dirty() -> ValidationResult {
        ValidationResult {
            problems: vec![Diagnostic {
                range: Range::new(0, 1),
                severity: Severity::Warning,
                code: None,
                message: "problem".into(),
            }],
            ..ValidationResult::default()
        }
    }

    #[test]
    fn test_clean_beats_dirty() {
        let clean = ValidationResult::new();
        assert_eq!(clean.compare(&dirty()), Ordering::Greater);
        assert_eq!(dirty().compare(&clean), Ordering::Less);
    }

    #[test]
    fn test_enum_match_breaks_tie() {
        let mut with_enum = dirty();
        with_enum.enum_value_match = true;
        assert_eq!(with_enum.compare(&dirty()), Ordering::Greater);
    }

    #[test]
    fn test_primary_beats_value_matches() {
        let mut discriminated = ValidationResult::new();
        discriminated.primary_value_matches = 1;
        let mut broad = ValidationResult::new();
        broad.properties_value_matches = 5;
        assert_eq!(discriminated.compare(&broad), Ordering::Greater);
    }

    #[test]
    fn test_property_counters() {
        let mut parent = ValidationResult::new();

        // A clean result counts as attempted and validated.
        parent.merge_property_match(ValidationResult::new());
        assert_eq!(parent.properties_matches, 1);
        assert_eq!(parent.properties_value_matches, 1);

        // A dirty result counts as attempted only.
        parent.merge_property_match(dirty());
        assert_eq!(parent.properties_matches, 2);
        assert_eq!(parent.properties_value_matches, 1);

        // A singleton-enum match bumps all three counters.
        let mut primary = ValidationResult::new();
        primary.enum_value_match = true;
        primary.enum_values = Some(vec![json!("A")]);
        parent.merge_property_match(primary);
        assert_eq!(parent.properties_matches, 3);
        assert_eq!(parent.properties_value_matches, 2);
        assert_eq!(parent.primary_value_matches, 1);
    }

    #[test]
    fn test_merge_enum_values_rewrites_messages() {
        let mut left = ValidationResult {
            problems: vec![Diagnostic {
                range: Range::new(0, 1),
                severity: Severity::Warning,
                code: Some(ErrorCode::EnumValueMismatch),
                message: "Value is not accepted. Valid values: \"a\".".into(),
            }],
            enum_values: Some(vec![json!("a")]),
            ..ValidationResult::default()
        };
        let right = ValidationResult {
            enum_values: Some(vec![json!("b"), json!(2)]),
            ..ValidationResult::default()
        };
        left.merge_enum_values(&right);
        assert_eq!(
            left.problems[0].message,
            "Value is not accepted. Valid values: \"a\", \"b\", 2."
        );
    }
}
