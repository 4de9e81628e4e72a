//! JSON Schema (draft-07 subset) validator.
//!
//! The validator walks the schema object directly — no compilation step —
//! dispatching on node kind and schema keyword. It never fails: every
//! violated keyword contributes an independent warning, and evaluation
//! continues.
//!
//! `anyOf`/`oneOf` evaluate every branch into its own result and
//! sub-collector, then keep only the branch the
//! [`ValidationResult::compare`] ordering likes best, so that per-branch
//! messages and node→schema associations stay useful even when no branch
//! matches cleanly.

mod collector;
mod result;

pub use collector::{ApplicableSchema, MatchingSchemas};
pub use result::ValidationResult;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use url::Url;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::diagnostics::{Diagnostic, ErrorCode, Range, Severity};
use result::format_enum_values;

static COLOR_HEX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9A-Fa-f]{3,4}|([0-9A-Fa-f]{2}){3,4})$").expect("color pattern compiles")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern compiles")
});

/// Validate `node` against `schema`, accumulating diagnostics and counters
/// on `result` and node→schema associations on `collector`.
///
/// A schema reference is a boolean or an object: `true` accepts anything,
/// `false` rejects everything.
pub(crate) fn validate<'s>(
    ast: &Ast,
    node: NodeId,
    schema: &'s Value,
    result: &mut ValidationResult,
    collector: &mut MatchingSchemas<'s>,
) {
    if !collector.include(ast, node) {
        return;
    }
    if let NodeKind::Property { value, .. } = &ast[node].kind {
        if let Some(value) = *value {
            validate(ast, value, schema, result, collector);
        }
        return;
    }
    let object = match schema {
        Value::Bool(true) => {
            collector.add(node, schema);
            return;
        }
        Value::Bool(false) => {
            result.problems.push(Diagnostic::warning(
                ast[node].range,
                "Matches a schema that is not allowed.",
            ));
            collector.add(node, schema);
            return;
        }
        Value::Object(object) => object,
        // Anything else is not a schema; nothing to check.
        _ => return,
    };

    validate_common(ast, node, object, result, collector);
    match &ast[node].kind {
        NodeKind::Object { properties } => {
            validate_object_node(ast, node, properties, object, result, collector)
        }
        NodeKind::Array { items } => {
            validate_array_node(ast, node, items, object, result, collector)
        }
        NodeKind::String { value, .. } => validate_string_node(ast, node, value, object, result),
        NodeKind::Number { value, .. } => validate_number_node(ast, node, *value, object, result),
        _ => {}
    }
    if let Some(message) = object.get("deprecationMessage").and_then(Value::as_str) {
        if let Some(parent) = ast[node].parent {
            result
                .problems
                .push(Diagnostic::warning(ast[parent].range, message));
        }
    }
    collector.add(node, schema);
}

/// Kind-independent keywords: `type`, the combinators, and `enum`/`const`.
fn validate_common<'s>(
    ast: &Ast,
    node: NodeId,
    schema: &'s Map<String, Value>,
    result: &mut ValidationResult,
    collector: &mut MatchingSchemas<'s>,
) {
    let range = ast[node].range;

    match schema.get("type") {
        Some(Value::String(expected)) => {
            if !matches_type(&ast[node].kind, expected) {
                result.problems.push(Diagnostic::warning(
                    range,
                    format!("Incorrect type. Expected \"{expected}\"."),
                ));
            }
        }
        Some(Value::Array(expected)) => {
            let names: Vec<&str> = expected.iter().filter_map(Value::as_str).collect();
            if !names.iter().any(|name| matches_type(&ast[node].kind, name)) {
                result.problems.push(Diagnostic::warning(
                    range,
                    format!("Incorrect type. Expected one of {}.", names.join(", ")),
                ));
            }
        }
        _ => {}
    }

    if let Some(all_of) = schema.get("allOf").and_then(Value::as_array) {
        for sub_schema in all_of {
            validate(ast, node, sub_schema, result, collector);
        }
    }

    if let Some(not_schema) = schema.get("not") {
        let mut sub_result = ValidationResult::new();
        let mut sub_collector = collector.new_sub();
        validate(ast, node, not_schema, &mut sub_result, &mut sub_collector);
        if !sub_result.has_problems() {
            result.problems.push(Diagnostic::warning(
                range,
                "Matches a schema that is not allowed.",
            ));
        }
        collector.merge_inverted(sub_collector);
    }

    if let Some(any_of) = schema.get("anyOf").and_then(Value::as_array) {
        validate_alternatives(ast, node, any_of, false, result, collector);
    }
    if let Some(one_of) = schema.get("oneOf").and_then(Value::as_array) {
        validate_alternatives(ast, node, one_of, true, result, collector);
    }

    if let Some(enum_values) = schema.get("enum").and_then(Value::as_array) {
        let value = ast.value(node);
        let matched = enum_values.iter().any(|accepted| json_equals(&value, accepted));
        result.enum_value_match = matched;
        result.enum_values = Some(enum_values.to_vec());
        if !matched {
            result.problems.push(Diagnostic {
                range,
                severity: Severity::Warning,
                code: Some(ErrorCode::EnumValueMismatch),
                message: format!(
                    "Value is not accepted. Valid values: {}.",
                    format_enum_values(enum_values)
                ),
            });
        }
    }

    if let Some(const_value) = schema.get("const") {
        let value = ast.value(node);
        if json_equals(&value, const_value) {
            result.enum_value_match = true;
        } else {
            result.enum_value_match = false;
            result.problems.push(Diagnostic {
                range,
                severity: Severity::Warning,
                code: Some(ErrorCode::EnumValueMismatch),
                message: format!(
                    "Value must be {}.",
                    serde_json::to_string(const_value).unwrap_or_default()
                ),
            });
        }
        result.enum_values = Some(vec![const_value.clone()]);
    }
}

/// Evaluate every alternative into its own result and sub-collector, keep
/// the best one, and fold it into the parent. With `max_one_match`
/// (`oneOf`), more than one clean branch is itself a violation; without it
/// (`anyOf`), equally clean branches have their collectors unioned so
/// editor features see all applicable schemas.
fn validate_alternatives<'s>(
    ast: &Ast,
    node: NodeId,
    alternatives: &'s [Value],
    max_one_match: bool,
    result: &mut ValidationResult,
    collector: &mut MatchingSchemas<'s>,
) {
    let mut clean_matches = 0usize;
    let mut best: Option<(ValidationResult, MatchingSchemas<'s>)> = None;

    for sub_schema in alternatives {
        let mut sub_result = ValidationResult::new();
        let mut sub_collector = collector.new_sub();
        validate(ast, node, sub_schema, &mut sub_result, &mut sub_collector);
        if !sub_result.has_problems() {
            clean_matches += 1;
        }
        best = Some(match best {
            None => (sub_result, sub_collector),
            Some((mut best_result, mut best_collector)) => {
                if !max_one_match && !sub_result.has_problems() && !best_result.has_problems() {
                    // Equally clean alternatives: union their schemas and
                    // add up their match counts.
                    best_collector.merge(sub_collector);
                    best_result.properties_matches += sub_result.properties_matches;
                    best_result.properties_value_matches += sub_result.properties_value_matches;
                    (best_result, best_collector)
                } else {
                    match sub_result.compare(&best_result) {
                        Ordering::Greater => (sub_result, sub_collector),
                        Ordering::Equal => {
                            best_collector.merge(sub_collector);
                            best_result.merge_enum_values(&sub_result);
                            (best_result, best_collector)
                        }
                        Ordering::Less => (best_result, best_collector),
                    }
                }
            }
        });
    }

    if clean_matches > 1 && max_one_match {
        tracing::debug!(branches = alternatives.len(), "oneOf matched more than one branch");
        let start = ast[node].range.start;
        result.problems.push(Diagnostic::warning(
            Range::new(start, start + 1),
            "Matches multiple schemas when only one must validate.",
        ));
    }
    if let Some((best_result, best_collector)) = best {
        result.properties_matches += best_result.properties_matches;
        result.properties_value_matches += best_result.properties_value_matches;
        result.merge(best_result);
        collector.merge(best_collector);
    }
}

/// `"integer"` is a virtual subtype of `"number"`, decided by the literal
/// shape the parser recorded.
fn matches_type(kind: &NodeKind, expected: &str) -> bool {
    match expected {
        "null" => matches!(kind, NodeKind::Null),
        "boolean" => matches!(kind, NodeKind::Boolean(_)),
        "number" => matches!(kind, NodeKind::Number { .. }),
        "integer" => matches!(kind, NodeKind::Number { is_integer: true, .. }),
        "string" => matches!(kind, NodeKind::String { .. }),
        "array" => matches!(kind, NodeKind::Array { .. }),
        "object" => matches!(kind, NodeKind::Object { .. }),
        _ => false,
    }
}

fn validate_object_node<'s>(
    ast: &Ast,
    node: NodeId,
    properties: &[NodeId],
    schema: &'s Map<String, Value>,
    result: &mut ValidationResult,
    collector: &mut MatchingSchemas<'s>,
) {
    // One walk over the properties: who is present (and their value
    // node), and which names no keyword has processed yet.
    let mut seen_keys: HashMap<&str, Option<NodeId>> = HashMap::new();
    let mut unprocessed: Vec<&str> = Vec::new();
    for &property in properties {
        if let NodeKind::Property { key, value, .. } = &ast[property].kind {
            let key = ast[*key].as_str().unwrap_or_default();
            seen_keys.insert(key, *value);
            unprocessed.push(key);
        }
    }

    // A missing property is pinned to the enclosing property's key when
    // this object is itself a property value, else to the opening brace.
    let missing_location = match ast[node].parent {
        Some(parent) if ast[parent].is_property() => key_range(ast, parent),
        _ => Range::new(ast[node].range.start, ast[node].range.start + 1),
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !seen_keys.get(name).is_some_and(Option::is_some) {
                result.problems.push(Diagnostic::warning(
                    missing_location,
                    format!("Missing property \"{name}\"."),
                ));
            }
        }
    }

    if let Some(property_schemas) = schema.get("properties").and_then(Value::as_object) {
        for (name, property_schema) in property_schemas {
            unprocessed.retain(|candidate| *candidate != name.as_str());
            let Some(&Some(child)) = seen_keys.get(name.as_str()) else {
                continue;
            };
            validate_property_value(ast, child, name, property_schema, result, collector);
        }
    }

    if let Some(patterns) = schema.get("patternProperties").and_then(Value::as_object) {
        for (pattern, property_schema) in patterns {
            let regex = match Regex::new(pattern) {
                Ok(regex) => regex,
                Err(error) => {
                    tracing::warn!(%pattern, %error, "ignoring patternProperties entry that does not compile");
                    continue;
                }
            };
            // Iterate a snapshot: explicit `properties` entries and other
            // patterns must not double-count.
            for name in unprocessed.clone() {
                if regex.is_match(name) {
                    unprocessed.retain(|candidate| *candidate != name);
                    if let Some(&Some(child)) = seen_keys.get(name) {
                        validate_property_value(ast, child, name, property_schema, result, collector);
                    }
                }
            }
        }
    }

    match schema.get("additionalProperties") {
        Some(Value::Bool(false)) => {
            for name in &unprocessed {
                if let Some(&Some(child)) = seen_keys.get(name) {
                    result.problems.push(Diagnostic::warning(
                        property_key_range(ast, child),
                        format!("Property {name} is not allowed."),
                    ));
                }
            }
        }
        Some(additional @ Value::Object(_)) => {
            for name in &unprocessed {
                if let Some(&Some(child)) = seen_keys.get(name) {
                    let mut property_result = ValidationResult::new();
                    validate(ast, child, additional, &mut property_result, collector);
                    result.merge_property_match(property_result);
                }
            }
        }
        // Absent or `true`: extra properties are permitted.
        _ => {}
    }

    if let Some(max) = schema.get("maxProperties").and_then(Value::as_u64) {
        if properties.len() as u64 > max {
            result.problems.push(Diagnostic::warning(
                ast[node].range,
                format!("Object has more properties than limit of {max}."),
            ));
        }
    }
    if let Some(min) = schema.get("minProperties").and_then(Value::as_u64) {
        if (properties.len() as u64) < min {
            result.problems.push(Diagnostic::warning(
                ast[node].range,
                format!("Object has fewer properties than the required number of {min}."),
            ));
        }
    }

    if let Some(dependencies) = schema.get("dependencies").and_then(Value::as_object) {
        for (name, dependency) in dependencies {
            if !seen_keys.get(name.as_str()).is_some_and(Option::is_some) {
                continue;
            }
            match dependency {
                Value::Array(required) => {
                    for required_name in required.iter().filter_map(Value::as_str) {
                        if seen_keys.get(required_name).is_some_and(Option::is_some) {
                            result.properties_value_matches += 1;
                        } else {
                            result.problems.push(Diagnostic::warning(
                                missing_location,
                                format!(
                                    "Object is missing property {required_name} required by property {name}."
                                ),
                            ));
                        }
                    }
                }
                dependency @ (Value::Object(_) | Value::Bool(_)) => {
                    // A schema dependency re-validates the whole object.
                    let mut dependency_result = ValidationResult::new();
                    validate(ast, node, dependency, &mut dependency_result, collector);
                    result.merge_property_match(dependency_result);
                }
                _ => {}
            }
        }
    }

    if let Some(property_names) = schema.get("propertyNames") {
        for &property in properties {
            if let NodeKind::Property { key, .. } = &ast[property].kind {
                validate(ast, *key, property_names, result, &mut MatchingSchemas::noop());
            }
        }
    }
}

/// Validate one present property's value. A `false` schema flags the key
/// itself as not allowed; anything else validates the value and folds the
/// outcome into the object's counters.
fn validate_property_value<'s>(
    ast: &Ast,
    child: NodeId,
    name: &str,
    property_schema: &'s Value,
    result: &mut ValidationResult,
    collector: &mut MatchingSchemas<'s>,
) {
    match property_schema {
        Value::Bool(false) => {
            result.problems.push(Diagnostic::warning(
                property_key_range(ast, child),
                format!("Property {name} is not allowed."),
            ));
        }
        Value::Bool(true) => {
            result.properties_matches += 1;
            result.properties_value_matches += 1;
        }
        _ => {
            let mut property_result = ValidationResult::new();
            validate(ast, child, property_schema, &mut property_result, collector);
            result.merge_property_match(property_result);
        }
    }
}

/// The key range of the property that owns this value node.
fn property_key_range(ast: &Ast, value: NodeId) -> Range {
    match ast[value].parent {
        Some(parent) if ast[parent].is_property() => key_range(ast, parent),
        _ => ast[value].range,
    }
}

fn key_range(ast: &Ast, property: NodeId) -> Range {
    match &ast[property].kind {
        NodeKind::Property { key, .. } => ast[*key].range,
        _ => ast[property].range,
    }
}

fn validate_array_node<'s>(
    ast: &Ast,
    node: NodeId,
    items: &[NodeId],
    schema: &'s Map<String, Value>,
    result: &mut ValidationResult,
    collector: &mut MatchingSchemas<'s>,
) {
    let range = ast[node].range;

    match schema.get("items") {
        Some(Value::Array(tuple_schemas)) => {
            for (item, item_schema) in items.iter().zip(tuple_schemas) {
                let mut item_result = ValidationResult::new();
                validate(ast, *item, item_schema, &mut item_result, collector);
                result.merge_property_match(item_result);
            }
            if items.len() > tuple_schemas.len() {
                match schema.get("additionalItems") {
                    Some(additional @ Value::Object(_)) => {
                        for item in &items[tuple_schemas.len()..] {
                            let mut item_result = ValidationResult::new();
                            validate(ast, *item, additional, &mut item_result, collector);
                            result.merge_property_match(item_result);
                        }
                    }
                    Some(Value::Bool(false)) => {
                        result.problems.push(Diagnostic::warning(
                            range,
                            format!(
                                "Array has too many items according to schema. Expected {} or fewer.",
                                tuple_schemas.len()
                            ),
                        ));
                    }
                    _ => {}
                }
            }
        }
        Some(item_schema @ (Value::Object(_) | Value::Bool(_))) => {
            for item in items {
                let mut item_result = ValidationResult::new();
                validate(ast, *item, item_schema, &mut item_result, collector);
                result.merge_property_match(item_result);
            }
        }
        _ => {}
    }

    if let Some(contains_schema) = schema.get("contains") {
        // Probe items with a silent collector so hover associations are
        // not polluted by speculative matches.
        let found = items.iter().any(|item| {
            let mut probe = ValidationResult::new();
            validate(ast, *item, contains_schema, &mut probe, &mut MatchingSchemas::noop());
            !probe.has_problems()
        });
        if !found {
            result.problems.push(Diagnostic::warning(
                range,
                "Array does not contain required item.",
            ));
        }
    }

    if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
        if (items.len() as u64) < min {
            result.problems.push(Diagnostic::warning(
                range,
                format!("Array has too few items. Expected {min} or more."),
            ));
        }
    }
    if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
        if items.len() as u64 > max {
            result.problems.push(Diagnostic::warning(
                range,
                format!("Array has too many items. Expected {max} or fewer."),
            ));
        }
    }

    if schema.get("uniqueItems") == Some(&Value::Bool(true)) {
        let values: Vec<Value> = items.iter().map(|&item| ast.value(item)).collect();
        let has_duplicates = values
            .iter()
            .enumerate()
            .any(|(i, a)| values[i + 1..].iter().any(|b| json_equals(a, b)));
        if has_duplicates {
            result
                .problems
                .push(Diagnostic::warning(range, "Array has duplicate items."));
        }
    }
}

fn validate_string_node(
    ast: &Ast,
    node: NodeId,
    value: &str,
    schema: &Map<String, Value>,
    result: &mut ValidationResult,
) {
    let range = ast[node].range;
    let length = value.chars().count() as u64;

    if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
        if length < min {
            result.problems.push(Diagnostic::warning(
                range,
                format!("String is shorter than the minimum length of {min}."),
            ));
        }
    }
    if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
        if length > max {
            result.problems.push(Diagnostic::warning(
                range,
                format!("String is longer than the maximum length of {max}."),
            ));
        }
    }

    if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
        match Regex::new(pattern) {
            Ok(regex) => {
                if !regex.is_match(value) {
                    let message = override_message(schema).map_or_else(
                        || format!("String does not match the pattern of \"{pattern}\"."),
                        str::to_string,
                    );
                    result.problems.push(Diagnostic::warning(range, message));
                }
            }
            Err(error) => {
                tracing::warn!(%pattern, %error, "ignoring pattern that does not compile");
            }
        }
    }

    if let Some(format) = schema.get("format").and_then(Value::as_str) {
        let failure = match format {
            "uri" | "uri-reference" => check_uri(value, format == "uri"),
            "email" => (!EMAIL_PATTERN.is_match(value))
                .then_some("String is not an e-mail address.".to_string()),
            "color-hex" => (!COLOR_HEX_PATTERN.is_match(value)).then_some(
                "Invalid color format. Use #RGB, #RGBA, #RRGGBB or #RRGGBBAA.".to_string(),
            ),
            // Unrecognized formats are annotations, not assertions.
            _ => None,
        };
        if let Some(default_message) = failure {
            let message = override_message(schema)
                .map_or(default_message, str::to_string);
            result.problems.push(Diagnostic::warning(range, message));
        }
    }
}

/// `patternErrorMessage` (or `errorMessage`) overrides the default text of
/// pattern and format failures.
fn override_message(schema: &Map<String, Value>) -> Option<&str> {
    schema
        .get("patternErrorMessage")
        .or_else(|| schema.get("errorMessage"))
        .and_then(Value::as_str)
}

/// `uri` requires a parseable URI with a scheme; `uri-reference` also
/// accepts schemeless references. Empty strings always fail.
fn check_uri(value: &str, require_scheme: bool) -> Option<String> {
    let failure = if value.is_empty() {
        Some("URI expected.")
    } else {
        match Url::parse(value) {
            Ok(_) => None,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                require_scheme.then_some("URI with a scheme is expected.")
            }
            Err(_) => Some("URI is expected."),
        }
    };
    failure.map(|reason| format!("String is not a URI: {reason}"))
}

fn validate_number_node(
    ast: &Ast,
    node: NodeId,
    value: f64,
    schema: &Map<String, Value>,
    result: &mut ValidationResult,
) {
    let range = ast[node].range;

    if let Some(multiple) = schema.get("multipleOf").and_then(Value::as_f64) {
        // Double-precision modulo; fractional divisors are best-effort.
        if value % multiple != 0.0 {
            result.problems.push(Diagnostic::warning(
                range,
                format!("Value is not divisible by {}.", format_number(multiple)),
            ));
        }
    }

    let minimum = schema.get("minimum").and_then(Value::as_f64);
    let maximum = schema.get("maximum").and_then(Value::as_f64);
    let exclusive_minimum = schema.get("exclusiveMinimum");
    let exclusive_maximum = schema.get("exclusiveMaximum");

    if let Some(limit) = exclusive_limit(minimum, exclusive_minimum) {
        if value <= limit {
            result.problems.push(Diagnostic::warning(
                range,
                format!(
                    "Value is below the exclusive minimum of {}.",
                    format_number(limit)
                ),
            ));
        }
    }
    if let Some(limit) = exclusive_limit(maximum, exclusive_maximum) {
        if value >= limit {
            result.problems.push(Diagnostic::warning(
                range,
                format!(
                    "Value is above the exclusive maximum of {}.",
                    format_number(limit)
                ),
            ));
        }
    }
    if let Some(limit) = inclusive_limit(minimum, exclusive_minimum) {
        if value < limit {
            result.problems.push(Diagnostic::warning(
                range,
                format!("Value is below the minimum of {}.", format_number(limit)),
            ));
        }
    }
    if let Some(limit) = inclusive_limit(maximum, exclusive_maximum) {
        if value > limit {
            result.problems.push(Diagnostic::warning(
                range,
                format!("Value is above the maximum of {}.", format_number(limit)),
            ));
        }
    }
}

/// Resolve the exclusive bound: a numeric `exclusiveMinimum`/`Maximum`
/// (draft-06+) stands alone; a boolean `true` (draft-04) makes the paired
/// `minimum`/`maximum` exclusive.
fn exclusive_limit(limit: Option<f64>, exclusive: Option<&Value>) -> Option<f64> {
    match exclusive {
        Some(value) if value.is_number() => value.as_f64(),
        Some(Value::Bool(true)) => limit,
        _ => None,
    }
}

/// The non-exclusive bound check is suppressed when a draft-04 boolean
/// turned the bound exclusive.
fn inclusive_limit(limit: Option<f64>, exclusive: Option<&Value>) -> Option<f64> {
    match exclusive {
        Some(Value::Bool(true)) => None,
        _ => limit,
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Structural equality for `enum`/`const`: numbers compare by value,
/// objects by key set, arrays pairwise.
pub(crate) fn json_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equals(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_equals(x, y)))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_equals_numbers_by_value() {
        assert!(json_equals(&json!(1), &json!(1.0)));
        assert!(json_equals(&json!(-2.5), &json!(-2.5)));
        assert!(!json_equals(&json!(1), &json!(2)));
        assert!(!json_equals(&json!(1), &json!("1")));
    }

    #[test]
    fn test_json_equals_structures() {
        assert!(json_equals(
            &json!({"a": [1, {"b": null}]}),
            &json!({"a": [1, {"b": null}]})
        ));
        assert!(!json_equals(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!json_equals(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn test_exclusive_limit_resolution() {
        // Draft-06 numeric form stands alone.
        assert_eq!(exclusive_limit(None, Some(&json!(3))), Some(3.0));
        // Draft-04 boolean form borrows the paired bound and suppresses it.
        assert_eq!(exclusive_limit(Some(1.0), Some(&json!(true))), Some(1.0));
        assert_eq!(inclusive_limit(Some(1.0), Some(&json!(true))), None);
        assert_eq!(inclusive_limit(Some(1.0), Some(&json!(false))), Some(1.0));
        assert_eq!(inclusive_limit(Some(1.0), None), Some(1.0));
        assert_eq!(exclusive_limit(Some(1.0), Some(&json!(false))), None);
    }

    #[test]
    fn test_color_and_email_patterns() {
        assert!(COLOR_HEX_PATTERN.is_match("#0fA"));
        assert!(COLOR_HEX_PATTERN.is_match("#00ff0080"));
        assert!(!COLOR_HEX_PATTERN.is_match("00ff00"));
        assert!(!COLOR_HEX_PATTERN.is_match("#00ff0"));

        assert!(EMAIL_PATTERN.is_match("user@example.com"));
        assert!(EMAIL_PATTERN.is_match("first.last@sub.domain.org"));
        assert!(EMAIL_PATTERN.is_match("\"quoted local\"@example.com"));
        assert!(EMAIL_PATTERN.is_match("user@[192.168.0.1]"));
        assert!(!EMAIL_PATTERN.is_match("2020-01-01"));
        assert!(!EMAIL_PATTERN.is_match("user@"));
    }

    #[test]
    fn test_check_uri() {
        assert_eq!(check_uri("https://example.com/a?b#c", true), None);
        assert_eq!(check_uri("mailto:user@example.com", true), None);
        assert_eq!(
            check_uri("", true),
            Some("String is not a URI: URI expected.".to_string())
        );
        assert!(check_uri("", false).is_some());
        assert_eq!(
            check_uri("relative/path", true),
            Some("String is not a URI: URI with a scheme is expected.".to_string())
        );
        assert_eq!(check_uri("relative/path", false), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-10.0), "-10");
        assert_eq!(format_number(2.5), "2.5");
    }
}
