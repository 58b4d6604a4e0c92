//! Declarative request validation
//!
//! Each route declares an ordered slice of [`Rule`]s. A rule names a field,
//! where it comes from (path or body), and a chain of [`Step`]s that either
//! sanitize the value or check it. [`validate`] runs every rule and collects
//! all failures; it never returns early.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Message used when a rule does not carry its own
pub const DEFAULT_MESSAGE: &str = "Invalid value";

/// Trim, require non-empty, then HTML-escape
pub const REQUIRED_TEXT: &[Step] = &[Step::Trim, Step::NotEmpty, Step::Escape];

/// Where a field is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Path segment, e.g. `/company/{COMPANY_ID}`
    Params,
    /// Top-level key of the JSON body
    Body,
}

/// One link of a rule's chain, applied in declared order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Trim,
    NotEmpty,
    Escape,
}

/// Validation rule for a single field
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub location: Location,
    pub steps: &'static [Step],
    pub message: &'static str,
}

impl Rule {
    pub const fn param(field: &'static str, steps: &'static [Step]) -> Self {
        Self {
            field,
            location: Location::Params,
            steps,
            message: DEFAULT_MESSAGE,
        }
    }

    pub const fn body(field: &'static str, steps: &'static [Step]) -> Self {
        Self {
            field,
            location: Location::Body,
            steps,
            message: DEFAULT_MESSAGE,
        }
    }

    pub const fn with_message(self, message: &'static str) -> Self {
        Self { message, ..self }
    }

    /// Run the chain. `Ok(None)` means the field was absent and nothing
    /// required it.
    fn apply(&self, input: &RequestInput) -> Result<Option<String>, FieldError> {
        let raw = input.lookup(self.location, self.field);
        if matches!(raw, Some(JsonValue::Array(_) | JsonValue::Object(_))) {
            return Err(self.error(raw));
        }

        let mut current = raw.as_ref().and_then(scalar_text);
        for step in self.steps {
            match step {
                Step::Trim => current = current.map(|v| v.trim().to_string()),
                Step::NotEmpty => {
                    if current.as_deref().map_or(true, str::is_empty) {
                        return Err(self.error(raw));
                    }
                }
                Step::Escape => current = current.map(|v| escape(&v)),
            }
        }
        Ok(current)
    }

    fn error(&self, value: Option<JsonValue>) -> FieldError {
        FieldError {
            kind: "field",
            value,
            msg: self.message,
            path: self.field,
            location: self.location,
        }
    }
}

/// Raw request data the validator reads from
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub params: HashMap<String, String>,
    pub body: JsonValue,
}

impl RequestInput {
    pub fn new(params: HashMap<String, String>, body: JsonValue) -> Self {
        Self { params, body }
    }

    fn lookup(&self, location: Location, field: &str) -> Option<JsonValue> {
        match location {
            Location::Params => self.params.get(field).cloned().map(JsonValue::String),
            Location::Body => self.body.get(field).filter(|v| !v.is_null()).cloned(),
        }
    }
}

/// A single failed rule, serialized as part of the 400 response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
    pub msg: &'static str,
    pub path: &'static str,
    pub location: Location,
}

/// Outcome of running a rule list
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
    /// Sanitized values keyed by field, in rule order
    pub values: IndexMap<&'static str, String>,
}

impl ValidationResult {
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// All-or-nothing view: sanitized values, or every field error.
    pub fn into_result(self) -> Result<IndexMap<&'static str, String>, Vec<FieldError>> {
        if self.ok() {
            Ok(self.values)
        } else {
            Err(self.errors)
        }
    }
}

/// Apply `rules` to `input`, collecting every violation.
pub fn validate(rules: &[Rule], input: &RequestInput) -> ValidationResult {
    let mut result = ValidationResult::default();
    for rule in rules {
        match rule.apply(input) {
            Ok(Some(value)) => {
                result.values.insert(rule.field, value);
            }
            Ok(None) => {}
            Err(err) => result.errors.push(err),
        }
    }
    result
}

/// Replace HTML-significant characters with entities.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

// Numbers and booleans are accepted as their textual form.
fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
