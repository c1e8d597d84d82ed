//! Request body validation for dog records.
//!
//! Bodies are checked against a declarative [`Schema`] that maps each accepted
//! field to the kind of value it must hold. Every problem found in a body is
//! collected, so a client sees all of them in a single response.
//!
//! Checks run in a fixed order:
//! 1. Unknown keys, in the order they appear in the body
//! 2. Schema fields, in schema order (`name`, `breed`, `description`, `age`)

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::models::{DogChanges, NewDog};

/// Kind of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON string
    Text,
    /// A JSON number holding a whole value that fits in `i32`
    Integer,
}

impl FieldKind {
    /// Noun phrase used in type mismatch messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Integer => "a number",
        }
    }
}

/// Declarative rule for one body field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Whether absent fields are an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every schema field must be present (POST)
    Create,
    /// Only present fields are checked (PATCH)
    Update,
}

/// A single problem found in a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// Key is not part of the schema
    UnknownKey(String),
    /// Field is missing or holds the wrong JSON type
    WrongType {
        field: &'static str,
        expected: FieldKind,
    },
    /// Numeric field is fractional or out of range. Integer fields are
    /// stored in `INTEGER` columns, so only whole `i32` values are accepted.
    NotAnInteger { field: &'static str },
    /// Body is valid JSON but not an object
    NotAnObject,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::UnknownKey(key) => write!(f, "'{}' is not a valid key", key),
            FieldIssue::WrongType { field, expected } => {
                write!(f, "{} should be {}", field, expected.as_str())
            }
            FieldIssue::NotAnInteger { field } => write!(f, "{} should be an integer", field),
            FieldIssue::NotAnObject => f.write_str("request body should be a JSON object"),
        }
    }
}

/// All problems found in one request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Human-readable messages, one per issue.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A field value that passed its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i32),
}

/// Values extracted from a body that passed validation.
#[derive(Debug, Default)]
pub struct ParsedFields {
    values: HashMap<&'static str, FieldValue>,
}

impl ParsedFields {
    pub fn take_text(&mut self, field: &str) -> Option<String> {
        match self.values.remove(field) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn take_integer(&mut self, field: &str) -> Option<i32> {
        match self.values.remove(field) {
            Some(FieldValue::Integer(value)) => Some(value),
            _ => None,
        }
    }
}

/// A set of field rules describing an accepted request body.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldRule],
}

/// Fields accepted when creating or updating a dog.
pub const DOG_SCHEMA: Schema = Schema::new(&[
    FieldRule::new("name", FieldKind::Text),
    FieldRule::new("breed", FieldKind::Text),
    FieldRule::new("description", FieldKind::Text),
    FieldRule::new("age", FieldKind::Integer),
]);

impl Schema {
    pub const fn new(fields: &'static [FieldRule]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [FieldRule] {
        self.fields
    }

    fn accepts(&self, key: &str) -> bool {
        self.fields.iter().any(|rule| rule.name == key)
    }

    /// Check `body` against the schema and extract the accepted values.
    pub fn parse(
        &self,
        body: &Map<String, Value>,
        mode: ValidationMode,
    ) -> Result<ParsedFields, ValidationErrors> {
        let mut issues: Vec<FieldIssue> = body
            .keys()
            .filter(|key| !self.accepts(key))
            .map(|key| FieldIssue::UnknownKey(key.clone()))
            .collect();

        let mut parsed = ParsedFields::default();
        for rule in self.fields {
            let value = match body.get(rule.name) {
                Some(value) => value,
                None if mode == ValidationMode::Update => continue,
                None => {
                    issues.push(FieldIssue::WrongType {
                        field: rule.name,
                        expected: rule.kind,
                    });
                    continue;
                }
            };

            match check_value(rule, value) {
                Ok(field_value) => {
                    parsed.values.insert(rule.name, field_value);
                }
                Err(issue) => issues.push(issue),
            }
        }

        if issues.is_empty() {
            Ok(parsed)
        } else {
            Err(ValidationErrors::new(issues))
        }
    }
}

fn check_value(rule: &FieldRule, value: &Value) -> Result<FieldValue, FieldIssue> {
    let wrong_type = || FieldIssue::WrongType {
        field: rule.name,
        expected: rule.kind,
    };

    match rule.kind {
        FieldKind::Text => value
            .as_str()
            .map(|text| FieldValue::Text(text.to_string()))
            .ok_or_else(wrong_type),
        FieldKind::Integer => {
            if !value.is_number() {
                return Err(wrong_type());
            }
            as_i32(value)
                .map(FieldValue::Integer)
                .ok_or(FieldIssue::NotAnInteger { field: rule.name })
        }
    }
}

/// Whole JSON numbers that fit in `i32`; `3.0` is accepted as `3`.
fn as_i32(value: &Value) -> Option<i32> {
    if let Some(int) = value.as_i64() {
        return i32::try_from(int).ok();
    }
    let float = value.as_f64()?;
    if float.is_finite()
        && float.fract() == 0.0
        && float >= f64::from(i32::MIN)
        && float <= f64::from(i32::MAX)
    {
        Some(float as i32)
    } else {
        None
    }
}

/// Validate a POST body. All four fields are required.
pub fn validate_new_dog(body: &Map<String, Value>) -> Result<NewDog, ValidationErrors> {
    let mut fields = DOG_SCHEMA.parse(body, ValidationMode::Create)?;
    Ok(NewDog {
        name: fields.take_text("name").unwrap_or_default(),
        breed: fields.take_text("breed").unwrap_or_default(),
        description: fields.take_text("description").unwrap_or_default(),
        age: fields.take_integer("age").unwrap_or_default(),
    })
}

/// Validate a PATCH body. Any subset of the fields may be present.
pub fn validate_dog_changes(body: &Map<String, Value>) -> Result<DogChanges, ValidationErrors> {
    let mut fields = DOG_SCHEMA.parse(body, ValidationMode::Update)?;
    Ok(DogChanges {
        name: fields.take_text("name"),
        breed: fields.take_text("breed"),
        description: fields.take_text("description"),
        age: fields.take_integer("age"),
    })
}
