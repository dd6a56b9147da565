//! Loosely-typed raw backend record.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::NormalizeError;

/// Field name to zero or more raw string scalars.
///
/// JSON backends send each field as a string, a number, or an array of
/// those; field/value backends send repeated `(name, value)` pairs. Both
/// collapse into the same shape here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, Vec<String>>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object node. Scalars become single-element lists,
    /// arrays keep their scalar elements in order, `null` and nested objects
    /// are treated as absent.
    pub fn from_json(node: &Value) -> Result<Self, NormalizeError> {
        let Value::Object(map) = node else {
            return Err(NormalizeError::NotAnObject {
                found: json_kind(node),
            });
        };
        let mut record = Self::new();
        for (name, value) in map {
            let scalars: Vec<String> = match value {
                Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
                other => scalar_to_string(other).into_iter().collect(),
            };
            if scalars.is_empty() {
                if value.is_object() {
                    tracing::trace!(field = %name, "Ignoring nested object in raw record");
                }
                continue;
            }
            record.fields.insert(name.clone(), scalars);
        }
        Ok(record)
    }

    /// Build from ordered `(name, value)` pairs; repeated names accumulate.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.push(name, value);
        }
        record
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// All raw values for `name`; empty when absent.
    pub fn values(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.values(name).is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
