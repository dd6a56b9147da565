use serde::{Deserialize, Serialize};

use crate::Timestamp;
use crate::field::{CanonicalField, FieldType};

/// A single parsed scalar from a raw backend field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    String(String),
    Date(Timestamp),
    Number(f64),
    Boolean(bool),
}

impl TypedValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            TypedValue::String(_) => FieldType::String,
            TypedValue::Date(_) => FieldType::Date,
            TypedValue::Number(_) => FieldType::Number,
            TypedValue::Boolean(_) => FieldType::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TypedValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<Timestamp> {
        match self {
            TypedValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

/// Values extracted for one canonical field on one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub id: String,
    /// The raw alias these values were read from.
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub advanced: bool,
    pub values: Vec<TypedValue>,
}

impl FieldValue {
    pub fn new(field: &CanonicalField, name: impl Into<String>, values: Vec<TypedValue>) -> Self {
        Self {
            id: field.id.clone(),
            name: name.into(),
            field_type: field.field_type,
            advanced: field.advanced,
            values,
        }
    }

    /// Last-write-wins merge: a later occurrence replaces the values and
    /// records the alias it came from.
    pub fn replace(&mut self, name: impl Into<String>, values: Vec<TypedValue>) {
        self.name = name.into();
        self.values = values;
    }

    pub fn first(&self) -> Option<&TypedValue> {
        self.values.first()
    }
}
