use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Value type of a configured field. Each variant selects exactly one parser
/// in the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FieldType {
    String,
    Date,
    Number,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Date => "date",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ModelError;

    /// Accepts the configuration spellings in any case, plus the backend's
    /// numeric alias `numeric`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(FieldType::String),
            "date" => Ok(FieldType::Date),
            "number" | "numeric" => Ok(FieldType::Number),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            _ => Err(ModelError::UnknownFieldType {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A backend-independent attribute and the raw names it may appear under.
///
/// Alias matching is case-sensitive and exact. Aliases keep their configured
/// order; the normalizer visits them in that order, so the last present alias
/// wins when several are populated on the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalField {
    pub id: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub aliases: Vec<String>,
    pub advanced: bool,
    /// Eligible for faceting (parametric value requests).
    pub parametric: bool,
}

impl CanonicalField {
    /// A field whose only alias is its id.
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            aliases: vec![id.clone()],
            id,
            field_type,
            advanced: false,
            parametric: false,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Replace the alias list. Duplicates are dropped, first occurrence kept;
    /// an empty list falls back to the id.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for alias in aliases {
            let alias = alias.into();
            if !alias.is_empty() && !unique.contains(&alias) {
                unique.push(alias);
            }
        }
        if unique.is_empty() {
            unique.push(self.id.clone());
        }
        self.aliases = unique;
        self
    }

    pub fn with_advanced(mut self, advanced: bool) -> Self {
        self.advanced = advanced;
        self
    }

    pub fn with_parametric(mut self, parametric: bool) -> Self {
        self.parametric = parametric;
        self
    }

    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|alias| alias == name)
    }
}
