#![deny(unsafe_code)]

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use search_model::{CanonicalField, FieldType};

use crate::error::FieldsError;

/// Subset of configured fields requested from the faceting backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    /// Every field flagged as parametric.
    Parametric,
    /// Parametric fields holding numbers.
    Numeric,
    /// Parametric fields holding dates.
    Date,
    /// Parametric fields holding booleans.
    Boolean,
}

impl FieldCategory {
    pub fn matches(&self, field: &CanonicalField) -> bool {
        if !field.parametric {
            return false;
        }
        match self {
            FieldCategory::Parametric => true,
            FieldCategory::Numeric => field.field_type == FieldType::Number,
            FieldCategory::Date => field.field_type == FieldType::Date,
            FieldCategory::Boolean => field.field_type == FieldType::Boolean,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::Parametric => "parametric",
            FieldCategory::Numeric => "numeric",
            FieldCategory::Date => "date",
            FieldCategory::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parametric" => Ok(FieldCategory::Parametric),
            "numeric" | "number" => Ok(FieldCategory::Numeric),
            "date" => Ok(FieldCategory::Date),
            "boolean" | "bool" => Ok(FieldCategory::Boolean),
            other => Err(format!("unknown field category: {other}")),
        }
    }
}

/// Read-only index of canonical fields by id and by raw alias.
///
/// Built once from configuration and never patched; a configuration refresh
/// builds a new registry and swaps it in through
/// [`SharedRegistry`](crate::SharedRegistry).
#[derive(Debug, Clone, Default)]
pub struct FieldTypeRegistry {
    /// Sorted by id.
    fields: Vec<CanonicalField>,
    by_id: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl FieldTypeRegistry {
    pub fn new<I>(fields: I) -> Result<Self, FieldsError>
    where
        I: IntoIterator<Item = CanonicalField>,
    {
        let mut fields: Vec<CanonicalField> = fields.into_iter().collect();
        fields.sort_by(|a, b| a.id.cmp(&b.id));

        let mut by_id = HashMap::with_capacity(fields.len());
        let mut by_alias = HashMap::new();

        for (position, field) in fields.iter().enumerate() {
            if field.id.trim().is_empty() {
                return Err(FieldsError::EmptyId);
            }
            if by_id.insert(field.id.clone(), position).is_some() {
                return Err(FieldsError::DuplicateId {
                    id: field.id.clone(),
                });
            }
            for alias in &field.aliases {
                if let Some(existing) = by_alias.insert(alias.clone(), position) {
                    if existing != position {
                        return Err(FieldsError::DuplicateAlias {
                            alias: alias.clone(),
                            first: fields[existing].id.clone(),
                            second: field.id.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            fields,
            by_id,
            by_alias,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Canonical field for a raw backend field name (exact, case-sensitive).
    pub fn resolve(&self, raw_name: &str) -> Option<&CanonicalField> {
        self.by_alias
            .get(raw_name)
            .map(|&position| &self.fields[position])
    }

    pub fn get(&self, id: &str) -> Option<&CanonicalField> {
        self.by_id.get(id).map(|&position| &self.fields[position])
    }

    /// Fields in id order.
    pub fn fields(&self) -> impl Iterator<Item = &CanonicalField> {
        self.fields.iter()
    }

    pub fn fields_in(&self, category: FieldCategory) -> impl Iterator<Item = &CanonicalField> {
        self.fields
            .iter()
            .filter(move |field| category.matches(field))
    }

    /// Raw backend names of every field in `category`, fields in id order,
    /// aliases in configured order.
    pub fn backend_names(&self, category: FieldCategory) -> Vec<String> {
        self.fields_in(category)
            .flat_map(|field| field.aliases.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
