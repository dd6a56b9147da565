//! Field configuration file model.
//!
//! The configuration is keyed by canonical id:
//!
//! ```toml
//! [fields.author]
//! display_name = "Author"
//! type = "string"
//! names = ["author", "DREAUTHOR"]
//! parametric = true
//! ```
//!
//! The same shape is accepted as JSON.

#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use search_model::{CanonicalField, FieldType};

use crate::error::FieldsError;
use crate::registry::FieldTypeRegistry;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfiguration {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub advanced: bool,
    #[serde(default)]
    pub parametric: bool,
}

impl FieldConfiguration {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, FieldsError> {
        toml::from_str(text).map_err(|source| FieldsError::Toml {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, FieldsError> {
        serde_json::from_str(text).map_err(|source| FieldsError::Json {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a `.toml` or `.json` configuration file.
    pub fn load(path: &Path) -> Result<Self, FieldsError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str, &Path) -> Result<Self, FieldsError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(FieldsError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        let text = std::fs::read_to_string(path).map_err(|e| FieldsError::io(path, e))?;
        let config = parse(&text, path)?;
        tracing::debug!(
            path = %path.display(),
            fields = config.fields.len(),
            "Parsed field configuration"
        );
        Ok(config)
    }

    pub fn canonical_fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        self.fields.iter().map(|(id, entry)| {
            let mut field = CanonicalField::new(id.clone(), entry.field_type)
                .with_aliases(entry.names.iter().cloned())
                .with_advanced(entry.advanced)
                .with_parametric(entry.parametric);
            if let Some(display_name) = &entry.display_name {
                field = field.with_display_name(display_name.clone());
            }
            field
        })
    }

    pub fn into_registry(self) -> Result<FieldTypeRegistry, FieldsError> {
        FieldTypeRegistry::new(self.canonical_fields())
    }
}

/// Load a configuration file and build its registry.
pub fn load_registry(path: &Path) -> Result<FieldTypeRegistry, FieldsError> {
    let registry = FieldConfiguration::load(path)?.into_registry()?;
    tracing::info!(path = %path.display(), fields = registry.len(), "Loaded field registry");
    Ok(registry)
}
