#![deny(unsafe_code)]

//! Canonical field registry.
//!
//! Maps the raw, deployment-specific field names a backend reports to stable
//! canonical fields with a declared value type. The registry is immutable once
//! built; [`SharedRegistry`] publishes replacements atomically.

pub mod config;
pub mod error;
pub mod registry;
pub mod shared;

pub use crate::config::{FieldConfiguration, FieldEntry, load_registry};
pub use crate::error::FieldsError;
pub use crate::registry::{FieldCategory, FieldTypeRegistry};
pub use crate::shared::SharedRegistry;
