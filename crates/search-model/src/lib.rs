//! Canonical model shared by the normalization and faceting crates.
//!
//! Everything here is a plain value: no parsing, no I/O. The types are
//! `Send + Sync` and serialize with `serde` for presentation layers.

pub mod document;
pub mod error;
pub mod field;
pub mod namespace;
pub mod parametric;
pub mod value;

/// Point in time used for every date attribute.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

pub use document::{Document, DocumentBuilder, PromotionCategory};
pub use error::{ModelError, Result};
pub use field::{CanonicalField, FieldType};
pub use namespace::{Namespace, PUBLIC_INDEXES_DOMAIN};
pub use parametric::{
    DependentFieldValues, FieldRanges, FieldTagValues, RangeBucket, TagValue, ValueDetails,
};
pub use value::{FieldValue, TypedValue};
