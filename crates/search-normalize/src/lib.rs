#![deny(unsafe_code)]

//! Normalization of raw search backend records.
//!
//! Turns loosely-typed records into canonical [`search_model::Document`]s:
//! fixed attributes by name, configured fields through a
//! [`search_fields::FieldTypeRegistry`] snapshot, and the owning domain
//! through [`DomainResolver`]. Field-level problems degrade the document
//! instead of failing it.

pub mod datetime;
pub mod domain;
pub mod error;
pub mod normalizer;
pub mod numeric;
pub mod record;
pub mod response;
pub mod value;

pub use crate::datetime::{parse_date, parse_epoch_seconds, parse_iso8601};
pub use crate::domain::{DEFAULT_PUBLIC_INDEXES, DomainResolver, resolve_domain};
pub use crate::error::{NormalizeError, Result, ValueParseError};
pub use crate::normalizer::{ResultNormalizer, normalize_record};
pub use crate::numeric::{parse_boolean, parse_number};
pub use crate::record::RawRecord;
pub use crate::response::{
    NormalizeContext, NormalizedBatch, RejectedRecord, SearchResults, normalize_query_results,
    normalize_records,
};
pub use crate::value::{parse_value, parse_values};
