//! Error types for record normalization.

use thiserror::Error;

/// Failures that prevent a record or response from being normalized at all.
///
/// Field-level problems never show up here; they are absorbed by the
/// normalizer and only leave the affected attribute unset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The record lacks an identity attribute, so the document would be
    /// unaddressable.
    #[error("record is missing required attribute '{attribute}'")]
    MissingIdentity { attribute: &'static str },

    /// A record node was not an object.
    #[error("record is not an object (found {found})")]
    NotAnObject { found: &'static str },

    /// The response envelope does not have the expected shape.
    #[error("malformed query response: {reason}")]
    MalformedResponse { reason: String },
}

/// Why a single raw value could not be coerced to its declared type.
/// Only ever logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueParseError {
    #[error("'{raw}' is not a number")]
    Number { raw: String },

    #[error("'{raw}' is not a boolean")]
    Boolean { raw: String },

    #[error("no parseable date among {count} value(s)")]
    Date { count: usize },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
