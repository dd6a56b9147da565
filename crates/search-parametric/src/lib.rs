#![deny(unsafe_code)]

//! Faceted value summaries for search fields.
//!
//! - [`bucket`] / [`assign_counts`]: equal-width range buckets
//! - [`compute_details`]: min, max, average and sum over numeric values
//! - [`ParametricValuesService`]: registry-driven requests to a
//!   [`ParametricBackend`], flat or as a dependent value tree

pub mod buckets;
pub mod details;
pub mod error;
pub mod service;

pub use crate::buckets::{assign_counts, bucket, bucket_values};
pub use crate::details::{compute_details, compute_weighted_details};
pub use crate::error::{ParametricError, Result};
pub use crate::service::{
    BucketingParams, DependentTagValue, ParametricBackend, ParametricRequest,
    ParametricValuesService, TagValueResponse,
};
