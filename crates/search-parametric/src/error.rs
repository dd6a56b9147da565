use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParametricError {
    /// Statistics were requested over zero values.
    #[error(
        "no values to summarize{}",
        .field.as_deref().map(|f| format!(" for field '{f}'")).unwrap_or_default()
    )]
    EmptyPopulation { field: Option<String> },

    #[error("bucket count must be at least 1")]
    InvalidBucketCount,

    #[error("invalid bucket range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    #[error("parametric backend request failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ParametricError {
    pub(crate) fn empty(field: impl Into<String>) -> Self {
        Self::EmptyPopulation {
            field: Some(field.into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParametricError>;
