use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown field type '{value}' (expected string, date, number or boolean)")]
    UnknownFieldType { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
