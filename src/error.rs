//! Ошибки конвейера подготовки данных

use thiserror::Error;

use crate::types::Attribute;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    #[error("Malformed record #{id}: field '{field}' {reason}")]
    MalformedRecord {
        id: i64,
        field: String,
        reason: String,
    },

    #[error("Formula mismatch at row {index}: '{left}' != '{right}'")]
    JoinMismatch {
        index: usize,
        left: String,
        right: String,
    },

    #[error("Datasets differ in length: {left} != {right}")]
    JoinLength { left: usize, right: usize },

    #[error("No records match filter '{filter}'")]
    EmptyFilterResult { filter: String },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Normalizer not fitted")]
    NotFitted,

    #[error("Attribute '{0}' is not numeric")]
    NonNumericAttribute(Attribute),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
