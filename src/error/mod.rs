//! Error handling for the preparation pipeline.

/// Specialized error type for dataset preparation
#[derive(Debug, thiserror::Error)]
pub enum CohortPrepError {
    /// The store returned no patient documents
    #[error("no patient records found in the store")]
    EmptyDataset,

    /// A required field could not be coerced to its numeric type
    #[error("type conversion error: {0}")]
    TypeConversion(String),

    /// The observed labels cannot support a stratified split
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Error from the MongoDB driver, propagated unchanged
    #[error(transparent)]
    Storage(#[from] mongodb::error::Error),
}

/// Result type for dataset preparation operations
pub type Result<T> = std::result::Result<T, CohortPrepError>;
