//! Error types for table transformations.

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Error type for table operations
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Type mismatch in row {row}, column '{column}': {message}")]
    TypeMismatch {
        row: usize,
        column: String,
        message: String,
    },

    #[error("Duplicate entry for index {index}, column {column}")]
    DuplicateEntry { index: String, column: String },

    #[error("Invalid timestamp in row {row}: '{value}'")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Record at position {position} is not a JSON object")]
    InvalidRecord { position: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TableError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        TableError::MissingColumn {
            column: column.into(),
        }
    }

    /// True for the schema-mismatch kinds (missing column or wrong cell type).
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            TableError::MissingColumn { .. } | TableError::TypeMismatch { .. }
        )
    }
}
