use thiserror::Error;

/// Error type shared by every frame operation
#[derive(Error, Debug)]
pub enum Error {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("duplicate index label: {0}")]
    DuplicateIndex(String),

    #[error("row count mismatch: expected {expected}, found {found}")]
    RowLengthMismatch { expected: usize, found: usize },

    #[error("column count mismatch: expected {expected}, found {found}")]
    ColumnLengthMismatch { expected: usize, found: usize },

    #[error("unsupported operation '{operation}' on {target}")]
    UnsupportedOperation { operation: String, target: String },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("position out of bounds: position {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("cannot cast {value} to {dtype}")]
    InvalidCast { value: String, dtype: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("TOML error")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Shorthand for an unsupported operation on a column or request
    pub(crate) fn unsupported(operation: impl Into<String>, target: impl Into<String>) -> Self {
        Error::UnsupportedOperation {
            operation: operation.into(),
            target: target.into(),
        }
    }
}

pub type FrameError = Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
