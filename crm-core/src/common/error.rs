use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrmError {
    /// Whether the error is an expected validation outcome rather than a
    /// store-level fault. Validation outcomes become `{success: false}`
    /// payloads; everything else propagates.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CrmError::InvalidInput(_) | CrmError::Conflict(_) | CrmError::NotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CrmError>;
