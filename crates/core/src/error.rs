use crate::fields::DynamicField;

#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("case schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("field {0} does not exist in the case")]
    UnknownField(String),
    #[error("field {0} is static and cannot be updated")]
    StaticField(String),
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        field: DynamicField,
        message: String,
    },

    #[error("failed to render case: {0}")]
    Render(String),
}

pub type CaseResult<T> = std::result::Result<T, CaseError>;
