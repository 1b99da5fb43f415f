use thiserror::Error;

/// Raised when input crossing a schema boundary is missing a field, has the
/// wrong shape, or fails type coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("field required: {field}")]
    MissingField { field: &'static str },

    #[error("{field}: expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field}: must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field}: not a valid uuid: {value:?}")]
    InvalidUuid { field: &'static str, value: String },

    #[error("{field}: uuid is not version 4: {value}")]
    WrongUuidVersion { field: &'static str, value: String },

    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("invalid route: {0}")]
    InvalidRoute(String),
}

impl ValidationError {
    /// The offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::WrongType { field, .. }
            | ValidationError::EmptyField { field }
            | ValidationError::InvalidUuid { field, .. }
            | ValidationError::WrongUuidVersion { field, .. } => Some(*field),
            ValidationError::NotAnObject
            | ValidationError::InvalidPagination(_)
            | ValidationError::InvalidRoute(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
