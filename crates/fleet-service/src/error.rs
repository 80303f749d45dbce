use fleet_store::StoreError;
use fleet_types::TypeError;
use thiserror::Error;

/// Domain-level failure of a service call.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request is malformed or violates a field invariant.
    #[error("{0}")]
    Validation(String),

    /// The identifier does not exist, or a query selected nothing.
    #[error("{0}")]
    NotFound(String),

    /// The identifier is already taken.
    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TypeError> for ServiceError {
    fn from(err: TypeError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VehicleNotFound(_) | StoreError::NoMatch(_) => {
                Self::NotFound(err.to_string())
            }
            StoreError::Conflict(_) | StoreError::IdSpaceExhausted => {
                Self::Conflict(err.to_string())
            }
            StoreError::Serialization(_) => Self::Validation(err.to_string()),
            StoreError::LockPoisoned(_) | StoreError::Io(_) => Self::Internal(err.to_string()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
