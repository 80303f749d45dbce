use fleet_types::VehicleId;

/// Errors from vehicle store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record carries the given identifier.
    #[error("vehicle not found: {0}")]
    VehicleNotFound(VehicleId),

    /// A filter or aggregate selected zero records.
    #[error("no vehicles match {0}")]
    NoMatch(String),

    /// The identifier chosen for an insert is already taken.
    #[error("vehicle identifier already exists: {0}")]
    Conflict(VehicleId),

    /// The identifier space is exhausted.
    #[error("no identifiers left to assign")]
    IdSpaceExhausted,

    /// A writer panicked while holding the lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error reading seed data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` for the two not-found flavors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::VehicleNotFound(_) | Self::NoMatch(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
