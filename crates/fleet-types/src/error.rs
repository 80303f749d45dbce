use thiserror::Error;

/// Errors produced by type construction and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid range for {field}: {reason}")]
    InvalidRange { field: &'static str, reason: String },

    #[error("invalid vehicle id: {0}")]
    InvalidId(String),
}

impl TypeError {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn range(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject NaN, infinities, and negative values.
pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<(), TypeError> {
    if !value.is_finite() {
        return Err(TypeError::field(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(TypeError::field(field, format!("must be non-negative, got {value}")));
    }
    Ok(())
}

pub(crate) fn check_not_blank(field: &'static str, value: &str) -> Result<(), TypeError> {
    if value.trim().is_empty() {
        return Err(TypeError::field(field, "must not be empty"));
    }
    Ok(())
}
