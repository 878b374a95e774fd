/// Convenience result type used across cardstyle.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by editing APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// A handler received a value outside the accepted set for a field.
    #[error("invalid value for {field}: \"{value}\" (expected {expected})")]
    InvalidValue {
        /// Dotted configuration path the value was destined for.
        field: String,
        /// The rejected input, verbatim.
        value: String,
        /// Human-readable description of what is accepted.
        expected: String,
    },

    /// Invalid user-provided or configuration data that is not a single field value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures reported by (or while talking to) the background-generation service.
    #[error("generation error: {0}")]
    Generation(String),

    /// The editing session was torn down and cannot accept further work.
    #[error("session closed")]
    SessionClosed,

    /// Errors raised by a persistence collaborator.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::InvalidValue`] value.
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Generation`] value.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Build a [`CardError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors produced by handler input validation.
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }
}

impl From<serde_json::Error> for CardError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
