use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("{message}")]
    UnexpectedArrayLength { message: String },
    #[error("{message}")]
    UnexpectedValue { message: String },
    #[error("{message}")]
    UnexpectedValueType { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    UnexpectedArrayLength,
    UnexpectedValue,
    UnexpectedValueType,
}

impl ResolveError {
    pub fn unexpected_array_length(message: impl Into<String>) -> Self {
        ResolveError::UnexpectedArrayLength {
            message: message.into(),
        }
    }

    /// Length mismatch with the canonical message
    /// `expected array length {expected}, but found {actual}`.
    pub fn array_length(expected: usize, actual: usize) -> Self {
        Self::unexpected_array_length(format!(
            "expected array length {expected}, but found {actual}"
        ))
    }

    pub fn unexpected_value(message: impl Into<String>) -> Self {
        ResolveError::UnexpectedValue {
            message: message.into(),
        }
    }

    pub fn unexpected_value_type(message: impl Into<String>) -> Self {
        ResolveError::UnexpectedValueType {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            ResolveError::UnexpectedArrayLength { .. } => ResolveErrorKind::UnexpectedArrayLength,
            ResolveError::UnexpectedValue { .. } => ResolveErrorKind::UnexpectedValue,
            ResolveError::UnexpectedValueType { .. } => ResolveErrorKind::UnexpectedValueType,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ResolveError::UnexpectedArrayLength { message }
            | ResolveError::UnexpectedValue { message }
            | ResolveError::UnexpectedValueType { message } => message,
        }
    }

    /// Records the failure at the point it is raised, leaving the message untouched.
    pub(crate) fn raised(self, place: &str) -> Self {
        log::debug!("{place}: resolve failed ({:?}): {}", self.kind(), self.message());
        self
    }
}
