/// Convenience result type used across the stretch engine.
pub type StretchResult<T> = Result<T, StretchError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum StretchError {
    /// Invalid call parameters: buffer shapes, dimensions, strides.
    #[error("validation error: {0}")]
    Validation(String),

    /// Inconsistent internal state detected while rendering.
    #[error("render error: {0}")]
    Render(String),

    /// A row worker failed; the whole frame is discarded.
    #[error("worker {index} failed: {reason}")]
    Worker {
        /// Index of the failing row band.
        index: usize,
        /// What the worker reported.
        reason: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StretchError {
    /// Build a [`StretchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StretchError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StretchError::Worker`] value.
    pub fn worker(index: usize, reason: impl Into<String>) -> Self {
        Self::Worker {
            index,
            reason: reason.into(),
        }
    }
}

/// Integer status reported back to a plugin host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    /// The command completed.
    Success = 0,
    /// Internal failure (worker fault, inconsistent state).
    InternalStructDamaged = 512,
    /// The host handed over unusable buffers or parameters.
    BadCallbackParam = 516,
}

impl Status {
    /// Numeric code as the host expects it.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Status for the outcome of any engine call.
    pub fn of<T>(result: &StretchResult<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(e) => Self::from(e),
        }
    }
}

impl From<&StretchError> for Status {
    fn from(err: &StretchError) -> Self {
        match err {
            StretchError::Validation(_) => Self::BadCallbackParam,
            StretchError::Render(_) | StretchError::Worker { .. } | StretchError::Other(_) => {
                Self::InternalStructDamaged
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
