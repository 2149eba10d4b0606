/// Convenience result type used across trailfx.
pub type TrailResult<T> = Result<T, TrailError>;

/// Top-level error taxonomy used by the crate's boundary APIs.
///
/// Rendering itself never fails: out-of-bounds samples are skipped and cancellation is reported
/// through [`RenderOutcome`](crate::RenderOutcome). Errors only come from validating inputs.
#[derive(thiserror::Error, Debug)]
pub enum TrailError {
    /// Invalid user-provided configuration, surfaces or regions.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal failures while preparing or scheduling a render.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Failures while decoding or encoding images.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrailError {
    /// Build a [`TrailError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrailError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`TrailError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
