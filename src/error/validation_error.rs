//! Payload validation and decode errors.

use thiserror::Error;

/// Structural validation and decode failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A `build` payload did not fit the draft type, typically because
    /// it carried a field the draft does not declare.
    #[error("draft validation failed: {message}")]
    Draft {
        /// Serde's description of the offending field.
        message: String,
    },

    /// A success response body could not be decoded as JSON, or the
    /// decoded value did not fit the declared result shape.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ValidationError {
    /// Wraps a draft decode failure, preserving serde's message.
    pub(crate) fn draft(err: serde_json::Error) -> Self {
        Self::Draft {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_message() {
        let serde_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = ValidationError::draft(serde_err);
        assert!(err.to_string().starts_with("draft validation failed:"));
    }
}
