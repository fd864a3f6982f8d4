use super::error_code::{self, UpstatErrorCode};

/// A version or version constraint string could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintError {
    #[error("Invalid version '{0}'")]
    InvalidVersion(String),

    #[error("Invalid constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },
}

impl UpstatErrorCode for ConstraintError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidVersion(_) => error_code::INVALID_VERSION,
            Self::InvalidConstraint { .. } => error_code::INVALID_CONSTRAINT,
        }
    }
}
