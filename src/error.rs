use thiserror::Error;

/// Errors returned by the clustering and heatmap routines in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: &'static str) -> Self {
        Self::InvalidParameter { name, message }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
