use thiserror::Error;

/// Error type for gamepad backend operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to initialize the platform backend.
    #[error("Backend init failed: {0}")]
    BackendInit(String),
    /// A generic backend error while polling.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Convenient result alias for gamepad operations.
pub type Result<T> = std::result::Result<T, Error>;
