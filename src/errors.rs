// src/errors.rs

use thiserror::Error;

/// Faults that can stop the client from starting or loading configuration.
/// Transport-level failures have their own type in `transport`.
#[derive(Debug, Error)]
pub enum ParleyError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("transport setup failed: {0}")]
    Transport(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ParleyError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ParleyError::Config(msg.into())
    }
}

pub type ParleyResult<T> = Result<T, ParleyError>;
