//! Errors raised around the balance core.
//!
//! The balance computation itself never fails. These cover the viewer
//! token check, configuration loading and server start-up.
use config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Missing authorization header")]
    MissingAuthorization,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("\"{0}\" is not authorized")]
    Unauthorized(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ResultSplit<T> = Result<T, SplitError>;
