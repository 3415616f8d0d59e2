//! Error types for sdfide

use thiserror::Error;

/// Result type alias using sdfide's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the pure field algebra
///
/// Field operators never fail; bad geometry shows up as NaN distances.
/// These errors come from the sampling layer and demo lookup.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Demo name not recognised
    #[error("Unknown demo: {0}")]
    UnknownDemo(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
