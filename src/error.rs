//! Error taxonomy for store operations

use thiserror::Error;

/// Failure modes surfaced to the view layer.
///
/// `Validation` is raised before any gateway call; the remaining variants
/// come back from the gateway. Every failure is scoped to the operation
/// that raised it - stores keep their prior state on rejection.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("permission denied: {0}")]
    Permission(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("insufficient stock: {0}")]
    Stock(String),

    #[error("gateway error: {0}")]
    Remote(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
