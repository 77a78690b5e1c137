//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod members;

pub use members::*;

use serde::Serialize;

/// Response type that is either a success payload or a mapped error.
pub type ApiResult<T> = Result<T, crate::errors::AppError>;

/// Confirmation body returned by delete operations.
#[derive(Debug, Serialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
