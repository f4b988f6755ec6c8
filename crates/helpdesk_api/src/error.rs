//! Error model for helpdesk client construction.
//!
//! Ordinary request failures are not errors in this crate: every operation
//! returns an [`ApiResponse`](crate::client::ApiResponse) that carries the
//! upstream status and message as data. Only building the client itself can
//! fail.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HelpdeskError>;

#[derive(Debug, Error)]
pub enum HelpdeskError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
}
