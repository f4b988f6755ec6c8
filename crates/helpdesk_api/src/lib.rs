//! Typed helpdesk ticketing API client crate used by the correlation backend.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::{ApiResponse, HelpdeskClient};
pub use config::HelpdeskConfig;
pub use error::{HelpdeskError, Result};
pub use models::{HelpdeskTicket, Note, ScalarValue, TicketField, TicketSearchResults};
