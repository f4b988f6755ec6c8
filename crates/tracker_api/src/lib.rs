//! Typed issue-tracker API client crate used by the correlation backend.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::TrackerClient;
pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use models::{IssueTicket, TicketCountSummary, UNASSIGNED_LABEL};
