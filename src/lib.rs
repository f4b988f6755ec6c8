//! Cross-system ticket correlation engine.
//!
//! Correlates helpdesk tickets with the issue-tracker tickets referenced in
//! their text: acquires a helpdesk batch through ordered fallback tiers,
//! resolves each ticket's first reference with per-item failure isolation,
//! and returns a merged list sorted newest first. Pull-based and stateless
//! between calls; nothing is persisted.

pub mod config;
pub mod correlation;
pub mod extract;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use correlation::{CorrelatedItem, CorrelationEngine, EngineError, IssueInfo};
pub use extract::extract_references;
pub use service::{
    correlated_tickets, correlated_tickets_from_env, correlated_tickets_with_lookup, ServiceReply,
    SessionGate,
};
