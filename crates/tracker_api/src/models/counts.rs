use crate::models::IssueTicket;
use serde::Serialize;
use std::collections::HashMap;

/// Grouping label used when a ticket has no assignee.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Aggregate ticket counts grouped by status, assignee and priority.
/// Recomputed per call by a single pass; never maintained incrementally.
#[derive(Debug, Default, Serialize, Clone)]
pub struct TicketCountSummary {
    pub total: usize,
    pub by_status: HashMap<String, u64>,
    pub by_assignee: HashMap<String, u64>,
    pub by_priority: HashMap<String, u64>,
}

impl TicketCountSummary {
    pub fn from_tickets(tickets: &[IssueTicket]) -> Self {
        let mut summary = TicketCountSummary {
            total: tickets.len(),
            ..Default::default()
        };
        for ticket in tickets {
            *summary.by_status.entry(ticket.status.clone()).or_insert(0) += 1;
            let assignee = ticket
                .assignee
                .clone()
                .unwrap_or_else(|| UNASSIGNED_LABEL.to_string());
            *summary.by_assignee.entry(assignee).or_insert(0) += 1;
            *summary
                .by_priority
                .entry(ticket.priority.clone())
                .or_insert(0) += 1;
        }
        summary
    }
}
