mod counts;
mod issue;

pub use counts::{TicketCountSummary, UNASSIGNED_LABEL};
pub use issue::IssueTicket;
pub(crate) use issue::{RawIssue, SearchResponse};
