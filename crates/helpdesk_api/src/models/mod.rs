mod field;
mod note;
mod ticket;

pub use field::TicketField;
pub use note::Note;
pub use ticket::{HelpdeskTicket, ScalarValue, TicketSearchResults};
