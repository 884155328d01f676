pub mod log_entry;
pub mod ticket;

pub use log_entry::ApiResponse;
pub use ticket::TicketStatus;
