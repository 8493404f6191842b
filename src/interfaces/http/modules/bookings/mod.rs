//! Bookings module: reservation lifecycle and participant listings

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
