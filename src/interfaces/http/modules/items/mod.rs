//! Items module: catalog, search and comments

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
