//! Comment aggregate
//!
//! Feedback left on an item by users who have finished a reservation of it.

pub mod model;
pub mod repository;

pub use model::{Comment, NewComment};
pub use repository::CommentRepository;
