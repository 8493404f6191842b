//! User aggregate
//!
//! The user directory consulted by the reservation core.

pub mod model;
pub mod repository;

pub use model::{NewUser, User, UserPatch};
pub use repository::UserRepository;
