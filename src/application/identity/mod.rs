//! Identity module: user directory
//!
//! `UserService` registers, lists, updates and removes users.

pub mod service;

pub use service::UserService;
