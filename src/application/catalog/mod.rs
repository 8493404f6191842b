//! Item catalog: item CRUD, search, comments and owner views
//! annotated with last/next reservations.

pub mod service;

pub use service::{CreateItem, ItemService};
