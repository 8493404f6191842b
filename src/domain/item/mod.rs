//! Item aggregate
//!
//! The item catalog: listed items, their owner and availability flag.

pub mod model;
pub mod repository;

pub use model::{Item, ItemPatch, ItemView, NewItem};
pub use repository::ItemRepository;
