//! Database entities module

pub mod comment;
pub mod item;
pub mod reservation;
pub mod user;

pub use comment::Entity as Comment;
pub use item::Entity as Item;
pub use reservation::Entity as Reservation;
pub use user::Entity as User;
