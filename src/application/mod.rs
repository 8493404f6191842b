pub mod catalog;
pub mod identity;
pub mod reservation;

// Re-export key types for convenience
pub use catalog::{CreateItem, ItemService};
pub use identity::UserService;
pub use reservation::{CreateReservation, ReservationQueryService, ReservationService};
