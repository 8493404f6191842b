//! Reservation aggregate
//!
//! Contains the Reservation entity, the temporal rules applied to it
//! (window validation, last/next classification, state tags) and the
//! repository interface.

pub mod availability;
pub mod model;
pub mod repository;
pub mod state;
pub mod validation;

pub use availability::{classify, ItemAvailability};
pub use model::{
    NewReservation, Reservation, ReservationStatus, ReservationSummary, LEGACY_CANCELED_STATUS,
};
pub use repository::ReservationRepository;
pub use state::{ReservationFilter, ReservationState};
pub use validation::validate_window;
