pub mod comment;
pub mod item;
pub mod repositories;
pub mod reservation;
pub mod user;

// Re-export commonly used types
pub use comment::{Comment, CommentRepository, NewComment};
pub use item::{Item, ItemPatch, ItemRepository, ItemView, NewItem};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{
    classify, validate_window, ItemAvailability, NewReservation, Reservation, ReservationFilter,
    ReservationRepository, ReservationState, ReservationStatus, ReservationSummary,
};
pub use user::{NewUser, User, UserPatch, UserRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{DomainError, ErrorKind};
