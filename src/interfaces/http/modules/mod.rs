pub mod bookings;
pub mod health;
pub mod items;
pub mod metrics;
pub mod request_id;
pub mod users;
