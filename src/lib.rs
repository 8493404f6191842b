//! # ShareIt reservation service
//!
//! Peer-to-peer item rental: users list items, others reserve time windows
//! on them, and owners approve or reject each request.
//!
//! ## Architecture
//!
//! - **domain**: entities, temporal rules (window validation, last/next
//!   classification, state tags) and repository traits
//! - **application**: use cases (reservation lifecycle, participant queries,
//!   item catalog, user directory)
//! - **infrastructure**: SeaORM and in-memory storage
//! - **interfaces**: REST API
//! - **shared**: errors, pagination, clock, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
