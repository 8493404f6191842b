//! HTTP REST API interfaces
//!
//! - `common`: response envelope and validated JSON extractor
//! - `error`: domain error to status code table
//! - `extract`: acting-user header extractor
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table and OpenAPI document

pub mod common;
pub mod error;
pub mod extract;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};
