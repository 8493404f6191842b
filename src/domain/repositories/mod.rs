//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::comment::CommentRepository;
use super::item::ItemRepository;
use super::reservation::ReservationRepository;
use super::user::UserRepository;

pub use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let item = repos.items().find_by_id(7).await?;
///     let history = repos.reservations().find_by_item_ordered(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn items(&self) -> &dyn ItemRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn comments(&self) -> &dyn CommentRepository;
}
