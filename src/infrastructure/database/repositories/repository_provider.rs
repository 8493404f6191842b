//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::comment::CommentRepository;
use crate::domain::item::ItemRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::user::UserRepository;

use super::comment_repository::SeaOrmCommentRepository;
use super::item_repository::SeaOrmItemRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let item = repos.items().find_by_id(7).await?;
/// let history = repos.reservations().find_by_item_ordered(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    items: SeaOrmItemRepository,
    reservations: SeaOrmReservationRepository,
    comments: SeaOrmCommentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            items: SeaOrmItemRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            comments: SeaOrmCommentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn items(&self) -> &dyn ItemRepository {
        &self.items
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn comments(&self) -> &dyn CommentRepository {
        &self.comments
    }
}
