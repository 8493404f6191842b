use async_trait::async_trait;

use super::{NewUser, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; fails with `EmailAlreadyExists` when the email is taken.
    ///
    /// The uniqueness check and the insert are one atomic step.
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// All users, ascending by id
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Overwrite name and email of an existing user.
    ///
    /// Fails with `UserNotFound` if absent, `EmailAlreadyExists` if the new
    /// email belongs to another user.
    async fn update(&self, user: User) -> DomainResult<User>;

    /// Remove a user together with their items, reservations and comments.
    ///
    /// Returns `false` when no such user existed.
    async fn delete(&self, id: i64) -> DomainResult<bool>;
}
