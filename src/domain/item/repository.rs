use async_trait::async_trait;

use super::{Item, NewItem};
use crate::domain::DomainResult;
use crate::shared::PageRequest;

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, item: NewItem) -> DomainResult<Item>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>>;

    /// Overwrite name, description and availability of an existing item
    async fn update(&self, item: Item) -> DomainResult<Item>;

    /// Remove an item together with its reservations and comments.
    ///
    /// Returns `false` when no such item existed.
    async fn delete(&self, id: i64) -> DomainResult<bool>;

    /// Items of one owner, ascending by id
    async fn find_by_owner(
        &self,
        owner_id: i64,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Item>>;

    /// Available items whose name or description contains `text`
    /// (case-insensitive), ascending by id
    async fn search_available(
        &self,
        text: &str,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Item>>;
}
