use async_trait::async_trait;

use super::{Comment, NewComment};
use crate::domain::DomainResult;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> DomainResult<Comment>;

    /// Comments on an item, oldest first
    async fn find_by_item(&self, item_id: i64) -> DomainResult<Vec<Comment>>;
}
