//! SeaORM implementation of CommentRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::comment::{Comment, CommentRepository, NewComment};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::comment;

pub struct SeaOrmCommentRepository {
    db: DatabaseConnection,
}

impl SeaOrmCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: comment::Model) -> Comment {
    Comment {
        id: m.id,
        item_id: m.item_id,
        author_id: m.author_id,
        author_name: m.author_name,
        text: m.text,
        created: m.created_at,
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn create(&self, new: NewComment) -> DomainResult<Comment> {
        let model = comment::ActiveModel {
            id: NotSet,
            item_id: Set(new.item_id),
            author_id: Set(new.author_id),
            author_name: Set(new.author_name),
            text: Set(new.text),
            created_at: Set(new.created),
        };
        Ok(model_to_domain(model.insert(&self.db).await?))
    }

    async fn find_by_item(&self, item_id: i64) -> DomainResult<Vec<Comment>> {
        let models = comment::Entity::find()
            .filter(comment::Column::ItemId.eq(item_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
