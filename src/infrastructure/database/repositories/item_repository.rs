//! SeaORM implementation of ItemRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::debug;

use crate::domain::item::{Item, ItemRepository, NewItem};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::item;
use crate::shared::PageRequest;

pub struct SeaOrmItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: item::Model) -> Item {
    Item {
        id: m.id,
        owner_id: m.owner_id,
        name: m.name,
        description: m.description,
        available: m.available,
    }
}

fn with_page(query: Select<item::Entity>, page: Option<PageRequest>) -> Select<item::Entity> {
    match page {
        Some(p) => query.offset(p.offset()).limit(p.size),
        None => query,
    }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn create(&self, new: NewItem) -> DomainResult<Item> {
        debug!(owner_id = new.owner_id, name = %new.name, "Inserting item");

        let model = item::ActiveModel {
            id: NotSet,
            owner_id: Set(new.owner_id),
            name: Set(new.name),
            description: Set(new.description),
            available: Set(new.available),
        };
        Ok(model_to_domain(model.insert(&self.db).await?))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>> {
        let model = item::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, it: Item) -> DomainResult<Item> {
        debug!(item_id = it.id, "Updating item");

        let existing = item::Entity::find_by_id(it.id).one(&self.db).await?;
        if existing.is_none() {
            return Err(DomainError::ItemNotFound(it.id));
        }

        let model = item::ActiveModel {
            id: Set(it.id),
            owner_id: Set(it.owner_id),
            name: Set(it.name),
            description: Set(it.description),
            available: Set(it.available),
        };
        Ok(model_to_domain(model.update(&self.db).await?))
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        debug!(item_id = id, "Deleting item");
        let result = item::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_owner(
        &self,
        owner_id: i64,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Item>> {
        let query = item::Entity::find()
            .filter(item::Column::OwnerId.eq(owner_id))
            .order_by_asc(item::Column::Id);
        let models = with_page(query, page).all(&self.db).await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn search_available(
        &self,
        text: &str,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Item>> {
        let pattern = format!("%{}%", text.to_lowercase());
        let matches_text = Condition::any()
            .add(Expr::expr(Func::lower(Expr::col(item::Column::Name))).like(pattern.clone()))
            .add(Expr::expr(Func::lower(Expr::col(item::Column::Description))).like(pattern));

        let query = item::Entity::find()
            .filter(item::Column::Available.eq(true))
            .filter(matches_text)
            .order_by_asc(item::Column::Id);
        let models = with_page(query, page).all(&self.db).await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{NewUser, UserRepository};
    use crate::infrastructure::database::repositories::test_support::migrated_db;
    use crate::infrastructure::database::repositories::SeaOrmUserRepository;

    async fn setup() -> (SeaOrmItemRepository, i64) {
        let db = migrated_db().await;
        let owner = SeaOrmUserRepository::new(db.clone())
            .create(NewUser {
                name: "Owner".into(),
                email: "owner@example.com".into(),
            })
            .await
            .unwrap();
        (SeaOrmItemRepository::new(db), owner.id)
    }

    fn new_item(owner_id: i64, name: &str, description: &str, available: bool) -> NewItem {
        NewItem {
            owner_id,
            name: name.into(),
            description: description.into(),
            available,
        }
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_skips_unavailable() {
        let (repo, owner) = setup().await;
        let drill = repo
            .create(new_item(owner, "Power Drill", "cordless", true))
            .await
            .unwrap();
        repo.create(new_item(owner, "Old drill", "broken", false))
            .await
            .unwrap();
        let saw = repo
            .create(new_item(owner, "Saw", "cuts better than a DRILL", true))
            .await
            .unwrap();

        let found = repo.search_available("drIll", None).await.unwrap();
        assert_eq!(found, vec![drill, saw]);
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (repo, owner) = setup().await;
        let mut it = repo
            .create(new_item(owner, "Tent", "two person", true))
            .await
            .unwrap();
        it.available = false;
        it.description = "leaks a little".into();

        let updated = repo.update(it.clone()).await.unwrap();
        assert_eq!(updated, it);
        assert_eq!(repo.find_by_id(it.id).await.unwrap(), Some(it));
    }

    #[tokio::test]
    async fn owner_listing_is_paged_by_id() {
        let (repo, owner) = setup().await;
        let mut ids = Vec::new();
        for n in 0..5 {
            let it = repo
                .create(new_item(owner, &format!("item {n}"), "", true))
                .await
                .unwrap();
            ids.push(it.id);
        }

        let page = PageRequest { page: 1, size: 2 };
        let listed: Vec<i64> = repo
            .find_by_owner(owner, Some(page))
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(listed, ids[2..4].to_vec());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let (repo, owner) = setup().await;
        let it = repo
            .create(new_item(owner, "Kettle", "", true))
            .await
            .unwrap();

        assert!(repo.delete(it.id).await.unwrap());
        assert_eq!(repo.find_by_id(it.id).await.unwrap(), None);
        assert!(!repo.delete(it.id).await.unwrap());
    }
}
