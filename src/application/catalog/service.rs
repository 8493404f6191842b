//! Item catalog service

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    classify, Comment, DomainError, DomainResult, Item, ItemAvailability, ItemPatch, ItemView,
    NewComment, NewItem, RepositoryProvider, User,
};
use crate::shared::{PageRequest, SharedClock};

/// Input of [`ItemService::create_item`].
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub name: String,
    pub description: String,
    pub available: bool,
}

pub struct ItemService {
    repos: Arc<dyn RepositoryProvider>,
    clock: SharedClock,
}

impl ItemService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: SharedClock) -> Self {
        Self { repos, clock }
    }

    async fn require_user(&self, user_id: i64) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))
    }

    async fn require_item(&self, item_id: i64) -> DomainResult<Item> {
        self.repos
            .items()
            .find_by_id(item_id)
            .await?
            .ok_or(DomainError::ItemNotFound(item_id))
    }

    /// Last and next reservation of an item at the current instant.
    async fn availability_of(&self, item_id: i64) -> DomainResult<ItemAvailability> {
        let history = self.repos.reservations().find_by_item_ordered(item_id).await?;
        Ok(classify(&history, self.clock.utc()))
    }

    pub async fn create_item(&self, owner_id: i64, input: CreateItem) -> DomainResult<Item> {
        self.require_user(owner_id).await?;

        if input.name.trim().is_empty() {
            return Err(DomainError::Validation("item name must not be blank".into()));
        }
        if input.description.trim().is_empty() {
            return Err(DomainError::Validation(
                "item description must not be blank".into(),
            ));
        }

        let item = self
            .repos
            .items()
            .create(NewItem {
                owner_id,
                name: input.name,
                description: input.description,
                available: input.available,
            })
            .await?;

        info!(item_id = item.id, owner_id, "Item created");
        Ok(item)
    }

    /// Apply a partial update; only the owner may change an item.
    pub async fn update_item(
        &self,
        acting_user_id: i64,
        item_id: i64,
        patch: ItemPatch,
    ) -> DomainResult<Item> {
        let mut item = self.require_item(item_id).await?;
        if item.owner_id != acting_user_id {
            return Err(DomainError::NotAuthorized(format!(
                "user {} does not own item {}",
                acting_user_id, item_id
            )));
        }
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::Validation("item name must not be blank".into()));
        }

        patch.apply(&mut item);
        let item = self.repos.items().update(item).await?;

        info!(item_id, available = item.available, "Item updated");
        Ok(item)
    }

    /// Remove an item with its reservations and comments; owner only.
    pub async fn delete_item(&self, acting_user_id: i64, item_id: i64) -> DomainResult<()> {
        let item = self.require_item(item_id).await?;
        if item.owner_id != acting_user_id {
            return Err(DomainError::NotAuthorized(format!(
                "user {} does not own item {}",
                acting_user_id, item_id
            )));
        }

        if !self.repos.items().delete(item_id).await? {
            return Err(DomainError::ItemNotFound(item_id));
        }
        info!(item_id, owner_id = acting_user_id, "Item deleted");
        Ok(())
    }

    /// Item detail; last/next reservations are shown to the owner only.
    pub async fn get_item(&self, viewer_id: i64, item_id: i64) -> DomainResult<ItemView> {
        let item = self.require_item(item_id).await?;
        let availability = if item.owner_id == viewer_id {
            Some(self.availability_of(item.id).await?)
        } else {
            None
        };
        let comments = self.repos.comments().find_by_item(item.id).await?;

        Ok(ItemView {
            item,
            availability,
            comments,
        })
    }

    /// The owner's items by ascending id, each annotated with last/next.
    pub async fn list_owner_items(
        &self,
        owner_id: i64,
        from: Option<i64>,
        size: Option<i64>,
    ) -> DomainResult<Vec<ItemView>> {
        self.require_user(owner_id).await?;
        let page = PageRequest::from_offset(from, size)?;

        let items = self.repos.items().find_by_owner(owner_id, page).await?;
        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let availability = self.availability_of(item.id).await?;
            let comments = self.repos.comments().find_by_item(item.id).await?;
            views.push(ItemView {
                item,
                availability: Some(availability),
                comments,
            });
        }
        Ok(views)
    }

    /// Available items whose name or description contains `text`.
    ///
    /// Blank text matches nothing.
    pub async fn search_items(
        &self,
        text: &str,
        from: Option<i64>,
        size: Option<i64>,
    ) -> DomainResult<Vec<Item>> {
        let page = PageRequest::from_offset(from, size)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.repos.items().search_available(text, page).await
    }

    /// Leave a comment on an item the user has finished renting.
    pub async fn add_comment(
        &self,
        user_id: i64,
        item_id: i64,
        text: &str,
    ) -> DomainResult<Comment> {
        let author = self.require_user(user_id).await?;
        let item = self.require_item(item_id).await?;

        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation("comment text must not be blank".into()));
        }

        let now = self.clock.utc();
        let finished = self
            .repos
            .reservations()
            .exists_finished_by_booker(author.id, item.id, now)
            .await?;
        if !finished {
            return Err(DomainError::CommentNotAllowed {
                user_id,
                item_id,
            });
        }

        let comment = self
            .repos
            .comments()
            .create(NewComment {
                item_id: item.id,
                author_id: author.id,
                author_name: author.name,
                text: text.to_string(),
                created: now,
            })
            .await?;

        info!(comment_id = comment.id, item_id, user_id, "Comment added");
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::application::reservation::fixtures::World;
    use crate::domain::NewReservation;

    fn service(world: &World) -> ItemService {
        ItemService::new(world.repos.clone(), world.clock())
    }

    async fn reserve(world: &World, from_d: i64, to_d: i64) -> i64 {
        let now = world.now();
        world
            .repos
            .reservations()
            .create(NewReservation {
                item_id: world.item.id,
                item_owner_id: world.owner.id,
                booker_id: world.booker.id,
                start: now + Duration::days(from_d),
                end: now + Duration::days(to_d),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn owner_view_carries_last_and_next() {
        let world = World::new().await;
        let past = reserve(&world, -3, -2).await;
        let future = reserve(&world, 1, 2).await;
        let svc = service(&world);

        let view = svc.get_item(world.owner.id, world.item.id).await.unwrap();
        let availability = view.availability.unwrap();
        assert_eq!(availability.last_reservation.unwrap().id, past);
        assert_eq!(availability.next_reservation.unwrap().id, future);

        let listed = svc.list_owner_items(world.owner.id, None, None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].availability.is_some());
    }

    #[tokio::test]
    async fn other_viewers_get_no_availability() {
        let world = World::new().await;
        reserve(&world, 1, 2).await;

        let view = service(&world)
            .get_item(world.booker.id, world.item.id)
            .await
            .unwrap();
        assert!(view.availability.is_none());
        assert_eq!(view.item, world.item);
    }

    #[tokio::test]
    async fn only_owner_updates() {
        let world = World::new().await;
        let svc = service(&world);
        let patch = ItemPatch {
            available: Some(false),
            ..Default::default()
        };

        let err = svc
            .update_item(world.booker.id, world.item.id, patch.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotAuthorized(_)));

        let updated = svc
            .update_item(world.owner.id, world.item.id, patch)
            .await
            .unwrap();
        assert!(!updated.available);
        assert_eq!(updated.name, world.item.name);
    }

    #[tokio::test]
    async fn create_requires_existing_owner_and_name() {
        let world = World::new().await;
        let svc = service(&world);
        let input = CreateItem {
            name: "Tent".into(),
            description: "Four person tent".into(),
            available: true,
        };

        let err = svc.create_item(999, input.clone()).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(999)));

        let err = svc
            .create_item(
                world.owner.id,
                CreateItem {
                    name: "  ".into(),
                    ..input.clone()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let item = svc.create_item(world.owner.id, input).await.unwrap();
        assert_eq!(item.owner_id, world.owner.id);
    }

    #[tokio::test]
    async fn search_skips_blank_text_and_unavailable_items() {
        let world = World::new().await;
        let svc = service(&world);

        assert!(svc.search_items("   ", None, None).await.unwrap().is_empty());

        let found = svc.search_items("LADDER", None, None).await.unwrap();
        assert_eq!(found, vec![world.item.clone()]);

        svc.update_item(
            world.owner.id,
            world.item.id,
            ItemPatch {
                available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(svc.search_items("ladder", None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_needs_a_finished_reservation() {
        let world = World::new().await;
        let svc = service(&world);
        reserve(&world, 1, 2).await;

        let err = svc
            .add_comment(world.booker.id, world.item.id, "Great ladder")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CommentNotAllowed { .. }));

        world.clock.advance(Duration::days(3));
        let comment = svc
            .add_comment(world.booker.id, world.item.id, "Great ladder")
            .await
            .unwrap();
        assert_eq!(comment.author_name, "Booker");
        assert_eq!(comment.created, world.now());

        let err = svc
            .add_comment(world.booker.id, world.item.id, " ")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let view = svc.get_item(world.booker.id, world.item.id).await.unwrap();
        assert_eq!(view.comments, vec![comment]);
    }

    #[tokio::test]
    async fn owner_deletes_item_and_its_reservations() {
        let world = World::new().await;
        reserve(&world, 1, 2).await;
        let svc = service(&world);

        let err = svc
            .delete_item(world.booker.id, world.item.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotAuthorized(_)));

        svc.delete_item(world.owner.id, world.item.id).await.unwrap();
        assert!(matches!(
            svc.get_item(world.owner.id, world.item.id).await.unwrap_err(),
            DomainError::ItemNotFound(_)
        ));
        assert!(world
            .repos
            .reservations()
            .find_by_item_ordered(world.item.id)
            .await
            .unwrap()
            .is_empty());

        let err = svc
            .delete_item(world.owner.id, world.item.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ItemNotFound(id) if id == world.item.id));
    }
}
