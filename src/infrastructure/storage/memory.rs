//! In-memory storage implementation

use std::cmp::Reverse;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Comment, CommentRepository, DomainError, DomainResult, Item, ItemRepository, NewComment,
    NewItem, NewReservation, NewUser, RepositoryProvider, Reservation, ReservationFilter,
    ReservationRepository, ReservationStatus, User, UserRepository,
};
use crate::shared::{paginate, PageRequest};

/// In-memory storage for development and testing.
///
/// Each aggregate lives in its own `DashMap`; a status transition holds the
/// record's shard lock across check-and-set, so concurrent transitions of
/// one reservation are serialized.
///
/// `emails` indexes users by email. Claiming an email goes through its
/// entry, so two registrations of one address cannot both succeed. Lock
/// order is always `emails` before `users`.
pub struct InMemoryStorage {
    users: DashMap<i64, User>,
    emails: DashMap<String, i64>,
    items: DashMap<i64, Item>,
    reservations: DashMap<i64, Reservation>,
    comments: DashMap<i64, Comment>,
    user_counter: AtomicI64,
    item_counter: AtomicI64,
    reservation_counter: AtomicI64,
    comment_counter: AtomicI64,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            items: DashMap::new(),
            reservations: DashMap::new(),
            comments: DashMap::new(),
            user_counter: AtomicI64::new(1),
            item_counter: AtomicI64::new(1),
            reservation_counter: AtomicI64::new(1),
            comment_counter: AtomicI64::new(1),
        }
    }

    fn list_reservations(
        &self,
        belongs: impl Fn(&Reservation) -> bool,
        filter: ReservationFilter,
        page: Option<PageRequest>,
    ) -> Vec<Reservation> {
        let mut rows: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|e| belongs(e.value()) && filter.matches(e.value()))
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|r| (Reverse(r.start), Reverse(r.id)));
        paginate(rows, page)
    }

    /// Drop an item with its reservations and comments.
    fn remove_item_cascade(&self, item_id: i64) -> bool {
        if self.items.remove(&item_id).is_none() {
            return false;
        }
        self.reservations.retain(|_, r| r.item_id != item_id);
        self.comments.retain(|_, c| c.item_id != item_id);
        true
    }

    fn sorted_items(&self, keep: impl Fn(&Item) -> bool) -> Vec<Item> {
        let mut rows: Vec<Item> = self
            .items
            .iter()
            .filter(|e| keep(e.value()))
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|i| i.id);
        rows
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn items(&self) -> &dyn ItemRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }

    fn comments(&self) -> &dyn CommentRepository {
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryStorage {
    async fn create(&self, user: NewUser) -> DomainResult<User> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::EmailAlreadyExists(user.email)),
            Entry::Vacant(slot) => {
                let id = self.user_counter.fetch_add(1, Ordering::SeqCst);
                let user = User {
                    id,
                    name: user.name,
                    email: user.email,
                };
                self.users.insert(id, user.clone());
                slot.insert(id);
                Ok(user)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut rows: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        rows.sort_by_key(|u| u.id);
        Ok(rows)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let Some(old_email) = self.users.get(&user.id).map(|u| u.email.clone()) else {
            return Err(DomainError::UserNotFound(user.id));
        };

        if old_email != user.email {
            match self.emails.entry(user.email.clone()) {
                Entry::Occupied(owner) if *owner.get() != user.id => {
                    return Err(DomainError::EmailAlreadyExists(user.email));
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(user.id);
                }
            }
            self.emails.remove_if(&old_email, |_, owner| *owner == user.id);
        }

        let Some(mut stored) = self.users.get_mut(&user.id) else {
            // deleted concurrently; release the claimed address
            self.emails.remove_if(&user.email, |_, owner| *owner == user.id);
            return Err(DomainError::UserNotFound(user.id));
        };
        stored.name = user.name;
        stored.email = user.email;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let Some((_, user)) = self.users.remove(&id) else {
            return Ok(false);
        };
        self.emails.remove_if(&user.email, |_, owner| *owner == id);

        let owned: Vec<i64> = self
            .items
            .iter()
            .filter(|e| e.value().owner_id == id)
            .map(|e| *e.key())
            .collect();
        for item_id in owned {
            self.remove_item_cascade(item_id);
        }
        self.reservations.retain(|_, r| r.booker_id != id);
        self.comments.retain(|_, c| c.author_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ItemRepository for InMemoryStorage {
    async fn create(&self, item: NewItem) -> DomainResult<Item> {
        let id = self.item_counter.fetch_add(1, Ordering::SeqCst);
        let item = Item {
            id,
            owner_id: item.owner_id,
            name: item.name,
            description: item.description,
            available: item.available,
        };
        self.items.insert(id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>> {
        Ok(self.items.get(&id).map(|i| i.clone()))
    }

    async fn update(&self, item: Item) -> DomainResult<Item> {
        let Some(mut stored) = self.items.get_mut(&item.id) else {
            return Err(DomainError::ItemNotFound(item.id));
        };
        stored.name = item.name;
        stored.description = item.description;
        stored.available = item.available;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        Ok(self.remove_item_cascade(id))
    }

    async fn find_by_owner(
        &self,
        owner_id: i64,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Item>> {
        Ok(paginate(self.sorted_items(|i| i.owner_id == owner_id), page))
    }

    async fn search_available(
        &self,
        text: &str,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let rows = self.sorted_items(|i| {
            i.available
                && (i.name.to_lowercase().contains(&needle)
                    || i.description.to_lowercase().contains(&needle))
        });
        Ok(paginate(rows, page))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStorage {
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation> {
        let id = self.reservation_counter.fetch_add(1, Ordering::SeqCst);
        let reservation = Reservation {
            id,
            item_id: reservation.item_id,
            item_owner_id: reservation.item_owner_id,
            booker_id: reservation.booker_id,
            start: reservation.start,
            end: reservation.end,
            status: ReservationStatus::Waiting,
        };
        self.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn update_status_if(
        &self,
        id: i64,
        expected: ReservationStatus,
        next: ReservationStatus,
    ) -> DomainResult<Option<Reservation>> {
        let Some(mut stored) = self.reservations.get_mut(&id) else {
            return Ok(None);
        };
        if stored.status != expected {
            return Ok(None);
        }
        stored.status = next;
        Ok(Some(stored.clone()))
    }

    async fn find_by_item_ordered(&self, item_id: i64) -> DomainResult<Vec<Reservation>> {
        let mut rows: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|e| e.value().item_id == item_id)
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|r| (r.start, r.id));
        Ok(rows)
    }

    async fn find_for_booker(
        &self,
        booker_id: i64,
        filter: ReservationFilter,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self.list_reservations(|r| r.booker_id == booker_id, filter, page))
    }

    async fn find_for_owner(
        &self,
        owner_id: i64,
        filter: ReservationFilter,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self.list_reservations(|r| r.item_owner_id == owner_id, filter, page))
    }

    async fn exists_finished_by_booker(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        Ok(self.reservations.iter().any(|e| {
            let r = e.value();
            r.booker_id == booker_id && r.item_id == item_id && r.is_past_at(now)
        }))
    }
}

#[async_trait]
impl CommentRepository for InMemoryStorage {
    async fn create(&self, comment: NewComment) -> DomainResult<Comment> {
        let id = self.comment_counter.fetch_add(1, Ordering::SeqCst);
        let comment = Comment {
            id,
            item_id: comment.item_id,
            author_id: comment.author_id,
            author_name: comment.author_name,
            text: comment.text,
            created: comment.created,
        };
        self.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn find_by_item(&self, item_id: i64) -> DomainResult<Vec<Comment>> {
        let mut rows: Vec<Comment> = self
            .comments
            .iter()
            .filter(|e| e.value().item_id == item_id)
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|c| (c.created, c.id));
        Ok(rows)
    }
}
