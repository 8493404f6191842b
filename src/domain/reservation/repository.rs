//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{NewReservation, Reservation, ReservationStatus};
use super::state::ReservationFilter;
use crate::domain::DomainResult;
use crate::shared::PageRequest;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation in `Waiting` status and return it with its id
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>>;

    /// Set `status = next` only if the stored status is still `expected`.
    ///
    /// Returns the updated reservation, or `None` when the record is missing
    /// or its status no longer matches.
    async fn update_status_if(
        &self,
        id: i64,
        expected: ReservationStatus,
        next: ReservationStatus,
    ) -> DomainResult<Option<Reservation>>;

    /// All reservations of an item, ascending by start
    async fn find_by_item_ordered(&self, item_id: i64) -> DomainResult<Vec<Reservation>>;

    /// Reservations made by `booker_id`, descending by start
    async fn find_for_booker(
        &self,
        booker_id: i64,
        filter: ReservationFilter,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Reservation>>;

    /// Reservations of items owned by `owner_id`, descending by start
    async fn find_for_owner(
        &self,
        owner_id: i64,
        filter: ReservationFilter,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Reservation>>;

    /// Whether `booker_id` has a reservation of `item_id` that ended before `now`
    async fn exists_finished_by_booker(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<bool>;
}
