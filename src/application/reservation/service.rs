//! Reservation lifecycle: creation and the single owner decision.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    validate_window, DomainError, DomainResult, NewReservation, RepositoryProvider, Reservation,
    ReservationStatus,
};
use crate::shared::SharedClock;

/// Input of [`ReservationService::create`].
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Orchestrates reservation creation and status transitions.
pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    clock: SharedClock,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: SharedClock) -> Self {
        Self { repos, clock }
    }

    /// Create a `WAITING` reservation of `request.item_id` for `booker_id`.
    ///
    /// Checks run in a fixed order: booker, item, self-reservation,
    /// time window, availability. The first failing check is reported.
    pub async fn create(
        &self,
        booker_id: i64,
        request: CreateReservation,
    ) -> DomainResult<Reservation> {
        let now = self.clock.utc();

        self.repos
            .users()
            .find_by_id(booker_id)
            .await?
            .ok_or(DomainError::UserNotFound(booker_id))?;

        let item = self
            .repos
            .items()
            .find_by_id(request.item_id)
            .await?
            .ok_or(DomainError::ItemNotFound(request.item_id))?;

        if item.owner_id == booker_id {
            return Err(DomainError::SelfReservationForbidden {
                user_id: booker_id,
                item_id: item.id,
            });
        }

        validate_window(request.start, request.end, now)?;

        if !item.available {
            return Err(DomainError::ItemNotAvailable(item.id));
        }

        let reservation = self
            .repos
            .reservations()
            .create(NewReservation {
                item_id: item.id,
                item_owner_id: item.owner_id,
                booker_id,
                start: request.start,
                end: request.end,
            })
            .await?;

        metrics::counter!("reservations_created_total").increment(1);
        info!(
            reservation_id = reservation.id,
            item_id = item.id,
            booker_id,
            start = %reservation.start,
            end = %reservation.end,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Approve or reject a `WAITING` reservation as the item owner.
    ///
    /// The transition is a compare-and-swap on the stored status: of two
    /// concurrent decisions exactly one succeeds and the other observes
    /// `NotWaiting`.
    pub async fn change_status(
        &self,
        acting_user_id: i64,
        reservation_id: i64,
        approve: bool,
    ) -> DomainResult<Reservation> {
        let reservations = self.repos.reservations();

        let current = reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or(DomainError::ReservationNotFound(reservation_id))?;

        if !current.is_owned_by(acting_user_id) {
            warn!(
                reservation_id,
                acting_user_id, "Status change attempted by non-owner"
            );
            return Err(DomainError::NotAuthorized(format!(
                "user {} does not own the item of reservation {}",
                acting_user_id, reservation_id
            )));
        }

        if !current.is_waiting() {
            return Err(DomainError::NotWaiting(reservation_id));
        }

        let next = ReservationStatus::decided(approve);
        let updated = reservations
            .update_status_if(reservation_id, ReservationStatus::Waiting, next)
            .await?;

        let Some(updated) = updated else {
            debug!(reservation_id, "Lost status race");
            metrics::counter!("reservation_transitions_total", "outcome" => "conflict")
                .increment(1);
            return Err(DomainError::NotWaiting(reservation_id));
        };

        metrics::counter!("reservation_transitions_total", "outcome" => next.as_str())
            .increment(1);
        info!(reservation_id, status = %next, "Reservation status changed");
        Ok(updated)
    }

    /// Load a reservation visible to `acting_user_id` (its booker or the item owner).
    pub async fn get_detail(
        &self,
        acting_user_id: i64,
        reservation_id: i64,
    ) -> DomainResult<Reservation> {
        let reservation = self
            .repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or(DomainError::ReservationNotFound(reservation_id))?;

        if !reservation.is_participant(acting_user_id) {
            return Err(DomainError::NotAuthorized(format!(
                "user {} is not a participant of reservation {}",
                acting_user_id, reservation_id
            )));
        }
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::application::reservation::fixtures::World;
    use crate::domain::{ItemPatch, NewUser};
    use crate::infrastructure::database::repositories::test_support::migrated_db;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    fn service(world: &World) -> ReservationService {
        ReservationService::new(world.repos.clone(), world.clock())
    }

    fn window(world: &World, from_h: i64, to_h: i64) -> CreateReservation {
        CreateReservation {
            item_id: world.item.id,
            start: world.now() + Duration::hours(from_h),
            end: world.now() + Duration::hours(to_h),
        }
    }

    async fn make_unavailable(world: &World) {
        let mut item = world.item.clone();
        ItemPatch {
            available: Some(false),
            ..Default::default()
        }
        .apply(&mut item);
        world.repos.items().update(item).await.unwrap();
    }

    #[tokio::test]
    async fn creates_waiting_reservation() {
        let world = World::new().await;
        let svc = service(&world);

        let r = svc
            .create(world.booker.id, window(&world, 2, 4))
            .await
            .unwrap();

        assert_eq!(r.status, ReservationStatus::Waiting);
        assert_eq!(r.booker_id, world.booker.id);
        assert_eq!(r.item_owner_id, world.owner.id);
        assert!(r.start < r.end);
        assert!(r.start >= world.now());
    }

    #[tokio::test]
    async fn start_equal_to_now_is_accepted() {
        let world = World::new().await;
        let r = service(&world)
            .create(world.booker.id, window(&world, 0, 1))
            .await
            .unwrap();
        assert_eq!(r.start, world.now());
    }

    #[tokio::test]
    async fn unavailable_item_is_rejected() {
        let world = World::new().await;
        make_unavailable(&world).await;

        let err = service(&world)
            .create(world.booker.id, window(&world, 2, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ItemNotAvailable(id) if id == world.item.id));
    }

    #[tokio::test]
    async fn owner_cannot_reserve_own_item() {
        let world = World::new().await;
        let err = service(&world)
            .create(world.owner.id, window(&world, 2, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SelfReservationForbidden { .. }));
    }

    #[tokio::test]
    async fn checks_run_in_fixed_order() {
        let world = World::new().await;
        let svc = service(&world);
        make_unavailable(&world).await;

        // Unknown booker wins over everything else.
        let mut bad = window(&world, -4, -6);
        bad.item_id = 999;
        let err = svc.create(999, bad.clone()).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(999)));

        let err = svc.create(world.booker.id, bad).await.unwrap_err();
        assert!(matches!(err, DomainError::ItemNotFound(999)));

        // Owner on own, unavailable item with a bad window.
        let err = svc
            .create(world.owner.id, window(&world, -4, -6))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SelfReservationForbidden { .. }));

        // Past start reported before the inverted range.
        let err = svc
            .create(world.booker.id, window(&world, -4, -6))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PastStartTime { .. }));

        let err = svc
            .create(world.booker.id, window(&world, 4, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateRange { .. }));

        // Temporal checks precede availability.
        let err = svc
            .create(world.booker.id, window(&world, 2, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ItemNotAvailable(_)));
    }

    #[tokio::test]
    async fn owner_decides_exactly_once() {
        let world = World::new().await;
        let svc = service(&world);
        let r = svc
            .create(world.booker.id, window(&world, 2, 4))
            .await
            .unwrap();

        let approved = svc.change_status(world.owner.id, r.id, true).await.unwrap();
        assert_eq!(approved.status, ReservationStatus::Approved);
        assert_eq!(approved.id, r.id);

        let err = svc
            .change_status(world.owner.id, r.id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotWaiting(id) if id == r.id));

        let stored = svc.get_detail(world.booker.id, r.id).await.unwrap();
        assert_eq!(stored.status, ReservationStatus::Approved);
    }

    #[tokio::test]
    async fn rejection_is_terminal_too() {
        let world = World::new().await;
        let svc = service(&world);
        let r = svc
            .create(world.booker.id, window(&world, 2, 4))
            .await
            .unwrap();

        let rejected = svc
            .change_status(world.owner.id, r.id, false)
            .await
            .unwrap();
        assert_eq!(rejected.status, ReservationStatus::Rejected);
        assert!(svc.change_status(world.owner.id, r.id, true).await.is_err());
    }

    #[tokio::test]
    async fn only_the_owner_may_decide() {
        let world = World::new().await;
        let svc = service(&world);
        let r = svc
            .create(world.booker.id, window(&world, 2, 4))
            .await
            .unwrap();

        let err = svc
            .change_status(world.booker.id, r.id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotAuthorized(_)));

        let err = svc.change_status(world.owner.id, 404, true).await.unwrap_err();
        assert!(matches!(err, DomainError::ReservationNotFound(404)));
    }

    /// Fire approve and reject decisions at one reservation in parallel
    /// and count the successful ones.
    async fn race_decisions(world: &World) -> usize {
        let svc = Arc::new(service(world));
        let r = svc
            .create(world.booker.id, window(world, 2, 4))
            .await
            .unwrap();

        let handles: Vec<_> = [true, false, true, false, true, false, true, false]
            .into_iter()
            .map(|approve| {
                let svc = svc.clone();
                let owner = world.owner.id;
                tokio::spawn(async move { svc.change_status(owner, r.id, approve).await })
            })
            .collect();

        let mut wins = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => wins += 1,
                Err(e) => assert!(matches!(e, DomainError::NotWaiting(_))),
            }
        }

        let stored = world
            .repos
            .reservations()
            .find_by_id(r.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.status.is_terminal());
        wins
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_decisions_have_one_winner() {
        let world = World::new().await;
        assert_eq!(race_decisions(&world).await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_decisions_have_one_winner_on_sqlite() {
        let db = migrated_db().await;
        let world = World::on(Arc::new(SeaOrmRepositoryProvider::new(db))).await;
        assert_eq!(race_decisions(&world).await, 1);
    }

    #[tokio::test]
    async fn detail_is_visible_to_participants_only() {
        let world = World::new().await;
        let svc = service(&world);
        let stranger = world
            .repos
            .users()
            .create(NewUser {
                name: "Stranger".into(),
                email: "stranger@example.com".into(),
            })
            .await
            .unwrap();
        let r = svc
            .create(world.booker.id, window(&world, 2, 4))
            .await
            .unwrap();

        assert_eq!(svc.get_detail(world.owner.id, r.id).await.unwrap(), r);
        assert_eq!(svc.get_detail(world.booker.id, r.id).await.unwrap(), r);
        let err = svc.get_detail(stranger.id, r.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotAuthorized(_)));
        let err = svc.get_detail(world.owner.id, 77).await.unwrap_err();
        assert!(matches!(err, DomainError::ReservationNotFound(77)));
    }
}
