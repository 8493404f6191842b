//! Reservation module: lifecycle and participant queries
//!
//! `ReservationService` creates reservations and moves them out of
//! `WAITING`; `ReservationQueryService` lists a participant's reservations
//! by state tag.

pub mod queries;
pub mod service;

pub use queries::ReservationQueryService;
pub use service::{CreateReservation, ReservationService};

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};

    use crate::domain::{Item, NewItem, NewUser, RepositoryProvider, User};
    use crate::infrastructure::InMemoryStorage;
    use crate::shared::{ManualClock, SharedClock};

    /// In-memory world with an owner, a booker and one available item.
    pub struct World {
        pub repos: Arc<dyn RepositoryProvider>,
        pub clock: Arc<ManualClock>,
        pub owner: User,
        pub booker: User,
        pub item: Item,
    }

    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()
    }

    impl World {
        pub async fn new() -> Self {
            Self::on(Arc::new(InMemoryStorage::new())).await
        }

        /// Same world on top of a caller-supplied store.
        pub async fn on(repos: Arc<dyn RepositoryProvider>) -> Self {
            let owner = repos
                .users()
                .create(NewUser {
                    name: "Owner".into(),
                    email: "owner@example.com".into(),
                })
                .await
                .unwrap();
            let booker = repos
                .users()
                .create(NewUser {
                    name: "Booker".into(),
                    email: "booker@example.com".into(),
                })
                .await
                .unwrap();
            let item = repos
                .items()
                .create(NewItem {
                    owner_id: owner.id,
                    name: "Ladder".into(),
                    description: "Three metre aluminium ladder".into(),
                    available: true,
                })
                .await
                .unwrap();

            Self {
                repos,
                clock: ManualClock::shared(epoch()),
                owner,
                booker,
                item,
            }
        }

        pub fn clock(&self) -> SharedClock {
            self.clock.clone()
        }

        pub fn now(&self) -> DateTime<Utc> {
            mockable::Clock::utc(self.clock.as_ref())
        }
    }
}
