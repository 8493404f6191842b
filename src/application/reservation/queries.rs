//! Participant-scoped reservation listings filtered by state tag.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, Reservation, ReservationState,
};
use crate::shared::{PageRequest, SharedClock};

/// Which side of the reservation the participant is on.
#[derive(Debug, Clone, Copy)]
enum Participant {
    Booker(i64),
    Owner(i64),
}

pub struct ReservationQueryService {
    repos: Arc<dyn RepositoryProvider>,
    clock: SharedClock,
}

impl ReservationQueryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: SharedClock) -> Self {
        Self { repos, clock }
    }

    /// Reservations made by `booker_id` matching `state`, newest start first.
    pub async fn query_by_booker(
        &self,
        booker_id: i64,
        state: &str,
        from: Option<i64>,
        size: Option<i64>,
    ) -> DomainResult<Vec<Reservation>> {
        self.query(Participant::Booker(booker_id), state, from, size)
            .await
    }

    /// Reservations of items owned by `owner_id` matching `state`, newest start first.
    pub async fn query_by_owner(
        &self,
        owner_id: i64,
        state: &str,
        from: Option<i64>,
        size: Option<i64>,
    ) -> DomainResult<Vec<Reservation>> {
        self.query(Participant::Owner(owner_id), state, from, size)
            .await
    }

    async fn query(
        &self,
        who: Participant,
        state: &str,
        from: Option<i64>,
        size: Option<i64>,
    ) -> DomainResult<Vec<Reservation>> {
        let user_id = match who {
            Participant::Booker(id) | Participant::Owner(id) => id,
        };
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let state: ReservationState = state.parse()?;
        let page = PageRequest::from_offset(from, size)?;
        let filter = state.filter_at(self.clock.utc());

        debug!(?who, ?state, ?page, "Querying reservations");

        let reservations = self.repos.reservations();
        match who {
            Participant::Booker(id) => reservations.find_for_booker(id, filter, page).await,
            Participant::Owner(id) => reservations.find_for_owner(id, filter, page).await,
        }
    }
}
