//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use crate::domain::reservation::{
    NewReservation, Reservation, ReservationFilter, ReservationRepository, ReservationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;
use crate::shared::PageRequest;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_where(
        &self,
        scope: Condition,
        filter: ReservationFilter,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Reservation>> {
        let mut query = reservation::Entity::find()
            .filter(scope)
            .filter(filter_condition(filter))
            .order_by_desc(reservation::Column::StartDate)
            .order_by_desc(reservation::Column::Id);
        if let Some(p) = page {
            query = query.offset(p.offset()).limit(p.size);
        }

        let models = query.all(&self.db).await?;
        models.into_iter().map(model_to_domain).collect()
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let status = ReservationStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!(
            "reservation {} has unrecognized status '{}'",
            m.id, m.status
        ))
    })?;
    Ok(Reservation {
        id: m.id,
        item_id: m.item_id,
        item_owner_id: m.item_owner_id,
        booker_id: m.booker_id,
        start: m.start_date,
        end: m.end_date,
        status,
    })
}

fn filter_condition(filter: ReservationFilter) -> Condition {
    use reservation::Column;

    match filter {
        ReservationFilter::All => Condition::all(),
        ReservationFilter::ActiveAt(t) => Condition::all()
            .add(Column::StartDate.lte(t))
            .add(Column::EndDate.gte(t)),
        ReservationFilter::EndedBefore(t) => Condition::all().add(Column::EndDate.lt(t)),
        ReservationFilter::StartsAfter(t) => Condition::all().add(Column::StartDate.gt(t)),
        ReservationFilter::Status(s) => Condition::all().add(Column::Status.eq(s.as_str())),
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, new: NewReservation) -> DomainResult<Reservation> {
        debug!(
            item_id = new.item_id,
            booker_id = new.booker_id,
            "Inserting reservation"
        );

        let model = reservation::ActiveModel {
            id: NotSet,
            item_id: Set(new.item_id),
            item_owner_id: Set(new.item_owner_id),
            booker_id: Set(new.booker_id),
            start_date: Set(new.start),
            end_date: Set(new.end),
            status: Set(ReservationStatus::Waiting.as_str().to_string()),
        };
        model_to_domain(model.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn update_status_if(
        &self,
        id: i64,
        expected: ReservationStatus,
        next: ReservationStatus,
    ) -> DomainResult<Option<Reservation>> {
        debug!(reservation_id = id, %expected, %next, "Conditional status update");

        let result = reservation::Entity::update_many()
            .col_expr(reservation::Column::Status, Expr::value(next.as_str()))
            .filter(reservation::Column::Id.eq(id))
            .filter(reservation::Column::Status.eq(expected.as_str()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn find_by_item_ordered(&self, item_id: i64) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::ItemId.eq(item_id))
            .order_by_asc(reservation::Column::StartDate)
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_for_booker(
        &self,
        booker_id: i64,
        filter: ReservationFilter,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Reservation>> {
        let scope = Condition::all().add(reservation::Column::BookerId.eq(booker_id));
        self.find_where(scope, filter, page).await
    }

    async fn find_for_owner(
        &self,
        owner_id: i64,
        filter: ReservationFilter,
        page: Option<PageRequest>,
    ) -> DomainResult<Vec<Reservation>> {
        let scope = Condition::all().add(reservation::Column::ItemOwnerId.eq(owner_id));
        self.find_where(scope, filter, page).await
    }

    async fn exists_finished_by_booker(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let count = reservation::Entity::find()
            .filter(reservation::Column::BookerId.eq(booker_id))
            .filter(reservation::Column::ItemId.eq(item_id))
            .filter(reservation::Column::EndDate.lt(now))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
